use crate::domain::Attendee;
use crate::error::CoreError;
use crate::time::parse_registration_date;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Occurrence counts by integer key. Keys never observed read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: BTreeMap<u32, usize>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: u32) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn get(&self, key: u32) -> usize {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.counts.iter().map(|(key, count)| (*key, *count))
    }
}

/// Registrations per hour of day (0-23).
pub fn target_time_of_day(attendees: &[Attendee]) -> Result<Histogram, CoreError> {
    histogram_by(attendees, |time| time.hour())
}

/// Registrations per weekday, 0 = Sunday through 6 = Saturday.
pub fn target_day_of_week(attendees: &[Attendee]) -> Result<Histogram, CoreError> {
    histogram_by(attendees, |time| time.weekday().num_days_from_sunday())
}

fn histogram_by<F>(attendees: &[Attendee], key: F) -> Result<Histogram, CoreError>
where
    F: Fn(&NaiveDateTime) -> u32,
{
    let mut histogram = Histogram::new();
    for attendee in attendees {
        let time = registration_time(attendee)?;
        histogram.record(key(&time));
    }
    Ok(histogram)
}

fn registration_time(attendee: &Attendee) -> Result<NaiveDateTime, CoreError> {
    let raw = attendee.regdate().ok_or_else(|| CoreError::MissingField {
        id: attendee.id().to_string(),
        field: "regdate",
    })?;
    parse_registration_date(raw).map_err(|source| CoreError::Time {
        id: attendee.id().to_string(),
        source,
    })
}
