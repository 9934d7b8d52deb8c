pub mod stats;

pub use stats::{target_day_of_week, target_time_of_day, Histogram};
