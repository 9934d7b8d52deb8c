use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use eventmgr_civic::{CivicClient, RepresentativeSource};
use eventmgr_config::load_api_key;
use eventmgr_core::domain::{clean_phone_number, clean_zip_code, Attendee};
use eventmgr_letters::{LetterContext, LetterTemplate, LetterWriter, Roster};
use serde::Serialize;
use tracing::{debug, warn};

pub const STARTUP_MESSAGE: &str = "Event Manager Initialized!";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LettersReport {
    pub written: usize,
    pub unresolved: usize,
}

/// Writes a thank-you letter for every attendee in the roster. A missing
/// roster is not an error: the run ends quietly.
pub fn generate_letters(ctx: &Context<'_>) -> Result<()> {
    let config = ctx.config;
    if !config.input.exists() {
        debug!(path = %config.input.display(), "roster not found, nothing to do");
        return Ok(());
    }

    println!("{STARTUP_MESSAGE}");

    let mut attendees = Roster::open(&config.input)
        .with_context(|| format!("open roster {}", config.input.display()))?
        .peekable();
    let template = LetterTemplate::load(&config.template)
        .with_context(|| format!("load letter template {}", config.template.display()))?;
    let writer = LetterWriter::new(&config.output_dir);

    // The key is only needed once there is someone to look up.
    let report = if attendees.peek().is_none() {
        debug!(path = %config.input.display(), "roster has no attendees");
        LettersReport::default()
    } else {
        let api_key = load_api_key(&config.secret_key)
            .with_context(|| format!("load api key {}", config.secret_key.display()))?;
        let client =
            CivicClient::new(api_key, &config.civic).with_context(|| "build civic client")?;
        debug!(endpoint = %client.endpoint(), "civic client ready");
        write_letters(attendees, &template, &client, &writer)?
    };

    debug!(
        written = report.written,
        unresolved = report.unresolved,
        dir = %writer.dir().display(),
        "letters written"
    );
    if ctx.json {
        return print_json(&report);
    }
    Ok(())
}

/// Looks up, renders and saves one letter per attendee, in roster order.
/// Stops at the first failure; letters already written stay on disk.
pub fn write_letters<I>(
    attendees: I,
    template: &LetterTemplate,
    source: &dyn RepresentativeSource,
    writer: &LetterWriter,
) -> Result<LettersReport>
where
    I: IntoIterator<Item = eventmgr_letters::Result<Attendee>>,
{
    let mut report = LettersReport::default();

    for (row, attendee) in attendees.into_iter().enumerate() {
        let attendee = attendee.with_context(|| format!("read roster row {}", row + 1))?;
        let id = attendee.id();
        let name = attendee.first_name().unwrap_or_default();
        let zipcode = clean_zip_code(attendee.zipcode().unwrap_or_default());
        let phone = clean_phone_number(attendee.phone().unwrap_or_default());

        let legislators = source
            .legislators_by_zipcode(&zipcode)
            .with_context(|| format!("look up representatives for attendee {id}"))?;
        if !legislators.is_resolved() {
            warn!(id = %id, zipcode = %zipcode, "representatives not found, using fallback text");
            report.unresolved += 1;
        }

        let letter = template
            .render(&LetterContext {
                id,
                name,
                first_name: name,
                zipcode: &zipcode,
                phone: &phone,
                legislators: &legislators,
                officials: legislators.officials(),
                fallback: legislators.fallback(),
                attendee: attendee.fields(),
            })
            .with_context(|| format!("render letter for attendee {id}"))?;

        let path = writer
            .save_thank_you_letter(id, &letter)
            .with_context(|| format!("save letter for attendee {id}"))?;
        debug!(id = %id, source = source.source_name(), path = %path.display(), "letter saved");
        report.written += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::{write_letters, LettersReport};
    use eventmgr_civic::{CivicError, Legislators, Official, RepresentativeSource};
    use eventmgr_letters::{LetterTemplate, LetterWriter, Roster};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str = "\
<p>Dear {{ name }},</p>
<p>ZIP {{ zipcode }} / phone {{ phone }}</p>
{% if fallback %}<p>{{ fallback }}</p>{% else %}{% for official in officials %}<p>{{ official.name }}</p>
{% endfor %}{% endif %}";

    /// Answers from a fixed list and records every ZIP it was asked about.
    struct FakeSource {
        known: Vec<(&'static str, &'static str)>,
        asked: RefCell<Vec<String>>,
    }

    impl FakeSource {
        fn new(known: Vec<(&'static str, &'static str)>) -> Self {
            Self {
                known,
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    impl RepresentativeSource for FakeSource {
        fn source_name(&self) -> &'static str {
            "fake"
        }

        fn legislators_by_zipcode(&self, zipcode: &str) -> eventmgr_civic::Result<Legislators> {
            self.asked.borrow_mut().push(zipcode.to_string());
            let officials: Vec<Official> = self
                .known
                .iter()
                .filter(|(zip, _)| *zip == zipcode)
                .map(|(_, name)| {
                    serde_json::from_value(serde_json::json!({ "name": name })).expect("official")
                })
                .collect();
            if officials.is_empty() {
                return Ok(Legislators::unresolved());
            }
            Ok(Legislators::Officials(officials))
        }
    }

    struct DownSource;

    impl RepresentativeSource for DownSource {
        fn source_name(&self) -> &'static str {
            "down"
        }

        fn legislators_by_zipcode(&self, zipcode: &str) -> eventmgr_civic::Result<Legislators> {
            if zipcode == "20010" {
                return Ok(Legislators::unresolved());
            }
            Err(CivicError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    fn roster(data: &str) -> Roster<&[u8]> {
        Roster::from_reader(data.as_bytes()).expect("roster")
    }

    fn template() -> LetterTemplate {
        LetterTemplate::compile(TEMPLATE.to_string()).expect("template")
    }

    #[test]
    fn writes_fallback_letter_with_padded_zip() {
        let temp = TempDir::new().expect("temp dir");
        let writer = LetterWriter::new(temp.path().join("output"));
        let source = FakeSource::new(vec![]);

        let data = ",RegDate,first_Name,HomePhone,Zipcode\n1,11/08/16 17:45,Allison,1-615-438-5000,1234\n";
        let report = write_letters(roster(data), &template(), &source, &writer).expect("letters");

        assert_eq!(
            report,
            LettersReport {
                written: 1,
                unresolved: 1
            }
        );
        assert_eq!(*source.asked.borrow(), vec!["01234".to_string()]);

        let letter =
            fs::read_to_string(temp.path().join("output/thanks_1.html")).expect("read letter");
        assert!(letter.contains("Dear Allison,"));
        assert!(letter.contains("ZIP 01234 / phone 6154385000"));
        assert!(letter.contains(eventmgr_civic::FALLBACK_MESSAGE));
    }

    #[test]
    fn writes_officials_for_known_zip() {
        let temp = TempDir::new().expect("temp dir");
        let writer = LetterWriter::new(temp.path().join("output"));
        let source = FakeSource::new(vec![
            ("20010", "Eleanor Holmes Norton"),
            ("33703", "Marco Rubio"),
        ]);

        let data = "\
,first_Name,HomePhone,Zipcode
1,Allison,6154385000,20010
2,SArah,555-1212,33703
3,Jill,,
";
        let report = write_letters(roster(data), &template(), &source, &writer).expect("letters");
        assert_eq!(report.written, 3);
        assert_eq!(report.unresolved, 1);
        assert_eq!(
            *source.asked.borrow(),
            vec!["20010".to_string(), "33703".to_string(), "00000".to_string()]
        );

        let first = fs::read_to_string(writer.dir().join("thanks_1.html")).expect("letter 1");
        assert!(first.contains("<p>Eleanor Holmes Norton</p>"));
        let second = fs::read_to_string(writer.dir().join("thanks_2.html")).expect("letter 2");
        assert!(second.contains("ZIP 33703 / phone </p>"));
        assert!(second.contains("<p>Marco Rubio</p>"));
    }

    #[test]
    fn rerun_overwrites_with_identical_content() {
        let temp = TempDir::new().expect("temp dir");
        let writer = LetterWriter::new(temp.path().join("output"));
        let source = FakeSource::new(vec![("20010", "Eleanor Holmes Norton")]);
        let data = ",first_Name,Zipcode\n1,Allison,20010\n2,Sarah,98104\n";

        write_letters(roster(data), &template(), &source, &writer).expect("first run");
        let before = fs::read_to_string(writer.dir().join("thanks_1.html")).expect("letter");
        write_letters(roster(data), &template(), &source, &writer).expect("second run");
        let after = fs::read_to_string(writer.dir().join("thanks_1.html")).expect("letter");

        assert_eq!(before, after);
        assert_eq!(fs::read_dir(writer.dir()).expect("read dir").count(), 2);
    }

    #[test]
    fn lookup_failure_stops_run_and_keeps_earlier_letters() {
        let temp = TempDir::new().expect("temp dir");
        let writer = LetterWriter::new(temp.path().join("output"));
        let data = ",first_Name,Zipcode\n1,Allison,20010\n2,Sarah,98104\n3,Jill,20009\n";

        let err = write_letters(roster(data), &template(), &DownSource, &writer).unwrap_err();
        assert!(err.to_string().contains("attendee 2"));
        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<CivicError>().is_some()));

        assert!(writer.dir().join("thanks_1.html").exists());
        assert!(!writer.dir().join("thanks_2.html").exists());
        assert!(!writer.dir().join("thanks_3.html").exists());
    }

    #[test]
    fn blank_id_row_does_not_stop_later_letters() {
        let temp = TempDir::new().expect("temp dir");
        let writer = LetterWriter::new(temp.path().join("output"));
        let source = FakeSource::new(vec![]);
        let data = ",first_Name,Zipcode\n,Ann,1234\n..,Cy,1\n2,Bob,1\n";

        let report = write_letters(roster(data), &template(), &source, &writer).expect("letters");
        assert_eq!(report.written, 3);

        let blank = fs::read_to_string(writer.dir().join("thanks_.html")).expect("blank id");
        assert!(blank.contains("Dear Ann,"));
        let dots = fs::read_to_string(writer.dir().join("thanks_...html")).expect("dot id");
        assert!(dots.contains("Dear Cy,"));
        let second = fs::read_to_string(writer.dir().join("thanks_2.html")).expect("letter 2");
        assert!(second.contains("Dear Bob,"));
    }
}
