use eventmgr_letters::{LetterError, LetterTemplate, LetterWriter};
use std::fs;
use tempfile::TempDir;

#[test]
fn save_creates_missing_output_dir() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path().join("output");
    let writer = LetterWriter::new(&dir);

    let path = writer
        .save_thank_you_letter("1", "<p>Thanks Allison</p>")
        .expect("save letter");

    assert_eq!(path, dir.join("thanks_1.html"));
    let written = fs::read_to_string(&path).expect("read letter");
    assert_eq!(written, "<p>Thanks Allison</p>\n");
}

#[test]
fn save_tolerates_existing_dir_and_overwrites() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path().join("output");
    fs::create_dir(&dir).expect("mkdir");
    fs::write(dir.join("thanks_2.html"), "stale letter with more text\n").expect("seed");

    let writer = LetterWriter::new(&dir);
    writer
        .save_thank_you_letter("2", "fresh\n")
        .expect("save letter");
    writer
        .save_thank_you_letter("2", "fresh\n")
        .expect("save letter again");

    let written = fs::read_to_string(dir.join("thanks_2.html")).expect("read letter");
    assert_eq!(written, "fresh\n");
    assert_eq!(fs::read_dir(&dir).expect("read dir").count(), 1);
}

#[test]
fn save_rejects_ids_outside_output_dir() {
    let temp = TempDir::new().expect("temp dir");
    let writer = LetterWriter::new(temp.path().join("output"));

    let err = writer
        .save_thank_you_letter("../escape", "nope")
        .unwrap_err();
    assert!(matches!(err, LetterError::InvalidId(_)));
    assert!(!temp.path().join("escape.html").exists());
}

#[test]
fn load_template_requires_file() {
    let temp = TempDir::new().expect("temp dir");
    let err = LetterTemplate::load(&temp.path().join("form_letter.html.erb"))
        .err()
        .expect("missing template");
    assert!(matches!(err, LetterError::Read { .. }));
}

#[test]
fn save_accepts_blank_and_dot_ids() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path().join("output");
    let writer = LetterWriter::new(&dir);

    for id in ["", ".."] {
        writer
            .save_thank_you_letter(id, "<p>Thanks</p>")
            .expect("save letter");
    }

    assert!(dir.join("thanks_.html").is_file());
    assert!(dir.join("thanks_...html").is_file());
    assert_eq!(fs::read_dir(&dir).expect("read dir").count(), 2);
}
