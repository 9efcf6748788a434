//! File Sink Round-trip Tests
//!
//! A row written to the CSV log and read back has exactly three fields:
//! timestamp, the first 50 characters of the input, and the level label.

use chrono::NaiveDate;
use eli5::sink::{FileSink, LogEntry, LogSink, FILE_INPUT_PREFIX_CHARS};
use tempfile::TempDir;

fn entry(input: &str, label: &str) -> LogEntry {
    let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_micro_opt(14, 5, 7, 123456)
        .unwrap();
    LogEntry::at(timestamp, label, input)
}

fn prefix(s: &str) -> String {
    s.chars().take(FILE_INPUT_PREFIX_CHARS).collect()
}

#[tokio::test]
async fn test_rows_read_back_with_three_fields() {
    let temp = TempDir::new().unwrap();
    let sink = FileSink::new(temp.path().join("explain_log.csv"));

    let inputs = [
        "What is quantum computing?",
        "Commas, everywhere, in, this, sentence",
        "She said \"hello\" and left",
        "first line\nsecond line\r\nthird line",
        "A very long paragraph that keeps going well past the fifty character limit of the file log",
        "émojis 🚀 and ünïcödé characters count as one each, even past fifty of them",
    ];

    for input in inputs {
        sink.append(&entry(input, "High School")).await.unwrap();
    }

    let rows = sink.read_rows().await.unwrap();
    assert_eq!(rows.len(), inputs.len());

    for (row, input) in rows.iter().zip(inputs) {
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], "2024-03-09 14:05:07");
        assert_eq!(row[1], prefix(input));
        assert!(row[1].chars().count() <= FILE_INPUT_PREFIX_CHARS);
        assert_eq!(row[2], "High School");
    }
}

#[tokio::test]
async fn test_appends_accumulate_across_sink_instances() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("explain_log.csv");

    FileSink::new(&path)
        .append(&entry("first", "I'm 5"))
        .await
        .unwrap();
    FileSink::new(&path)
        .append(&entry("second", "Intern"))
        .await
        .unwrap();

    let rows = FileSink::new(&path).read_rows().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], "first");
    assert_eq!(rows[1][2], "Intern");
}

#[tokio::test]
async fn test_unwritable_path_is_an_error() {
    let temp = TempDir::new().unwrap();
    let sink = FileSink::new(temp.path().join("missing_dir").join("log.csv"));
    assert!(sink.append(&entry("x", "College")).await.is_err());
}

#[test]
fn test_remote_row_keeps_full_input() {
    let long = "y".repeat(120);
    let row = entry(&long, "College").remote_row();
    assert_eq!(row.len(), 3);
    assert_eq!(row[0], "2024-03-09T14:05:07.123456");
    assert_eq!(row[1], "College");
    assert_eq!(row[2], long);
}
