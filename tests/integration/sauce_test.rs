//! SAUCE metadata extraction from complete files.

use retroscope::sauce::{self, SauceRecord};

use crate::helpers::{sauce_record, with_sauce};

fn parse(buf: &[u8]) -> SauceRecord {
    sauce::extract(buf).expect("record should parse")
}

#[test]
fn fields_are_trimmed_and_decoded() {
    let buf = with_sauce(b"art", &[], sauce_record("Neon Dreams", "Luna", "IBM VGA", 0));
    let record = parse(&buf);
    assert_eq!(record.version, "00");
    assert_eq!(record.title, "Neon Dreams");
    assert_eq!(record.author, "Luna");
    assert_eq!(record.group, "");
    assert_eq!(record.file_size, 4096);
    assert_eq!(record.font_name, "IBM VGA");
}

#[test]
fn derived_values() {
    let buf = with_sauce(b"art", &[], sauce_record("t", "a", "IBM VGA", 0));
    let record = parse(&buf);
    assert_eq!(
        record.date(),
        chrono::NaiveDate::from_ymd_opt(1994, 3, 15)
    );
    assert_eq!(record.columns(), 80);
    assert_eq!(record.lines(), Some(25));
    assert!(record.ice_colors());
    assert_eq!(record.data_type_name(), "Character");
    assert_eq!(record.file_type_name(), "ANSI text");
    assert_eq!(record.font_family(), "ibm_vga_9x16");
}

#[test]
fn comment_block_is_collected() {
    let buf = with_sauce(
        b"art",
        &["greets to all", "call my board"],
        sauce_record("t", "a", "IBM VGA", 2),
    );
    let located = sauce::locate(&buf).unwrap();
    assert_eq!(located.record.comments, vec!["greets to all", "call my board"]);
    assert_eq!(located.content_len, 3);
}

#[test]
fn file_without_record_has_none() {
    assert!(sauce::extract(b"just some text").is_none());
    assert!(sauce::extract(b"").is_none());
}

#[test]
fn corrupt_date_rejects_the_record() {
    let mut record = sauce_record("t", "a", "IBM VGA", 0);
    record[82..90].copy_from_slice(b"19XX0101");
    assert!(sauce::extract(&with_sauce(b"art", &[], record)).is_none());
}

#[test]
fn truncated_record_is_ignored() {
    let record = sauce_record("t", "a", "IBM VGA", 0);
    let mut buf = b"art".to_vec();
    buf.extend_from_slice(&record[..100]);
    assert!(sauce::extract(&buf).is_none());
}
