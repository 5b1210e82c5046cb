//! Unit tests for transcript parsing

use chatburst::transcript::{
    LineGrammar, LineShape, ParserOptions, TimestampResolver, TimestampSource, TranscriptParser,
};
use chrono::{NaiveDate, NaiveDateTime};

use crate::helpers::{fixed_now, load_fixture};

fn parser() -> TranscriptParser {
    TranscriptParser::new(ParserOptions::new(fixed_now()))
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

#[test]
fn bracketed_export_reassembles_messages() {
    let parsed = parser().parse(&load_fixture("bracketed.txt"));
    assert_eq!(parsed.messages.len(), 7);
    assert_eq!(parsed.quality.parsed_count, 7);
    assert_eq!(parsed.quality.error_count, 0);
    assert_eq!(parsed.quality.success_rate(), 1.0);

    let multi = &parsed.messages[3];
    assert_eq!(multi.author, "Alice");
    assert_eq!(multi.text, "Yes, bringing candles\nand balloons");
    assert_eq!(
        multi.raw_line,
        "[12/03/2024, 09:03:00] Alice: Yes, bringing candles\nand balloons"
    );
    assert_eq!(multi.timestamp, at(2024, 3, 12, 9, 3, 0));
}

#[test]
fn bracketed_export_keeps_attachment_markers() {
    let parsed = parser().parse(&load_fixture("bracketed.txt"));
    let photo = &parsed.messages[4];
    assert_eq!(photo.author, "Bob");
    assert_eq!(photo.text, "<attached: 00000012-PHOTO-2024-03-12.jpg>");
    assert_eq!(photo.attachments, vec!["00000012-PHOTO-2024-03-12.jpg"]);
    assert!(photo.raw_line.contains('\u{200E}'));
}

#[test]
fn message_ids_follow_file_order() {
    let parsed = parser().parse(&load_fixture("bracketed.txt"));
    let ids: Vec<usize> = parsed.messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, (0..7).collect::<Vec<_>>());
}

#[test]
fn dashed_export_uses_pivot_and_twelve_hour_clock() {
    let parsed = parser().parse(&load_fixture("dashed.txt"));
    assert_eq!(parsed.messages.len(), 6);
    assert_eq!(parsed.messages[0].timestamp, at(1989, 2, 1, 21, 0, 0));
    assert_eq!(parsed.messages[5].timestamp, at(1989, 2, 1, 23, 59, 0));
    assert!(parsed
        .messages
        .iter()
        .all(|m| m.timestamp_source == TimestampSource::Parsed));
}

#[test]
fn iso_export_parses_directly() {
    let parsed = parser().parse(&load_fixture("iso.txt"));
    assert_eq!(parsed.messages.len(), 5);
    assert_eq!(parsed.messages[2].timestamp, at(2024, 7, 1, 8, 5, 0));
    assert_eq!(parsed.messages[2].attachments, vec!["bill.pdf"]);
}

#[test]
fn low_quality_export_records_failed_lines() {
    let parsed = parser().parse(&load_fixture("low_quality.txt"));
    assert_eq!(parsed.quality.parsed_count, 1);
    assert_eq!(parsed.quality.error_count, 3);
    assert_eq!(parsed.quality.success_rate(), 0.25);
    let rendered: Vec<String> = parsed.quality.failed_lines.iter().map(|l| l.render()).collect();
    assert_eq!(
        rendered,
        vec!["1: Chat export", "2: Exported on a phone", "3: random line"]
    );
}

#[test]
fn grammar_tries_shapes_in_order() {
    let grammar = LineGrammar::new();
    let bracketed = grammar.match_line("[1/2/24, 10:00] A: x").unwrap();
    assert_eq!(bracketed.shape, LineShape::Bracketed);
    let dashed = grammar.match_line("1/2/24, 10:00 - A: x").unwrap();
    assert_eq!(dashed.shape, LineShape::Dashed);
    let iso = grammar.match_line("2024-02-01 10:00:00 - A: x").unwrap();
    assert_eq!(iso.shape, LineShape::IsoDashed);
    assert!(grammar.match_line("just text").is_none());
}

#[test]
fn resolver_pivots_two_digit_years() {
    let resolver = TimestampResolver::new(fixed_now());
    assert_eq!(resolver.parse("1/1/89, 10:00").unwrap(), at(1989, 1, 1, 10, 0, 0));
    assert_eq!(resolver.parse("1/1/12, 10:00").unwrap(), at(2012, 1, 1, 10, 0, 0));
    assert_eq!(resolver.parse("1/1/50, 10:00").unwrap(), at(2050, 1, 1, 10, 0, 0));
}

#[test]
fn resolver_handles_noon_and_midnight() {
    let resolver = TimestampResolver::new(fixed_now());
    assert_eq!(resolver.parse("1/1/24, 12:00 AM").unwrap(), at(2024, 1, 1, 0, 0, 0));
    assert_eq!(resolver.parse("1/1/24, 12:00 PM").unwrap(), at(2024, 1, 1, 12, 0, 0));
    assert_eq!(resolver.parse("1/1/24, 1:00 PM").unwrap(), at(2024, 1, 1, 13, 0, 0));
}

#[test]
fn parsing_is_deterministic() {
    let input = load_fixture("bracketed.txt");
    assert_eq!(parser().parse(&input), parser().parse(&input));
}
