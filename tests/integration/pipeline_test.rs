//! End-to-end pipeline tests over fixture transcripts

use chatburst::{Config, Pipeline, PipelineOptions};

use crate::helpers::{bracketed, fixed_now, fixture_path, load_fixture, pipeline};

const MAX_BYTES: u64 = 1 << 20;

#[test]
fn alice_and_bob_plan_a_meeting() {
    let input = [
        bracketed(0, "Alice", "Can we do the meeting tomorrow?"),
        bracketed(1, "Bob", "Sure, what time?"),
        bracketed(2, "Alice", "10am, I'll send the invoice after"),
        bracketed(3, "Bob", "Perfect"),
        bracketed(4, "Alice", "See you then"),
    ]
    .join("\n");

    let report = pipeline().run(&input).unwrap();
    assert_eq!(report.total_messages, 5);
    assert_eq!(report.events_detected, 1);
    assert_eq!(report.events[0].title, "Meeting - 2024-01-15");
    assert_eq!(report.events[0].confidence_score, 0.8);
    assert_eq!(report.events[0].message_count, 5);
    assert!(report.messages.iter().all(|m| m.event_id == Some(0)));
}

#[test]
fn single_message_is_unassigned() {
    let report = pipeline().run(&bracketed(0, "Alice", "hi")).unwrap();
    assert_eq!(report.events_detected, 0);
    assert_eq!(report.messages[0].event_id, None);
}

#[test]
fn bracketed_fixture_report_shape() {
    let report = pipeline()
        .run_path(&fixture_path("bracketed.txt"), MAX_BYTES)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["totalMessages"], 7);
    assert_eq!(json["eventsDetected"], 1);
    assert_eq!(json["parseSuccessRate"], 1.0);
    assert_eq!(json["timezone"], "UTC");

    let event = &json["events"][0];
    assert_eq!(event["eventId"], 0);
    assert_eq!(event["title"], "Birthday - 2024-03-12");
    assert_eq!(event["startDatetime"], "2024-03-12T09:00:10");
    assert_eq!(event["endDatetime"], "2024-03-12T09:05:00");
    assert_eq!(event["messageCount"], 5);
    assert_eq!(event["keywords"], serde_json::json!(["birthday", "cake", "candles"]));
    assert_eq!(event["confidenceScore"], 0.8);
    assert_eq!(event["tags"], serde_json::json!(["birthday"]));

    let photo = &json["messages"][4];
    assert_eq!(photo["messageId"], 4);
    assert_eq!(photo["datetimeISO"], "2024-03-12T09:05:00");
    assert_eq!(photo["attachments"][0], "00000012-PHOTO-2024-03-12.jpg");
    assert_eq!(photo["eventId"], 0);
    assert!(json["messages"][5]["eventId"].is_null());
}

#[test]
fn dashed_fixture_detects_meeting() {
    let report = pipeline()
        .run_path(&fixture_path("dashed.txt"), MAX_BYTES)
        .unwrap();
    assert_eq!(report.events_detected, 1);
    let event = &report.events[0];
    assert_eq!(event.title, "Meeting - 1989-02-01");
    assert_eq!(event.keywords, vec!["agenda", "meeting", "standup", "zoom"]);
    assert_eq!(event.start_datetime, "1989-02-01T21:00:00");
    assert_eq!(event.end_datetime, "1989-02-01T21:06:00");
    assert_eq!(report.unassigned_count(), 1);
}

#[test]
fn iso_fixture_detects_payment() {
    let report = pipeline()
        .run_path(&fixture_path("iso.txt"), MAX_BYTES)
        .unwrap();
    assert_eq!(report.events_detected, 1);
    let event = &report.events[0];
    assert_eq!(event.title, "Payment - 2024-07-01");
    assert_eq!(
        event.keywords,
        vec!["bill", "invoice", "paid", "refund", "transfer"]
    );
    assert_eq!(event.message_count, 5);
    assert_eq!(report.unassigned_count(), 0);
}

#[test]
fn low_quality_fixture_is_rejected() {
    let err = pipeline()
        .run_path(&fixture_path("low_quality.txt"), MAX_BYTES)
        .unwrap_err();
    assert!(err.is_quality_failure());

    let report = err.quality_failure().unwrap().report();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["parseSuccessRate"], 0.25);
    assert_eq!(
        json["sample"],
        serde_json::json!([
            "Chat export",
            "Exported on a phone",
            "random line",
            "[12/03/2024, 09:00:10] Alice: hi"
        ])
    );
    assert_eq!(
        json["failedLines"],
        serde_json::json!(["1: Chat export", "2: Exported on a phone", "3: random line"])
    );
    assert!(json["error"].as_str().unwrap().contains("25.0%"));
}

#[test]
fn lowered_threshold_accepts_low_quality() {
    let options = PipelineOptions::new(fixed_now()).min_success_rate(0.2);
    let report = Pipeline::new(options)
        .run(&load_fixture("low_quality.txt"))
        .unwrap();
    assert_eq!(report.total_messages, 1);
    assert_eq!(report.parse_success_rate, 0.25);
}

#[test]
fn timezone_label_is_metadata_only() {
    let mut config = Config::default();
    config.ingest.timezone = "Pacific/Auckland".to_string();
    let report = Pipeline::from_config(&config, fixed_now())
        .run(&load_fixture("iso.txt"))
        .unwrap();
    assert_eq!(report.timezone, "Pacific/Auckland");
    assert_eq!(report.messages[0].datetime_iso, "2024-07-01T08:00:00");
}

#[test]
fn reports_are_deterministic() {
    let input = load_fixture("bracketed.txt");
    let first = pipeline().run(&input).unwrap().to_json_pretty().unwrap();
    let second = pipeline().run(&input).unwrap().to_json_pretty().unwrap();
    assert_eq!(first, second);
}
