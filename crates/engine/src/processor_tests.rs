// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use alarm_adapters::FakeSink;
use alarm_core::test_support::{alarm_id, cancel_command, insert_command};
use alarm_core::{FakeClock, DEFAULT_MAX_MESSAGE_LEN};
use std::time::Duration;

fn setup() -> (CommandProcessor<FakeSink, FakeClock>, FakeSink, FakeClock) {
    let registry = Arc::new(AlarmRegistry::new(DEFAULT_MAX_MESSAGE_LEN));
    let sink = FakeSink::new();
    let clock = FakeClock::new();
    let processor = CommandProcessor::new(registry, sink.clone(), clock.clone());
    (processor, sink, clock)
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// True if the worker's wake permit is set.
async fn was_woken(registry: &AlarmRegistry) -> bool {
    tokio::time::timeout(Duration::from_millis(10), registry.woken())
        .await
        .is_ok()
}

#[tokio::test]
async fn insert_reports_first_request() {
    let (processor, sink, clock) = setup();
    let t0 = clock.now();

    let event = processor.process(insert_command(1, 5, "hello")).await;

    assert_eq!(
        event,
        Event::AlarmReceived {
            id: alarm_id(1),
            received_at: 1000,
            seconds: 5,
            message: "hello".to_string(),
        }
    );
    assert_eq!(sink.events(), vec![event]);
    assert_eq!(processor.registry().peek_next_wake(), Some(t0 + secs(5)));
}

#[tokio::test(start_paused = true)]
async fn insert_of_earliest_alarm_wakes_worker() {
    let (processor, _sink, _clock) = setup();
    processor.process(insert_command(1, 10, "later")).await;
    assert!(was_woken(processor.registry()).await);

    processor.process(insert_command(2, 20, "even later")).await;
    assert!(!was_woken(processor.registry()).await);

    processor.process(insert_command(3, 1, "sooner")).await;
    assert!(was_woken(processor.registry()).await);
}

#[tokio::test]
async fn duplicate_id_becomes_replace() {
    let (processor, sink, clock) = setup();
    let t0 = clock.now();
    processor.process(insert_command(7, 10, "first")).await;

    let event = processor.process(insert_command(7, 2, "second")).await;

    assert!(matches!(event, Event::ReplacementReceived { seconds: 2, .. }));
    assert_eq!(
        sink.lines()[1],
        "Replacement Alarm Request With Message Number (7) Received at <1000>: <2 second>"
    );
    let registry = processor.registry();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.peek_next_wake(), Some(t0 + secs(2)));
    assert_eq!(registry.get(alarm_id(7)).unwrap().message, "second");
}

#[tokio::test]
async fn replace_measures_from_receipt_time() {
    let (processor, _sink, clock) = setup();
    processor.process(insert_command(7, 10, "first")).await;
    clock.advance(secs(4));

    processor.process(insert_command(7, 10, "again")).await;

    let expected = clock.now() + secs(10);
    assert_eq!(processor.registry().peek_next_wake(), Some(expected));
}

#[tokio::test]
async fn replace_of_cancelled_alarm_is_rejected() {
    let (processor, _sink, _clock) = setup();
    processor.process(insert_command(4, 10, "first")).await;
    processor.process(cancel_command(4)).await;

    let event = processor.process(insert_command(4, 3, "second")).await;

    assert_eq!(event, Event::ReplaceRejected { id: alarm_id(4) });
    assert!(processor.registry().is_cancel_requested(alarm_id(4)).unwrap());
    assert_eq!(processor.registry().peek_next_wake(), None);
}

#[tokio::test]
async fn cancel_reports_alarm_details() {
    let (processor, sink, _clock) = setup();
    processor.process(insert_command(3, 4, "tea")).await;

    let event = processor.process(cancel_command(3)).await;

    assert_eq!(
        event.to_string(),
        "Cancel Alarm Request With Message Number (3) Received at <1000>: <4 tea>"
    );
    assert_eq!(sink.events().len(), 2);
    assert_eq!(processor.registry().pending(), 0);
}

#[tokio::test]
async fn cancel_unknown_leaves_registry_untouched() {
    let (processor, _sink, _clock) = setup();
    processor.process(insert_command(1, 5, "keep")).await;
    let before = processor.registry().snapshot();

    let event = processor.process(cancel_command(99)).await;

    assert_eq!(event, Event::CancelUnknown { id: alarm_id(99) });
    assert!(event.is_error());
    assert_eq!(processor.registry().snapshot(), before);
}

#[tokio::test]
async fn second_cancel_is_duplicate() {
    let (processor, _sink, _clock) = setup();
    processor.process(insert_command(2, 5, "x")).await;
    processor.process(insert_command(5, 8, "y")).await;
    processor.process(cancel_command(2)).await;

    let event = processor.process(cancel_command(2)).await;

    assert_eq!(event, Event::CancelDuplicate { id: alarm_id(2) });
    assert!(!processor.registry().is_cancel_requested(alarm_id(5)).unwrap());
}

#[tokio::test]
async fn process_line_parses_grammar() {
    let (processor, _sink, _clock) = setup();

    let inserted = processor.process_line("  5 Message(12) wake up  ").await;
    let cancelled = processor.process_line("Cancel: Message(12)").await;

    assert!(matches!(inserted, Event::AlarmReceived { seconds: 5, .. }));
    assert_eq!(inserted.alarm_id(), Some(alarm_id(12)));
    assert!(matches!(cancelled, Event::CancelReceived { .. }));
}

#[tokio::test]
async fn malformed_lines_are_bad_commands() {
    let (processor, sink, _clock) = setup();
    let long = format!("5 Message(1) {}", "x".repeat(DEFAULT_MAX_MESSAGE_LEN + 1));

    for line in [
        "hello",
        "0 Message(1) zero seconds",
        "5 Message(0) zero id",
        "5 Message(1)",
        "Cancel: Message(abc)",
        long.as_str(),
    ] {
        assert_eq!(processor.process_line(line).await, Event::BadCommand, "{line:?}");
    }

    assert!(processor.registry().is_empty());
    assert!(sink.lines().iter().all(|l| l == "Bad command"));
}

#[tokio::test]
async fn sink_failure_still_applies_command() {
    let (processor, sink, _clock) = setup();
    sink.fail_all(true);

    let event = processor.process(insert_command(1, 5, "quiet")).await;

    assert!(matches!(event, Event::AlarmReceived { .. }));
    assert_eq!(processor.registry().len(), 1);
}

#[tokio::test]
async fn oversized_duration_is_bad_command() {
    let (processor, sink, _clock) = setup();

    let event = processor
        .process_line("18446744073709551615 Message(1) hi")
        .await;

    assert_eq!(event, Event::BadCommand);
    assert!(processor.registry().is_empty());
    assert_eq!(sink.lines(), vec!["Bad command"]);
}

#[tokio::test]
async fn oversized_replacement_keeps_pending_alarm() {
    let (processor, _sink, clock) = setup();
    let t0 = clock.now();
    processor.process_line("5 Message(1) hi").await;

    let event = processor.process(insert_command(1, u64::MAX, "again")).await;

    assert_eq!(event, Event::BadCommand);
    let alarm = processor.registry().get(alarm_id(1)).unwrap();
    assert_eq!(alarm.message, "hi");
    assert_eq!(processor.registry().peek_next_wake(), Some(t0 + secs(5)));
}

#[tokio::test(start_paused = true)]
async fn lifecycle_events_wake_worker_on_every_replace() {
    let (processor, _sink, _clock) = setup();
    let processor = processor.with_lifecycle_events(true);
    processor.process(insert_command(1, 5, "soon")).await;
    processor.process(insert_command(2, 60, "later")).await;
    assert!(was_woken(processor.registry()).await);

    processor.process(insert_command(2, 30, "less later")).await;

    assert!(was_woken(processor.registry()).await);
}

#[tokio::test(start_paused = true)]
async fn replace_of_later_alarm_does_not_wake_by_default() {
    let (processor, _sink, _clock) = setup();
    processor.process(insert_command(1, 5, "soon")).await;
    processor.process(insert_command(2, 60, "later")).await;
    assert!(was_woken(processor.registry()).await);

    processor.process(insert_command(2, 30, "less later")).await;

    assert!(!was_woken(processor.registry()).await);
}
