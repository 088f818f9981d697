use std::cell::Cell;
use std::rc::Rc;

use countdown_core::template::INVALID_NUMBER_TEXT;
use countdown_core::{
    parse_end_ms, ClockState, Countdown, CountdownConfig, EnglishLocalizer, Reaction, Start,
};

struct FakeTimer {
    cancelled: Rc<Cell<bool>>,
}

impl FakeTimer {
    fn new() -> (Self, Rc<Cell<bool>>) {
        let cancelled = Rc::new(Cell::new(false));
        (
            Self {
                cancelled: cancelled.clone(),
            },
            cancelled,
        )
    }
}

impl Drop for FakeTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

fn countdown(ends: Option<&str>) -> Countdown<FakeTimer, EnglishLocalizer> {
    let config = CountdownConfig {
        ends: ends.map(str::to_string),
        ..CountdownConfig::default()
    };
    Countdown::new(config, EnglishLocalizer, parse_end_ms)
}

/// Connect and run the start sequence the DOM layer performs.
fn connect_and_start(
    countdown: &mut Countdown<FakeTimer, EnglishLocalizer>,
    now_ms: i64,
) -> Rc<Cell<bool>> {
    countdown.connect();
    let Start::Schedule { end_ms, .. } = countdown.prepare(now_ms) else {
        panic!("ends should parse");
    };
    let (timer, cancelled) = FakeTimer::new();
    countdown.start(end_ms, timer);
    cancelled
}

#[test]
fn changes_before_connect_only_update_config() {
    let mut countdown = countdown(None);

    let reaction = countdown.attribute_changed("ends", None, Some("2099-01-01T00:00:00Z"));

    assert_eq!(reaction, Reaction::None);
    assert_eq!(countdown.config().ends.as_deref(), Some("2099-01-01T00:00:00Z"));
    assert_eq!(countdown.clock_state(), ClockState::Idle);
}

#[test]
fn breakpoint_change_rerenders() {
    let mut countdown = countdown(Some("2099-01-01T00:00:00Z"));
    connect_and_start(&mut countdown, 0);

    let reaction = countdown.attribute_changed("breakpoint1", None, Some("40em"));

    assert_eq!(reaction, Reaction::Render);
    assert_eq!(countdown.config().breakpoint1.as_deref(), Some("40em"));
}

#[test]
fn locale_change_rerenders() {
    let mut countdown = countdown(Some("2099-01-01T00:00:00Z"));
    connect_and_start(&mut countdown, 0);

    assert_eq!(
        countdown.attribute_changed("locale", None, Some("fr")),
        Reaction::Render
    );
}

#[test]
fn identical_values_do_nothing() {
    let mut countdown = countdown(Some("2099-01-01T00:00:00Z"));
    connect_and_start(&mut countdown, 0);

    let reaction = countdown.attribute_changed(
        "ends",
        Some("2099-01-01T00:00:00Z"),
        Some("2099-01-01T00:00:00Z"),
    );

    assert_eq!(reaction, Reaction::None);
}

#[test]
fn new_end_instant_restarts() {
    let mut countdown = countdown(Some("2099-01-01T00:00:00Z"));
    connect_and_start(&mut countdown, 0);

    let reaction = countdown.attribute_changed(
        "ends",
        Some("2099-01-01T00:00:00Z"),
        Some("2100-01-01T00:00:00Z"),
    );

    assert_eq!(reaction, Reaction::Restart);
}

#[test]
fn equivalent_end_instant_keeps_running_clock() {
    let mut countdown = countdown(Some("2099-01-01T00:00:00Z"));
    let cancelled = connect_and_start(&mut countdown, 0);

    let reaction = countdown.attribute_changed(
        "ends",
        Some("2099-01-01T00:00:00Z"),
        Some("2099-01-01T01:00:00+01:00"),
    );

    assert_eq!(reaction, Reaction::None);
    assert_eq!(countdown.clock_state(), ClockState::Running);
    assert!(!cancelled.get());
}

#[test]
fn restart_replaces_and_cancels_previous_timer() {
    let mut countdown = countdown(Some("2099-01-01T00:00:00Z"));
    let first = connect_and_start(&mut countdown, 0);

    countdown.attribute_changed(
        "ends",
        Some("2099-01-01T00:00:00Z"),
        Some("2100-01-01T00:00:00Z"),
    );
    let Start::Schedule { end_ms, .. } = countdown.prepare(0) else {
        panic!("ends should parse");
    };
    let (timer, second) = FakeTimer::new();
    countdown.start(end_ms, timer);

    assert!(first.get());
    assert!(!second.get());
    assert_eq!(countdown.clock_state(), ClockState::Running);
}

#[test]
fn unparseable_end_shows_nan_and_expires() {
    let mut countdown = countdown(Some("not a date"));
    countdown.connect();

    let Start::Invalid { items } = countdown.prepare(0) else {
        panic!("ends should not parse");
    };

    assert_eq!(items.len(), 4);
    assert!(items
        .iter()
        .all(|item| item.number_text == INVALID_NUMBER_TEXT && item.unit_text.is_empty()));
    assert_eq!(countdown.clock_state(), ClockState::Expired);
    assert_eq!(countdown.tick(1_000), None);
}

#[test]
fn missing_end_is_invalid() {
    let mut countdown = countdown(None);
    countdown.connect();

    assert!(matches!(countdown.prepare(0), Start::Invalid { .. }));
}

#[test]
fn prepare_fills_initial_values() {
    let mut countdown = countdown(Some("1970-01-02T01:01:05Z"));
    countdown.connect();

    let Start::Schedule { end_ms, items } = countdown.prepare(0) else {
        panic!("ends should parse");
    };

    assert_eq!(end_ms, 90_065_000);
    let numbers: Vec<&str> = items.iter().map(|item| item.number_text.as_str()).collect();
    assert_eq!(numbers, ["1", "1", "1", "5"]);
    assert_eq!(items[0].unit_text, "day");
    assert_eq!(items[3].unit_text, "seconds");
}

#[test]
fn five_second_countdown_ticks_to_expiry() {
    let mut countdown = countdown(Some("1970-01-01T00:00:05Z"));
    let cancelled = connect_and_start(&mut countdown, 0);

    let mut seconds = Vec::new();
    let mut now = 0;
    loop {
        now += 1_000;
        match countdown.tick(now) {
            Some(items) => seconds.push(items[3].number_text.clone()),
            None => break,
        }
    }

    assert_eq!(seconds, ["4", "3", "2", "1"]);
    assert_eq!(countdown.clock_state(), ClockState::Expired);
    assert!(cancelled.get());
}

#[test]
fn disconnect_cancels_timer_and_ignores_changes() {
    let mut countdown = countdown(Some("2099-01-01T00:00:00Z"));
    let cancelled = connect_and_start(&mut countdown, 0);

    countdown.disconnect();

    assert!(cancelled.get());
    assert!(!countdown.is_connected());
    assert_eq!(countdown.tick(1_000), None);
    assert_eq!(
        countdown.attribute_changed("locale", None, Some("de")),
        Reaction::None
    );
}

#[test]
fn halt_stops_without_expiring() {
    let mut countdown = countdown(Some("2099-01-01T00:00:00Z"));
    let cancelled = connect_and_start(&mut countdown, 0);

    countdown.halt();

    assert!(cancelled.get());
    assert!(countdown.is_connected());
    assert_eq!(countdown.tick(1_000), None);
}
