//! Host-independent behaviour of one countdown element.
//!
//! The DOM layer owns the shadow tree and the timer; this type decides what
//! to render, when to restart and what each tick displays.

use crate::template::{invalid_item_views, item_views, ItemView};
use crate::{
    ClockState, ConfigChange, CountdownClock, CountdownConfig, Tick, TimeRemaining, UnitLocalizer,
};

/// Resolves an `ends` value to epoch milliseconds, `None` when unparseable.
pub type EndParser = fn(&str) -> Option<i64>;

/// Follow-up work after an attribute change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    None,
    /// Rebuild the shadow tree, then [`Countdown::prepare`].
    Render,
    /// Keep the tree and [`Countdown::prepare`] again.
    Restart,
}

/// Result of preparing the clock for a fresh start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Start {
    /// Fill the items, then schedule a timer and pass it to
    /// [`Countdown::start`].
    Schedule { end_ms: i64, items: Vec<ItemView> },
    /// `ends` did not parse: the clock is already expired.
    Invalid { items: Vec<ItemView> },
}

pub struct Countdown<H, L> {
    config: CountdownConfig,
    clock: CountdownClock<H>,
    localizer: L,
    parse_end: EndParser,
    connected: bool,
}

impl<H, L: UnitLocalizer> Countdown<H, L> {
    pub fn new(config: CountdownConfig, localizer: L, parse_end: EndParser) -> Self {
        Self {
            config,
            clock: CountdownClock::new(),
            localizer,
            parse_end,
            connected: false,
        }
    }

    pub fn config(&self) -> &CountdownConfig {
        &self.config
    }

    pub fn set_template(&mut self, template: Option<String>) {
        self.config.template = template;
    }

    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn connect(&mut self) {
        self.connected = true;
    }

    /// Detach: cancels the timer.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.clock.teardown();
    }

    /// Stop without restarting, e.g. when the template has no `<time>`.
    pub fn halt(&mut self) {
        self.clock.teardown();
    }

    /// Mirror an attribute change. Before attachment only the configuration
    /// is updated. An `ends` change that resolves to the instant already
    /// being counted down to is absorbed.
    pub fn attribute_changed(
        &mut self,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Reaction {
        let change = self.config.apply_change(name, old_value, new_value);
        if !self.connected {
            return Reaction::None;
        }

        match change {
            ConfigChange::Unchanged => Reaction::None,
            ConfigChange::Rerender => Reaction::Render,
            ConfigChange::RestartClock => match self.end_ms() {
                Some(end_ms) if self.clock.is_counting_to(end_ms) => {
                    log::debug!("ends still resolves to {end_ms}, clock kept");
                    Reaction::None
                }
                _ => Reaction::Restart,
            },
        }
    }

    /// Compute the initial item values at `now_ms`.
    pub fn prepare(&mut self, now_ms: i64) -> Start {
        let Some(end_ms) = self.end_ms() else {
            log::warn!("cannot parse ends {:?}", self.config.ends);
            self.clock.expire();
            return Start::Invalid {
                items: invalid_item_views(),
            };
        };

        let remaining = TimeRemaining::between(end_ms, now_ms);
        Start::Schedule {
            end_ms,
            items: item_views(&remaining, self.config.locale(), &self.localizer),
        }
    }

    /// Hand over the timer scheduled for a [`Start::Schedule`], replacing
    /// any previous one.
    pub fn start(&mut self, end_ms: i64, timer: H) {
        self.clock.start(end_ms, timer);
    }

    /// Values to display at `now_ms`; `None` once expired or stopped.
    pub fn tick(&mut self, now_ms: i64) -> Option<Vec<ItemView>> {
        match self.clock.tick(now_ms) {
            Tick::Update(remaining) => Some(item_views(
                &remaining,
                self.config.locale(),
                &self.localizer,
            )),
            Tick::Expired | Tick::Stopped => None,
        }
    }

    fn end_ms(&self) -> Option<i64> {
        self.config.ends.as_deref().and_then(self.parse_end)
    }
}
