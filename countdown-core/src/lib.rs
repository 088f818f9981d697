//! Logic lõi của phần tử `<count-down>`: cấu hình, tính thời gian còn lại,
//! nhãn đơn vị theo ngôn ngữ và đồng hồ đếm ngược.

pub mod clock;
pub mod config;
pub mod countdown;
pub mod locale;
pub mod remaining;
pub mod template;

pub use clock::{ClockState, CountdownClock, Tick, TICK_INTERVAL_MS};
pub use config::{Attribute, ConfigChange, CountdownConfig, DEFAULT_LOCALE};
pub use countdown::{Countdown, EndParser, Reaction, Start};
pub use locale::{extract_unit_label, EnglishLocalizer, FormatPart, PartKind, UnitLocalizer};
pub use remaining::{parse_end_instant, parse_end_ms, TimeRemaining, TimeUnit};
pub use template::{default_template, invalid_item_views, item_views, ItemView};

/// Lỗi chung khi cấu hình hoặc hiển thị đồng hồ đếm ngược.
#[derive(Debug, thiserror::Error)]
pub enum CountdownError {
    #[error("cannot parse end instant {0:?}")]
    InvalidEndInstant(String),
    #[error("template has no <time> element")]
    MissingClockContainer,
    #[error("relative time formatting failed: {0}")]
    Format(String),
}
