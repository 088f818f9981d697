//! Built-in shadow tree markup and per-item display values.

use crate::{TimeRemaining, TimeUnit, UnitLocalizer};

pub const CLOCK_SELECTOR: &str = "time";
pub const ITEM_CLASS: &str = "item";
pub const NUMBER_CLASS: &str = "number";
pub const UNIT_CLASS: &str = "unit";
pub const HEADING_SLOT: &str = "heading";
/// Number text shown when `ends` cannot be parsed.
pub const INVALID_NUMBER_TEXT: &str = "NaN";

const BASE_STYLES: &str = r#"
  time {
    display: grid;
    gap: 1rem;
  }
  .number, .unit {
    display: block;
  }
  .number {
    font-size: var(--countdown-number-font-size);
  }
  .unit {
    font-size: var(--countdown-unit-font-size);
  }
"#;

/// Markup of the default template: styles, the `heading` slot and an empty
/// `<time>` container.
pub fn default_template(breakpoint1: Option<&str>, breakpoint2: Option<&str>) -> String {
    let mut style = String::from(BASE_STYLES);
    for (breakpoint, columns) in [(breakpoint1, 2), (breakpoint2, 4)] {
        if let Some(width) = breakpoint.and_then(css_length) {
            style.push_str(&format!(
                "  @media screen and (min-width: {width}) {{\n    time {{\n      grid-template-columns: repeat({columns}, 1fr);\n    }}\n  }}\n"
            ));
        }
    }

    format!("<style>{style}</style>\n<slot name=\"{HEADING_SLOT}\"></slot>\n<time></time>")
}

/// Breakpoints are pasted into the style sheet, so anything that could close
/// the rule or the `<style>` element is refused.
fn css_length(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains(['<', '>', '{', '}', ';']) {
        log::warn!("ignoring breakpoint {trimmed:?}");
        return None;
    }
    Some(trimmed)
}

/// Class list of the number node for `unit`, e.g. `number day`.
pub fn number_class(unit: TimeUnit) -> String {
    format!("{NUMBER_CLASS} {}", unit.as_str())
}

/// Text content of one rendered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub unit: TimeUnit,
    pub number_text: String,
    pub unit_text: String,
}

/// Display values for the four items, day first.
pub fn item_views(
    remaining: &TimeRemaining,
    locale: &str,
    localizer: &impl UnitLocalizer,
) -> Vec<ItemView> {
    remaining
        .fields()
        .into_iter()
        .map(|(unit, value)| ItemView {
            unit,
            number_text: value.to_string(),
            unit_text: localizer.unit_label(locale, unit, value),
        })
        .collect()
}

pub fn invalid_item_views() -> Vec<ItemView> {
    TimeUnit::ALL
        .into_iter()
        .map(|unit| ItemView {
            unit,
            number_text: INVALID_NUMBER_TEXT.to_string(),
            unit_text: String::new(),
        })
        .collect()
}

/// Bind the `(number, unit)` nodes found in each `.item` of a template's
/// `<time>`. Binding succeeds only when there are exactly `expected` items
/// and each has both nodes; the caller then fills them positionally.
pub fn bind_existing_items<T>(
    found: Vec<(Option<T>, Option<T>)>,
    expected: usize,
) -> Option<Vec<(T, T)>> {
    if found.len() != expected {
        return None;
    }
    found
        .into_iter()
        .map(|(number, unit)| Some((number?, unit?)))
        .collect()
}
