//! Localised unit labels taken from relative-time phrases.

use crate::{CountdownError, TimeUnit};

/// Kind of a segment produced by a relative-time formatter, following the
/// `type` values of `Intl.RelativeTimeFormat.prototype.formatToParts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Literal,
    Integer,
    Group,
    Decimal,
    Fraction,
    PlusSign,
    MinusSign,
    Other,
}

impl PartKind {
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "literal" => PartKind::Literal,
            "integer" => PartKind::Integer,
            "group" => PartKind::Group,
            "decimal" => PartKind::Decimal,
            "fraction" => PartKind::Fraction,
            "plusSign" => PartKind::PlusSign,
            "minusSign" => PartKind::MinusSign,
            _ => PartKind::Other,
        }
    }

    fn is_numeric(self) -> bool {
        !matches!(self, PartKind::Literal | PartKind::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPart {
    pub kind: PartKind,
    pub value: String,
}

impl FormatPart {
    pub fn new(kind: PartKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Pick the unit word out of a formatted phrase.
///
/// Only phrases shaped `<prefix><number><unit>` qualify, e.g. `in 5 days`
/// yields `days`. Phrases without a prefix or with anything after the unit
/// segment (`3 days ago`, `5 天后`) yield `None`, as does a blank segment.
pub fn extract_unit_label(parts: &[FormatPart]) -> Option<String> {
    let (prefix, rest) = parts.split_first()?;
    if prefix.kind != PartKind::Literal {
        return None;
    }
    let number_len = rest
        .iter()
        .take_while(|part| part.kind.is_numeric())
        .count();
    if number_len == 0 {
        return None;
    }
    match &rest[number_len..] {
        [unit] if unit.kind == PartKind::Literal => Some(unit.value.trim())
            .filter(|label| !label.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

/// Source of relative-time phrases for a locale.
pub trait UnitLocalizer {
    fn format_parts(
        &self,
        locale: &str,
        unit: TimeUnit,
        value: i64,
    ) -> Result<Vec<FormatPart>, CountdownError>;

    /// Localised unit word for `value`, empty when none can be extracted.
    fn unit_label(&self, locale: &str, unit: TimeUnit, value: i64) -> String {
        match self.format_parts(locale, unit, value) {
            Ok(parts) => extract_unit_label(&parts).unwrap_or_default(),
            Err(err) => {
                log::warn!("no {} label for locale {locale}: {err}", unit.as_str());
                String::new()
            }
        }
    }
}

/// English phrases shaped like the host formatter's `en` output. Used where
/// no `Intl` implementation is available; the locale argument is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl UnitLocalizer for EnglishLocalizer {
    fn format_parts(
        &self,
        _locale: &str,
        unit: TimeUnit,
        value: i64,
    ) -> Result<Vec<FormatPart>, CountdownError> {
        let magnitude = value.unsigned_abs();
        let word = if magnitude == 1 {
            unit.as_str().to_string()
        } else {
            format!("{}s", unit.as_str())
        };

        let mut parts = Vec::new();
        if value >= 0 {
            parts.push(FormatPart::new(PartKind::Literal, "in "));
            parts.extend(number_parts(magnitude));
            parts.push(FormatPart::new(PartKind::Literal, format!(" {word}")));
        } else {
            parts.extend(number_parts(magnitude));
            parts.push(FormatPart::new(PartKind::Literal, format!(" {word} ago")));
        }
        Ok(parts)
    }
}

fn number_parts(magnitude: u64) -> Vec<FormatPart> {
    let digits = magnitude.to_string();
    let head = match digits.len() % 3 {
        0 => 3,
        rest => rest,
    };

    let mut parts = vec![FormatPart::new(PartKind::Integer, &digits[..head])];
    let mut offset = head;
    while offset < digits.len() {
        parts.push(FormatPart::new(PartKind::Group, ","));
        parts.push(FormatPart::new(
            PartKind::Integer,
            &digits[offset..offset + 3],
        ));
        offset += 3;
    }
    parts
}
