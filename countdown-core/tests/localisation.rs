use countdown_core::{
    extract_unit_label, CountdownError, EnglishLocalizer, FormatPart, PartKind, TimeUnit,
    UnitLocalizer,
};

struct FailingLocalizer;

impl UnitLocalizer for FailingLocalizer {
    fn format_parts(
        &self,
        locale: &str,
        _unit: TimeUnit,
        _value: i64,
    ) -> Result<Vec<FormatPart>, CountdownError> {
        Err(CountdownError::Format(format!("unsupported locale {locale}")))
    }
}

#[test]
fn english_labels_are_plural_aware() {
    let en = EnglishLocalizer;

    assert_eq!(en.unit_label("en", TimeUnit::Day, 5), "days");
    assert_eq!(en.unit_label("en", TimeUnit::Hour, 1), "hour");
    assert_eq!(en.unit_label("en", TimeUnit::Minute, 0), "minutes");
    assert_eq!(en.unit_label("en", TimeUnit::Second, 59), "seconds");
}

#[test]
fn grouped_numbers_do_not_leak_into_label() {
    let parts = EnglishLocalizer
        .format_parts("en", TimeUnit::Day, 27_123)
        .unwrap();

    assert_eq!(parts[1], FormatPart::new(PartKind::Integer, "27"));
    assert_eq!(parts[2], FormatPart::new(PartKind::Group, ","));
    assert_eq!(extract_unit_label(&parts).as_deref(), Some("days"));
}

#[test]
fn past_phrases_give_empty_label() {
    assert_eq!(EnglishLocalizer.unit_label("en", TimeUnit::Second, -1), "");
    assert_eq!(EnglishLocalizer.unit_label("en", TimeUnit::Day, -3), "");
}

#[test]
fn phrase_without_prefix_gives_nothing() {
    let zh = vec![
        FormatPart::new(PartKind::Integer, "5"),
        FormatPart::new(PartKind::Literal, "天后"),
    ];
    assert_eq!(extract_unit_label(&zh), None);
}

#[test]
fn trailing_text_after_unit_gives_nothing() {
    let parts = vec![
        FormatPart::new(PartKind::Literal, "in "),
        FormatPart::new(PartKind::Integer, "5"),
        FormatPart::new(PartKind::Literal, " days"),
        FormatPart::new(PartKind::Literal, " from now"),
    ];
    assert_eq!(extract_unit_label(&parts), None);
}

#[test]
fn extraction_yields_nothing_without_trailing_literal() {
    let parts = vec![
        FormatPart::new(PartKind::Literal, "in "),
        FormatPart::new(PartKind::Integer, "3"),
    ];
    assert_eq!(extract_unit_label(&parts), None);

    let blank = vec![
        FormatPart::new(PartKind::Integer, "3"),
        FormatPart::new(PartKind::Literal, "  "),
    ];
    assert_eq!(extract_unit_label(&blank), None);
}

#[test]
fn extraction_skips_leading_literal() {
    let parts = vec![
        FormatPart::new(PartKind::Literal, "dans "),
        FormatPart::new(PartKind::Integer, "2"),
        FormatPart::new(PartKind::Literal, " jours"),
    ];
    assert_eq!(extract_unit_label(&parts).as_deref(), Some("jours"));
}

#[test]
fn formatter_failure_gives_empty_label() {
    assert_eq!(FailingLocalizer.unit_label("xx-invalid", TimeUnit::Day, 2), "");
}

#[test]
fn part_kinds_follow_intl_type_names() {
    assert_eq!(PartKind::from_type("literal"), PartKind::Literal);
    assert_eq!(PartKind::from_type("minusSign"), PartKind::MinusSign);
    assert_eq!(PartKind::from_type("compact"), PartKind::Other);
}
