#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;

use countdown_core::{CountdownError, FormatPart, PartKind, TimeUnit, UnitLocalizer, DEFAULT_LOCALE};
use js_sys::{Array, Reflect};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Intl)]
    type RelativeTimeFormat;

    #[wasm_bindgen(constructor, js_namespace = Intl, catch)]
    fn new(locales: &str) -> Result<RelativeTimeFormat, JsValue>;

    #[wasm_bindgen(method, js_name = formatToParts, catch)]
    fn format_to_parts(
        this: &RelativeTimeFormat,
        value: f64,
        unit: &str,
    ) -> Result<Array, JsValue>;
}

/// Unit labels from the host's `Intl.RelativeTimeFormat`. The formatter of
/// the last locale used is kept between ticks.
#[derive(Default)]
pub struct IntlLocalizer {
    cached: RefCell<Option<(String, RelativeTimeFormat)>>,
}

impl UnitLocalizer for IntlLocalizer {
    fn format_parts(
        &self,
        locale: &str,
        unit: TimeUnit,
        value: i64,
    ) -> Result<Vec<FormatPart>, CountdownError> {
        let mut cached = self.cached.borrow_mut();
        let formatter = match cached.take() {
            Some((tag, formatter)) if tag == locale => formatter,
            _ => formatter_for(locale)?,
        };

        let parts = formatter
            .format_to_parts(value as f64, unit.as_str())
            .map_err(|err| CountdownError::Format(describe(&err)));
        *cached = Some((locale.to_string(), formatter));

        Ok(parts?
            .iter()
            .map(|part| {
                FormatPart::new(
                    PartKind::from_type(&string_field(&part, "type")),
                    string_field(&part, "value"),
                )
            })
            .collect())
    }
}

fn formatter_for(locale: &str) -> Result<RelativeTimeFormat, CountdownError> {
    RelativeTimeFormat::new(locale)
        .or_else(|err| {
            log::warn!(
                "locale {locale:?} rejected ({}), using {DEFAULT_LOCALE}",
                describe(&err)
            );
            RelativeTimeFormat::new(DEFAULT_LOCALE)
        })
        .map_err(|err| CountdownError::Format(describe(&err)))
}

fn string_field(part: &JsValue, name: &str) -> String {
    Reflect::get(part, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
