//! Bridge WASM <-> JavaScript: đăng ký `<count-down>` làm custom element.

use std::str::FromStr;

use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
mod element;

/// Tag used when the host does not pick one.
pub const DEFAULT_TAG_NAME: &str = "count-down";

const RESERVED_TAG_NAMES: [&str; 8] = [
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Options object passed to `defineCountdown` from JavaScript.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsRegistrationOptions {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOptions {
    pub tag_name: String,
    pub log_level: log::Level,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            tag_name: DEFAULT_TAG_NAME.to_string(),
            log_level: log::Level::Warn,
        }
    }
}

impl TryFrom<JsRegistrationOptions> for RegistrationOptions {
    type Error = String;

    fn try_from(opts: JsRegistrationOptions) -> Result<Self, Self::Error> {
        let mut base = RegistrationOptions::default();
        if let Some(tag_name) = opts.tag_name {
            if !is_valid_tag_name(&tag_name) {
                return Err(format!("{tag_name:?} is not a valid custom element name"));
            }
            base.tag_name = tag_name;
        }
        if let Some(level) = opts.log_level {
            base.log_level = log::Level::from_str(&level)
                .map_err(|_| format!("unknown log level {level:?}"))?;
        }
        Ok(base)
    }
}

/// Lowercase ASCII name starting with a letter, containing a hyphen and not
/// one of the reserved SVG/MathML names.
pub fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    starts_with_letter
        && name.contains('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
        && !RESERVED_TAG_NAMES.contains(&name)
}

#[cfg(target_arch = "wasm32")]
mod bridge {
    use std::sync::Once;

    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;

    use crate::{element, JsRegistrationOptions, RegistrationOptions};

    /// Define the countdown element once, at application start-up. Returns
    /// `false` when the tag name is already taken.
    #[wasm_bindgen(js_name = defineCountdown)]
    pub fn define_countdown(options: Option<JsValue>) -> Result<bool, JsValue> {
        console_error_panic_hook::set_once();

        let options = match options {
            Some(js_opts) => {
                let raw: JsRegistrationOptions = from_value(js_opts)
                    .map_err(|err| JsValue::from_str(&format!("cannot read options: {err}")))?;
                RegistrationOptions::try_from(raw).map_err(|err| JsValue::from_str(&err))?
            }
            None => RegistrationOptions::default(),
        };

        init_logging(options.log_level);
        element::define(&options.tag_name)
    }

    fn init_logging(level: log::Level) {
        static LOGGER: Once = Once::new();
        LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::new(level)));
    }
}

#[cfg(target_arch = "wasm32")]
pub use bridge::define_countdown;
