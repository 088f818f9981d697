//! Element configuration mirrored from attributes.

use serde::{Deserialize, Serialize};

/// Locale used when the `locale` attribute is absent or blank.
pub const DEFAULT_LOCALE: &str = "en";

/// Các khóa cấu hình, dùng chung cho thuộc tính và property.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Ends,
    Breakpoint1,
    Breakpoint2,
    Template,
    Locale,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Ends,
        Attribute::Breakpoint1,
        Attribute::Breakpoint2,
        Attribute::Template,
        Attribute::Locale,
    ];

    /// Attributes whose changes the element reacts to. `template` is only
    /// read when rendering.
    pub const OBSERVED: [Attribute; 4] = [
        Attribute::Ends,
        Attribute::Breakpoint1,
        Attribute::Breakpoint2,
        Attribute::Locale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Ends => "ends",
            Attribute::Breakpoint1 => "breakpoint1",
            Attribute::Breakpoint2 => "breakpoint2",
            Attribute::Template => "template",
            Attribute::Locale => "locale",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }

    pub fn is_observed(self) -> bool {
        Self::OBSERVED.contains(&self)
    }
}

/// What the element has to do after an attribute change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    /// Same value, unknown or unobserved attribute.
    Unchanged,
    /// Rebuild the shadow tree, which also restarts the clock.
    Rerender,
    /// Only `ends` moved; keep the tree and restart the clock.
    RestartClock,
}

/// Cấu hình lấy từ các thuộc tính của phần tử.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CountdownConfig {
    #[serde(default)]
    pub ends: Option<String>,
    #[serde(default)]
    pub breakpoint1: Option<String>,
    #[serde(default)]
    pub breakpoint2: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

impl CountdownConfig {
    /// Build a configuration by reading every attribute through `lookup`.
    pub fn from_attributes(mut lookup: impl FnMut(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        for attr in Attribute::ALL {
            config.set(attr, lookup(attr.name()));
        }
        config
    }

    /// Effective locale, falling back to [`DEFAULT_LOCALE`].
    pub fn locale(&self) -> &str {
        self.locale
            .as_deref()
            .map(str::trim)
            .filter(|locale| !locale.is_empty())
            .unwrap_or(DEFAULT_LOCALE)
    }

    /// External template id, if one is configured.
    pub fn template_id(&self) -> Option<&str> {
        self.template
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn get(&self, attr: Attribute) -> Option<&str> {
        match attr {
            Attribute::Ends => self.ends.as_deref(),
            Attribute::Breakpoint1 => self.breakpoint1.as_deref(),
            Attribute::Breakpoint2 => self.breakpoint2.as_deref(),
            Attribute::Template => self.template.as_deref(),
            Attribute::Locale => self.locale.as_deref(),
        }
    }

    pub fn set(&mut self, attr: Attribute, value: Option<String>) {
        let slot = match attr {
            Attribute::Ends => &mut self.ends,
            Attribute::Breakpoint1 => &mut self.breakpoint1,
            Attribute::Breakpoint2 => &mut self.breakpoint2,
            Attribute::Template => &mut self.template,
            Attribute::Locale => &mut self.locale,
        };
        *slot = value;
    }

    /// Mirror an observed attribute change and report the follow-up work.
    pub fn apply_change(
        &mut self,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> ConfigChange {
        if old_value == new_value {
            return ConfigChange::Unchanged;
        }
        let Some(attr) = Attribute::from_name(name).filter(|attr| attr.is_observed()) else {
            log::debug!("ignoring change of unobserved attribute {name}");
            return ConfigChange::Unchanged;
        };

        self.set(attr, new_value.map(str::to_string));
        match attr {
            Attribute::Ends => ConfigChange::RestartClock,
            _ => ConfigChange::Rerender,
        }
    }
}
