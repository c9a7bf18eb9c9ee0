//! Crash-screen settings store
//!
//! Settings are grouped; each group has a header entry (whose value is
//! whether the group is expanded on the settings page) followed by its
//! settings. Every value is an integer within inclusive bounds, optionally
//! with a display name per value.
//!
//! # Config File
//!
//! Defaults can be overridden from TOML, one table per group, keyed by the
//! setting's config key:
//!
//! ```toml
//! [global]
//! wrap_pages = false
//!
//! [memory]
//! display_mode = "RGBA16"
//! show_symbol = false
//! ```

use crate::error::LoadError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const BOOL_NAMES: &[&str] = &["FALSE", "TRUE"];

pub const SECTION_NAMES: &[&str] = &["COLLAPSED", "EXPANDED"];

pub const DISPLAY_MODE_NAMES: &[&str] = &["HEX", "ASCII", "BINARY", "RGBA16", "RGBA32"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsGroupId {
    Global,
    Memory,
}

impl SettingsGroupId {
    pub const ALL: [SettingsGroupId; 2] = [SettingsGroupId::Global, SettingsGroupId::Memory];

    pub fn name(self) -> &'static str {
        match self {
            SettingsGroupId::Global => "GLOBAL",
            SettingsGroupId::Memory => "MEMORY",
        }
    }

    pub fn config_key(self) -> &'static str {
        match self {
            SettingsGroupId::Global => "global",
            SettingsGroupId::Memory => "memory",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingId {
    ShowPageHeader,
    WrapPages,
    MemoryShowRange,
    MemorySymbolDividers,
    MemoryShowSymbol,
    MemoryDisplayMode,
}

impl SettingId {
    /// Every setting, in display order
    pub const ALL: [SettingId; 6] = [
        SettingId::ShowPageHeader,
        SettingId::WrapPages,
        SettingId::MemoryShowRange,
        SettingId::MemorySymbolDividers,
        SettingId::MemoryShowSymbol,
        SettingId::MemoryDisplayMode,
    ];

    pub fn group(self) -> SettingsGroupId {
        match self {
            SettingId::ShowPageHeader | SettingId::WrapPages => SettingsGroupId::Global,
            SettingId::MemoryShowRange
            | SettingId::MemorySymbolDividers
            | SettingId::MemoryShowSymbol
            | SettingId::MemoryDisplayMode => SettingsGroupId::Memory,
        }
    }

    pub fn config_key(self) -> &'static str {
        match self {
            SettingId::ShowPageHeader => "show_page_header",
            SettingId::WrapPages => "wrap_pages",
            SettingId::MemoryShowRange => "show_range",
            SettingId::MemorySymbolDividers => "symbol_dividers",
            SettingId::MemoryShowSymbol => "show_symbol",
            SettingId::MemoryDisplayMode => "display_mode",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn default_setting(self) -> Setting {
        match self {
            SettingId::ShowPageHeader => Setting::boolean("Show page header", true),
            SettingId::WrapPages => Setting::boolean("Wrap page switching", true),
            SettingId::MemoryShowRange => Setting::boolean("Show current address range", true),
            SettingId::MemorySymbolDividers => Setting::boolean("Show symbol dividers", true),
            SettingId::MemoryShowSymbol => Setting::boolean("Show current symbol name", true),
            SettingId::MemoryDisplayMode => Setting {
                name: "Display mode",
                value_names: Some(DISPLAY_MODE_NAMES),
                value: 0,
                default: 0,
                lower: 0,
                upper: DISPLAY_MODE_NAMES.len() as i32 - 1,
            },
        }
    }
}

/// A single bounded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub name: &'static str,
    pub value_names: Option<&'static [&'static str]>,
    pub value: i32,
    pub default: i32,
    pub lower: i32,
    pub upper: i32,
}

impl Setting {
    fn boolean(name: &'static str, default: bool) -> Self {
        Setting {
            name,
            value_names: Some(BOOL_NAMES),
            value: default as i32,
            default: default as i32,
            lower: 0,
            upper: 1,
        }
    }

    fn header(name: &'static str) -> Self {
        Setting {
            value_names: Some(SECTION_NAMES),
            ..Setting::boolean(name, true)
        }
    }

    /// Human readable current value
    pub fn value_name(&self) -> String {
        self.value_names
            .and_then(|names| names.get((self.value - self.lower) as usize))
            .map(|name| name.to_string())
            .unwrap_or_else(|| self.value.to_string())
    }

    pub fn is_default(&self) -> bool {
        self.value == self.default
    }

    /// Add `amount`, wrapping past either bound to the other one
    fn increment(&mut self, amount: i32) {
        let value = self.value.saturating_add(amount);
        self.value = if value > self.upper {
            self.lower
        } else if value < self.lower {
            self.upper
        } else {
            value
        };
    }
}

/// One line of the settings list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Header(SettingsGroupId),
    Entry(SettingId),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ConfigValue {
    Bool(bool),
    Int(i64),
    Name(String),
}

type SettingsFile = BTreeMap<String, BTreeMap<String, ConfigValue>>;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    headers: Vec<Setting>,
    settings: Vec<Setting>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        SettingsStore {
            headers: SettingsGroupId::ALL
                .iter()
                .map(|group| Setting::header(group.name()))
                .collect(),
            settings: SettingId::ALL.iter().map(|id| id.default_setting()).collect(),
        }
    }

    pub fn setting(&self, id: SettingId) -> &Setting {
        &self.settings[id.index()]
    }

    pub fn header(&self, group: SettingsGroupId) -> &Setting {
        &self.headers[group.index()]
    }

    pub fn get(&self, id: SettingId) -> i32 {
        self.setting(id).value
    }

    pub fn get_bool(&self, id: SettingId) -> bool {
        self.get(id) != 0
    }

    /// Set a value, rejecting anything outside the setting's bounds
    pub fn set(&mut self, id: SettingId, value: i32) -> Result<(), LoadError> {
        let setting = &mut self.settings[id.index()];
        if !(setting.lower..=setting.upper).contains(&value) {
            return Err(LoadError::InvalidSetting {
                key: config_path(id),
                reason: format!(
                    "value {} is outside {}..={}",
                    value, setting.lower, setting.upper
                ),
            });
        }
        setting.value = value;
        Ok(())
    }

    /// Step a value by `amount`, wrapping within its bounds
    pub fn inc(&mut self, id: SettingId, amount: i32) {
        self.settings[id.index()].increment(amount);
    }

    pub fn reset(&mut self, id: SettingId) {
        let setting = &mut self.settings[id.index()];
        setting.value = setting.default;
    }

    /// Reset every setting in `group` to its default
    pub fn reset_group(&mut self, group: SettingsGroupId) {
        for id in SettingId::ALL.into_iter().filter(|id| id.group() == group) {
            self.reset(id);
        }
    }

    pub fn is_expanded(&self, group: SettingsGroupId) -> bool {
        self.header(group).value != 0
    }

    pub fn toggle_section(&mut self, group: SettingsGroupId) {
        self.headers[group.index()].increment(1);
    }

    /// The settings list as shown on the settings page: every header,
    /// followed by its entries when the section is expanded.
    pub fn rows(&self) -> Vec<SettingsRow> {
        let mut rows = Vec::new();
        for group in SettingsGroupId::ALL {
            rows.push(SettingsRow::Header(group));
            if self.is_expanded(group) {
                rows.extend(
                    SettingId::ALL
                        .into_iter()
                        .filter(|id| id.group() == group)
                        .map(SettingsRow::Entry),
                );
            }
        }
        rows
    }

    /// Apply overrides from a TOML document
    pub fn apply_toml(&mut self, text: &str) -> Result<(), LoadError> {
        let file: SettingsFile = toml::from_str(text)?;

        for (group_key, values) in &file {
            let group = SettingsGroupId::ALL
                .into_iter()
                .find(|group| group.config_key() == group_key.as_str())
                .ok_or_else(|| LoadError::InvalidSetting {
                    key: group_key.clone(),
                    reason: "unknown settings group".to_string(),
                })?;

            for (key, value) in values {
                let id = SettingId::ALL
                    .into_iter()
                    .find(|id| id.group() == group && id.config_key() == key.as_str())
                    .ok_or_else(|| LoadError::InvalidSetting {
                        key: format!("{}.{}", group_key, key),
                        reason: "unknown setting".to_string(),
                    })?;
                let value = self.resolve_config_value(id, value)?;
                self.set(id, value)?;
                log::debug!("setting {} = {}", config_path(id), self.setting(id).value_name());
            }
        }
        Ok(())
    }

    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        let text = fs::read_to_string(path)?;
        self.apply_toml(&text)?;
        log::info!("applied settings from {}", path.display());
        Ok(())
    }

    fn resolve_config_value(&self, id: SettingId, value: &ConfigValue) -> Result<i32, LoadError> {
        let setting = self.setting(id);
        let invalid = |reason: String| LoadError::InvalidSetting {
            key: config_path(id),
            reason,
        };
        match value {
            ConfigValue::Bool(flag) => Ok(*flag as i32),
            ConfigValue::Int(n) => {
                i32::try_from(*n).map_err(|_| invalid(format!("value {} is out of range", n)))
            }
            ConfigValue::Name(name) => setting
                .value_names
                .and_then(|names| {
                    names
                        .iter()
                        .position(|candidate| candidate.eq_ignore_ascii_case(name))
                })
                .map(|index| setting.lower + index as i32)
                .ok_or_else(|| invalid(format!("unknown value `{}`", name))),
        }
    }
}

fn config_path(id: SettingId) -> String {
    format!("{}.{}", id.group().config_key(), id.config_key())
}
