use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codes::{InvGroupId, StateType};

/// A string where "absent" and "empty" are the same thing.
///
/// Decodes `null` to `""` and encodes `""` back to `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NullableString(pub String);

impl NullableString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NullableString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NullableString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NullableString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root of an overview settings file.
///
/// Every list keeps the order it was read in; the client lays out its UI
/// from these orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    pub background_order: Vec<StateType>,
    pub background_states: Vec<StateType>,
    pub column_order: Vec<String>,
    pub flag_order: Vec<StateType>,
    pub flag_states: Vec<StateType>,
    pub overview_columns: Vec<String>,
    pub presets: Vec<Preset>,
    pub ship_label_order: Vec<String>,
    pub ship_labels: Vec<ShipLabel>,
    pub state_blinks: Vec<StateBlink>,
    pub state_colors: Vec<StateColorName>,
    pub tab_setup: Vec<TabSetup>,
    pub user_settings: Vec<UserSetting>,
}

impl Overview {
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn preset_mut(&mut self, name: &str) -> Option<&mut Preset> {
        self.presets.iter_mut().find(|p| p.name == name)
    }

    pub fn preset_ignore_case(&self, name: &str) -> Option<&Preset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn tab(&self, id: i32) -> Option<&TabSetup> {
        self.tab_setup.iter().find(|t| t.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetAttributeKind {
    AlwaysShownStates,
    FilteredStates,
    Groups,
}

impl PresetAttributeKind {
    pub const ALL: [Self; 3] = [Self::AlwaysShownStates, Self::FilteredStates, Self::Groups];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::AlwaysShownStates => "alwaysShownStates",
            Self::FilteredStates => "filteredStates",
            Self::Groups => "groups",
        }
    }

    /// Case-sensitive, as written in the file.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetAttribute {
    AlwaysShownStates(Vec<StateType>),
    FilteredStates(Vec<StateType>),
    Groups(Vec<InvGroupId>),
}

impl PresetAttribute {
    pub fn kind(&self) -> PresetAttributeKind {
        match self {
            Self::AlwaysShownStates(_) => PresetAttributeKind::AlwaysShownStates,
            Self::FilteredStates(_) => PresetAttributeKind::FilteredStates,
            Self::Groups(_) => PresetAttributeKind::Groups,
        }
    }
}

/// A named filter preset. Attributes are an ordered set keyed by kind; an
/// attribute that was never set is left out of the file entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    attributes: Vec<PresetAttribute>,
}

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attributes(&self) -> &[PresetAttribute] {
        &self.attributes
    }

    pub fn get(&self, kind: PresetAttributeKind) -> Option<&PresetAttribute> {
        self.attributes.iter().find(|attr| attr.kind() == kind)
    }

    /// Replaces an attribute of the same kind in place, or appends it.
    pub fn set(&mut self, attribute: PresetAttribute) {
        match self
            .attributes
            .iter_mut()
            .find(|existing| existing.kind() == attribute.kind())
        {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    pub fn remove(&mut self, kind: PresetAttributeKind) -> Option<PresetAttribute> {
        let index = self.attributes.iter().position(|attr| attr.kind() == kind)?;
        Some(self.attributes.remove(index))
    }

    pub fn always_shown_states(&self) -> Option<&[StateType]> {
        match self.get(PresetAttributeKind::AlwaysShownStates)? {
            PresetAttribute::AlwaysShownStates(states) => Some(states),
            _ => None,
        }
    }

    pub fn filtered_states(&self) -> Option<&[StateType]> {
        match self.get(PresetAttributeKind::FilteredStates)? {
            PresetAttribute::FilteredStates(states) => Some(states),
            _ => None,
        }
    }

    pub fn groups(&self) -> Option<&[InvGroupId]> {
        match self.get(PresetAttributeKind::Groups)? {
            PresetAttribute::Groups(groups) => Some(groups),
            _ => None,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Serializes with the file's attribute names; unset flags are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSetup {
    pub id: i32,
    pub bracket: NullableString,
    pub name: String,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_all: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_none: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_specials: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipLabelState {
    #[default]
    Disabled,
    Enabled,
}

impl ShipLabelState {
    pub const DISABLED_RAW: i64 = 0;
    pub const ENABLED_RAW: i64 = 1;

    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            Self::DISABLED_RAW => Some(Self::Disabled),
            Self::ENABLED_RAW => Some(Self::Enabled),
            _ => None,
        }
    }

    pub fn raw(&self) -> i64 {
        match *self {
            Self::Disabled => Self::DISABLED_RAW,
            Self::Enabled => Self::ENABLED_RAW,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipLabel {
    pub name: NullableString,
    pub pre: String,
    pub post: String,
    pub label_type: NullableString,
    pub state: ShipLabelState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlink {
    pub name: String,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateColorName {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSetting {
    pub name: String,
    pub value: bool,
}
