//! Conversion between the untyped YAML tree and the typed overview model.
//!
//! Decoding is strict: every record is checked for arity, every attribute
//! name against its entity's fixed set, and every scalar for its exact type.
//! The first failure aborts the whole document. Encoding produces the same
//! sequence layout with codes rendered as sentinel-marked strings, ready for
//! the comment pass in the render crate.

mod preset;
mod settings;
mod ship_labels;
mod tabs;
mod value;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::catalog::ReferenceTables;
use crate::error::{EntityKind, Field, Location, OverviewError, Result, ShapeProblem};
use crate::types::Overview;

pub use preset::{decode_preset, encode_preset};
pub use settings::{
    decode_state_blink, decode_state_color, decode_user_setting, encode_state_blink,
    encode_state_color, encode_user_setting,
};
pub use ship_labels::{decode_ship_label, encode_ship_label};
pub use tabs::{decode_tab_setup, encode_tab_setup};

use value::{
    decode_codes, decode_strings, encode_codes, encode_strings, raw, section_items, type_name,
};

pub const BACKGROUND_ORDER: &str = "backgroundOrder";
pub const BACKGROUND_STATES: &str = "backgroundStates";
pub const COLUMN_ORDER: &str = "columnOrder";
pub const FLAG_ORDER: &str = "flagOrder";
pub const FLAG_STATES: &str = "flagStates";
pub const OVERVIEW_COLUMNS: &str = "overviewColumns";
pub const PRESETS: &str = "presets";
pub const SHIP_LABEL_ORDER: &str = "shipLabelOrder";
pub const SHIP_LABELS: &str = "shipLabels";
pub const STATE_BLINKS: &str = "stateBlinks";
pub const STATE_COLORS_NAME_LIST: &str = "stateColorsNameList";
pub const TAB_SETUP: &str = "tabSetup";
pub const USER_SETTINGS: &str = "userSettings";

fn decode_entries<T>(
    items: &[Value],
    entity: EntityKind,
    decode: impl Fn(&Value, Location) -> Result<T>,
) -> Result<Vec<T>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode(item, Location::new(entity).at(index)))
        .collect()
}

pub fn decode_overview(root: &Value) -> Result<Overview> {
    let at = Location::new(EntityKind::Overview);
    let mut overview = Overview::default();
    let mapping = match root {
        Value::Null => return Ok(overview),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(OverviewError::Shape {
                location: at,
                problem: ShapeProblem::NotMapping {
                    found: type_name(other),
                },
                raw: raw(other),
            });
        }
    };

    for (key, node) in mapping {
        let Value::String(key) = key else {
            return Err(OverviewError::Shape {
                location: at,
                problem: ShapeProblem::NonStringKey {
                    found: type_name(key),
                },
                raw: raw(key),
            });
        };
        let section_at = at.with_field(Field::Section(key.clone()));
        let items = section_items(node, &section_at)?;
        match key.as_str() {
            BACKGROUND_ORDER => overview.background_order = decode_codes(items, &section_at)?,
            BACKGROUND_STATES => overview.background_states = decode_codes(items, &section_at)?,
            COLUMN_ORDER => overview.column_order = decode_strings(items, &section_at)?,
            FLAG_ORDER => overview.flag_order = decode_codes(items, &section_at)?,
            FLAG_STATES => overview.flag_states = decode_codes(items, &section_at)?,
            OVERVIEW_COLUMNS => overview.overview_columns = decode_strings(items, &section_at)?,
            PRESETS => overview.presets = decode_entries(items, EntityKind::Preset, decode_preset)?,
            SHIP_LABEL_ORDER => overview.ship_label_order = decode_strings(items, &section_at)?,
            SHIP_LABELS => {
                overview.ship_labels =
                    decode_entries(items, EntityKind::ShipLabel, decode_ship_label)?
            }
            STATE_BLINKS => {
                overview.state_blinks =
                    decode_entries(items, EntityKind::StateBlink, decode_state_blink)?
            }
            STATE_COLORS_NAME_LIST => {
                overview.state_colors =
                    decode_entries(items, EntityKind::StateColorName, decode_state_color)?
            }
            TAB_SETUP => {
                overview.tab_setup = decode_entries(items, EntityKind::TabSetup, decode_tab_setup)?
            }
            USER_SETTINGS => {
                overview.user_settings =
                    decode_entries(items, EntityKind::UserSetting, decode_user_setting)?
            }
            _ => {
                return Err(OverviewError::UnknownAttribute {
                    location: at,
                    attribute: key.clone(),
                });
            }
        }
    }

    debug!(
        presets = overview.presets.len(),
        tabs = overview.tab_setup.len(),
        ship_labels = overview.ship_labels.len(),
        "decoded overview"
    );
    Ok(overview)
}

/// Encodes every section, in file order, including empty ones.
pub fn encode_overview(overview: &Overview, tables: &ReferenceTables) -> Value {
    let sections = [
        (BACKGROUND_ORDER, encode_codes(&overview.background_order, tables)),
        (BACKGROUND_STATES, encode_codes(&overview.background_states, tables)),
        (COLUMN_ORDER, encode_strings(&overview.column_order)),
        (FLAG_ORDER, encode_codes(&overview.flag_order, tables)),
        (FLAG_STATES, encode_codes(&overview.flag_states, tables)),
        (OVERVIEW_COLUMNS, encode_strings(&overview.overview_columns)),
        (
            PRESETS,
            Value::Sequence(
                overview
                    .presets
                    .iter()
                    .map(|preset| encode_preset(preset, tables))
                    .collect(),
            ),
        ),
        (SHIP_LABEL_ORDER, encode_strings(&overview.ship_label_order)),
        (
            SHIP_LABELS,
            Value::Sequence(overview.ship_labels.iter().map(encode_ship_label).collect()),
        ),
        (
            STATE_BLINKS,
            Value::Sequence(overview.state_blinks.iter().map(encode_state_blink).collect()),
        ),
        (
            STATE_COLORS_NAME_LIST,
            Value::Sequence(overview.state_colors.iter().map(encode_state_color).collect()),
        ),
        (
            TAB_SETUP,
            Value::Sequence(overview.tab_setup.iter().map(encode_tab_setup).collect()),
        ),
        (
            USER_SETTINGS,
            Value::Sequence(overview.user_settings.iter().map(encode_user_setting).collect()),
        ),
    ];

    let mut root = Mapping::new();
    for (key, value) in sections {
        root.insert(Value::String(key.to_string()), value);
    }
    debug!(presets = overview.presets.len(), "encoded overview");
    Value::Mapping(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::StateType;
    use crate::error::ErrorCode;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).expect("fixture yaml should parse")
    }

    #[test]
    fn empty_document_is_an_empty_overview() {
        assert_eq!(decode_overview(&Value::Null).expect("null root"), Overview::default());
    }

    #[test]
    fn null_sections_decode_empty() {
        let overview = decode_overview(&yaml("presets:\nflagOrder: [9, 10]\n")).expect("doc");
        assert!(overview.presets.is_empty());
        assert_eq!(overview.flag_order, vec![StateType(9), StateType(10)]);
    }

    #[test]
    fn root_must_be_a_mapping() {
        let err = decode_overview(&yaml("[1, 2]")).expect_err("sequence root");
        assert_eq!(err.code(), ErrorCode::Shape);
        assert!(err.to_string().starts_with("Overview: expected a mapping"), "{err}");
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let err = decode_overview(&yaml("presets: []\nfancyNewThing: []\n"))
            .expect_err("unknown key");
        assert_eq!(err.code(), ErrorCode::UnknownAttribute);
        assert_eq!(
            err.to_string(),
            r#"Overview has unknown attribute "fancyNewThing""#
        );
    }

    #[test]
    fn section_must_be_a_sequence() {
        let err = decode_overview(&yaml("columnOrder: ICON\n")).expect_err("scalar section");
        assert!(
            err.to_string()
                .starts_with(r#"Overview section "columnOrder": expected a sequence"#),
            "{err}"
        );
    }

    #[test]
    fn entry_errors_carry_their_index() {
        let err = decode_overview(&yaml("stateBlinks:\n- [a, true]\n- [b]\n"))
            .expect_err("short entry");
        assert!(err.to_string().starts_with("StateBlink #1:"), "{err}");
    }

    #[test]
    fn encode_emits_every_section_in_file_order() {
        let encoded = encode_overview(&Overview::default(), &ReferenceTables::default());
        let keys: Vec<&str> = encoded
            .as_mapping()
            .expect("root should be a mapping")
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(
            keys,
            vec![
                BACKGROUND_ORDER,
                BACKGROUND_STATES,
                COLUMN_ORDER,
                FLAG_ORDER,
                FLAG_STATES,
                OVERVIEW_COLUMNS,
                PRESETS,
                SHIP_LABEL_ORDER,
                SHIP_LABELS,
                STATE_BLINKS,
                STATE_COLORS_NAME_LIST,
                TAB_SETUP,
                USER_SETTINGS,
            ]
        );
    }
}
