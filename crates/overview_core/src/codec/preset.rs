use serde_yaml::Value;

use super::value::{
    attribute, decode_codes, encode_codes, expect_attribute, expect_pair, expect_sequence,
    expect_string, pair,
};
use crate::catalog::ReferenceTables;
use crate::error::{Field, Location, OverviewError, RecordKey, Result};
use crate::types::{Preset, PresetAttribute, PresetAttributeKind};

/// `[name, [[attrName, [code, ...]], ...]]`
pub fn decode_preset(node: &Value, at: Location) -> Result<Preset> {
    let (name, attrs) = expect_pair(node, &at)?;
    let name = expect_string(name, &at.with_field(Field::Key))?;
    let at = at.keyed(RecordKey::Name(name.clone()));
    let attrs = expect_sequence(attrs, &at.with_field(Field::Attributes))?;

    let mut preset = Preset::new(name);
    for attr in attrs {
        let (attr_name, values) = expect_attribute(attr, &at.with_field(Field::Attributes))?;
        let Some(kind) = PresetAttributeKind::from_name(&attr_name) else {
            return Err(OverviewError::UnknownAttribute {
                location: at,
                attribute: attr_name,
            });
        };
        let field_at = at.with_field(Field::Attribute(attr_name));
        let values = expect_sequence(values, &field_at)?;
        preset.set(match kind {
            PresetAttributeKind::AlwaysShownStates => {
                PresetAttribute::AlwaysShownStates(decode_codes(values, &field_at)?)
            }
            PresetAttributeKind::FilteredStates => {
                PresetAttribute::FilteredStates(decode_codes(values, &field_at)?)
            }
            PresetAttributeKind::Groups => {
                PresetAttribute::Groups(decode_codes(values, &field_at)?)
            }
        });
    }
    Ok(preset)
}

pub fn encode_preset(preset: &Preset, tables: &ReferenceTables) -> Value {
    let attrs = preset
        .attributes()
        .iter()
        .map(|attr| {
            let values = match attr {
                PresetAttribute::AlwaysShownStates(states)
                | PresetAttribute::FilteredStates(states) => encode_codes(states, tables),
                PresetAttribute::Groups(groups) => encode_codes(groups, tables),
            };
            attribute(attr.kind().as_str(), values)
        })
        .collect();
    pair(Value::String(preset.name.clone()), Value::Sequence(attrs))
}
