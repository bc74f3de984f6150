use serde_yaml::Value;

use super::value::{
    attribute, encode_int, encode_nullable, expect_attribute, expect_bool, expect_i32,
    expect_pair, expect_sequence, expect_string, pair,
};
use crate::error::{Field, Location, OverviewError, RecordKey, Result};
use crate::types::{NullableString, TabSetup};

const BRACKET: &str = "bracket";
const NAME: &str = "name";
const OVERVIEW: &str = "overview";
const SHOW_ALL: &str = "showAll";
const SHOW_NONE: &str = "showNone";
const SHOW_SPECIALS: &str = "showSpecials";

/// `[id, [[attrName, value], ...]]`
pub fn decode_tab_setup(node: &Value, at: Location) -> Result<TabSetup> {
    let (id, attrs) = expect_pair(node, &at)?;
    let id = expect_i32(id, &at.with_field(Field::Key))?;
    let at = at.keyed(RecordKey::Id(i64::from(id)));
    let attrs = expect_sequence(attrs, &at.with_field(Field::Attributes))?;

    let mut tab = TabSetup {
        id,
        ..TabSetup::default()
    };
    for attr in attrs {
        let (name, value) = expect_attribute(attr, &at.with_field(Field::Attributes))?;
        let field_at = at.with_field(Field::Attribute(name.clone()));
        match name.as_str() {
            BRACKET => tab.bracket = NullableString::new(expect_string(value, &field_at)?),
            NAME => tab.name = expect_string(value, &field_at)?,
            OVERVIEW => tab.overview = expect_string(value, &field_at)?,
            SHOW_ALL => tab.show_all = Some(expect_bool(value, &field_at)?),
            SHOW_NONE => tab.show_none = Some(expect_bool(value, &field_at)?),
            SHOW_SPECIALS => tab.show_specials = Some(expect_bool(value, &field_at)?),
            _ => {
                return Err(OverviewError::UnknownAttribute {
                    location: at,
                    attribute: name,
                });
            }
        }
    }
    Ok(tab)
}

pub fn encode_tab_setup(tab: &TabSetup) -> Value {
    let mut attrs = vec![
        attribute(BRACKET, encode_nullable(&tab.bracket)),
        attribute(NAME, Value::String(tab.name.clone())),
        attribute(OVERVIEW, Value::String(tab.overview.clone())),
    ];
    let flags = [
        (SHOW_ALL, tab.show_all),
        (SHOW_NONE, tab.show_none),
        (SHOW_SPECIALS, tab.show_specials),
    ];
    for (name, flag) in flags {
        if let Some(flag) = flag {
            attrs.push(attribute(name, Value::Bool(flag)));
        }
    }
    pair(encode_int(i64::from(tab.id)), Value::Sequence(attrs))
}
