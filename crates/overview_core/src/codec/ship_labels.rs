use serde_yaml::Value;

use super::value::{
    attribute, encode_int, encode_nullable, expect_attribute, expect_int, expect_pair,
    expect_sequence, expect_string, pair, raw,
};
use crate::error::{Field, Location, OverviewError, RecordKey, Result};
use crate::types::{NullableString, ShipLabel, ShipLabelState};

const POST: &str = "post";
const PRE: &str = "pre";
const STATE: &str = "state";
const TYPE: &str = "type";

/// `[name | null, [[post, ...], [pre, ...], [state, 0|1], [type, ... | null]]]`
pub fn decode_ship_label(node: &Value, at: Location) -> Result<ShipLabel> {
    let (name, attrs) = expect_pair(node, &at)?;
    let name = expect_string(name, &at.with_field(Field::Key))?;
    let at = at.keyed(RecordKey::Name(name.clone()));
    let attrs = expect_sequence(attrs, &at.with_field(Field::Attributes))?;

    let mut label = ShipLabel {
        name: NullableString::new(name),
        ..ShipLabel::default()
    };
    for attr in attrs {
        let (attr_name, value) = expect_attribute(attr, &at.with_field(Field::Attributes))?;
        let field_at = at.with_field(Field::Attribute(attr_name.clone()));
        match attr_name.as_str() {
            POST => label.post = expect_string(value, &field_at)?,
            PRE => label.pre = expect_string(value, &field_at)?,
            TYPE => label.label_type = NullableString::new(expect_string(value, &field_at)?),
            STATE => {
                let raw_state = expect_int(value, &field_at)?;
                label.state =
                    ShipLabelState::from_raw(raw_state).ok_or_else(|| OverviewError::Type {
                        location: field_at.clone(),
                        expected: "ship label state (0 or 1)",
                        found: "int",
                        raw: raw(value),
                    })?;
            }
            _ => {
                return Err(OverviewError::UnknownAttribute {
                    location: at,
                    attribute: attr_name,
                });
            }
        }
    }
    Ok(label)
}

pub fn encode_ship_label(label: &ShipLabel) -> Value {
    let attrs = vec![
        attribute(POST, Value::String(label.post.clone())),
        attribute(PRE, Value::String(label.pre.clone())),
        attribute(STATE, encode_int(label.state.raw())),
        attribute(TYPE, encode_nullable(&label.label_type)),
    ];
    pair(encode_nullable(&label.name), Value::Sequence(attrs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntityKind, ErrorCode};

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).expect("fixture yaml should parse")
    }

    fn decode(text: &str) -> Result<ShipLabel> {
        decode_ship_label(&yaml(text), Location::new(EntityKind::ShipLabel).at(0))
    }

    #[test]
    fn decodes_label() {
        let label = decode(
            r#"
- null
- - [post, ' ']
  - [pre, '[']
  - [state, 1]
  - [type, corporation]
"#,
        )
        .expect("label should decode");
        assert!(label.name.is_null());
        assert_eq!(label.pre, "[");
        assert_eq!(label.post, " ");
        assert_eq!(label.state, ShipLabelState::Enabled);
        assert_eq!(label.label_type.as_str(), "corporation");
    }

    #[test]
    fn empty_type_encodes_as_null_and_decodes_back_empty() {
        let label = ShipLabel {
            name: NullableString::from("pilot"),
            label_type: NullableString::from(""),
            ..ShipLabel::default()
        };
        let encoded = encode_ship_label(&label);
        assert_eq!(
            encoded,
            yaml("[pilot, [[post, ''], [pre, ''], [state, 0], [type, null]]]")
        );
        let decoded = decode_ship_label(&encoded, Location::new(EntityKind::ShipLabel))
            .expect("encoded label should decode");
        assert_eq!(decoded.label_type.as_str(), "");
        assert_eq!(decoded, label);
    }

    #[test]
    fn state_must_be_zero_or_one() {
        let err = decode("[x, [[state, 2]]]").expect_err("state 2");
        assert_eq!(err.code(), ErrorCode::Type);
        assert!(err.to_string().contains("ship label state"), "{err}");

        let err = decode("[x, [[state, 'on']]]").expect_err("string state");
        assert_eq!(err.code(), ErrorCode::Type);
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let err = decode("[x, [[colour, red]]]").expect_err("colour");
        assert_eq!(
            err.to_string(),
            r#"ShipLabel "x" has unknown attribute "colour""#
        );
    }
}
