//! Two-element `[name, value]` records.

use serde_yaml::Value;

use super::value::{expect_bool, expect_pair, expect_string, pair};
use crate::error::{Field, Location, RecordKey, Result};
use crate::types::{StateBlink, StateColorName, UserSetting};

fn decode_named<T>(
    node: &Value,
    at: Location,
    value: impl FnOnce(&Value, &Location) -> Result<T>,
) -> Result<(String, T)> {
    let (name, raw_value) = expect_pair(node, &at)?;
    let name = expect_string(name, &at.with_field(Field::Key))?;
    let at = at.keyed(RecordKey::Name(name.clone()));
    let value = value(raw_value, &at.with_field(Field::Value))?;
    Ok((name, value))
}

pub fn decode_state_blink(node: &Value, at: Location) -> Result<StateBlink> {
    let (name, value) = decode_named(node, at, expect_bool)?;
    Ok(StateBlink { name, value })
}

pub fn encode_state_blink(blink: &StateBlink) -> Value {
    pair(Value::String(blink.name.clone()), Value::Bool(blink.value))
}

pub fn decode_state_color(node: &Value, at: Location) -> Result<StateColorName> {
    let (name, value) = decode_named(node, at, expect_string)?;
    Ok(StateColorName { name, value })
}

pub fn encode_state_color(color: &StateColorName) -> Value {
    pair(
        Value::String(color.name.clone()),
        Value::String(color.value.clone()),
    )
}

pub fn decode_user_setting(node: &Value, at: Location) -> Result<UserSetting> {
    let (name, value) = decode_named(node, at, expect_bool)?;
    Ok(UserSetting { name, value })
}

pub fn encode_user_setting(setting: &UserSetting) -> Value {
    pair(Value::String(setting.name.clone()), Value::Bool(setting.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntityKind, ErrorCode};

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).expect("fixture yaml should parse")
    }

    #[test]
    fn blink_round_trips() {
        let node = yaml("[flag_AtWarCanFight, true]");
        let blink = decode_state_blink(&node, Location::new(EntityKind::StateBlink))
            .expect("blink should decode");
        assert_eq!(
            blink,
            StateBlink {
                name: "flag_AtWarCanFight".to_string(),
                value: true
            }
        );
        assert_eq!(encode_state_blink(&blink), node);
    }

    #[test]
    fn color_value_is_a_string() {
        let color = decode_state_color(
            &yaml("[flag_IsWanted, black]"),
            Location::new(EntityKind::StateColorName),
        )
        .expect("color should decode");
        assert_eq!(color.value, "black");

        let err = decode_state_color(
            &yaml("[flag_IsWanted, 3]"),
            Location::new(EntityKind::StateColorName).at(4),
        )
        .expect_err("int color");
        assert_eq!(
            err.to_string(),
            r#"StateColorName "flag_IsWanted" value: type is not string (int): 3"#
        );
    }

    #[test]
    fn setting_needs_two_entries() {
        let err = decode_user_setting(
            &yaml("[overviewBroadcastsToTop]"),
            Location::new(EntityKind::UserSetting).at(1),
        )
        .expect_err("one entry");
        assert_eq!(err.code(), ErrorCode::Shape);
        assert!(err.to_string().starts_with("UserSetting #1: wrong number of entries"));
    }

    #[test]
    fn setting_value_is_strictly_bool() {
        let err = decode_user_setting(
            &yaml("[overviewBroadcastsToTop, 1]"),
            Location::new(EntityKind::UserSetting),
        )
        .expect_err("int value");
        assert_eq!(err.code(), ErrorCode::Type);
    }
}
