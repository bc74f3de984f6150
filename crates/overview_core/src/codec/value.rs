//! Strict accessors over `serde_yaml::Value`.
//!
//! Every accessor takes the `Location` being decoded so a failure can say
//! which record and field it came from.

use serde_yaml::{Number, Value};

use crate::catalog::ReferenceTables;
use crate::codes::ReferenceCode;
use crate::error::{Location, OverviewError, Result, ShapeProblem};
use crate::types::NullableString;

const RAW_LIMIT: usize = 160;

pub(crate) fn type_name(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Compact flow-style rendering of a node for error messages.
pub(crate) fn raw(node: &Value) -> String {
    let mut out = String::new();
    write_raw(node, &mut out);
    if out.chars().count() > RAW_LIMIT {
        let mut cut: String = out.chars().take(RAW_LIMIT).collect();
        cut.push_str("...");
        return cut;
    }
    out
}

fn write_raw(node: &Value, out: &mut String) {
    match node {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&format!("{s:?}")),
        Value::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_raw(item, out);
            }
            out.push(']');
        }
        Value::Mapping(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_raw(k, out);
                out.push_str(": ");
                write_raw(v, out);
            }
            out.push('}');
        }
        Value::Tagged(tagged) => {
            out.push_str(&format!("{} ", tagged.tag));
            write_raw(&tagged.value, out);
        }
    }
}

fn type_error(node: &Value, at: &Location, expected: &'static str) -> OverviewError {
    OverviewError::Type {
        location: at.clone(),
        expected,
        found: type_name(node),
        raw: raw(node),
    }
}

fn shape_error(node: &Value, at: &Location, problem: ShapeProblem) -> OverviewError {
    OverviewError::Shape {
        location: at.clone(),
        problem,
        raw: raw(node),
    }
}

pub(crate) fn expect_sequence<'a>(node: &'a Value, at: &Location) -> Result<&'a [Value]> {
    match node {
        Value::Sequence(items) => Ok(items),
        other => Err(shape_error(
            other,
            at,
            ShapeProblem::NotSequence {
                found: type_name(other),
            },
        )),
    }
}

/// A top-level section may be written as `key:` with nothing after it.
pub(crate) fn section_items<'a>(node: &'a Value, at: &Location) -> Result<&'a [Value]> {
    match node {
        Value::Null => Ok(&[]),
        other => expect_sequence(other, at),
    }
}

pub(crate) fn expect_pair<'a>(node: &'a Value, at: &Location) -> Result<(&'a Value, &'a Value)> {
    match expect_sequence(node, at)? {
        [first, second] => Ok((first, second)),
        items => Err(shape_error(
            node,
            at,
            ShapeProblem::WrongLength {
                expected: 2,
                actual: items.len(),
            },
        )),
    }
}

/// `null` reads as the empty string; the client writes it for blank names.
pub(crate) fn expect_string(node: &Value, at: &Location) -> Result<String> {
    match node {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        other => Err(type_error(other, at, "string")),
    }
}

pub(crate) fn expect_int(node: &Value, at: &Location) -> Result<i64> {
    match node {
        Value::Number(n) => n.as_i64().ok_or_else(|| type_error(node, at, "int")),
        other => Err(type_error(other, at, "int")),
    }
}

pub(crate) fn expect_i32(node: &Value, at: &Location) -> Result<i32> {
    let n = expect_int(node, at)?;
    i32::try_from(n).map_err(|_| type_error(node, at, "32-bit int"))
}

pub(crate) fn expect_bool(node: &Value, at: &Location) -> Result<bool> {
    match node {
        Value::Bool(b) => Ok(*b),
        other => Err(type_error(other, at, "bool")),
    }
}

/// A code list entry: a bare integer, or a `"<int> <trailing text>"` string
/// left over from a file whose comments were never restored.
pub(crate) fn expect_code(node: &Value, at: &Location) -> Result<i32> {
    match node {
        Value::Number(_) => expect_i32(node, at),
        Value::String(s) => s
            .split_once(' ')
            .and_then(|(head, _)| head.parse::<i32>().ok())
            .ok_or_else(|| type_error(node, at, "int or \"<int> <comment>\" string")),
        other => Err(type_error(other, at, "int")),
    }
}

pub(crate) fn decode_codes<T: ReferenceCode>(items: &[Value], at: &Location) -> Result<Vec<T>> {
    items
        .iter()
        .map(|item| expect_code(item, at).map(T::from_raw))
        .collect()
}

pub(crate) fn decode_strings(items: &[Value], at: &Location) -> Result<Vec<String>> {
    items.iter().map(|item| expect_string(item, at)).collect()
}

/// An `[attrName, attrValue]` entry of an attribute list.
pub(crate) fn expect_attribute<'a>(node: &'a Value, at: &Location) -> Result<(String, &'a Value)> {
    let (name, value) = expect_pair(node, at)?;
    Ok((expect_string(name, at)?, value))
}

pub(crate) fn encode_codes<T: ReferenceCode>(codes: &[T], tables: &ReferenceTables) -> Value {
    Value::Sequence(
        codes
            .iter()
            .map(|code| Value::String(code.commented(tables)))
            .collect(),
    )
}

pub(crate) fn encode_strings(values: &[String]) -> Value {
    Value::Sequence(values.iter().cloned().map(Value::String).collect())
}

pub(crate) fn encode_nullable(value: &NullableString) -> Value {
    if value.is_null() {
        Value::Null
    } else {
        Value::String(value.as_str().to_string())
    }
}

pub(crate) fn encode_int(value: i64) -> Value {
    Value::Number(Number::from(value))
}

pub(crate) fn pair(first: Value, second: Value) -> Value {
    Value::Sequence(vec![first, second])
}

pub(crate) fn attribute(name: &str, value: Value) -> Value {
    pair(Value::String(name.to_string()), value)
}
