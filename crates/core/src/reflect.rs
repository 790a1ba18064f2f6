//! Reflection probes over values.
//!
//! These are the stateless helpers the comparator and callers use to ask what
//! a value is and what it owns. They only look at the class slot and own
//! properties, never at blueprint identity, so they behave the same for values
//! from any realm. Non-objects get the default answer (empty, `false`,
//! `None`).

use std::cell::Ref;

use serde::{Deserialize, Serialize};

use crate::blueprint::Origin;
use crate::error::ReflectResult;
use crate::object::{Object, ObjectClass};
use crate::value::Value;

/// Primitive kinds that have an object wrapper.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Number,
    String,
}

fn inspect(value: &Value) -> ReflectResult<Option<Ref<'_, Object>>> {
    value.as_object().map(|obj| obj.inspect()).transpose()
}

fn class_matches(value: &Value, test: impl FnOnce(&ObjectClass) -> bool) -> ReflectResult<bool> {
    Ok(inspect(value)?.is_some_and(|object| test(object.class())))
}

/// Own enumerable members in insertion order. Array slots come first (holes
/// skipped), then the remaining own properties.
pub fn pairs(value: &Value) -> ReflectResult<Vec<(String, Value)>> {
    let Some(object) = inspect(value)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::new();
    if let Some(elements) = object.elements() {
        out.extend(
            elements
                .iter()
                .map(|(index, member)| (index.to_string(), member.clone())),
        );
    }
    out.extend(
        object
            .enumerable_properties()
            .map(|(key, member)| (key.to_string(), member.clone())),
    );
    Ok(out)
}

/// Own enumerable keys in insertion order; inherited members are never listed.
pub fn own_keys(value: &Value) -> ReflectResult<Vec<String>> {
    Ok(pairs(value)?.into_iter().map(|(key, _)| key).collect())
}

pub fn keys(value: &Value) -> ReflectResult<Vec<String>> {
    own_keys(value)
}

pub fn values(value: &Value) -> ReflectResult<Vec<Value>> {
    Ok(pairs(value)?.into_iter().map(|(_, member)| member).collect())
}

/// Own membership. Members only reachable through a blueprint do not count.
pub fn has(value: &Value, key: &str) -> ReflectResult<bool> {
    Ok(inspect(value)?.is_some_and(|object| object.has_own(key)))
}

/// Nominal origin, `None` for blueprint-less objects and for non-objects.
pub fn origin_of(value: &Value) -> ReflectResult<Option<Origin>> {
    Ok(inspect(value)?.and_then(|object| object.origin()))
}

pub fn is_array_like(value: &Value) -> ReflectResult<bool> {
    class_matches(value, |class| matches!(class, ObjectClass::Array(_)))
}

pub fn is_date_like(value: &Value) -> ReflectResult<bool> {
    class_matches(value, |class| matches!(class, ObjectClass::Date(_)))
}

pub fn is_pattern_like(value: &Value) -> ReflectResult<bool> {
    class_matches(value, |class| matches!(class, ObjectClass::Pattern(_)))
}

/// The primitive boxed by a wrapper object.
pub fn wrapped_primitive(value: &Value) -> ReflectResult<Option<Value>> {
    Ok(inspect(value)?.and_then(|object| match object.class() {
        ObjectClass::Boolean(b) => Some(Value::Bool(*b)),
        ObjectClass::Number(n) => Some(Value::Number(*n)),
        ObjectClass::String(s) => Some(Value::String(s.clone())),
        _ => None,
    }))
}

pub fn is_wrapper_of(value: &Value, kind: PrimitiveKind) -> ReflectResult<bool> {
    class_matches(value, |class| {
        matches!(
            (class, kind),
            (ObjectClass::Boolean(_), PrimitiveKind::Boolean)
                | (ObjectClass::Number(_), PrimitiveKind::Number)
                | (ObjectClass::String(_), PrimitiveKind::String)
        )
    })
}

/// Bare primitive, or the one inside a wrapper.
fn primitive(value: &Value) -> ReflectResult<Option<Value>> {
    match value {
        Value::Object(_) => wrapped_primitive(value),
        Value::Undefined | Value::Null => Ok(None),
        bare => Ok(Some(bare.clone())),
    }
}

pub fn is_array(value: &Value) -> ReflectResult<bool> {
    is_array_like(value)
}

pub fn is_date(value: &Value) -> ReflectResult<bool> {
    is_date_like(value)
}

pub fn is_pattern(value: &Value) -> ReflectResult<bool> {
    is_pattern_like(value)
}

pub fn is_function(value: &Value) -> ReflectResult<bool> {
    class_matches(value, |class| matches!(class, ObjectClass::Function(_)))
}

pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

pub fn is_null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

pub fn is_undefined(value: &Value) -> bool {
    matches!(value, Value::Undefined)
}

pub fn is_string(value: &Value) -> ReflectResult<bool> {
    Ok(matches!(primitive(value)?, Some(Value::String(_))))
}

pub fn is_number(value: &Value) -> ReflectResult<bool> {
    Ok(matches!(primitive(value)?, Some(Value::Number(_))))
}

pub fn is_boolean(value: &Value) -> ReflectResult<bool> {
    Ok(matches!(primitive(value)?, Some(Value::Bool(_))))
}

/// A number, bare or wrapped, that is NaN.
pub fn is_nan(value: &Value) -> ReflectResult<bool> {
    Ok(matches!(primitive(value)?, Some(Value::Number(n)) if n.is_nan()))
}

/// Finite numbers and strings that parse as one (see [`parse_numeric`]).
pub fn is_finite(value: &Value) -> ReflectResult<bool> {
    Ok(match primitive(value)? {
        Some(Value::Number(n)) => n.is_finite(),
        Some(Value::String(s)) => parse_numeric(&s).is_some_and(f64::is_finite),
        _ => false,
    })
}

/// Numeric string grammar: surrounding whitespace, then either a decimal
/// literal (`12`, `-1.5e3`, `.5`) or an unsigned integer with a `0x`, `0o` or
/// `0b` prefix. Blank strings are not numbers.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ if trimmed.is_empty() => return None,
        _ => return trimmed.parse().ok(),
    };
    let digits = &trimmed[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, digit| {
        digit
            .to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// `true` when there is nothing to enumerate: nullish values, primitives
/// other than non-empty strings, empty arrays and strings (wrapped or bare),
/// and objects with no own enumerable members.
pub fn is_empty(value: &Value) -> ReflectResult<bool> {
    let object = match value {
        Value::String(s) => return Ok(s.is_empty()),
        Value::Object(obj) => obj.inspect()?,
        _ => return Ok(true),
    };
    Ok(match object.class() {
        ObjectClass::Array(elements) => elements.is_empty(),
        ObjectClass::String(s) => s.is_empty(),
        _ => object.enumerable_len() == 0,
    })
}
