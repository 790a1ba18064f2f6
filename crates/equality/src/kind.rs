//! Value classification.
//!
//! Every value is sorted into exactly one [`ComparisonKind`] before the
//! comparator looks at it. Classification reads the object's class slot and
//! nothing else: blueprints can be swapped by callers and differ between
//! realms, the class slot cannot.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use objkit_core::{ObjectClass, ObjectRef, Pattern, ReflectResult, Value};

/// Closed set of kinds the comparator dispatches on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonKind {
    PrimitiveNullish,
    Boolean,
    Number,
    String,
    Date,
    Pattern,
    ArrayLike,
    PlainContainer,
    Function,
    Opaque,
}

impl ComparisonKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonKind::PrimitiveNullish => "primitive-nullish",
            ComparisonKind::Boolean => "boolean",
            ComparisonKind::Number => "number",
            ComparisonKind::String => "string",
            ComparisonKind::Date => "date",
            ComparisonKind::Pattern => "pattern",
            ComparisonKind::ArrayLike => "array-like",
            ComparisonKind::PlainContainer => "plain-container",
            ComparisonKind::Function => "function",
            ComparisonKind::Opaque => "opaque",
        }
    }

    /// Kinds with addressable members.
    pub fn is_composite(self) -> bool {
        matches!(self, ComparisonKind::ArrayLike | ComparisonKind::PlainContainer)
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified value with the payload its kind is compared on.
///
/// Primitive kinds carry the unwrapped primitive plus whether it came out of
/// a wrapper object; composite and identity-compared kinds keep the handle.
#[derive(Debug, Clone)]
pub enum Classified {
    Undefined,
    Null,
    Boolean { value: bool, wrapped: bool },
    Number { value: f64, wrapped: bool },
    String { value: Rc<str>, wrapped: bool },
    /// `None` is the invalid date.
    Date(Option<DateTime<Utc>>),
    Pattern(Pattern),
    ArrayLike(ObjectRef),
    PlainContainer(ObjectRef),
    Function(ObjectRef),
    Opaque(ObjectRef),
}

impl Classified {
    pub fn kind(&self) -> ComparisonKind {
        match self {
            Classified::Undefined | Classified::Null => ComparisonKind::PrimitiveNullish,
            Classified::Boolean { .. } => ComparisonKind::Boolean,
            Classified::Number { .. } => ComparisonKind::Number,
            Classified::String { .. } => ComparisonKind::String,
            Classified::Date(_) => ComparisonKind::Date,
            Classified::Pattern(_) => ComparisonKind::Pattern,
            Classified::ArrayLike(_) => ComparisonKind::ArrayLike,
            Classified::PlainContainer(_) => ComparisonKind::PlainContainer,
            Classified::Function(_) => ComparisonKind::Function,
            Classified::Opaque(_) => ComparisonKind::Opaque,
        }
    }

    /// Whether the primitive payload was unwrapped from an object.
    pub fn is_wrapped(&self) -> bool {
        matches!(
            self,
            Classified::Boolean { wrapped: true, .. }
                | Classified::Number { wrapped: true, .. }
                | Classified::String { wrapped: true, .. }
        )
    }
}

/// Classifies a value. Fails only when the value's object cannot be inspected.
pub fn classify(value: &Value) -> ReflectResult<Classified> {
    let obj = match value {
        Value::Undefined => return Ok(Classified::Undefined),
        Value::Null => return Ok(Classified::Null),
        Value::Bool(value) => {
            return Ok(Classified::Boolean {
                value: *value,
                wrapped: false,
            });
        }
        Value::Number(value) => {
            return Ok(Classified::Number {
                value: *value,
                wrapped: false,
            });
        }
        Value::String(value) => {
            return Ok(Classified::String {
                value: value.clone(),
                wrapped: false,
            });
        }
        Value::Object(obj) => obj,
    };

    let object = obj.inspect()?;
    Ok(match object.class() {
        ObjectClass::Boolean(value) => Classified::Boolean {
            value: *value,
            wrapped: true,
        },
        ObjectClass::Number(value) => Classified::Number {
            value: *value,
            wrapped: true,
        },
        ObjectClass::String(value) => Classified::String {
            value: value.clone(),
            wrapped: true,
        },
        ObjectClass::Date(instant) => Classified::Date(*instant),
        ObjectClass::Pattern(pattern) => Classified::Pattern(pattern.clone()),
        ObjectClass::Array(_) => Classified::ArrayLike(obj.clone()),
        ObjectClass::Plain => Classified::PlainContainer(obj.clone()),
        ObjectClass::Function(_) => Classified::Function(obj.clone()),
        ObjectClass::Opaque(_) => Classified::Opaque(obj.clone()),
    })
}
