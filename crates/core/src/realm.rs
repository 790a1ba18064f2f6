//! Realms: isolated value-construction contexts.
//!
//! Every composite value is created through a realm. Two realms never share
//! blueprints, so values that cross between them must be recognized by their
//! class slot and never by blueprint identity.

use std::rc::Rc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::blueprint::Blueprint;
use crate::error::{ValueError, ValueResult};
use crate::id::RealmId;
use crate::object::{Elements, Object, ObjectClass, ObjectRef, Pattern};
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct Realm {
    id: RealmId,
    base: Blueprint,
}

impl Realm {
    pub fn new() -> Self {
        let id = RealmId::new();
        tracing::debug!(realm = %id, "realm created");
        Self {
            id,
            base: Blueprint::base(id),
        }
    }

    pub fn id(&self) -> RealmId {
        self.id
    }

    /// Origin of plain containers created by this realm.
    pub fn base_blueprint(&self) -> &Blueprint {
        &self.base
    }

    /// A new user-defined blueprint.
    pub fn blueprint(&self, name: &str) -> Blueprint {
        Blueprint::named(name, self.id)
    }

    fn alloc(&self, class: ObjectClass) -> ObjectRef {
        ObjectRef::new(Object::new(class, Some(self.base.clone()), self.id))
    }

    fn alloc_value(&self, class: ObjectClass) -> Value {
        Value::Object(self.alloc(class))
    }

    /// Plain container with the realm's base blueprint.
    pub fn object<I, K>(&self, entries: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.base.instantiate(entries)
    }

    /// Plain container with no blueprint, hence no determinable origin.
    pub fn bare_object<I, K>(&self, entries: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let obj = ObjectRef::new(Object::new(ObjectClass::Plain, None, self.id));
        for (key, value) in entries {
            let key: String = key.into();
            obj.set(&key, value);
        }
        Value::Object(obj)
    }

    pub fn array<I>(&self, items: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        self.alloc_value(ObjectClass::Array(items.into_iter().collect()))
    }

    /// Array of `len` holes, at most [`MAX_ARRAY_LEN`](crate::object::MAX_ARRAY_LEN).
    pub fn sparse_array(&self, len: usize) -> Value {
        self.alloc_value(ObjectClass::Array(Elements::holes(len)))
    }

    /// Wraps a boolean, number or string primitive in an object.
    pub fn boxed(&self, primitive: impl Into<Value>) -> ValueResult<Value> {
        let class = match primitive.into() {
            Value::Bool(b) => ObjectClass::Boolean(b),
            Value::Number(n) => ObjectClass::Number(n),
            Value::String(s) => ObjectClass::String(s),
            other => return Err(ValueError::not_a_primitive(other.type_name())),
        };
        Ok(self.alloc_value(class))
    }

    pub fn date(&self, instant: DateTime<Utc>) -> Value {
        self.alloc_value(ObjectClass::Date(Some(instant)))
    }

    /// Midnight UTC on a calendar day (`month` is 1-based). Out-of-range
    /// components yield the invalid date.
    pub fn date_ymd(&self, year: i32, month: u32, day: u32) -> Value {
        let instant = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive));
        self.alloc_value(ObjectClass::Date(instant))
    }

    /// Parses an RFC 3339 timestamp. Malformed input yields the invalid date.
    pub fn date_parse(&self, text: &str) -> Value {
        let instant = DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc));
        self.alloc_value(ObjectClass::Date(instant))
    }

    pub fn invalid_date(&self) -> Value {
        self.alloc_value(ObjectClass::Date(None))
    }

    pub fn pattern(&self, source: &str, flags: &str) -> ValueResult<Value> {
        Ok(self.alloc_value(ObjectClass::Pattern(Pattern::new(source, flags)?)))
    }

    pub fn function(&self, name: &str) -> Value {
        self.alloc_value(ObjectClass::Function(Rc::from(name)))
    }

    pub fn opaque(&self, tag: &str) -> Value {
        self.alloc_value(ObjectClass::Opaque(Rc::from(tag)))
    }

    /// Builds a value graph from JSON. Objects become plain containers of
    /// this realm, with members in the order the JSON map yields them.
    pub fn from_json(&self, json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::from(s.as_str()),
            serde_json::Value::Array(items) => self.array(items.iter().map(|item| self.from_json(item))),
            serde_json::Value::Object(members) => self.object(
                members
                    .iter()
                    .map(|(key, member)| (key.as_str(), self.from_json(member))),
            ),
        }
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}
