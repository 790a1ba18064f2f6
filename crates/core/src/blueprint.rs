//! Blueprints: the nominal origin of containers.
//!
//! A blueprint plays the role of a constructor plus its prototype. It names
//! where an object came from and holds the members instances inherit without
//! owning them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::id::{BlueprintId, RealmId};
use crate::object::{Object, ObjectClass, ObjectRef};
use crate::value::Value;

/// Comparable identity of a blueprint.
///
/// The base blueprints of all realms collapse to [`Origin::Base`], so plain
/// containers from different realms share an origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Base,
    Blueprint(BlueprintId),
}

#[derive(Clone)]
pub struct Blueprint(Rc<BlueprintInner>);

struct BlueprintInner {
    id: BlueprintId,
    name: Rc<str>,
    realm: RealmId,
    base: bool,
    members: RefCell<IndexMap<String, Value>>,
}

impl Blueprint {
    pub(crate) fn base(realm: RealmId) -> Self {
        Self::build("Object", realm, true)
    }

    pub(crate) fn named(name: &str, realm: RealmId) -> Self {
        Self::build(name, realm, false)
    }

    fn build(name: &str, realm: RealmId, base: bool) -> Self {
        Self(Rc::new(BlueprintInner {
            id: BlueprintId::new(),
            name: Rc::from(name),
            realm,
            base,
            members: RefCell::new(IndexMap::new()),
        }))
    }

    pub fn id(&self) -> BlueprintId {
        self.0.id
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn realm(&self) -> RealmId {
        self.0.realm
    }

    pub fn is_base(&self) -> bool {
        self.0.base
    }

    pub fn origin(&self) -> Origin {
        if self.0.base {
            Origin::Base
        } else {
            Origin::Blueprint(self.0.id)
        }
    }

    pub fn ptr_eq(&self, other: &Blueprint) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Defines a member every instance inherits.
    pub fn define(&self, key: &str, value: impl Into<Value>) {
        self.0
            .members
            .borrow_mut()
            .insert(key.to_string(), value.into());
    }

    pub fn member(&self, key: &str) -> Option<Value> {
        self.0.members.borrow().get(key).cloned()
    }

    pub fn has_member(&self, key: &str) -> bool {
        self.0.members.borrow().contains_key(key)
    }

    /// Creates a plain container originating from this blueprint.
    pub fn instantiate<I, K>(&self, entries: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let obj = ObjectRef::new(Object::new(ObjectClass::Plain, Some(self.clone()), self.0.realm));
        for (key, value) in entries {
            let key: String = key.into();
            obj.set(&key, value);
        }
        Value::Object(obj)
    }
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blueprint")
            .field("name", &self.0.name)
            .field("id", &self.0.id)
            .field("base", &self.0.base)
            .finish()
    }
}
