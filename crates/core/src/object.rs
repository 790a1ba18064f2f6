//! Heap objects: class slot, own properties, and the shared handle.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::blueprint::{Blueprint, Origin};
use crate::error::{ReflectError, ReflectResult, ValueError, ValueResult};
use crate::id::RealmId;
use crate::value::Value;

bitflags::bitflags! {
    /// Active flags of a pattern. Order of appearance is not recorded.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PatternFlags: u8 {
        const GLOBAL = 1 << 0;
        const IGNORE_CASE = 1 << 1;
        const MULTILINE = 1 << 2;
        const DOT_ALL = 1 << 3;
        const UNICODE = 1 << 4;
        const STICKY = 1 << 5;
    }
}

impl PatternFlags {
    const LETTERS: [(char, PatternFlags); 6] = [
        ('g', PatternFlags::GLOBAL),
        ('i', PatternFlags::IGNORE_CASE),
        ('m', PatternFlags::MULTILINE),
        ('s', PatternFlags::DOT_ALL),
        ('u', PatternFlags::UNICODE),
        ('y', PatternFlags::STICKY),
    ];

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::LETTERS
            .iter()
            .find(|(c, _)| *c == letter)
            .map(|(_, flag)| *flag)
    }
}

impl FromStr for PatternFlags {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = PatternFlags::empty();
        for letter in s.chars() {
            let flag =
                PatternFlags::from_letter(letter).ok_or(ValueError::InvalidPatternFlag(letter))?;
            if flags.contains(flag) {
                return Err(ValueError::DuplicatePatternFlag(letter));
            }
            flags |= flag;
        }
        Ok(flags)
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, flag) in Self::LETTERS {
            if self.contains(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

/// Source text plus flag set of a pattern (regular expression) object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: Rc<str>,
    flags: PatternFlags,
}

impl Pattern {
    pub fn new(source: &str, flags: &str) -> ValueResult<Self> {
        Ok(Self {
            source: Rc::from(source),
            flags: flags.parse()?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

/// Exclusive upper bound on array length. Keys at or past it are ordinary
/// properties, never indices.
pub const MAX_ARRAY_LEN: usize = u32::MAX as usize;

/// Array storage.
///
/// Only written slots are kept, so a far index costs one entry and the gap
/// before it is all holes.
#[derive(Debug, Clone, Default)]
pub struct Elements {
    len: usize,
    slots: BTreeMap<usize, Value>,
}

impl Elements {
    /// `len` holes, clamped to [`MAX_ARRAY_LEN`].
    pub fn holes(len: usize) -> Self {
        Self {
            len: len.min(MAX_ARRAY_LEN),
            slots: BTreeMap::new(),
        }
    }

    /// Length, holes included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot value; `None` for holes and indices past the end.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.slots.get(&index)
    }

    /// Written slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.slots.iter().map(|(index, value)| (*index, value))
    }

    /// Writes a slot, growing the length past it. Fails at [`MAX_ARRAY_LEN`].
    pub(crate) fn set(&mut self, index: usize, value: Value) -> bool {
        if index >= MAX_ARRAY_LEN {
            return false;
        }
        self.slots.insert(index, value);
        self.len = self.len.max(index + 1);
        true
    }

    pub(crate) fn push(&mut self, value: Value) -> Option<usize> {
        let index = self.len;
        self.set(index, value).then_some(self.len)
    }

    /// Empties a slot, leaving a hole; the length is unchanged.
    pub(crate) fn take(&mut self, index: usize) -> Option<Value> {
        self.slots.remove(&index)
    }
}

impl FromIterator<Value> for Elements {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut elements = Elements::default();
        for value in iter {
            elements.push(value);
        }
        elements
    }
}

/// Internal class slot of an object.
///
/// This is what classification inspects. It is set at construction and never
/// changes afterwards, unlike properties or blueprints.
#[derive(Debug, Clone)]
pub enum ObjectClass {
    Plain,
    Array(Elements),
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    /// `None` is the invalid date.
    Date(Option<DateTime<Utc>>),
    Pattern(Pattern),
    Function(Rc<str>),
    /// Host object the toolkit knows nothing about, identified by a tag.
    Opaque(Rc<str>),
}

impl ObjectClass {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectClass::Plain => "Object",
            ObjectClass::Array(_) => "Array",
            ObjectClass::Boolean(_) => "Boolean",
            ObjectClass::Number(_) => "Number",
            ObjectClass::String(_) => "String",
            ObjectClass::Date(_) => "Date",
            ObjectClass::Pattern(_) => "RegExp",
            ObjectClass::Function(_) => "Function",
            ObjectClass::Opaque(_) => "Opaque",
        }
    }
}

/// An own property slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub value: Value,
    pub enumerable: bool,
}

/// Heap object state. Reach it through [`ObjectRef`].
#[derive(Debug)]
pub struct Object {
    class: ObjectClass,
    properties: IndexMap<String, Property>,
    blueprint: Option<Blueprint>,
    realm: RealmId,
}

impl Object {
    pub(crate) fn new(class: ObjectClass, blueprint: Option<Blueprint>, realm: RealmId) -> Self {
        Self {
            class,
            properties: IndexMap::new(),
            blueprint,
            realm,
        }
    }

    pub fn class(&self) -> &ObjectClass {
        &self.class
    }

    pub fn blueprint(&self) -> Option<&Blueprint> {
        self.blueprint.as_ref()
    }

    pub fn realm(&self) -> RealmId {
        self.realm
    }

    /// Nominal origin, or `None` when the object was built without a blueprint.
    pub fn origin(&self) -> Option<Origin> {
        self.blueprint.as_ref().map(Blueprint::origin)
    }

    /// Array storage, or `None` for non-arrays.
    pub fn elements(&self) -> Option<&Elements> {
        match &self.class {
            ObjectClass::Array(elements) => Some(elements),
            _ => None,
        }
    }

    fn elements_mut(&mut self) -> Option<&mut Elements> {
        match &mut self.class {
            ObjectClass::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn own_property(&self, key: &str) -> Option<&Property> {
        self.properties.get(key)
    }

    /// Own enumerable properties in insertion order. Array slots are not included.
    pub fn enumerable_properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties
            .iter()
            .filter(|(_, prop)| prop.enumerable)
            .map(|(key, prop)| (key.as_str(), &prop.value))
    }

    pub fn enumerable_len(&self) -> usize {
        self.properties.values().filter(|prop| prop.enumerable).count()
    }

    /// Own membership regardless of enumerability. Holes are not members.
    pub fn has_own(&self, key: &str) -> bool {
        if let (Some(elements), Some(index)) = (self.elements(), array_index(key)) {
            return elements.get(index).is_some();
        }
        self.properties.contains_key(key)
    }

    /// Own enumerable member lookup, array slots included.
    pub fn own_enumerable(&self, key: &str) -> Option<&Value> {
        if let (Some(elements), Some(index)) = (self.elements(), array_index(key)) {
            return elements.get(index);
        }
        self.properties
            .get(key)
            .filter(|prop| prop.enumerable)
            .map(|prop| &prop.value)
    }

    /// Member lookup: own members first, then blueprint members. Missing
    /// members read as `undefined`.
    pub fn get(&self, key: &str) -> Value {
        if let Some(elements) = self.elements() {
            if let Some(index) = array_index(key) {
                return elements.get(index).cloned().unwrap_or_default();
            }
            if key == "length" {
                return Value::from(elements.len() as f64);
            }
        }
        if let Some(prop) = self.properties.get(key) {
            return prop.value.clone();
        }
        self.blueprint
            .as_ref()
            .and_then(|blueprint| blueprint.member(key))
            .unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: Value) {
        if let Some(index) = array_index(key) {
            if let Some(elements) = self.elements_mut() {
                elements.set(index, value);
                return;
            }
        }
        self.define(key, value, true);
    }

    fn define(&mut self, key: &str, value: Value, enumerable: bool) {
        self.properties
            .insert(key.to_string(), Property { value, enumerable });
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        if let Some(index) = array_index(key) {
            if let Some(elements) = self.elements_mut() {
                return elements.take(index);
            }
        }
        self.properties.shift_remove(key).map(|prop| prop.value)
    }
}

/// Canonical array index: decimal digits with no leading zero, below
/// [`MAX_ARRAY_LEN`].
pub(crate) fn array_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok().filter(|&index| index < MAX_ARRAY_LEN)
}

/// Shared handle to a heap object.
///
/// Cloning the handle does not clone the object; [`ObjectRef::ptr_eq`] is the
/// reference identity used for cycle detection.
///
/// The plain accessors panic if they collide with an outstanding borrow, like
/// `RefCell` does. The `try_` forms report [`ReflectError::Busy`] instead.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    pub(crate) fn new(object: Object) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn as_ptr(&self) -> *const RefCell<Object> {
        Rc::as_ptr(&self.0)
    }

    fn busy(&self) -> ReflectError {
        ReflectError::busy(format!("{:p}", self.as_ptr()))
    }

    /// Shared read access, failing if the object is mutably borrowed.
    pub fn inspect(&self) -> ReflectResult<Ref<'_, Object>> {
        self.0.try_borrow().map_err(|_| self.busy())
    }

    /// Exclusive access. Panics if the object is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    /// Exclusive access, failing if the object is borrowed at all.
    pub fn try_borrow_mut(&self) -> ReflectResult<RefMut<'_, Object>> {
        self.0.try_borrow_mut().map_err(|_| self.busy())
    }

    /// Sets an own enumerable member. Index keys on arrays write the slot.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        self.borrow_mut().set(key, value.into());
    }

    pub fn try_set(&self, key: &str, value: impl Into<Value>) -> ReflectResult<()> {
        self.try_borrow_mut()?.set(key, value.into());
        Ok(())
    }

    /// Sets an own member with explicit enumerability.
    pub fn define(&self, key: &str, value: impl Into<Value>, enumerable: bool) {
        self.borrow_mut().define(key, value.into(), enumerable);
    }

    /// Removes an own member, keeping the order of the rest. On arrays an
    /// index key leaves a hole.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.borrow_mut().remove(key)
    }

    /// See [`Object::get`].
    pub fn get(&self, key: &str) -> Value {
        self.0.borrow().get(key)
    }

    pub fn try_get(&self, key: &str) -> ReflectResult<Value> {
        Ok(self.inspect()?.get(key))
    }

    /// Appends to an array and returns the new length; `None` for non-arrays
    /// and for arrays already at [`MAX_ARRAY_LEN`].
    pub fn push(&self, value: impl Into<Value>) -> Option<usize> {
        self.borrow_mut().elements_mut()?.push(value.into())
    }

    pub fn try_push(&self, value: impl Into<Value>) -> ReflectResult<Option<usize>> {
        Ok(self
            .try_borrow_mut()?
            .elements_mut()
            .and_then(|elements| elements.push(value.into())))
    }

    /// Writes an array slot, growing the length. Returns `false` for
    /// non-arrays and for indices at or past [`MAX_ARRAY_LEN`].
    pub fn set_index(&self, index: usize, value: impl Into<Value>) -> bool {
        self.borrow_mut()
            .elements_mut()
            .is_some_and(|elements| elements.set(index, value.into()))
    }

    /// Array length, holes included; `None` for non-arrays.
    pub fn len(&self) -> Option<usize> {
        self.0.borrow().elements().map(Elements::len)
    }

    pub fn try_len(&self) -> ReflectResult<Option<usize>> {
        Ok(self.inspect()?.elements().map(Elements::len))
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

// Never descends into members, so cyclic graphs print.
impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(object) => write!(f, "ObjectRef({:p}, {})", self.as_ptr(), object.class.name()),
            Err(_) => write!(f, "ObjectRef({:p}, <busy>)", self.as_ptr()),
        }
    }
}
