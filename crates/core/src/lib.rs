//! `objkit-core`: dynamic value graphs and reflection over them.
//!
//! Values are built through a [`Realm`]. Composite values live behind shared
//! [`ObjectRef`] handles and may reference themselves. The [`reflect`] module
//! holds the stateless probes (`keys`, `origin_of`, `is_date`, ...) that
//! classify and enumerate values without caring which realm made them.

pub mod blueprint;
pub mod error;
pub mod id;
pub mod object;
pub mod realm;
pub mod reflect;
pub mod value;

pub use blueprint::{Blueprint, Origin};
pub use error::{ReflectError, ReflectResult, ValueError, ValueResult};
pub use id::{BlueprintId, RealmId};
pub use object::{
    Elements, MAX_ARRAY_LEN, Object, ObjectClass, ObjectRef, Pattern, PatternFlags, Property,
};
pub use realm::Realm;
pub use reflect::PrimitiveKind;
pub use value::Value;
