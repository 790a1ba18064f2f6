//! `objkit-equality`: deep structural equality over `objkit` value graphs.
//!
//! [`equals`] is total: it accepts any two values, never panics on valid
//! graphs, and always terminates, including on self-referential structures.
//!
//! The rules, in order:
//! - the same object handle is equal to itself;
//! - `null` and `undefined` are each equal only to themselves;
//! - numbers compare with `NaN == NaN` and `0 != -0`;
//! - wrapper objects compare by their primitive, against wrappers or bare
//!   primitives of the same kind, with no cross-kind coercion;
//! - dates compare by instant, and an invalid date equals nothing;
//! - patterns compare by source text and flag set;
//! - values of different kinds are unequal;
//! - arrays compare positionally, ignoring non-index properties;
//! - plain containers compare by own enumerable members, and by origin when
//!   both sides have one;
//! - functions and opaque host objects compare by identity.

mod comparator;
pub mod kind;
mod ledger;

pub use kind::{Classified, ComparisonKind, classify};

use objkit_core::Value;

use crate::comparator::Comparator;

/// Whether `a` and `b` are deeply equivalent.
///
/// Cycles are resolved by tracking the object pairs currently being compared:
/// meeting a pair that is already in flight counts as equal. Values whose
/// objects are mutably borrowed while being compared are reported unequal.
///
/// Recursion runs on the caller's stack, one level per level of nesting that
/// the two graphs share; cycles cost nothing beyond their first lap. Graphs
/// nested more than a few thousand levels deep need a thread with a larger
/// stack, and so does dropping them.
pub fn equals(a: &Value, b: &Value) -> bool {
    let mut comparator = Comparator::new();
    let verdict = comparator.compare(a, b);
    debug_assert!(comparator.is_settled());
    tracing::debug!(
        target: "objkit::equality",
        left = a.type_name(),
        right = b.type_name(),
        verdict,
        "equality verdict"
    );
    verdict
}
