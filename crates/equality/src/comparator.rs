//! Recursive structural comparison with a cycle guard.

use objkit_core::{ObjectRef, ReflectError, Value};

use crate::kind::{Classified, classify};
use crate::ledger::VisitationLedger;

/// One top-level comparison. Owns the ledger, so nothing leaks between calls.
#[derive(Debug, Default)]
pub(crate) struct Comparator {
    ledger: VisitationLedger,
    depth: usize,
}

/// `NaN` equals `NaN`; `0` and `-0` differ.
fn numbers_equal(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    a == b && a.is_sign_negative() == b.is_sign_negative()
}

fn unequal_on_reflect_error(err: &ReflectError) -> bool {
    tracing::trace!(
        target: "objkit::equality",
        error = %err,
        "reflection failed, pair is unequal"
    );
    false
}

impl Comparator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn compare(&mut self, a: &Value, b: &Value) -> bool {
        self.depth += 1;
        let verdict = self.compare_values(a, b);
        self.depth -= 1;
        verdict
    }

    /// No pair in flight and no frame open.
    pub(crate) fn is_settled(&self) -> bool {
        self.ledger.is_empty() && self.depth == 0
    }

    fn compare_values(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Object(x), Value::Object(y)) if x.ptr_eq(y) => return true,
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => return true,
            (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => {
                return false;
            }
            _ => {}
        }

        let (left, right) = match (classify(a), classify(b)) {
            (Ok(left), Ok(right)) => (left, right),
            (Err(err), _) | (_, Err(err)) => return unequal_on_reflect_error(&err),
        };

        match (left, right) {
            (Classified::Boolean { value: x, .. }, Classified::Boolean { value: y, .. }) => x == y,
            (Classified::Number { value: x, .. }, Classified::Number { value: y, .. }) => {
                numbers_equal(x, y)
            }
            (Classified::String { value: x, .. }, Classified::String { value: y, .. }) => x == y,
            (Classified::Date(x), Classified::Date(y)) => matches!((x, y), (Some(x), Some(y)) if x == y),
            (Classified::Pattern(x), Classified::Pattern(y)) => x == y,
            (Classified::ArrayLike(x), Classified::ArrayLike(y)) => {
                self.guarded(&x, &y, |this| this.arrays_equal(&x, &y))
            }
            (Classified::PlainContainer(x), Classified::PlainContainer(y)) => {
                self.containers_equal(&x, &y)
            }
            // Same-handle pairs returned above; distinct callables and host
            // objects never compare deeper.
            (Classified::Function(_), Classified::Function(_))
            | (Classified::Opaque(_), Classified::Opaque(_)) => false,
            (left, right) => {
                tracing::trace!(
                    target: "objkit::equality",
                    left = %left.kind(),
                    right = %right.kind(),
                    "kind mismatch"
                );
                false
            }
        }
    }

    /// Runs `descend` with `(a, b)` recorded as in flight. A pair already in
    /// flight is a cycle closing on itself and counts as equal.
    fn guarded(
        &mut self,
        a: &ObjectRef,
        b: &ObjectRef,
        descend: impl FnOnce(&mut Self) -> bool,
    ) -> bool {
        if self.ledger.contains(a, b) {
            tracing::trace!(
                target: "objkit::equality",
                in_flight = self.ledger.len(),
                "cycle closed"
            );
            return true;
        }

        self.ledger.push(a.clone(), b.clone());
        debug_assert!(self.ledger.len() <= self.depth);
        let verdict = descend(self);
        self.ledger.pop();
        verdict
    }

    /// Positional comparison; holes read as `undefined` and non-index
    /// properties are ignored.
    fn arrays_equal(&mut self, a: &ObjectRef, b: &ObjectRef) -> bool {
        let (left, right) = match (a.inspect(), b.inspect()) {
            (Ok(left), Ok(right)) => (left, right),
            (Err(err), _) | (_, Err(err)) => return unequal_on_reflect_error(&err),
        };
        let (Some(xs), Some(ys)) = (left.elements(), right.elements()) else {
            return false;
        };
        if xs.len() != ys.len() {
            return false;
        }

        // Positions written on neither side are undefined on both.
        let undefined = Value::Undefined;
        xs.iter()
            .all(|(index, x)| self.compare(x, ys.get(index).unwrap_or(&undefined)))
            && ys
                .iter()
                .filter(|(index, _)| xs.get(*index).is_none())
                .all(|(_, y)| self.compare(&undefined, y))
    }

    /// Origins are compared only when both sides have one.
    fn containers_equal(&mut self, a: &ObjectRef, b: &ObjectRef) -> bool {
        let origins = match (a.inspect(), b.inspect()) {
            (Ok(left), Ok(right)) => (left.origin(), right.origin()),
            (Err(err), _) | (_, Err(err)) => return unequal_on_reflect_error(&err),
        };
        if let (Some(x), Some(y)) = origins {
            if x != y {
                tracing::trace!(
                    target: "objkit::equality",
                    left = ?x,
                    right = ?y,
                    "origin mismatch"
                );
                return false;
            }
        }

        self.guarded(a, b, |this| this.members_equal(a, b))
    }

    fn members_equal(&mut self, a: &ObjectRef, b: &ObjectRef) -> bool {
        let (left, right) = match (a.inspect(), b.inspect()) {
            (Ok(left), Ok(right)) => (left, right),
            (Err(err), _) | (_, Err(err)) => return unequal_on_reflect_error(&err),
        };
        if left.enumerable_len() != right.enumerable_len() {
            return false;
        }

        left.enumerable_properties().all(|(key, x)| {
            right
                .own_enumerable(key)
                .is_some_and(|y| self.compare(x, y))
        })
    }
}
