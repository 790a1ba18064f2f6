//! Visitation ledger: the pairs currently being compared on the call stack.

use objkit_core::ObjectRef;

/// Ancestor-pair stack for one top-level comparison.
///
/// Holds `(left, right)` object pairs whose members are being compared right
/// now. It is not a memo: a pair leaves the ledger as soon as its comparison
/// returns, whatever the verdict.
#[derive(Debug, Default)]
pub(crate) struct VisitationLedger {
    in_flight: Vec<(ObjectRef, ObjectRef)>,
}

impl VisitationLedger {
    /// Whether exactly this pair is in flight, by reference identity on both sides.
    pub(crate) fn contains(&self, left: &ObjectRef, right: &ObjectRef) -> bool {
        self.in_flight
            .iter()
            .rev()
            .any(|(a, b)| a.ptr_eq(left) && b.ptr_eq(right))
    }

    pub(crate) fn push(&mut self, left: ObjectRef, right: ObjectRef) {
        self.in_flight.push((left, right));
    }

    pub(crate) fn pop(&mut self) {
        self.in_flight.pop();
    }

    pub(crate) fn len(&self) -> usize {
        self.in_flight.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }
}
