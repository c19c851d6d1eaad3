//! Removal of overstressed constraints.

use alloc::vec::Vec as AllocVec;

use crate::body::Body;
use crate::constraint::Constraint;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::vec::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct TearingLogic<F: Float> {
    /// Tearable constraints whose stress exceeds this are removed.
    pub threshold: F,
}

impl<F: Float> TearingLogic<F> {
    pub fn new(threshold: F) -> Self {
        TearingLogic { threshold }
    }

    /// Remove every tearable constraint whose `current_force` exceeds the
    /// threshold and report each tear to `observer` at the midpoint of its
    /// two bodies. Returns the number of constraints torn.
    ///
    /// `bodies` must be sorted by id.
    pub fn update<O: StepObserver<F>>(
        &self,
        constraints: &mut AllocVec<Constraint<F>>,
        bodies: &[Body<F>],
        observer: &mut O,
    ) -> usize {
        let mut torn = 0;
        // Reverse so removals don't shift the indices still to visit.
        for i in (0..constraints.len()).rev() {
            let c = &constraints[i];
            if !c.is_tearable() || !(c.current_force > self.threshold) {
                continue;
            }
            let removed = constraints.remove(i);
            let at = midpoint(bodies, &removed);
            log::debug!(
                "constraint {:?} torn between {:?} and {:?}",
                removed.id(),
                removed.body_a,
                removed.body_b
            );
            observer.on_constraint_torn(&removed, at);
            torn += 1;
        }
        torn
    }
}

fn midpoint<F: Float>(bodies: &[Body<F>], c: &Constraint<F>) -> Vec2<F> {
    let find = |id| bodies.binary_search_by_key(&id, |b: &Body<F>| b.id()).ok().map(|i| bodies[i].position());
    match (find(c.body_a), find(c.body_b)) {
        (Some(a), Some(b)) => Vec2::new((a.x + b.x) * F::half(), (a.y + b.y) * F::half()),
        (Some(p), None) | (None, Some(p)) => p,
        (None, None) => Vec2::new(F::zero(), F::zero()),
    }
}

impl<F: Float> Default for TearingLogic<F> {
    fn default() -> Self {
        Self::new(F::from_f32(30_000.0))
    }
}
