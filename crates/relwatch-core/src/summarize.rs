//! Composition of the `Ready` condition.
//!
//! `Ready` is derived from `Remediated`, `TestSuccess` and `Released` by
//! sorting the object's conditions on observed generation and summary
//! priority, then taking the first one. The object's own generation is not
//! part of the sort: a generation bump that does not lead to a new release
//! still reports `Ready` for the current generation, based on the release
//! made for the previous one.

use crate::domain::{Condition, ConditionStatus, ConditionType, Request, TestSpec};
use crate::obs;

/// Summary conditions in priority order, highest first.
pub fn summary_conditions(test: &TestSpec) -> &'static [ConditionType] {
    if test.is_required() {
        &[
            ConditionType::Remediated,
            ConditionType::TestSuccess,
            ConditionType::Released,
        ]
    } else {
        &[ConditionType::Remediated, ConditionType::Released]
    }
}

/// Recompute and set the `Ready` condition on the request's object.
///
/// A stale `TestSuccess` is removed as soon as tests are disabled, and a
/// stale `Remediated` once a qualifying release (and test) has been observed.
/// `Stalled` is removed when `Ready` ends up `True`.
pub fn summarize(req: &mut Request) {
    let test = *req.object.get_test();
    let priority = summary_conditions(&test);

    if !test.enable {
        req.object
            .status
            .conditions
            .delete(ConditionType::TestSuccess);
    }

    conditionally_delete_remediated(req);

    let generation = req.generation();
    let conditions = &mut req.object.status.conditions;
    if conditions.is_empty() {
        return;
    }

    let position = |c: &Condition| priority.iter().position(|t| *t == c.condition_type);
    conditions.sort_stable_by_less(|i, j| {
        let Some(i_pos) = position(i) else {
            return false;
        };
        let Some(j_pos) = position(j) else {
            return true;
        };
        i.observed_generation >= j.observed_generation && i_pos < j_pos
    });

    let Some(representative) = conditions.first().cloned() else {
        return;
    };

    // Any remediated state is considered an error.
    let status = if representative.condition_type == ConditionType::Remediated {
        ConditionStatus::False
    } else {
        representative.status
    };

    if status == ConditionStatus::True {
        conditions.delete(ConditionType::Stalled);
    }

    conditions.set(Condition::new(
        ConditionType::Ready,
        status,
        representative.reason.clone(),
        representative.message.clone(),
        generation,
    ));
    obs::emit_ready_summarized(
        status,
        representative.condition_type,
        &representative.reason,
        generation,
    );
}

/// Remove `Remediated` once the release is `Released` (and, when tests are
/// required, has `TestSuccess`) at a generation no older than the
/// remediation itself.
pub fn conditionally_delete_remediated(req: &mut Request) {
    let test = *req.object.get_test();
    let conditions = &mut req.object.status.conditions;

    let Some(remediated) = conditions.get(ConditionType::Remediated) else {
        return;
    };
    let remediated_generation = remediated.observed_generation;

    let Some(released) = conditions
        .get(ConditionType::Released)
        .filter(|c| c.is_true())
    else {
        return;
    };

    if !test.is_required() {
        if released.observed_generation >= remediated_generation {
            conditions.delete(ConditionType::Remediated);
            obs::emit_remediation_cleared(remediated_generation, ConditionType::Released);
        }
        return;
    }

    let Some(test_success) = conditions
        .get(ConditionType::TestSuccess)
        .filter(|c| c.is_true())
    else {
        return;
    };

    if test_success.observed_generation >= remediated_generation {
        conditions.delete(ConditionType::Remediated);
        obs::emit_remediation_cleared(remediated_generation, ConditionType::TestSuccess);
    }
}
