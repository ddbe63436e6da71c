//! Ready condition summarization across Released, TestSuccess and
//! Remediated.

use relwatch_core::{summarize, Condition, ConditionStatus, ConditionType, ManagedRelease, Request};

fn cond(ty: ConditionType, status: ConditionStatus, generation: i64) -> Condition {
    Condition::new(
        ty,
        status,
        format!("{ty}Reason"),
        format!("{ty} message"),
        generation,
    )
}

fn request(
    generation: i64,
    enable: bool,
    ignore_failures: bool,
    conditions: Vec<Condition>,
) -> Request {
    let mut obj =
        ManagedRelease::new("podinfo", "apps", generation).with_test(enable, ignore_failures);
    for c in conditions {
        obj.status.conditions.set(c);
    }
    Request::new(obj)
}

fn get(req: &Request, ty: ConditionType) -> Option<&Condition> {
    req.object.status.conditions.get(ty)
}

fn ready(req: &Request) -> &Condition {
    get(req, ConditionType::Ready).expect("Ready is set")
}

#[test]
fn released_after_remediation_clears_it() {
    let mut req = request(
        5,
        false,
        false,
        vec![
            cond(ConditionType::Released, ConditionStatus::True, 5),
            cond(ConditionType::Remediated, ConditionStatus::True, 3),
        ],
    );
    summarize(&mut req);

    assert!(get(&req, ConditionType::Remediated).is_none());
    assert_eq!(ready(&req).status, ConditionStatus::True);
    assert_eq!(ready(&req).reason, "ReleasedReason");
}

#[test]
fn newer_remediation_wins_and_forces_ready_false() {
    let mut req = request(
        6,
        false,
        false,
        vec![
            cond(ConditionType::Released, ConditionStatus::True, 5),
            cond(ConditionType::Remediated, ConditionStatus::True, 6),
        ],
    );
    summarize(&mut req);

    assert!(get(&req, ConditionType::Remediated).is_some());
    let ready = ready(&req);
    assert_eq!(ready.status, ConditionStatus::False);
    assert_eq!(ready.reason, "RemediatedReason");
    assert_eq!(ready.message, "Remediated message");
}

#[test]
fn failed_test_represents_when_tests_required() {
    let mut req = request(
        4,
        true,
        false,
        vec![
            cond(ConditionType::Released, ConditionStatus::True, 4),
            cond(ConditionType::TestSuccess, ConditionStatus::False, 4),
        ],
    );
    summarize(&mut req);

    let ready = ready(&req);
    assert_eq!(ready.status, ConditionStatus::False);
    assert_eq!(ready.reason, "TestSuccessReason");
}

#[test]
fn failed_test_ignored_when_failures_ignored() {
    let mut req = request(
        4,
        true,
        true,
        vec![
            cond(ConditionType::Released, ConditionStatus::True, 4),
            cond(ConditionType::TestSuccess, ConditionStatus::False, 4),
        ],
    );
    summarize(&mut req);

    // TestSuccess is kept (tests are enabled) but does not count.
    assert!(get(&req, ConditionType::TestSuccess).is_some());
    assert_eq!(ready(&req).status, ConditionStatus::True);
    assert_eq!(ready(&req).reason, "ReleasedReason");
}

#[test]
fn test_success_removed_when_tests_disabled() {
    for status in [
        ConditionStatus::True,
        ConditionStatus::False,
        ConditionStatus::Unknown,
    ] {
        let mut req = request(
            2,
            false,
            false,
            vec![
                cond(ConditionType::Released, ConditionStatus::True, 2),
                cond(ConditionType::TestSuccess, status, 2),
            ],
        );
        summarize(&mut req);
        assert!(get(&req, ConditionType::TestSuccess).is_none());
    }
}

#[test]
fn ready_is_stamped_with_object_generation() {
    // Generation bumped to 8 without a new release.
    let mut req = request(
        8,
        false,
        false,
        vec![cond(ConditionType::Released, ConditionStatus::True, 7)],
    );
    summarize(&mut req);

    let ready = ready(&req);
    assert_eq!(ready.status, ConditionStatus::True);
    assert_eq!(ready.observed_generation, 8);
}

#[test]
fn older_test_result_does_not_outrank_newer_release() {
    let mut req = request(
        3,
        true,
        false,
        vec![
            cond(ConditionType::Released, ConditionStatus::True, 3),
            cond(ConditionType::TestSuccess, ConditionStatus::False, 2),
        ],
    );
    summarize(&mut req);

    assert_eq!(ready(&req).status, ConditionStatus::True);
    assert_eq!(ready(&req).reason, "ReleasedReason");
}

#[test]
fn summarize_is_idempotent() {
    let mut req = request(
        3,
        true,
        false,
        vec![
            cond(ConditionType::Released, ConditionStatus::True, 3),
            cond(ConditionType::TestSuccess, ConditionStatus::False, 2),
            cond(ConditionType::Remediated, ConditionStatus::True, 2),
            cond(ConditionType::Stalled, ConditionStatus::True, 3),
        ],
    );
    summarize(&mut req);
    let first = ready(&req).clone();
    let conditions_after_first = req.object.status.conditions.clone();

    summarize(&mut req);
    assert_eq!(ready(&req), &first);
    assert_eq!(req.object.status.conditions, conditions_after_first);
}

#[test]
fn stalled_cleared_once_ready() {
    let mut req = request(
        2,
        false,
        false,
        vec![
            cond(ConditionType::Released, ConditionStatus::True, 2),
            cond(ConditionType::Stalled, ConditionStatus::True, 1),
        ],
    );
    summarize(&mut req);

    assert!(get(&req, ConditionType::Stalled).is_none());
    assert_eq!(ready(&req).status, ConditionStatus::True);
}

#[test]
fn remediation_stays_until_tests_pass_again() {
    let mut req = request(
        2,
        true,
        false,
        vec![
            cond(ConditionType::Remediated, ConditionStatus::True, 2),
            cond(ConditionType::Released, ConditionStatus::True, 2),
        ],
    );
    summarize(&mut req);
    assert!(get(&req, ConditionType::Remediated).is_some());
    assert_eq!(ready(&req).status, ConditionStatus::False);

    req.object
        .status
        .conditions
        .set(cond(ConditionType::TestSuccess, ConditionStatus::True, 2));
    summarize(&mut req);
    assert!(get(&req, ConditionType::Remediated).is_none());
    assert_eq!(ready(&req).status, ConditionStatus::True);
}
