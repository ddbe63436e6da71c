//! End-to-end passes: actions write through an observing store, the writes
//! are folded into history, and Ready is summarized.

use relwatch_core::{
    observe_release, summarize, test_hooks_from_release, verify_latest, Condition,
    ConditionStatus, ConditionType, ManagedRelease, ObservedReleases, ReconcileError,
    ReleaseObservation, Request,
};
use relwatch_store::fakes::MemoryReleaseStore;
use relwatch_store::{
    Hook, HookEvent, HookExecution, HookPhase, ObservingStore, Release, ReleaseStatus,
    ReleaseStore,
};

fn chart_release(version: u32, status: ReleaseStatus) -> Release {
    Release::new("podinfo", "apps", version)
        .with_status(status)
        .with_chart("podinfo", "6.5.0", "6.5.0")
}

async fn install(store: &dyn ReleaseStore) {
    let rls = chart_release(1, ReleaseStatus::PendingInstall);
    store.create(&rls).await.unwrap();
    store
        .update(&rls.with_status(ReleaseStatus::Deployed))
        .await
        .unwrap();
}

async fn upgrade(store: &dyn ReleaseStore) {
    let next = chart_release(2, ReleaseStatus::PendingUpgrade);
    store.create(&next).await.unwrap();
    store
        .update(&chart_release(1, ReleaseStatus::Superseded))
        .await
        .unwrap();
    store
        .update(&next.with_status(ReleaseStatus::Deployed))
        .await
        .unwrap();
}

fn released(req: &mut Request) {
    let generation = req.generation();
    req.object.status.conditions.set(Condition::new(
        ConditionType::Released,
        ConditionStatus::True,
        "UpgradeSucceeded",
        "Helm upgrade succeeded",
        generation,
    ));
}

#[tokio::test]
async fn install_then_upgrade_builds_history_and_ready() {
    let mut req = Request::new(ManagedRelease::new("podinfo", "apps", 1));

    // Install pass.
    let shared = ObservedReleases::shared();
    let store = ObservingStore::new(MemoryReleaseStore::new(), vec![observe_release(&shared)]);
    install(&store).await;
    let observed = ObservedReleases::take(&shared);
    assert_eq!(observed.len(), 1);
    observed.record_on_object(&mut req.object);
    released(&mut req);
    summarize(&mut req);

    assert_eq!(req.object.status.history.len(), 1);
    assert_eq!(
        req.object.status.history.latest().map(|s| s.status),
        Some(ReleaseStatus::Deployed)
    );

    // Upgrade pass on a new generation.
    req.object.metadata.generation = 2;
    upgrade(&store).await;
    let observed = ObservedReleases::take(&shared);
    assert_eq!(observed.sorted_versions(), vec![2, 1]);
    observed.record_on_object(&mut req.object);
    released(&mut req);
    summarize(&mut req);

    let history = &req.object.status.history;
    assert_eq!(history.len(), 2);
    assert_eq!(history.get(0).map(|s| s.status), Some(ReleaseStatus::Deployed));
    assert_eq!(history.get(1).map(|s| s.status), Some(ReleaseStatus::Superseded));

    let ready = req
        .object
        .status
        .conditions
        .get(ConditionType::Ready)
        .unwrap();
    assert_eq!(ready.status, ConditionStatus::True);
    assert_eq!(ready.reason, "UpgradeSucceeded");
    assert_eq!(ready.observed_generation, 2);
}

#[tokio::test]
async fn test_pass_records_hooks_on_latest_snapshot() {
    let mut req = Request::new(ManagedRelease::new("podinfo", "apps", 1).with_test(true, false));
    let shared = ObservedReleases::shared();
    let store = ObservingStore::new(MemoryReleaseStore::new(), vec![observe_release(&shared)]);
    install(&store).await;
    ObservedReleases::take(&shared).record_on_object(&mut req.object);

    // The test action rewrites the latest release with hook results.
    let tested = store
        .get("apps", "podinfo", 1)
        .await
        .unwrap()
        .with_hook(Hook {
            name: "podinfo-grpc-test".to_string(),
            kind: "Pod".to_string(),
            events: vec![HookEvent::Test],
            last_run: HookExecution {
                phase: HookPhase::Succeeded,
                ..HookExecution::default()
            },
        });
    store.update(&tested).await.unwrap();
    let observed = ObservedReleases::take(&shared);
    let observation = observed.get(1).expect("test rewrite observed");

    verify_latest(&req, observation).expect("test targeted the latest release");
    req.object
        .status
        .history
        .latest_mut()
        .unwrap()
        .set_test_hooks(Some(test_hooks_from_release(&tested)));

    let latest = req.object.status.history.latest().unwrap();
    assert!(latest.has_been_tested());
    assert!(latest.has_test_in_phase(HookPhase::Succeeded));
    assert_eq!(req.object.status.history.len(), 1);
}

#[tokio::test]
async fn test_against_unexpected_release_is_a_mismatch() {
    let mut req = Request::new(ManagedRelease::new("podinfo", "apps", 1));
    let store = MemoryReleaseStore::new();
    install(&store).await;
    let mut observed = ObservedReleases::new();
    observed.record(&store.get("apps", "podinfo", 1).await.unwrap());
    observed.record_on_object(&mut req.object);

    let other = ReleaseObservation::from(&chart_release(2, ReleaseStatus::Deployed));
    let err = verify_latest(&req, &other).unwrap_err();
    assert!(err.is_mismatch());

    let empty = Request::new(ManagedRelease::new("podinfo", "apps", 1));
    assert_eq!(
        verify_latest(&empty, &other),
        Err(ReconcileError::NoLatest)
    );
}
