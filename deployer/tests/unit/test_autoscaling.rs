//! Autoscaling suspension tests

mod fake;

use ecsdeploy::deploy::autoscaling::suspend_auto_scaling;
use ecsdeploy::models::autoscaling::{
    service_resource_id, ScalableTarget, SuspendedState, DESIRED_COUNT_DIMENSION,
    ECS_SERVICE_NAMESPACE,
};
use fake::{FakePlatform, CLUSTER, SERVICE};
use tokio_test::{assert_err, assert_ok};

fn target(resource_id: &str) -> ScalableTarget {
    ScalableTarget {
        service_namespace: ECS_SERVICE_NAMESPACE.to_string(),
        resource_id: resource_id.to_string(),
        scalable_dimension: DESIRED_COUNT_DIMENSION.to_string(),
        min_capacity: 1,
        max_capacity: 4,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_no_targets_is_a_noop() {
    let fake = FakePlatform::new();

    let updated = assert_ok!(suspend_auto_scaling(&*fake, CLUSTER, SERVICE, true).await);
    assert_eq!(updated, 0);
    assert!(fake.mutations().is_empty());
}

#[tokio::test]
async fn test_every_target_gets_all_flags() {
    for suspend in [true, false] {
        let fake = FakePlatform::new();
        *fake.scalable_targets.lock().unwrap() = vec![
            target(&service_resource_id(CLUSTER, SERVICE)),
            target("service/prod/web-canary"),
        ];

        let updated = assert_ok!(suspend_auto_scaling(&*fake, CLUSTER, SERVICE, suspend).await);
        assert_eq!(updated, 2);

        let updates = fake.target_updates.lock().unwrap().clone();
        assert_eq!(updates.len(), 2);
        for update in &updates {
            assert_eq!(update.suspended_state, SuspendedState::all(suspend));
            assert_eq!(update.scalable_dimension, DESIRED_COUNT_DIMENSION);
        }
        assert_eq!(updates[0].resource_id, "service/prod/web");
    }
}

#[tokio::test]
async fn test_failure_names_the_target_and_stops() {
    let fake = FakePlatform::new();
    *fake.scalable_targets.lock().unwrap() = vec![
        target("service/prod/a"),
        target("service/prod/b"),
        target("service/prod/c"),
    ];
    *fake.failing_target.lock().unwrap() = Some("service/prod/b".to_string());

    let err = assert_err!(suspend_auto_scaling(&*fake, CLUSTER, SERVICE, true).await);
    assert!(err.to_string().contains("service/prod/b"));

    // the first target stays updated, the third is never attempted
    let updates = fake.target_updates.lock().unwrap().clone();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].resource_id, "service/prod/a");
    assert_eq!(fake.count("RegisterScalableTarget"), 2);
}
