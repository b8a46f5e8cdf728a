//! Rollback resolution tests

mod fake;

use ecsdeploy::deploy::rollback::{find_rollback_target, MAX_PAGES, PAGE_SIZE};
use ecsdeploy::models::task_definition::SortOrder;
use fake::{task_definition_arn, Cursor, FakePlatform};
use tokio_test::{assert_err, assert_ok};

fn history(fake: &FakePlatform, revisions: &[i64]) {
    *fake.task_definition_arns.lock().unwrap() = revisions
        .iter()
        .map(|r| task_definition_arn("web", *r))
        .collect();
}

#[tokio::test]
async fn test_returns_previous_revision() {
    let fake = FakePlatform::new();
    history(&fake, &[5, 4, 3, 2, 1]);

    let target = assert_ok!(find_rollback_target(&*fake, &task_definition_arn("web", 3)).await);
    assert_eq!(target, task_definition_arn("web", 2));

    let requests = fake.list_requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].family_prefix, "web");
    assert_eq!(requests[0].sort, SortOrder::Desc);
    assert_eq!(requests[0].max_results, PAGE_SIZE);
    assert_eq!(requests[0].next_token, None);
}

#[tokio::test]
async fn test_oldest_revision_has_no_target() {
    let fake = FakePlatform::new();
    history(&fake, &[5, 4, 3, 2, 1]);

    let err = assert_err!(find_rollback_target(&*fake, &task_definition_arn("web", 1)).await);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unknown_revision_scans_every_page() {
    let fake = FakePlatform::new();
    history(&fake, &[5, 4, 3, 2, 1]);
    *fake.page_size.lock().unwrap() = Some(2);

    let err = assert_err!(find_rollback_target(&*fake, &task_definition_arn("web", 9)).await);
    assert!(err.is_not_found());
    assert_eq!(fake.count("ListTaskDefinitions"), 3);
}

#[tokio::test]
async fn test_target_on_next_page() {
    let fake = FakePlatform::new();
    history(&fake, &[5, 4, 3, 2, 1]);
    *fake.page_size.lock().unwrap() = Some(2);

    // web:4 ends the first page, its predecessor opens the second
    let target = assert_ok!(find_rollback_target(&*fake, &task_definition_arn("web", 4)).await);
    assert_eq!(target, task_definition_arn("web", 3));

    let requests = fake.list_requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].next_token.as_deref(), Some("2"));
}

#[tokio::test]
async fn test_empty_family() {
    let fake = FakePlatform::new();

    let err = assert_err!(find_rollback_target(&*fake, &task_definition_arn("web", 1)).await);
    assert!(err.is_not_found());
    assert_eq!(fake.count("ListTaskDefinitions"), 1);
}

#[tokio::test]
async fn test_repeated_token_stops_the_scan() {
    let fake = FakePlatform::new();
    history(&fake, &[5, 4, 3, 2, 1]);
    *fake.page_size.lock().unwrap() = Some(2);
    *fake.cursor.lock().unwrap() = Cursor::Stuck("same".to_string());

    let err = assert_err!(find_rollback_target(&*fake, &task_definition_arn("web", 9)).await);
    assert!(err.is_not_found());
    assert_eq!(fake.count("ListTaskDefinitions"), 2);

    let requests = fake.list_requests.lock().unwrap().clone();
    assert_eq!(requests[1].next_token.as_deref(), Some("same"));
}

#[tokio::test]
async fn test_scan_is_capped_when_tokens_never_end() {
    let fake = FakePlatform::new();
    history(&fake, &[5, 4, 3, 2, 1]);
    *fake.cursor.lock().unwrap() = Cursor::Endless;

    let err = assert_err!(find_rollback_target(&*fake, &task_definition_arn("web", 9)).await);
    assert!(err.is_not_found());
    assert_eq!(fake.count("ListTaskDefinitions"), MAX_PAGES);
}
