mod common;

use alm_binding::AppError;
use common::{actor, set_request, Fixture, PLAIN_USER, PROJECT_ADMIN, SYSTEM_ADMIN};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn set_binding_stores_setting_and_repository() {
    let fx = Fixture::new().await;

    assert_ok!(
        fx.service
            .set_binding(&actor(PROJECT_ADMIN), set_request("P1", "gh-1", "org/repo", None))
            .await
    );

    let stored = fx.store.binding(fx.p1.id).await.unwrap();
    assert_eq!(stored.alm_setting_id, fx.gh1.id);
    assert_eq!(stored.repository, "org/repo");
    assert_eq!(stored.slug, None);
}

#[tokio::test]
async fn set_binding_is_idempotent() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);

    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-1", "org/repo", Some("slug")))
            .await
    );
    let first = fx.store.binding(fx.p1.id).await.unwrap();

    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-1", "org/repo", Some("slug")))
            .await
    );
    let second = fx.store.binding(fx.p1.id).await.unwrap();

    assert_eq!(first.alm_setting_id, second.alm_setting_id);
    assert_eq!(first.repository, second.repository);
    assert_eq!(first.slug, second.slug);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(fx.store.binding_count().await, 1);
}

#[tokio::test]
async fn set_binding_replaces_and_clears_slug() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);

    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-1", "org/repo", Some("slug")))
            .await
    );
    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-2", "org/other", None))
            .await
    );

    let stored = fx.store.binding(fx.p1.id).await.unwrap();
    assert_eq!(stored.alm_setting_id, fx.gh2.id);
    assert_eq!(stored.repository, "org/other");
    assert_eq!(stored.slug, None);
}

#[tokio::test]
async fn rebinding_moves_count_between_settings() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);
    let sysadmin = actor(SYSTEM_ADMIN);

    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-1", "org/repo", None))
            .await
    );
    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-2", "org/repo", None))
            .await
    );

    let gh1 = fx.service.count_bindings(&sysadmin, "gh-1").await.unwrap();
    let gh2 = fx.service.count_bindings(&sysadmin, "gh-2").await.unwrap();
    assert_eq!(gh1.projects, 0);
    assert_eq!(gh2.projects, 1);
}

#[tokio::test]
async fn remove_missing_binding_is_a_noop() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);

    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P2", "gh-1", "org/repo", None))
            .await
    );
    assert_ok!(fx.service.remove_binding(&admin, "P1").await);

    assert!(fx.store.binding(fx.p1.id).await.is_none());
    assert!(fx.store.binding(fx.p2.id).await.is_some());
    assert_eq!(fx.store.binding_count().await, 1);
}

#[tokio::test]
async fn count_follows_bind_and_remove() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);
    let sysadmin = actor(SYSTEM_ADMIN);

    for project in ["P1", "P2"] {
        assert_ok!(
            fx.service
                .set_binding(&admin, set_request(project, "gh-1", "org/repo", None))
                .await
        );
    }
    let count = fx.service.count_bindings(&sysadmin, "gh-1").await.unwrap();
    assert_eq!(count.key, "gh-1");
    assert_eq!(count.projects, 2);

    assert_ok!(fx.service.remove_binding(&admin, "P2").await);
    let count = fx.service.count_bindings(&sysadmin, "gh-1").await.unwrap();
    assert_eq!(count.projects, 1);
}

#[tokio::test]
async fn unknown_keys_are_not_found() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);

    let err = assert_err!(
        fx.service
            .set_binding(&admin, set_request("unknown", "gh-1", "org/repo", None))
            .await
    );
    assert_eq!(err.to_string(), "Project key 'unknown' not found");

    let err = assert_err!(
        fx.service
            .set_binding(&admin, set_request("P1", "unknown", "org/repo", None))
            .await
    );
    assert_eq!(
        err.to_string(),
        "ALM setting with key 'unknown' cannot be found"
    );

    let err = assert_err!(fx.service.remove_binding(&admin, "unknown").await);
    assert!(matches!(err, AppError::NotFound(_)));

    let err = assert_err!(
        fx.service
            .count_bindings(&actor(SYSTEM_ADMIN), "unknown")
            .await
    );
    assert_eq!(
        err.to_string(),
        "ALM setting with key 'unknown' cannot be found"
    );
}

#[tokio::test]
async fn unknown_project_with_unauthorized_actor_is_not_found() {
    let fx = Fixture::new().await;
    let user = actor(PLAIN_USER);

    let err = assert_err!(
        fx.service
            .set_binding(&user, set_request("unknown", "gh-1", "org/repo", None))
            .await
    );
    assert_eq!(err.to_string(), "Project key 'unknown' not found");

    let err = assert_err!(fx.service.remove_binding(&user, "unknown").await);
    assert!(matches!(err, AppError::NotFound(_)));

    let err = assert_err!(fx.service.get_binding(&user, "unknown").await);
    assert_eq!(err.to_string(), "Project key 'unknown' not found");

    let err = assert_err!(fx.service.get_binding(&actor(PROJECT_ADMIN), "unknown").await);
    assert!(matches!(err, AppError::NotFound(_)));

    assert_eq!(fx.store.binding_count().await, 0);
}

#[tokio::test]
async fn missing_capability_is_forbidden() {
    let fx = Fixture::new().await;
    let user = actor(PLAIN_USER);

    let err = assert_err!(
        fx.service
            .set_binding(&user, set_request("P1", "gh-1", "org/repo", None))
            .await
    );
    assert!(matches!(err, AppError::Forbidden));

    let err = assert_err!(fx.service.remove_binding(&user, "P1").await);
    assert!(matches!(err, AppError::Forbidden));

    let err = assert_err!(fx.service.count_bindings(&user, "gh-1").await);
    assert!(matches!(err, AppError::Forbidden));

    // Project administration does not grant system administration.
    let err = assert_err!(
        fx.service
            .count_bindings(&actor(PROJECT_ADMIN), "gh-1")
            .await
    );
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn forbidden_does_not_reveal_setting_existence() {
    let fx = Fixture::new().await;
    let user = actor(PLAIN_USER);

    let err = assert_err!(fx.service.count_bindings(&user, "unknown").await);
    assert!(matches!(err, AppError::Forbidden));

    let err = assert_err!(
        fx.service
            .set_binding(&user, set_request("P1", "unknown", "org/repo", None))
            .await
    );
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn failed_preconditions_leave_store_untouched() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);

    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-1", "org/repo", Some("s")))
            .await
    );

    assert_err!(
        fx.service
            .set_binding(&admin, set_request("P1", "unknown", "org/new", None))
            .await
    );
    assert_err!(
        fx.service
            .set_binding(&actor(PLAIN_USER), set_request("P1", "gh-2", "org/new", None))
            .await
    );
    let stored = fx.store.binding(fx.p1.id).await.unwrap();
    assert_eq!(stored.alm_setting_id, fx.gh1.id);
    assert_eq!(stored.repository, "org/repo");
    assert_eq!(stored.slug.as_deref(), Some("s"));
}

#[tokio::test]
async fn get_binding_joins_setting() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);

    let err = assert_err!(fx.service.get_binding(&admin, "P1").await);
    assert_eq!(err.to_string(), "Project 'P1' is not bound to any ALM");

    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-1", "org/repo", Some("slug")))
            .await
    );
    let binding = fx.service.get_binding(&admin, "P1").await.unwrap();
    assert_eq!(binding.key, "gh-1");
    assert_eq!(binding.repository, "org/repo");
    assert_eq!(binding.slug.as_deref(), Some("slug"));

    let err = assert_err!(fx.service.get_binding(&actor(PLAIN_USER), "P1").await);
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn concurrent_writes_on_different_projects() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);

    let (a, b) = tokio::join!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-1", "org/a", None)),
        fx.service
            .set_binding(&admin, set_request("P2", "gh-1", "org/b", None)),
    );
    assert_ok!(a);
    assert_ok!(b);

    let count = fx
        .service
        .count_bindings(&actor(SYSTEM_ADMIN), "gh-1")
        .await
        .unwrap();
    assert_eq!(count.projects, 2);
}

#[tokio::test]
async fn bind_count_remove_scenario() {
    let fx = Fixture::new().await;
    let admin = actor(PROJECT_ADMIN);
    let sysadmin = actor(SYSTEM_ADMIN);

    assert_ok!(
        fx.service
            .set_binding(&admin, set_request("P1", "gh-1", "org/repo", None))
            .await
    );
    let binding = fx.service.get_binding(&admin, "P1").await.unwrap();
    assert_eq!(binding.key, "gh-1");
    assert_eq!(binding.repository, "org/repo");
    assert_eq!(binding.slug, None);
    assert_eq!(
        fx.service
            .count_bindings(&sysadmin, "gh-1")
            .await
            .unwrap()
            .projects,
        1
    );

    assert_ok!(fx.service.remove_binding(&admin, "P1").await);
    assert!(fx.store.binding(fx.p1.id).await.is_none());
    assert_eq!(
        fx.service
            .count_bindings(&sysadmin, "gh-1")
            .await
            .unwrap()
            .projects,
        0
    );
}
