mod common;

use std::sync::Arc;

use tokio::sync::Notify;

use common::{application, BackendState, MockBackend};
use remote_nomads::models::application::{ApplicationStatus, StatusCounts};
use remote_nomads::models::ResourceId;
use remote_nomads::services::notification_service::NotificationLevel;

async fn seeded(statuses: &[&str]) -> MockBackend {
    let applications = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let id = i as i64 + 1;
            application(
                id,
                &format!("Candidate {}", id),
                &format!("c{}@example.com", id),
                "Rust Engineer",
                status,
            )
        })
        .collect();
    MockBackend::spawn(BackendState {
        applications,
        ..Default::default()
    })
    .await
}

#[tokio::test]
async fn shortlisting_second_pending_updates_counts() {
    let backend = seeded(&["pending", "pending", "accepted"]).await;
    let (app, _store, notifier) = backend.app();
    let mut board = app.review_board();

    assert!(board.load().await);
    assert!(board.transition(&ResourceId::from("2"), ApplicationStatus::Shortlisted).await);

    assert_eq!(
        board.counts(),
        StatusCounts {
            pending: 1,
            reviewed: 0,
            shortlisted: 1,
            accepted: 1,
            rejected: 0,
        }
    );
    assert_eq!(board.counts().total(), board.applications().len());
    assert_eq!(backend.count("PUT", "/applications/2"), 1);
    let last = notifier.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Success);
    assert_eq!(last.message, "Application marked as shortlisted");
}

#[tokio::test]
async fn repeating_a_transition_is_refused_without_a_request() {
    let backend = seeded(&["pending"]).await;
    let (app, _store, notifier) = backend.app();
    let mut board = app.review_board();
    board.load().await;
    let id = ResourceId::from("1");

    assert!(board.transition(&id, ApplicationStatus::Shortlisted).await);
    assert!(!board.transition(&id, ApplicationStatus::Shortlisted).await);

    assert_eq!(backend.count("PUT", "/applications/1"), 1);
    assert_eq!(board.get(&id).unwrap().status, ApplicationStatus::Shortlisted);
    assert_eq!(
        notifier.errors(),
        vec!["Cannot move application from shortlisted to shortlisted"]
    );
}

#[tokio::test]
async fn offered_actions_follow_current_status() {
    let backend = seeded(&["pending", "shortlisted", "rejected", "reviewed"]).await;
    let (app, _store, _notifier) = backend.app();
    let mut board = app.review_board();
    board.load().await;

    let targets = |id: &str| -> Vec<ApplicationStatus> {
        board
            .actions_for(&ResourceId::from(id))
            .into_iter()
            .map(|a| a.target)
            .collect()
    };
    use ApplicationStatus::*;
    assert_eq!(targets("1"), vec![Reviewed, Shortlisted]);
    assert_eq!(targets("2"), vec![Accepted, Rejected]);
    assert_eq!(targets("3"), vec![Pending]);
    assert_eq!(targets("4"), vec![Shortlisted]);
}

#[tokio::test]
async fn failed_update_keeps_prior_status_and_notifies() {
    let backend = seeded(&["pending", "accepted"]).await;
    backend.with(|s| s.fail_updates = true);
    let (app, _store, notifier) = backend.app();
    let mut board = app.review_board();
    board.load().await;
    let before = board.counts();

    assert!(!board.transition(&ResourceId::from("1"), ApplicationStatus::Reviewed).await);

    assert_eq!(board.get(&ResourceId::from("1")).unwrap().status, ApplicationStatus::Pending);
    assert_eq!(board.counts(), before);
    assert_eq!(notifier.errors(), vec!["Failed to update application status"]);
}

#[tokio::test]
async fn unknown_statuses_load_as_pending() {
    let backend = seeded(&["under_review", "applied", "shortlisted"]).await;
    let (app, _store, _notifier) = backend.app();
    let mut board = app.review_board();
    board.load().await;

    let counts = board.counts();
    assert_eq!(counts.pending, 2);
    assert_eq!(counts.shortlisted, 1);
    assert_eq!(counts.total(), 3);
}

#[tokio::test]
async fn search_and_status_filter_compose_in_any_order() {
    let backend = MockBackend::spawn(BackendState {
        applications: vec![
            application(1, "Ada Acme", "ada@acme.io", "Engineer", "shortlisted"),
            application(2, "Bo", "bo@acme.io", "Designer", "pending"),
            application(3, "Cy", "cy@other.io", "ACME liaison", "shortlisted"),
            application(4, "Di", "di@other.io", "Writer", "shortlisted"),
        ],
        ..Default::default()
    })
    .await;
    let (app, _store, _notifier) = backend.app();

    let mut first = app.review_board();
    first.load().await;
    first.set_search("acme");
    first.set_status_filter(Some(ApplicationStatus::Shortlisted));

    let mut second = app.review_board();
    second.load().await;
    second.set_status_filter(Some(ApplicationStatus::Shortlisted));
    second.set_search("acme");

    let ids = |board: &remote_nomads::views::review::ReviewBoard| -> Vec<String> {
        board.visible().iter().map(|a| a.id.to_string()).collect()
    };
    assert_eq!(ids(&first), vec!["1", "3"]);
    assert_eq!(ids(&first), ids(&second));
    // Counts ignore the filters.
    assert_eq!(first.counts().total(), 4);
}

#[tokio::test]
async fn load_failure_becomes_a_notification() {
    let backend = MockBackend::spawn(BackendState::default()).await;
    backend.with(|s| s.applications = vec![serde_json::json!("not an object")]);
    let (app, _store, notifier) = backend.app();
    let mut board = app.review_board();

    assert!(!board.load().await);
    assert!(!board.is_loading());
    assert_eq!(notifier.errors(), vec!["Failed to load applications"]);
}

#[tokio::test]
async fn loading_flag_is_raised_while_the_fetch_is_outstanding() {
    let backend = seeded(&["pending", "reviewed"]).await;
    let gate = Arc::new(Notify::new());
    backend.with(|s| s.gate = Some(gate.clone()));
    let (app, _store, _notifier) = backend.app();
    let board = app.review_board();
    let mut loading = board.loading_events();
    assert!(!*loading.borrow());

    let fetch = tokio::spawn(async move {
        let mut board = board;
        let loaded = board.load().await;
        (board, loaded)
    });
    loading.wait_for(|busy| *busy).await.unwrap();
    assert_eq!(backend.count("GET", "/applications"), 1);

    gate.notify_one();
    let (board, loaded) = fetch.await.unwrap();
    assert!(loaded);
    assert!(!board.is_loading());
    assert!(!*loading.borrow());
    assert_eq!(board.applications().len(), 2);
}

#[tokio::test]
async fn rows_mixing_both_id_spellings_still_load() {
    let mut rows = vec![
        application(1, "Ada", "ada@acme.io", "Engineer", "pending"),
        application(2, "Bo", "bo@acme.io", "Designer", "accepted"),
    ];
    rows[1]["id"] = serde_json::json!(99);
    rows[1]["candidate_name"] = serde_json::json!("Bo B.");
    let backend = MockBackend::spawn(BackendState {
        applications: rows,
        ..Default::default()
    })
    .await;
    let (app, _store, notifier) = backend.app();
    let mut board = app.review_board();

    assert!(board.load().await);
    assert!(notifier.errors().is_empty());
    let bo = board.get(&ResourceId::from("2")).unwrap();
    assert_eq!(bo.candidate_name.as_deref(), Some("Bo"));
    assert_eq!(board.counts().total(), 2);
}
