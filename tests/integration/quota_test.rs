//! Quota and path-uniqueness properties under concurrency, against SQLite.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use futures::future::join_all;

use chartshare_core::config::ShareConfig;
use chartshare_database::migration::run_migrations;
use chartshare_database::{DatabasePool, ShareRepository};
use chartshare_entity::PathError;
use chartshare_service::{CreateShareRequest, LinkService, ShareError, ShareService};

use helpers::{CHART, TestApp};

async fn sqlite_service(max_shares_per_user: u64) -> Arc<ShareService> {
    let db = DatabasePool::in_memory().await.unwrap();
    run_migrations(db.pool()).await.unwrap();
    let config = ShareConfig {
        max_shares_per_user,
        public_base_url: None,
    };
    Arc::new(ShareService::new(
        Arc::new(ShareRepository::new(db.into_pool())),
        Arc::new(LinkService::new()),
        &config,
    ))
}

fn request(owner_id: u64, custom_path: Option<String>) -> CreateShareRequest {
    CreateShareRequest {
        owner_id,
        chart: CHART.to_string(),
        custom_path,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_never_exceed_quota() {
    const MAX: u64 = 8;
    let svc = sqlite_service(MAX).await;

    let tasks: Vec<_> = (0..2 * MAX)
        .map(|i| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                svc.create_share(request(42, Some(format!("path-{i}"))))
                    .await
            })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let created = results.iter().filter(|r| r.is_ok()).count() as u64;
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(ShareError::QuotaExceeded)))
        .count() as u64;
    assert_eq!(created, MAX);
    assert_eq!(rejected, MAX);
    assert_eq!(svc.get_all_user_shares(42).await.unwrap().len() as u64, MAX);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_quota_is_per_owner() {
    let svc = sqlite_service(2).await;

    let tasks: Vec<_> = (0..3u64)
        .flat_map(|owner| (0..3).map(move |i| (owner, i)))
        .map(|(owner, _)| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move { svc.create_share(request(owner, None)).await })
        })
        .collect();
    join_all(tasks).await;

    for owner in 0..3 {
        assert_eq!(svc.get_all_user_shares(owner).await.unwrap().len(), 2);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_custom_path_race() {
    let svc = sqlite_service(64).await;

    let tasks: Vec<_> = (1..=2u64)
        .map(|owner| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                svc.create_share(request(owner, Some("contested".to_string())))
                    .await
            })
        })
        .collect();

    let results: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        results
            .iter()
            .any(|r| matches!(r, Err(ShareError::Path(PathError::Unavailable))))
    );

    let share = svc.get_share("contested").await.unwrap();
    assert!(share.owner_id == 1 || share.owner_id == 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_creates_respect_quota() {
    let mut config = helpers::test_config();
    config.shares.max_shares_per_user = 3;
    let app = Arc::new(TestApp::with_config(config).await);
    let cookie = app.sign_in(5).await;

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let app = Arc::clone(&app);
            let cookie = cookie.clone();
            tokio::spawn(async move { app.create_share(&cookie, None).await })
        })
        .collect();

    let statuses: Vec<_> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap().status)
        .collect();
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 3);
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::FORBIDDEN)
            .count(),
        3
    );

    let response = app.request("GET", "/api/shares", None, Some(&cookie)).await;
    assert_eq!(response.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_removal_frees_quota() {
    let svc = sqlite_service(1).await;
    svc.create_share(request(9, Some("first".to_string())))
        .await
        .unwrap();
    assert!(matches!(
        svc.create_share(request(9, Some("second".to_string()))).await,
        Err(ShareError::QuotaExceeded)
    ));

    svc.remove_share("first", 9).await.unwrap();
    svc.create_share(request(9, Some("second".to_string())))
        .await
        .unwrap();
}
