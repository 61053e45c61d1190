//! Concurrency tests for click accounting.
//!
//! The repository contract promises that a URL never overruns its click
//! limit under concurrent registration, that exactly `limit` attempts
//! win, and that the winner of the final click flips the status.

use std::sync::Arc;

use click_router::domain::entities::{NewUrl, UrlStatus};
use click_router::domain::repositories::{ClickOutcome, UrlRepository};
use click_router::infrastructure::persistence::MemoryUrlRepository;

async fn seed_url(repo: &MemoryUrlRepository, limit: i64) -> i64 {
    repo.create(NewUrl {
        campaign_id: 1,
        name: "landing".to_string(),
        target_url: "https://shop.example.com/a".to_string(),
        click_limit: limit,
    })
    .await
    .unwrap()
    .id
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_clicks_never_overrun_limit() {
    let repo = Arc::new(MemoryUrlRepository::new());
    let url_id = seed_url(&repo, 100).await;

    let mut tasks = Vec::new();
    for _ in 0..500 {
        let repo = repo.clone();
        tasks.push(tokio::spawn(async move {
            repo.register_click(url_id).await.unwrap()
        }));
    }

    let mut registered = 0;
    let mut exhausted = 0;
    let mut completions = 0;
    for task in tasks {
        match task.await.unwrap() {
            ClickOutcome::Registered { completed, .. } => {
                registered += 1;
                if completed {
                    completions += 1;
                }
            }
            ClickOutcome::Exhausted => exhausted += 1,
            ClickOutcome::NotFound => panic!("URL vanished mid-test"),
        }
    }

    assert_eq!(registered, 100);
    assert_eq!(exhausted, 400);
    assert_eq!(completions, 1);

    let stored = repo.find_by_id(url_id).await.unwrap().unwrap();
    assert_eq!(stored.clicks, stored.click_limit);
    assert_eq!(stored.status, UrlStatus::Completed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_registered_counts_are_dense_and_unique() {
    let repo = Arc::new(MemoryUrlRepository::new());
    let url_id = seed_url(&repo, 50).await;

    let mut tasks = Vec::new();
    for _ in 0..50 {
        let repo = repo.clone();
        tasks.push(tokio::spawn(async move {
            repo.register_click(url_id).await.unwrap()
        }));
    }

    let mut seen = Vec::new();
    for task in tasks {
        if let ClickOutcome::Registered { clicks, .. } = task.await.unwrap() {
            seen.push(clicks);
        }
    }
    seen.sort_unstable();

    // Every winner observed a distinct count from 1 to the limit.
    let expected: Vec<i64> = (1..=50).collect();
    assert_eq!(seen, expected);
}
