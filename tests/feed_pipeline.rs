//! End-to-end tests of the feed pipeline: remote loader, cache write-through,
//! and local fallback wired together the way the binary wires them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use photofeed::application::{LoadFeedUseCase, LocalFeedLoader, ValidateCacheUseCase};
use photofeed::domain::entities::{CacheEntry, CachePolicy, FeedImage};
use photofeed::domain::errors::LoadError;
use photofeed::domain::ports::{Clock, FeedStorePort, HttpClientPort, HttpResponse};
use photofeed::infrastructure::{FeedApi, InMemoryFeedStore};

const BASE_URL: &str = "https://api.example.com/v1";

/// Scripted transport: every URL resolves to a programmed result,
/// anything else fails with a connectivity error.
#[derive(Default)]
struct ScriptedHttp {
    responses: Mutex<HashMap<String, Result<HttpResponse, LoadError>>>,
}

impl ScriptedHttp {
    async fn stub(&self, url: &str, result: Result<HttpResponse, LoadError>) {
        self.responses.lock().await.insert(url.to_string(), result);
    }

    async fn stub_body(&self, url: &str, status: u16, body: &str) {
        self.stub(
            url,
            Ok(HttpResponse {
                status,
                body: Bytes::copy_from_slice(body.as_bytes()),
            }),
        )
        .await;
    }
}

#[async_trait]
impl HttpClientPort for ScriptedHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, LoadError> {
        self.responses
            .lock()
            .await
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(LoadError::connectivity(format!("unreachable: {url}"))))
    }
}

struct FrozenClock {
    now: DateTime<Utc>,
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

fn anchor() -> DateTime<Utc> {
    "2026-08-10T09:00:00Z".parse().unwrap()
}

fn sample_feed() -> Vec<FeedImage> {
    vec![
        FeedImage::new(
            "11111111-1111-1111-1111-111111111111".parse().unwrap(),
            Some("a rainy pier".into()),
            Some("Brighton".into()),
            "https://images.example.com/1.jpg",
        ),
        FeedImage::new(
            "22222222-2222-2222-2222-222222222222".parse().unwrap(),
            None,
            None,
            "https://images.example.com/2.jpg",
        ),
    ]
}

fn feed_json(images: &[FeedImage]) -> String {
    let items: Vec<String> = images
        .iter()
        .map(|image| {
            let mut fields = vec![format!(r#""id":"{}""#, image.id)];
            if let Some(description) = &image.description {
                fields.push(format!(r#""description":"{description}""#));
            }
            if let Some(location) = &image.location {
                fields.push(format!(r#""location":"{location}""#));
            }
            fields.push(format!(r#""image":"{}""#, image.url));
            format!("{{{}}}", fields.join(","))
        })
        .collect();
    format!(r#"{{"items":[{}]}}"#, items.join(","))
}

struct Harness {
    http: Arc<ScriptedHttp>,
    store: Arc<InMemoryFeedStore>,
    use_case: LoadFeedUseCase,
    local: Arc<LocalFeedLoader>,
}

fn make_harness(cached: Option<CacheEntry<Vec<FeedImage>>>) -> Harness {
    let http = Arc::new(ScriptedHttp::default());
    let store = Arc::new(match cached {
        Some(entry) => InMemoryFeedStore::with_entry(entry),
        None => InMemoryFeedStore::new(),
    });
    let clock: Arc<dyn Clock> = Arc::new(FrozenClock { now: anchor() });
    let local = Arc::new(LocalFeedLoader::new(store.clone(), clock));
    let api = FeedApi::new(http.clone(), BASE_URL);
    let use_case = LoadFeedUseCase::new(Arc::new(api.feed_loader()), local.clone());

    Harness {
        http,
        store,
        use_case,
        local,
    }
}

/// The cache write after a remote success is fire-and-forget, so tests poll
/// for it instead of racing the spawned save.
async fn wait_for_insert(store: &InMemoryFeedStore) {
    for _ in 0..100 {
        if store.insert_count() > 0 {
            return;
        }
        tokio::time::sleep(StdDuration::from_millis(5)).await;
    }
    panic!("cache write never happened");
}

#[tokio::test]
async fn test_remote_success_delivers_items_and_caches_them() {
    let feed = sample_feed();
    let harness = make_harness(None);
    harness
        .http
        .stub_body(&format!("{BASE_URL}/feed"), 200, &feed_json(&feed))
        .await;

    let loaded = harness.use_case.execute().await.unwrap();

    assert_eq!(loaded, feed);
    wait_for_insert(&harness.store).await;
    let stored = harness.store.retrieve().await.unwrap().unwrap();
    assert_eq!(stored.value, feed);
    assert_eq!(stored.timestamp, anchor());
}

#[tokio::test]
async fn test_remote_empty_feed_is_a_valid_result() {
    let harness = make_harness(None);
    harness
        .http
        .stub_body(&format!("{BASE_URL}/feed"), 200, r#"{"items":[]}"#)
        .await;

    assert_eq!(harness.use_case.execute().await, Ok(Vec::new()));
}

#[tokio::test]
async fn test_connectivity_failure_falls_back_to_fresh_cache() {
    let feed = sample_feed();
    let entry = CacheEntry::new(feed.clone(), anchor() - Duration::days(3));
    let harness = make_harness(Some(entry));

    assert_eq!(harness.use_case.execute().await, Ok(feed));
    assert_eq!(harness.store.insert_count(), 0);
}

#[tokio::test]
async fn test_non_success_status_falls_back_to_fresh_cache() {
    let feed = sample_feed();
    let entry = CacheEntry::new(feed.clone(), anchor() - Duration::days(1));
    let harness = make_harness(Some(entry));
    harness
        .http
        .stub_body(&format!("{BASE_URL}/feed"), 500, "oops")
        .await;

    assert_eq!(harness.use_case.execute().await, Ok(feed));
}

#[tokio::test]
async fn test_malformed_payload_falls_back_to_fresh_cache() {
    let feed = sample_feed();
    let entry = CacheEntry::new(feed.clone(), anchor() - Duration::days(1));
    let harness = make_harness(Some(entry));
    harness
        .http
        .stub_body(&format!("{BASE_URL}/feed"), 200, "not json")
        .await;

    assert_eq!(harness.use_case.execute().await, Ok(feed));
}

#[tokio::test]
async fn test_failure_with_empty_cache_surfaces_cache_empty() {
    let harness = make_harness(None);

    assert_eq!(harness.use_case.execute().await, Err(LoadError::CacheEmpty));
    assert_eq!(harness.use_case.execute_or_empty().await, Vec::new());
}

#[tokio::test]
async fn test_failure_with_expired_cache_surfaces_cache_expired() {
    let entry = CacheEntry::new(sample_feed(), anchor() - CachePolicy::max_age());
    let harness = make_harness(Some(entry));

    assert_eq!(
        harness.use_case.execute().await,
        Err(LoadError::CacheExpired)
    );
    // Loading never deletes; sweeping is a separate operation.
    assert_eq!(harness.store.delete_count(), 0);
}

#[tokio::test]
async fn test_validate_sweeps_expired_snapshot() {
    let entry = CacheEntry::new(sample_feed(), anchor() - Duration::days(10));
    let harness = make_harness(Some(entry));

    ValidateCacheUseCase::new(harness.local.clone()).execute().await;

    assert!(harness.store.retrieve().await.unwrap().is_none());
}

#[tokio::test]
async fn test_validate_keeps_snapshot_within_max_age() {
    let entry = CacheEntry::new(sample_feed(), anchor() - Duration::days(6));
    let harness = make_harness(Some(entry));

    ValidateCacheUseCase::new(harness.local.clone()).execute().await;

    assert!(harness.store.retrieve().await.unwrap().is_some());
    assert_eq!(harness.store.delete_count(), 0);
}

#[tokio::test]
async fn test_cancelled_load_delivers_nothing() {
    let harness = make_harness(None);

    let task = harness.use_case.spawn();
    task.cancel();

    assert_eq!(task.join().await, None);
}

#[tokio::test]
async fn test_refreshed_cache_serves_after_remote_goes_away() {
    let feed = sample_feed();
    let harness = make_harness(None);
    let feed_url = format!("{BASE_URL}/feed");
    harness.http.stub_body(&feed_url, 200, &feed_json(&feed)).await;

    assert_eq!(harness.use_case.execute().await, Ok(feed.clone()));
    wait_for_insert(&harness.store).await;

    // Take the network away; the snapshot just written serves the next load.
    harness
        .http
        .stub(&feed_url, Err(LoadError::connectivity("offline")))
        .await;

    assert_eq!(harness.use_case.execute().await, Ok(feed));
}
