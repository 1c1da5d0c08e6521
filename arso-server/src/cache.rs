//! Whole-response cache for the dynamic routes.
//!
//! Every dynamic route, the per-station lookup included, sits behind a
//! single cache keyed by `METHOD path`. A hit replays the stored status,
//! content type, and body bytes; a miss runs the handler, stores whatever
//! it rendered, and returns it. Upstream data changing inside the window
//! is invisible by design.
//!
//! The cache is constructed in `main` and injected into the router, so
//! tests can substitute their own configuration (notably a short TTL).

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use moka::future::Cache as MokaCache;
use tracing::warn;

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a rendered response is replayed before recomputation.
    pub ttl: Duration,

    /// Maximum number of cached responses.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 1024,
        }
    }
}

/// A fully rendered response, ready to replay.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    status: StatusCode,
    content_type: Option<HeaderValue>,
    body: Bytes,
}

impl CachedResponse {
    fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        if let Some(content_type) = &self.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type.clone());
        }
        response
    }
}

/// TTL cache of rendered responses, keyed by `METHOD path`.
#[derive(Clone)]
pub struct ResponseCache {
    inner: MokaCache<String, CachedResponse>,
}

impl ResponseCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let inner = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner }
    }

    /// Get a cached response.
    pub async fn get(&self, key: &str) -> Option<CachedResponse> {
        self.inner.get(key).await
    }

    /// Store a rendered response.
    pub async fn insert(&self, key: String, response: CachedResponse) {
        self.inner.insert(key, response).await;
    }

    /// Cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Drop all cached responses.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

/// Axum middleware applying the response cache.
///
/// Only GETs are cached; everything a handler rendered is stored, 404s
/// included, bounded by the cache capacity. Concurrent misses for the same
/// key each run the handler (no single-flight coalescing); last writer
/// wins, which is harmless for idempotent GETs.
pub async fn cache_response(
    State(cache): State<ResponseCache>,
    req: Request,
    next: Next,
) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = format!("{} {}", req.method(), req.uri().path());

    if let Some(hit) = cache.get(&key).await {
        return hit.to_response();
    }

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key = %key, error = %e, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let cached = CachedResponse {
        status: parts.status,
        content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
        body: bytes.clone(),
    };
    cache.insert(key, cached).await;

    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::Router;
    use axum::middleware;
    use axum::routing::{get, post};
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 1024);
    }

    #[test]
    fn cache_creation() {
        let cache = ResponseCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn roundtrip() {
        let cache = ResponseCache::new(&CacheConfig::default());
        let stored = CachedResponse {
            status: StatusCode::OK,
            content_type: Some(HeaderValue::from_static("application/json")),
            body: Bytes::from_static(b"[]"),
        };

        cache.insert("GET /potresi.json".to_string(), stored).await;

        let hit = cache.get("GET /potresi.json").await.unwrap();
        assert_eq!(hit.status, StatusCode::OK);
        assert_eq!(hit.body, Bytes::from_static(b"[]"));
        assert!(cache.get("GET /postaje.json").await.is_none());
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let config = CacheConfig {
            ttl: Duration::from_millis(50),
            max_capacity: 16,
        };
        let cache = ResponseCache::new(&config);
        let stored = CachedResponse {
            status: StatusCode::OK,
            content_type: None,
            body: Bytes::from_static(b"x"),
        };

        cache.insert("GET /x".to_string(), stored).await;
        assert!(cache.get("GET /x").await.is_some());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(cache.get("GET /x").await.is_none());
    }

    /// Router whose handler body changes on every invocation, so replayed
    /// responses are detectable.
    fn counting_router(cache: ResponseCache) -> Router {
        let hits = Arc::new(AtomicUsize::new(0));
        let post_hits = Arc::new(AtomicUsize::new(0));

        Router::new()
            .route(
                "/count",
                get(move || {
                    let hits = hits.clone();
                    async move { format!("hit {}", hits.fetch_add(1, Ordering::SeqCst)) }
                }),
            )
            .route(
                "/count",
                post(move || {
                    let post_hits = post_hits.clone();
                    async move { format!("hit {}", post_hits.fetch_add(1, Ordering::SeqCst)) }
                }),
            )
            .layer(middleware::from_fn_with_state(cache, cache_response))
    }

    async fn body_of(router: &Router, method: Method, path: &str) -> String {
        let response = router
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .method(method)
                    .uri(path)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn get_responses_are_replayed_within_the_window() {
        let cache = ResponseCache::new(&CacheConfig::default());
        let app = counting_router(cache);

        let first = body_of(&app, Method::GET, "/count").await;
        let second = body_of(&app, Method::GET, "/count").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fresh_data_is_served_after_expiry() {
        let config = CacheConfig {
            ttl: Duration::from_millis(50),
            max_capacity: 16,
        };
        let app = counting_router(ResponseCache::new(&config));

        let first = body_of(&app, Method::GET, "/count").await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        let third = body_of(&app, Method::GET, "/count").await;
        assert_ne!(first, third);
    }

    #[tokio::test]
    async fn non_get_requests_bypass_the_cache() {
        let cache = ResponseCache::new(&CacheConfig::default());
        let app = counting_router(cache);

        let first = body_of(&app, Method::POST, "/count").await;
        let second = body_of(&app, Method::POST, "/count").await;
        assert_ne!(first, second);
    }
}
