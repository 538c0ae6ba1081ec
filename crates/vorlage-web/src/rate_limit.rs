//! Per-client request throttling.
//!
//! A token-bucket per client IP (taken from the first hop of
//! `X-Forwarded-For`; requests without the header are not throttled).
//! Exhausted buckets answer 429 without reaching the inner service.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tower::{Layer, Service};
use tracing::warn;

const DROP_REPORT_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone, Copy, Debug)]
struct ThrottleConfig {
    refill_per_sec: f64,
    capacity: f64,
}

#[derive(Clone)]
pub struct ThrottleLayer {
    config: ThrottleConfig,
}

impl ThrottleLayer {
    pub fn new(rate_per_sec: u32, burst: u32) -> Self {
        ThrottleLayer {
            config: ThrottleConfig {
                refill_per_sec: rate_per_sec as f64,
                capacity: burst as f64,
            },
        }
    }
}

impl<S> Layer<S> for ThrottleLayer {
    type Service = Throttle<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Throttle {
            inner,
            config: self.config,
            state: Arc::new(ThrottleState::new()),
        }
    }
}

struct Bucket {
    tokens: f64,
    refilled_at: Instant,
}

struct ThrottleState {
    buckets: DashMap<String, Bucket>,
    dropped: AtomicU64,
    last_report: Mutex<Instant>,
}

impl ThrottleState {
    fn new() -> Self {
        ThrottleState {
            buckets: DashMap::new(),
            dropped: AtomicU64::new(0),
            last_report: Mutex::new(Instant::now()),
        }
    }

    fn allow(&self, client: &str, config: ThrottleConfig) -> bool {
        let now = Instant::now();
        let mut bucket = self.buckets.entry(client.to_string()).or_insert(Bucket {
            tokens: config.capacity,
            refilled_at: now,
        });
        let elapsed = now.saturating_duration_since(bucket.refilled_at).as_secs_f64();
        if elapsed > 0.0 {
            bucket.tokens = (bucket.tokens + elapsed * config.refill_per_sec).min(config.capacity);
            bucket.refilled_at = now;
        }
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn record_drop(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
        let now = Instant::now();
        let mut last = self.last_report.lock().unwrap();
        if now.saturating_duration_since(*last) >= DROP_REPORT_INTERVAL {
            let dropped = self.dropped.swap(0, Ordering::Relaxed);
            if dropped > 0 {
                warn!("throttled {dropped} requests in the last minute");
            }
            *last = now;
        }
    }
}

#[derive(Clone)]
pub struct Throttle<S> {
    inner: S,
    config: ThrottleConfig,
    state: Arc<ThrottleState>,
}

fn client_ip<B>(req: &axum::http::Request<B>) -> Option<String> {
    // First hop of the proxy chain.
    let forwarded = req.headers().get("x-forwarded-for")?.to_str().ok()?;
    let first = forwarded.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

impl<S, ReqBody> Service<axum::http::Request<ReqBody>> for Throttle<S>
where
    S: Service<axum::http::Request<ReqBody>, Response = axum::http::Response<axum::body::Body>>
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: axum::http::Request<ReqBody>) -> Self::Future {
        if let Some(client) = client_ip(&req)
            && !self.state.allow(&client, self.config)
        {
            self.state.record_drop();
            return Box::pin(async move {
                Ok(axum::http::Response::builder()
                    .status(axum::http::StatusCode::TOO_MANY_REQUESTS)
                    .body(axum::body::Body::from("rate limited"))
                    .unwrap())
            });
        }

        let fut = self.inner.call(req);
        Box::pin(fut)
    }
}
