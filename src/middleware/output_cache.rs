// Output cache for GET endpoints
//
// Successful (200) GET responses are kept in memory for a fixed TTL and
// replayed without invoking the handler. The cache key is the request path
// plus query string; there is no per-header variation.

use actix_web::{
    body::{to_bytes, BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorInternalServerError,
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    web::Bytes,
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::collections::HashMap;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CachedResponse {
    stored_at: Instant,
    content_type: Option<HeaderValue>,
    body: Bytes,
}

impl CachedResponse {
    fn to_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::Ok();
        if let Some(content_type) = &self.content_type {
            builder.insert_header((CONTENT_TYPE, content_type.clone()));
        }
        builder.body(self.body.clone())
    }
}

/// Upper bound on stored responses
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Fixed-TTL response cache shared by every worker.
///
/// Expired entries are purged on every store; when the cache is still full
/// the oldest entry is evicted, so the map never exceeds `max_entries`.
#[derive(Debug, Clone)]
pub struct OutputCache {
    ttl: Duration,
    max_entries: usize,
    entries: Arc<Mutex<HashMap<String, CachedResponse>>>,
}

impl OutputCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_entries(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of stored entries, fresh or expired
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &str) -> Option<CachedResponse> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .cloned()
    }

    fn store(&self, key: String, entry: CachedResponse) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };

        let ttl = self.ttl;
        entries.retain(|_, cached| cached.stored_at.elapsed() < ttl);

        while entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, cached)| cached.stored_at)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(oldest) => {
                    entries.remove(&oldest);
                }
                None => break,
            }
        }

        entries.insert(key, entry);
    }
}

fn cache_key(req: &ServiceRequest) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string())
}

impl<S, B> Transform<S, ServiceRequest> for OutputCache
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = OutputCacheMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OutputCacheMiddleware {
            service: Rc::new(service),
            cache: self.clone(),
        }))
    }
}

pub struct OutputCacheMiddleware<S> {
    service: Rc<S>,
    cache: OutputCache,
}

impl<S, B> Service<ServiceRequest> for OutputCacheMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let cache = self.cache.clone();

        Box::pin(async move {
            if *req.method() != Method::GET {
                let res = service.call(req).await?;
                return Ok(res.map_into_boxed_body());
            }

            let key = cache_key(&req);
            if let Some(hit) = cache.lookup(&key) {
                tracing::debug!(key = %key, "Serving cached response");
                return Ok(req.into_response(hit.to_response()));
            }

            let res = service.call(req).await?;
            if res.status() != StatusCode::OK {
                return Ok(res.map_into_boxed_body());
            }

            let (http_req, response) = res.into_parts();
            let content_type = response.headers().get(CONTENT_TYPE).cloned();
            let (response, body) = response.into_parts();
            let body = to_bytes(body).await.map_err(|err| {
                let err: Box<dyn std::error::Error> = err.into();
                ErrorInternalServerError(err.to_string())
            })?;

            cache.store(
                key,
                CachedResponse {
                    stored_at: Instant::now(),
                    content_type,
                    body: body.clone(),
                },
            );

            let response = response.set_body(BoxBody::new(body));
            Ok(ServiceResponse::new(http_req, response))
        })
    }
}
