use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use datamint_core::AppError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::auth::jwt::verify_token;
use crate::auth::models::UserContext;
use crate::error::HttpAppError;

/// Per-IP counter for failed authentication attempts within a sliding window
#[derive(Clone)]
pub struct AuthFailureLimiter {
    inner: Arc<Mutex<HashMap<String, (u32, Instant)>>>,
    max_failures: u32,
    window: Duration,
}

impl AuthFailureLimiter {
    pub fn new(max_failures: u32, window_seconds: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_failures,
            window: Duration::from_secs(window_seconds),
        }
    }

    pub async fn record_failure(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        let now = Instant::now();
        let (count, reset_at) = guard.entry(ip.to_string()).or_insert((0, now + self.window));
        if now >= *reset_at {
            *count = 0;
            *reset_at = now + self.window;
        }
        *count += 1;
        *count >= self.max_failures
    }

    pub async fn is_blocked(&self, ip: &str) -> bool {
        let mut guard = self.inner.lock().await;
        if let Some((count, reset_at)) = guard.get(ip) {
            if Instant::now() >= *reset_at {
                guard.remove(ip);
                return false;
            }
            return *count >= self.max_failures;
        }
        false
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
    pub auth_failure_limiter: Arc<AuthFailureLimiter>,
}

fn client_ip(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            request
                .extensions()
                .get::<std::net::SocketAddr>()
                .map(|addr| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    if auth_state.auth_failure_limiter.is_blocked(&ip).await {
        return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts").into_response();
    }

    let token = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
    {
        Some(token) => token,
        None => {
            if auth_state.auth_failure_limiter.record_failure(&ip).await {
                return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts")
                    .into_response();
            }
            return HttpAppError(AppError::Unauthorized(
                "Missing authorization header".to_string(),
            ))
            .into_response();
        }
    };

    let claims = match verify_token(&auth_state.jwt_secret, token) {
        Ok(claims) => claims,
        Err(err) => {
            if auth_state.auth_failure_limiter.record_failure(&ip).await {
                return (StatusCode::TOO_MANY_REQUESTS, "Too many failed auth attempts")
                    .into_response();
            }
            return HttpAppError(err).into_response();
        }
    };

    request.extensions_mut().insert(UserContext {
        user_id: claims.sub,
        email: claims.email,
    });
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn limiter_blocks_after_max_failures() {
        let limiter = AuthFailureLimiter::new(3, 60);
        assert!(!limiter.is_blocked("1.2.3.4").await);
        assert!(!limiter.record_failure("1.2.3.4").await);
        assert!(!limiter.record_failure("1.2.3.4").await);
        assert!(limiter.record_failure("1.2.3.4").await);
        assert!(limiter.is_blocked("1.2.3.4").await);
    }

    #[tokio::test]
    async fn limiter_tracks_ips_independently() {
        let limiter = AuthFailureLimiter::new(2, 60);
        limiter.record_failure("1.1.1.1").await;
        limiter.record_failure("1.1.1.1").await;
        assert!(limiter.is_blocked("1.1.1.1").await);
        assert!(!limiter.is_blocked("2.2.2.2").await);
    }
}
