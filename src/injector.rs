// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - Payload Injector Module
 * Rate-limited payload dispatch into forms and parameters
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

use crate::extractor::ExtractedForm;
use crate::http_client::HttpClient;
use anyhow::{Context, Result};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorRateLimiter,
};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Synthetic field used when a form has no named fields, so the request
/// still carries the payload
const FALLBACK_FIELD: &str = "input";

/// Dispatches one payload per request, honoring a minimum inter-request
/// delay. Throttling is per-injector-instance; share one instance across
/// tasks to bound the aggregate request rate against a target.
pub struct PayloadInjector {
    http_client: Arc<HttpClient>,
    limiter: Option<DirectRateLimiter>,
}

impl PayloadInjector {
    /// `rate_limit_delay` is the minimum spacing between dispatches from
    /// this instance. A zero delay disables throttling.
    pub fn new(http_client: Arc<HttpClient>, rate_limit_delay: Duration) -> Self {
        let limiter = Quota::with_period(rate_limit_delay).map(GovernorRateLimiter::direct);
        Self {
            http_client,
            limiter,
        }
    }

    /// Inject the payload into every named field of the form and return the
    /// response body. Any failure degrades to an empty string; nothing
    /// escapes this boundary.
    pub async fn inject(
        &self,
        base_url: &str,
        form: &ExtractedForm,
        payload: &str,
        method_override: Option<&str>,
    ) -> String {
        match self.try_inject(base_url, form, payload, method_override).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Payload injection to {} failed: {}", base_url, e);
                String::new()
            }
        }
    }

    /// Fallible inner dispatch, used by the stats-tracking variant.
    pub(crate) async fn try_inject(
        &self,
        base_url: &str,
        form: &ExtractedForm,
        payload: &str,
        method_override: Option<&str>,
    ) -> Result<String> {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let target = Self::resolve_target(base_url, &form.action)?;

        let mut fields: Vec<(String, String)> = form
            .field_names()
            .into_iter()
            .map(|name| (name, payload.to_string()))
            .collect();
        if fields.is_empty() {
            fields.push((FALLBACK_FIELD.to_string(), payload.to_string()));
        }

        let method = method_override
            .map(|m| m.to_lowercase())
            .unwrap_or_else(|| form.method.clone());

        let response = if method == "post" {
            self.http_client.post_form(target.as_str(), &fields).await?
        } else {
            self.http_client
                .get_with_params(target.as_str(), &fields)
                .await?
        };

        debug!("Injection to {} returned status {}", target, response.status_code);
        Ok(response.body)
    }

    /// Resolve the form action against the page URL, falling back to the
    /// page itself when the action is empty.
    fn resolve_target(base_url: &str, action: &str) -> Result<Url> {
        let base =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        if action.is_empty() {
            return Ok(base);
        }
        base.join(action)
            .with_context(|| format!("Invalid form action: {}", action))
    }
}

/// Injection statistics for observability
#[derive(Debug, Clone, Serialize)]
pub struct InjectionStats {
    pub total_injections: usize,
    pub errors: usize,
    pub success_rate: f64,
}

/// Injector variant that counts attempts and failures.
///
/// Failures are still opaque to callers (empty string), they are only
/// observed here for the derived success-rate metric.
pub struct BulkPayloadInjector {
    inner: PayloadInjector,
    injection_count: AtomicUsize,
    error_count: AtomicUsize,
}

impl BulkPayloadInjector {
    pub fn new(http_client: Arc<HttpClient>, rate_limit_delay: Duration) -> Self {
        Self {
            inner: PayloadInjector::new(http_client, rate_limit_delay),
            injection_count: AtomicUsize::new(0),
            error_count: AtomicUsize::new(0),
        }
    }

    pub async fn inject(
        &self,
        base_url: &str,
        form: &ExtractedForm,
        payload: &str,
        method_override: Option<&str>,
    ) -> String {
        self.injection_count.fetch_add(1, Ordering::Relaxed);

        match self
            .inner
            .try_inject(base_url, form, payload, method_override)
            .await
        {
            Ok(body) => body,
            Err(e) => {
                self.error_count.fetch_add(1, Ordering::Relaxed);
                warn!("Payload injection to {} failed: {}", base_url, e);
                String::new()
            }
        }
    }

    pub fn stats(&self) -> InjectionStats {
        let total = self.injection_count.load(Ordering::Relaxed);
        let errors = self.error_count.load(Ordering::Relaxed);

        InjectionStats {
            total_injections: total,
            errors,
            success_rate: if total > 0 {
                (total - errors) as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        }
    }

    pub fn reset_stats(&self) {
        self.injection_count.store(0, Ordering::Relaxed);
        self.error_count.store(0, Ordering::Relaxed);
    }
}
