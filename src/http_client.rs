// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - HTTP Client
 * Timeout-bounded request dispatch shared by every scanning component
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

use anyhow::{Context, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Maximum response body size (10MB) to prevent memory exhaustion
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_MAX_IDLE_TIMEOUT: u64 = 90;

const USER_AGENT: &str = "VulnX-Scanner/2.0";

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Thin wrapper over reqwest with a fixed per-request timeout.
///
/// Every request is one-shot: a failed fetch or injection is not reattempted,
/// trading completeness for bounded scan latency.
#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    max_body_size: usize,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(DEFAULT_POOL_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(DEFAULT_POOL_MAX_IDLE_TIMEOUT))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client: Arc::new(client),
            max_body_size: MAX_BODY_SIZE,
        })
    }

    /// Send a plain GET request
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        self.read_response(url, response).await
    }

    /// Send a GET request with payload values as query parameters
    pub async fn get_with_params(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<HttpResponse> {
        let response = self.client.get(url).query(params).send().await?;
        self.read_response(url, response).await
    }

    /// Send a POST request with payload values as a form-encoded body
    pub async fn post_form(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<HttpResponse> {
        let response = self.client.post(url).form(params).send().await?;
        self.read_response(url, response).await
    }

    async fn read_response(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<HttpResponse> {
        let status_code = response.status().as_u16();

        let headers_map = {
            let headers = response.headers();
            let mut map = HashMap::with_capacity(headers.len());
            for (k, v) in headers.iter() {
                if let Ok(value_str) = v.to_str() {
                    map.insert(k.as_str().to_string(), value_str.to_string());
                }
            }
            map
        };

        // Read body with size limit; truncate oversized responses
        let body_bytes = response.bytes().await.unwrap_or_default();
        let body = if body_bytes.len() > self.max_body_size {
            String::from_utf8_lossy(&body_bytes[..self.max_body_size]).to_string()
        } else {
            String::from_utf8_lossy(&body_bytes).to_string()
        };

        debug!("{} -> {} ({} bytes)", url, status_code, body.len());

        Ok(HttpResponse {
            status_code,
            body,
            headers: headers_map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        let ok = HttpResponse {
            status_code: 200,
            body: String::new(),
            headers: HashMap::new(),
        };
        assert!(ok.is_success());

        let not_found = HttpResponse {
            status_code: 404,
            body: String::new(),
            headers: HashMap::new(),
        };
        assert!(!not_found.is_success());
    }
}
