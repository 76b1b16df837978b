// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - Web Crawler Module
 * Discovers same-host URLs under a depth bound, avoiding revisits
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

use crate::errors::ScannerError;
use crate::http_client::HttpClient;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Depth-bounded, cycle-safe web crawler.
///
/// Visited state is scoped to one `crawl` call, so repeated crawls from the
/// same instance start clean.
pub struct WebCrawler {
    http_client: Arc<HttpClient>,
    max_depth: usize,
}

impl WebCrawler {
    pub fn new(http_client: Arc<HttpClient>, max_depth: usize) -> Self {
        Self {
            http_client,
            max_depth,
        }
    }

    /// Crawl same-host pages depth-first from the start URL.
    ///
    /// Fetch failures (timeout, connection error, non-2xx) still count as
    /// visited and terminate only that branch; the crawl itself fails only
    /// when the start URL does not parse with scheme and host.
    pub async fn crawl(&self, start_url: &str) -> Result<Vec<String>, ScannerError> {
        let base = Self::parse_start(start_url)?;
        let base_host = base.host_str().unwrap_or_default().to_string();
        info!("Starting crawl of {}", base);

        let mut discovered: Vec<String> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        // Normalized serialization, so the start URL and links back to it
        // compare equal in the visited set
        let mut to_visit: Vec<(String, usize)> = vec![(base.to_string(), 0)];

        while let Some((url, depth)) = to_visit.pop() {
            if depth > self.max_depth || visited.contains(&url) {
                continue;
            }

            visited.insert(url.clone());
            discovered.push(url.clone());

            debug!("Crawling {} (depth: {})", url, depth);

            let body = match self.fetch_page(&url).await {
                Some(body) => body,
                None => continue,
            };

            for link in Self::extract_links(&url, &body, &base_host) {
                if !visited.contains(&link) {
                    to_visit.push((link, depth + 1));
                }
            }
        }

        info!("Crawl complete: {} URLs discovered", discovered.len());
        Ok(discovered)
    }

    /// Shallow crawl: the start URL plus its direct same-host links, without
    /// recursing further. Used for bounded-latency scans.
    pub async fn crawl_fast(&self, start_url: &str) -> Result<Vec<String>, ScannerError> {
        let base = Self::parse_start(start_url)?;
        let base_host = base.host_str().unwrap_or_default().to_string();
        let start = base.to_string();

        let mut urls = vec![start.clone()];
        if let Some(body) = self.fetch_page(&start).await {
            urls.extend(Self::extract_links(&start, &body, &base_host));
        }

        let mut seen = HashSet::new();
        urls.retain(|u| seen.insert(u.clone()));
        Ok(urls)
    }

    fn parse_start(url: &str) -> Result<Url, ScannerError> {
        Url::parse(url)
            .ok()
            .filter(|u| u.has_host())
            .ok_or_else(|| ScannerError::InvalidUrl {
                url: url.to_string(),
            })
    }

    async fn fetch_page(&self, url: &str) -> Option<String> {
        match self.http_client.get(url).await {
            Ok(resp) if resp.is_success() => Some(resp.body),
            Ok(resp) => {
                warn!("Fetch of {} returned status {}", url, resp.status_code);
                None
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                None
            }
        }
    }

    /// Extract anchor hrefs, resolve them against the page URL and keep only
    /// absolute URLs whose host exactly matches the starting host.
    fn extract_links(page_url: &str, html: &str, base_host: &str) -> Vec<String> {
        let mut links = Vec::new();

        let page = match Url::parse(page_url) {
            Ok(u) => u,
            Err(_) => return links,
        };

        let document = Html::parse_document(html);
        let anchor_selector = Selector::parse("a[href]").unwrap();

        for anchor in document.select(&anchor_selector) {
            let href = anchor.value().attr("href").unwrap_or("").trim();
            if href.is_empty() {
                continue;
            }

            let resolved = match page.join(href) {
                Ok(u) => u,
                Err(_) => continue,
            };

            // Exact host match; no subdomain merging
            if resolved.host_str() == Some(base_host) {
                links.push(resolved.to_string());
            }
        }

        links
    }
}
