// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - Scan Orchestrator
 * Wires crawler, extractor, injector and detectors into one concurrent scan
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

use crate::crawler::WebCrawler;
use crate::detectors::{ParamScanner, SqliScanner, XssScanner};
use crate::errors::ScannerError;
use crate::extractor::FormExtractor;
use crate::http_client::HttpClient;
use crate::injector::PayloadInjector;
use crate::types::{Finding, ScanConfig, ScanState, ScanSummary, ScanType};
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrates one scan invocation: crawl, then fan out per-URL scanning
/// tasks to a bounded worker pool.
///
/// Every `scan` call starts from empty findings and visited state; nothing
/// leaks across invocations.
pub struct VulnerabilityScanner {
    config: ScanConfig,
    crawler: WebCrawler,
    extractor: Arc<FormExtractor>,
    sqli_scanner: Arc<SqliScanner>,
    xss_scanner: Arc<XssScanner>,
    param_scanner: Arc<ParamScanner>,
    findings: Vec<Finding>,
    discovered_urls: Vec<String>,
    state: ScanState,
}

impl VulnerabilityScanner {
    /// Build a scanner from a validated configuration. Invalid settings are
    /// rejected here, before any network activity.
    pub fn new(config: ScanConfig) -> Result<Self, ScannerError> {
        config.validate()?;

        let http_client = Arc::new(
            HttpClient::new(config.request_timeout)
                .map_err(|e| ScannerError::Configuration(e.to_string()))?,
        );

        // One rate-limited injector is shared by every scanning task, so the
        // configured spacing bounds the aggregate request rate to the target
        // rather than the per-task rate.
        let injector = Arc::new(PayloadInjector::new(
            Arc::clone(&http_client),
            config.rate_limit_delay,
        ));

        Ok(Self {
            crawler: WebCrawler::new(Arc::clone(&http_client), config.max_depth),
            extractor: Arc::new(FormExtractor::new(Arc::clone(&http_client))),
            sqli_scanner: Arc::new(SqliScanner::new(Arc::clone(&injector))),
            xss_scanner: Arc::new(XssScanner::new(injector)),
            param_scanner: Arc::new(ParamScanner::new(http_client)),
            findings: Vec::new(),
            discovered_urls: Vec::new(),
            state: ScanState::Idle,
            config,
        })
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn discovered_urls(&self) -> &[String] {
        &self.discovered_urls
    }

    /// Full scan: crawl the target, then scan every discovered URL with up
    /// to `thread_count` tasks in flight. Findings accumulate in completion
    /// order, not discovery order.
    pub async fn scan(&mut self, target_url: &str) -> Result<&[Finding], ScannerError> {
        info!("Starting scan on {}", target_url);
        self.findings.clear();
        self.discovered_urls.clear();

        self.state = ScanState::Crawling;
        self.discovered_urls = match self.crawler.crawl(target_url).await {
            Ok(urls) => urls,
            Err(e) => {
                self.state = ScanState::Failed;
                return Err(e);
            }
        };
        info!("Discovered {} URLs", self.discovered_urls.len());

        self.state = ScanState::Scanning;

        let extractor = Arc::clone(&self.extractor);
        let sqli_scanner = Arc::clone(&self.sqli_scanner);
        let xss_scanner = Arc::clone(&self.xss_scanner);
        let param_scanner = Arc::clone(&self.param_scanner);
        let scan_type = self.config.scan_type;

        let mut tasks = stream::iter(self.discovered_urls.clone().into_iter().map(move |url| {
            let extractor = Arc::clone(&extractor);
            let sqli_scanner = Arc::clone(&sqli_scanner);
            let xss_scanner = Arc::clone(&xss_scanner);
            let param_scanner = Arc::clone(&param_scanner);

            async move {
                scan_single_url(
                    &url,
                    &extractor,
                    &sqli_scanner,
                    &xss_scanner,
                    &param_scanner,
                    scan_type,
                )
                .await
            }
        }))
        .buffer_unordered(self.config.thread_count);

        while let Some(task_findings) = tasks.next().await {
            self.findings.extend(task_findings);
        }

        self.state = ScanState::Done;
        info!("Scan complete. Found {} vulnerabilities", self.findings.len());
        Ok(&self.findings)
    }

    /// Low-latency scan of only the given URL, bypassing the crawl and the
    /// worker-pool fan-out.
    pub async fn scan_fast(&mut self, target_url: &str) -> Result<&[Finding], ScannerError> {
        info!("Starting fast scan on {}", target_url);
        self.findings.clear();
        self.discovered_urls = vec![target_url.to_string()];

        self.state = ScanState::Scanning;
        let findings = scan_single_url(
            target_url,
            &self.extractor,
            &self.sqli_scanner,
            &self.xss_scanner,
            &self.param_scanner,
            self.config.scan_type,
        )
        .await;
        self.findings.extend(findings);

        self.state = ScanState::Done;
        info!(
            "Fast scan complete. Found {} vulnerabilities",
            self.findings.len()
        );
        Ok(&self.findings)
    }

    /// Findings as serialized records for the reporting collaborator.
    pub fn results(&self) -> Vec<serde_json::Value> {
        self.findings
            .iter()
            .filter_map(|f| serde_json::to_value(f).ok())
            .collect()
    }

    /// Findings as flat (type, endpoint, payload) triples for persistence.
    pub fn result_tuples(&self) -> Vec<(String, String, String)> {
        self.findings.iter().map(Finding::to_tuple).collect()
    }

    /// Summary statistics, recomputed from the current findings.
    pub fn summary(&self) -> ScanSummary {
        let mut findings_by_type: HashMap<String, usize> = HashMap::new();
        for finding in &self.findings {
            *findings_by_type
                .entry(finding.vulnerability_type.as_str().to_string())
                .or_insert(0) += 1;
        }

        ScanSummary {
            total_findings: self.findings.len(),
            total_urls_discovered: self.discovered_urls.len(),
            findings_by_type,
            scan_timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Scan one URL: forms first, then its own query string. Failures inside a
/// task degrade to empty contributions and never cancel sibling tasks.
async fn scan_single_url(
    url: &str,
    extractor: &FormExtractor,
    sqli_scanner: &SqliScanner,
    xss_scanner: &XssScanner,
    param_scanner: &ParamScanner,
    scan_type: ScanType,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    debug!("Scanning URL: {}", url);

    let forms = extractor.extract_forms(url).await;
    debug!("Found {} forms on {}", forms.len(), url);

    for form in &forms {
        // Forms without attacker-controllable fields cannot be vulnerable
        if !form.has_testable_inputs() {
            continue;
        }

        if scan_type.includes_sqli() {
            findings.extend(sqli_scanner.scan_form(url, form).await);
        }

        if scan_type.includes_xss() {
            findings.extend(xss_scanner.scan_form(url, form).await);
        }
    }

    findings.extend(param_scanner.scan_url_parameters(url).await);

    if !findings.is_empty() {
        info!("Found {} vulnerabilities on {}", findings.len(), url);
    }

    findings
}
