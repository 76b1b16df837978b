// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - Vulnerability Detectors
 * Response analysis heuristics and the scanners that drive them
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

use crate::extractor::ExtractedForm;
use crate::http_client::HttpClient;
use crate::injector::PayloadInjector;
use crate::payloads::{
    BOOLEAN_FALSE_PAYLOAD, BOOLEAN_TRUE_PAYLOAD, PARAM_PAYLOADS, SQLI_PAYLOADS, SQL_ERRORS,
    XSS_PAYLOADS,
};
use crate::types::{Finding, ScanType, VulnerabilityType};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Response-length divergence ratio above which a true/false payload pair is
/// judged to materially affect output
pub const DEFAULT_BOOLEAN_THRESHOLD: f64 = 0.1;

/// Pure response-analysis heuristics. Each function is independent and has
/// no partial credit: a check either triggers or it does not.
pub struct VulnerabilityAnalyzer;

impl VulnerabilityAnalyzer {
    /// Error-based SQLi: case-insensitive database error fingerprint match.
    pub fn detect_sqli_error(response: &str) -> bool {
        let response_lower = response.to_lowercase();
        SQL_ERRORS
            .iter()
            .any(|error| response_lower.contains(&error.to_lowercase()))
    }

    /// Boolean-based blind SQLi: compare response lengths for a true/false
    /// payload pair. Empty responses carry no signal and yield false.
    pub fn detect_sqli_boolean(resp_true: &str, resp_false: &str, threshold: f64) -> bool {
        if resp_true.is_empty() || resp_false.is_empty() {
            return false;
        }

        let true_len = resp_true.len() as f64;
        let false_len = resp_false.len() as f64;

        let diff_ratio = (true_len - false_len).abs() / true_len.max(false_len);
        diff_ratio > threshold
    }

    /// Reflected XSS: the exact payload appears verbatim (unencoded) in the
    /// response body. Encoded transforms of the payload are deliberately not
    /// detected.
    pub fn detect_xss_reflected(response: &str, payload: &str) -> bool {
        if response.is_empty() || payload.is_empty() {
            return false;
        }
        response.contains(payload)
    }

    /// Run the single-response checks, filtered by scan type, and return the
    /// triggered vulnerability labels.
    pub fn analyze_response(
        response: &str,
        injected_payload: &str,
        scan_type: ScanType,
    ) -> Vec<String> {
        let mut detected = Vec::new();

        if scan_type.includes_sqli() && Self::detect_sqli_error(response) {
            detected.push("SQL Injection (Error-based)".to_string());
        }

        if scan_type.includes_xss() && Self::detect_xss_reflected(response, injected_payload) {
            detected.push("Reflected XSS".to_string());
        }

        detected
    }
}

/// Endpoint recorded for a form finding: the declared action, or the page
/// URL when the action is empty.
fn form_endpoint(url: &str, form: &ExtractedForm) -> String {
    if form.action.is_empty() {
        url.to_string()
    } else {
        form.action.clone()
    }
}

/// SQL injection scanner: error-based payload loop plus a dedicated
/// boolean-blind pair per form.
pub struct SqliScanner {
    injector: Arc<PayloadInjector>,
    boolean_threshold: f64,
}

impl SqliScanner {
    pub fn new(injector: Arc<PayloadInjector>) -> Self {
        Self {
            injector,
            boolean_threshold: DEFAULT_BOOLEAN_THRESHOLD,
        }
    }

    pub async fn scan_form(&self, url: &str, form: &ExtractedForm) -> Vec<Finding> {
        let mut findings = Vec::new();
        let endpoint = form_endpoint(url, form);

        // Error-based: the first payload that triggers a fingerprint is
        // reported as the exemplar; remaining payloads are skipped.
        for payload in SQLI_PAYLOADS {
            let response = self.injector.inject(url, form, payload, None).await;
            if VulnerabilityAnalyzer::detect_sqli_error(&response) {
                info!("SQL Injection (error-based) detected at {}", endpoint);
                findings.push(Finding::new(
                    VulnerabilityType::SqlInjection,
                    &endpoint,
                    *payload,
                ));
                break;
            }
        }

        // Boolean-based blind always fires its own pair, regardless of the
        // error-based outcome.
        let resp_true = self
            .injector
            .inject(url, form, BOOLEAN_TRUE_PAYLOAD, None)
            .await;
        let resp_false = self
            .injector
            .inject(url, form, BOOLEAN_FALSE_PAYLOAD, None)
            .await;

        if VulnerabilityAnalyzer::detect_sqli_boolean(
            &resp_true,
            &resp_false,
            self.boolean_threshold,
        ) {
            info!("Blind SQL Injection (boolean-based) detected at {}", endpoint);
            findings.push(Finding::new(
                VulnerabilityType::BlindSqlInjection,
                &endpoint,
                "Boolean Based",
            ));
        }

        findings
    }
}

/// Reflected XSS scanner with first-match short-circuit per form.
pub struct XssScanner {
    injector: Arc<PayloadInjector>,
}

impl XssScanner {
    pub fn new(injector: Arc<PayloadInjector>) -> Self {
        Self { injector }
    }

    pub async fn scan_form(&self, url: &str, form: &ExtractedForm) -> Vec<Finding> {
        let endpoint = form_endpoint(url, form);

        for payload in XSS_PAYLOADS {
            let response = self.injector.inject(url, form, payload, None).await;
            if VulnerabilityAnalyzer::detect_xss_reflected(&response, payload) {
                info!("Reflected XSS detected at {}", endpoint);
                return vec![Finding::new(
                    VulnerabilityType::ReflectedXss,
                    &endpoint,
                    *payload,
                )];
            }
        }

        Vec::new()
    }
}

/// Scanner for URL query-string parameters.
pub struct ParamScanner {
    http_client: Arc<HttpClient>,
}

impl ParamScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Substitute each probe payload into each query key, one key at a time,
    /// and flag by content match. A generic sql/mysql substring anywhere in
    /// the response is a weaker supplementary signal, independent of which
    /// payload was sent.
    pub async fn scan_url_parameters(&self, url: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        let parsed = match Url::parse(url) {
            Ok(u) => u,
            Err(_) => return findings,
        };

        let params: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if params.is_empty() {
            return findings;
        }

        for (key, _) in &params {
            for payload in PARAM_PAYLOADS {
                let mut probe = parsed.clone();
                {
                    let mut pairs = probe.query_pairs_mut();
                    pairs.clear();
                    for (k, v) in &params {
                        if k == key {
                            pairs.append_pair(k, payload);
                        } else {
                            pairs.append_pair(k, v);
                        }
                    }
                }

                let response = match self.http_client.get(probe.as_str()).await {
                    Ok(resp) => resp,
                    Err(e) => {
                        debug!("Error scanning parameter {}: {}", key, e);
                        continue;
                    }
                };

                if response.body.contains(payload) {
                    let vuln_type = if payload.contains("<script>") {
                        VulnerabilityType::ReflectedXss
                    } else {
                        VulnerabilityType::SqlInjection
                    };
                    findings.push(Finding::new(vuln_type, url, *payload));
                }

                let body_lower = response.body.to_lowercase();
                if body_lower.contains("sql") || body_lower.contains("mysql") {
                    findings.push(Finding::new(VulnerabilityType::SqlInjection, url, *payload));
                }
            }
        }

        findings
    }
}
