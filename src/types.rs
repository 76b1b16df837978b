// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::ScannerError;

/// Scan type filters which detector families run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Sqli,
    Xss,
    All,
}

impl Default for ScanType {
    fn default() -> Self {
        ScanType::All
    }
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Sqli => "sqli",
            ScanType::Xss => "xss",
            ScanType::All => "all",
        }
    }

    pub fn includes_sqli(&self) -> bool {
        matches!(self, ScanType::Sqli | ScanType::All)
    }

    pub fn includes_xss(&self) -> bool {
        matches!(self, ScanType::Xss | ScanType::All)
    }
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static configuration for one scan invocation
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Crawl recursion bound, inclusive
    pub max_depth: usize,

    /// Timeout applied to every network call
    pub request_timeout: Duration,

    /// Worker pool size for per-URL scanning
    pub thread_count: usize,

    /// Minimum spacing between consecutive injections
    pub rate_limit_delay: Duration,

    /// Which detector families run
    pub scan_type: ScanType,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            request_timeout: Duration::from_secs(5),
            thread_count: 5,
            rate_limit_delay: Duration::from_millis(400),
            scan_type: ScanType::All,
        }
    }
}

impl ScanConfig {
    /// Reject invalid settings before any network activity starts.
    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.request_timeout.is_zero() {
            return Err(ScannerError::Configuration(
                "request_timeout must be positive".to_string(),
            ));
        }
        if self.thread_count == 0 {
            return Err(ScannerError::Configuration(
                "thread_count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Supported vulnerability classes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VulnerabilityType {
    #[serde(rename = "SQL Injection")]
    SqlInjection,
    #[serde(rename = "Blind SQL Injection")]
    BlindSqlInjection,
    #[serde(rename = "Reflected XSS")]
    ReflectedXss,
    #[serde(rename = "Stored XSS")]
    StoredXss,
}

impl VulnerabilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnerabilityType::SqlInjection => "SQL Injection",
            VulnerabilityType::BlindSqlInjection => "Blind SQL Injection",
            VulnerabilityType::ReflectedXss => "Reflected XSS",
            VulnerabilityType::StoredXss => "Stored XSS",
        }
    }

    /// Severity derives solely from the vulnerability type, never from
    /// response content.
    pub fn severity(&self) -> Severity {
        match self {
            VulnerabilityType::SqlInjection => Severity::Critical,
            VulnerabilityType::ReflectedXss => Severity::High,
            _ => Severity::Medium,
        }
    }
}

impl std::fmt::Display for VulnerabilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low => write!(f, "LOW"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// One heuristically flagged vulnerability instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[serde(rename = "type")]
    pub vulnerability_type: VulnerabilityType,
    pub endpoint: String,
    pub payload: String,
    pub timestamp: String,
    pub severity: Severity,
}

impl Finding {
    pub fn new(
        vulnerability_type: VulnerabilityType,
        endpoint: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            vulnerability_type,
            endpoint: endpoint.into(),
            payload: payload.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            severity: vulnerability_type.severity(),
        }
    }

    /// Flat (type, endpoint, payload) triple for the storage collaborator.
    pub fn to_tuple(&self) -> (String, String, String) {
        (
            self.vulnerability_type.as_str().to_string(),
            self.endpoint.clone(),
            self.payload.clone(),
        )
    }
}

/// Summary statistics for one scan, recomputed on demand
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total_findings: usize,
    pub total_urls_discovered: usize,
    pub findings_by_type: HashMap<String, usize>,
    pub scan_timestamp: String,
}

/// Lifecycle of one scan invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Crawling,
    Scanning,
    Done,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_derived_from_type() {
        assert_eq!(
            VulnerabilityType::SqlInjection.severity(),
            Severity::Critical
        );
        assert_eq!(VulnerabilityType::ReflectedXss.severity(), Severity::High);
        assert_eq!(
            VulnerabilityType::BlindSqlInjection.severity(),
            Severity::Medium
        );
        assert_eq!(VulnerabilityType::StoredXss.severity(), Severity::Medium);
    }

    #[test]
    fn test_scan_type_filters() {
        assert!(ScanType::All.includes_sqli());
        assert!(ScanType::All.includes_xss());
        assert!(ScanType::Sqli.includes_sqli());
        assert!(!ScanType::Sqli.includes_xss());
        assert!(ScanType::Xss.includes_xss());
        assert!(!ScanType::Xss.includes_sqli());
    }

    #[test]
    fn test_config_validation() {
        assert!(ScanConfig::default().validate().is_ok());

        let bad_timeout = ScanConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(bad_timeout.validate().is_err());

        let bad_threads = ScanConfig {
            thread_count: 0,
            ..Default::default()
        };
        assert!(bad_threads.validate().is_err());

        // Zero rate limit delay is valid and simply disables throttling
        let no_delay = ScanConfig {
            rate_limit_delay: Duration::ZERO,
            ..Default::default()
        };
        assert!(no_delay.validate().is_ok());
    }

    #[test]
    fn test_finding_serialization_shape() {
        let finding = Finding::new(VulnerabilityType::SqlInjection, "/search", "' OR '1'='1");
        let json = serde_json::to_value(&finding).unwrap();

        assert_eq!(json["type"], "SQL Injection");
        assert_eq!(json["endpoint"], "/search");
        assert_eq!(json["payload"], "' OR '1'='1");
        assert_eq!(json["severity"], "CRITICAL");
        assert!(json["timestamp"].as_str().is_some());
    }
}
