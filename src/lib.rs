// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - Scanner Library
 * Exposes scanner modules for embedding and testing
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

pub mod crawler;
pub mod detectors;
pub mod errors;
pub mod extractor;
pub mod http_client;
pub mod injector;
pub mod payloads;
pub mod scanner;
pub mod types;

pub use errors::ScannerError;
pub use scanner::VulnerabilityScanner;
pub use types::{
    Finding, ScanConfig, ScanState, ScanSummary, ScanType, Severity, VulnerabilityType,
};
