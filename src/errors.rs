// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - Error Types
 * Scanner error handling with thiserror
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

use thiserror::Error;

/// Errors that surface at the scanner API boundary.
///
/// Only configuration problems and a failed crawl start reach the caller.
/// Transient network failures and parse failures degrade locally to empty
/// results or skipped branches and are never represented here.
#[derive(Error, Debug)]
pub enum ScannerError {
    /// Invalid settings, rejected before any network activity begins
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Target or start URL that does not parse with scheme and host
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Crawl-level failure; per-page fetch errors do not produce this
    #[error("Crawl failed: {0}")]
    Crawl(String),
}
