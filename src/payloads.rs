// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - Payload Catalogs
 * Immutable payload and fingerprint catalogs, loaded once per process
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

/// SQL injection probe payloads, tried in order with first-match short-circuit
pub const SQLI_PAYLOADS: &[&str] = &[
    "' OR '1'='1",
    "' OR 1=1--",
    "\" OR 1=1--",
    "' UNION SELECT NULL--",
];

/// Reflected XSS probe payloads, tried in order with first-match short-circuit
pub const XSS_PAYLOADS: &[&str] = &[
    "<script>alert(1)</script>",
    "'\"><script>alert(1)</script>",
    "<img src=x onerror=alert(1)>",
];

/// Database error fingerprints, matched case-insensitively against bodies
pub const SQL_ERRORS: &[&str] = &[
    "you have an error in your sql syntax",
    "warning: mysql",
    "unclosed quotation mark",
    "quoted string not properly terminated",
    "ORA-",
];

/// Structurally-true condition for boolean-based blind SQLi
pub const BOOLEAN_TRUE_PAYLOAD: &str = "' OR 1=1--";

/// Structurally-false counterpart to [`BOOLEAN_TRUE_PAYLOAD`]
pub const BOOLEAN_FALSE_PAYLOAD: &str = "' OR 1=2--";

/// Small probe set for URL query parameters: one SQLi, one XSS
pub const PARAM_PAYLOADS: &[&str] = &["' OR 1=1--", "<script>alert(1)</script>"];
