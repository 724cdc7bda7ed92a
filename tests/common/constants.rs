//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (user credentials, shared secrets, etc.),
//! update only this file.

// ============================================================================
// Test User Credentials
// ============================================================================

/// Regular test user email
pub const TEST_USER_EMAIL: &str = "fan@recursive.example";

/// Regular test user password
pub const TEST_USER_PASS: &str = "testpass123";

/// Admin test user email
pub const ADMIN_EMAIL: &str = "boss@recursive.example";

/// Admin test user password
pub const ADMIN_PASS: &str = "adminpass123";

// ============================================================================
// Server Settings
// ============================================================================

/// Shared secret used to sign tokens in tests
pub const TEST_JWT_SECRET: &str = "e2e-test-secret";

/// Maximum time to wait for the test server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Poll interval while waiting for server readiness
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Timeout for individual test requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
