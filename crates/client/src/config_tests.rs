// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    plain = { "http://localhost:7891", "boards/brd-1" },
    trailing_slash = { "http://localhost:7891/", "boards/brd-1" },
    leading_slash = { "http://localhost:7891", "/boards/brd-1" },
    both = { "http://localhost:7891/", "/boards/brd-1" },
)]
fn url_joins_with_one_slash(base: &str, path: &str) {
    let config = ClientConfig::new(base, "alice");
    assert_eq!(config.url(path), "http://localhost:7891/boards/brd-1");
}

#[test]
fn defaults() {
    let config = ClientConfig::new("http://localhost:7891", "alice");
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert_eq!(config.email, None);

    let config = config
        .with_email("alice@example.com")
        .with_timeout(Duration::from_secs(2));
    assert_eq!(config.email.as_deref(), Some("alice@example.com"));
    assert_eq!(config.timeout, Duration::from_secs(2));
}
