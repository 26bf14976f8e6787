//! Content Negotiation Tests
//!
//! Tests verify:
//! - Quality weights decide the winner
//! - Ties go to the earlier supported type
//! - Wildcards and specificity
//! - NotAcceptable when nothing overlaps
//! - Malformed input is tolerated

use pastebin::negotiate::{negotiate, parse_accept};
use pastebin::PasteError;

const SUPPORTED: [&str; 2] = ["text/html", "text/plain"];

// =============================================================================
// Basic Selection Tests
// =============================================================================

#[test]
fn test_prefers_higher_quality() {
    assert_eq!(
        negotiate("text/html, text/plain;q=0.9", &SUPPORTED).unwrap(),
        "text/html"
    );
    assert_eq!(
        negotiate("text/html;q=0.5, text/plain", &SUPPORTED).unwrap(),
        "text/plain"
    );
}

#[test]
fn test_no_overlap_is_not_acceptable() {
    assert!(matches!(
        negotiate("application/json", &SUPPORTED),
        Err(PasteError::NotAcceptable)
    ));
}

#[test]
fn test_result_is_deterministic() {
    for _ in 0..1000 {
        assert_eq!(
            negotiate("text/html, text/plain;q=0.9", &SUPPORTED).unwrap(),
            "text/html"
        );
        assert!(negotiate("application/json", &SUPPORTED).is_err());
    }
}

#[test]
fn test_single_exact_match() {
    assert_eq!(negotiate("text/plain", &SUPPORTED).unwrap(), "text/plain");
}

// =============================================================================
// Tie Breaking Tests
// =============================================================================

#[test]
fn test_equal_weights_prefer_supported_order() {
    assert_eq!(
        negotiate("text/plain, text/html", &SUPPORTED).unwrap(),
        "text/html"
    );
    assert_eq!(
        negotiate("text/html, text/plain", &["text/plain", "text/html"]).unwrap(),
        "text/plain"
    );
}

#[test]
fn test_explicit_equal_weights() {
    assert_eq!(
        negotiate("text/plain;q=0.5, text/html;q=0.5", &SUPPORTED).unwrap(),
        "text/html"
    );
}

// =============================================================================
// Wildcard Tests
// =============================================================================

#[test]
fn test_empty_header_accepts_first_supported() {
    assert_eq!(negotiate("", &SUPPORTED).unwrap(), "text/html");
    assert_eq!(negotiate("   ", &SUPPORTED).unwrap(), "text/html");
}

#[test]
fn test_any_wildcard() {
    assert_eq!(negotiate("*/*", &SUPPORTED).unwrap(), "text/html");
}

#[test]
fn test_subtype_wildcard() {
    assert_eq!(negotiate("text/*", &SUPPORTED).unwrap(), "text/html");
    assert!(negotiate("image/*", &SUPPORTED).is_err());
}

#[test]
fn test_specific_range_overrides_wildcard() {
    // text/html is explicitly refused even though text/* allows it
    assert_eq!(
        negotiate("text/*, text/html;q=0", &SUPPORTED).unwrap(),
        "text/plain"
    );
    assert_eq!(
        negotiate("*/*;q=0.1, text/plain", &SUPPORTED).unwrap(),
        "text/plain"
    );
}

#[test]
fn test_browser_style_header() {
    let accept = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
    assert_eq!(negotiate(accept, &SUPPORTED).unwrap(), "text/html");
}

#[test]
fn test_curl_style_header() {
    assert_eq!(negotiate("*/*", &["text/plain"]).unwrap(), "text/plain");
}

// =============================================================================
// Refusal Tests
// =============================================================================

#[test]
fn test_zero_weight_excludes() {
    assert!(matches!(
        negotiate("text/html;q=0, text/plain;q=0", &SUPPORTED),
        Err(PasteError::NotAcceptable)
    ));
}

#[test]
fn test_empty_supported_list() {
    let supported: [&str; 0] = [];
    assert!(negotiate("*/*", &supported).is_err());
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_case_insensitive_matching() {
    assert_eq!(negotiate("TEXT/Plain", &SUPPORTED).unwrap(), "text/plain");
    assert_eq!(negotiate("text/html;Q=0.1, text/plain", &SUPPORTED).unwrap(), "text/plain");
}

#[test]
fn test_extra_parameters_ignored() {
    assert_eq!(
        negotiate("text/plain; charset=utf-8", &SUPPORTED).unwrap(),
        "text/plain"
    );
}

#[test]
fn test_malformed_ranges_skipped() {
    assert_eq!(
        negotiate("garbage, text/html;q=2, text/plain;q=0.4", &SUPPORTED).unwrap(),
        "text/plain"
    );
    assert_eq!(parse_accept("garbage,,;q=1").len(), 0);
}

#[test]
fn test_parse_accept_weights() {
    let ranges = parse_accept("text/html, text/plain;q=0.9, */*;q=0");
    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[0].weight, 1000);
    assert_eq!(ranges[1].weight, 900);
    assert_eq!(ranges[2].weight, 0);
}
