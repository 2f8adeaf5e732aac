//! Tests for the typed header accessor layer
//!
//! # Test Coverage
//!
//! - Default-value policy: every accessor kind yields its typed default on absence
//! - Case-insensitive lookup and raw multi-value access
//! - Absence-vs-malformed distinction for numeric and date accessors
//! - Cookie decoding through the store

mod tracing_util;

use bindery::headers::{Cookie, HeaderError, HeaderStore};
use chrono::{DateTime, TimeZone, Utc};
use tracing_util::TestTracing;

fn empty_store() -> HeaderStore {
    HeaderStore::from_pairs(std::iter::empty::<(&str, &str)>())
}

#[test]
fn absent_headers_yield_typed_defaults() {
    let headers = empty_store();

    // preference lists: empty sequences
    assert!(headers.accept().is_empty());
    assert!(headers.accept_charset().is_empty());
    assert!(headers.accept_encoding().is_empty());
    assert!(headers.accept_language().is_empty());
    assert!(headers.cache_control().is_empty());
    assert!(headers.if_match().is_empty());
    assert!(headers.if_none_match().is_empty());

    // single-value strings: empty string
    assert_eq!(headers.authorization(), "");
    assert_eq!(headers.connection(), "");
    assert_eq!(headers.content_type(), "");
    assert_eq!(headers.host(), "");
    assert_eq!(headers.if_range(), "");
    assert_eq!(headers.referrer(), "");
    assert_eq!(headers.user_agent(), "");

    // numeric: zero
    assert_eq!(headers.content_length().unwrap(), 0);
    assert_eq!(headers.max_forwards().unwrap(), 0);

    // dates: minimum representable instant
    assert_eq!(headers.date().unwrap(), DateTime::<Utc>::MIN_UTC);
    assert_eq!(headers.if_modified_since().unwrap(), DateTime::<Utc>::MIN_UTC);
    assert_eq!(
        headers.if_unmodified_since().unwrap(),
        DateTime::<Utc>::MIN_UTC
    );

    // cookies: empty sequence
    assert_eq!(headers.cookies().count(), 0);
}

#[test]
fn lookup_ignores_name_case() {
    let headers = HeaderStore::from_pairs([("Content-Type", "application/json")]);
    assert_eq!(headers.get("content-type"), ["application/json"]);
    assert_eq!(headers.get("Content-Type"), ["application/json"]);
    assert_eq!(headers.get("CONTENT-TYPE"), ["application/json"]);
    assert_eq!(headers.content_type(), "application/json");
}

#[test]
fn preference_lists_preserve_order() {
    let headers = HeaderStore::from_pairs([
        ("Accept", "application/json"),
        ("Accept", "text/html;q=0.9"),
        ("Accept", "*/*;q=0.1"),
    ]);
    assert_eq!(
        headers.accept(),
        ["application/json", "text/html;q=0.9", "*/*;q=0.1"]
    );
}

#[test]
fn single_value_accessors_take_first_value() {
    let headers = HeaderStore::from_pairs([
        ("User-Agent", "primary/1.0"),
        ("User-Agent", "secondary/2.0"),
    ]);
    assert_eq!(headers.user_agent(), "primary/1.0");
}

#[test]
fn referrer_reads_the_wire_spelling() {
    let headers = HeaderStore::from_pairs([("Referer", "https://example.test/prev")]);
    assert_eq!(headers.referrer(), "https://example.test/prev");
}

#[test]
fn content_length_parses_and_rejects() {
    let _trace = TestTracing::init();

    let headers = HeaderStore::from_pairs([("Content-Length", "1024")]);
    assert_eq!(headers.content_length().unwrap(), 1024);

    let headers = HeaderStore::from_pairs([("Content-Length", "abc")]);
    assert_eq!(
        headers.content_length().unwrap_err(),
        HeaderError::InvalidNumber {
            name: "content-length",
            value: "abc".to_string(),
        }
    );
}

#[test]
fn negative_content_length_is_malformed() {
    let headers = HeaderStore::from_pairs([("Content-Length", "-5")]);
    assert!(matches!(
        headers.content_length(),
        Err(HeaderError::InvalidNumber { .. })
    ));
}

#[test]
fn max_forwards_shares_the_numeric_contract() {
    let headers = HeaderStore::from_pairs([("Max-Forwards", "10")]);
    assert_eq!(headers.max_forwards().unwrap(), 10);

    let headers = HeaderStore::from_pairs([("Max-Forwards", "ten")]);
    assert!(matches!(
        headers.max_forwards(),
        Err(HeaderError::InvalidNumber {
            name: "max-forwards",
            ..
        })
    ));
}

#[test]
fn date_parses_rfc_1123_and_rejects_malformed() {
    let headers = HeaderStore::from_pairs([("Date", "Sun, 06 Nov 1994 08:49:37 GMT")]);
    let expected = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
    assert_eq!(headers.date().unwrap(), expected);

    let headers = HeaderStore::from_pairs([("Date", "not-a-date")]);
    assert_eq!(
        headers.date().unwrap_err(),
        HeaderError::InvalidDate {
            name: "date",
            value: "not-a-date".to_string(),
        }
    );
}

#[test]
fn conditional_date_accessors_parse_their_own_headers() {
    let headers = HeaderStore::from_pairs([
        ("If-Modified-Since", "Sun, 06 Nov 1994 08:49:37 GMT"),
        ("If-Unmodified-Since", "Mon, 07 Nov 1994 10:00:00 GMT"),
    ]);
    assert_eq!(
        headers.if_modified_since().unwrap(),
        Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap()
    );
    assert_eq!(
        headers.if_unmodified_since().unwrap(),
        Utc.with_ymd_and_hms(1994, 11, 7, 10, 0, 0).unwrap()
    );
}

#[test]
fn cookies_decode_from_the_cookie_header() {
    let headers = HeaderStore::from_pairs([("Cookie", "session=abc123")]);
    let cookies: Vec<Cookie> = headers.cookies().collect();
    assert_eq!(cookies, vec![Cookie::new("session", "abc123")]);
}

#[test]
fn cookies_span_repeated_headers_and_skip_malformed_segments() {
    let headers = HeaderStore::from_pairs([
        ("Cookie", "a=1; broken; b=2"),
        ("Cookie", "c=3"),
    ]);
    let names: Vec<String> = headers.cookies().map(|cookie| cookie.name).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn indexer_matches_get_contract() {
    let headers = HeaderStore::from_pairs([("Host", "example.test")]);
    assert_eq!(&headers["Host"], headers.get("host"));
    assert!(headers["x-absent"].is_empty());
}

#[test]
fn error_messages_name_header_and_value() {
    let headers = HeaderStore::from_pairs([("Content-Length", "12kb")]);
    let message = headers.content_length().unwrap_err().to_string();
    assert!(message.contains("content-length"));
    assert!(message.contains("12kb"));
}
