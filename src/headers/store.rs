use std::collections::HashMap;
use std::ops::Index;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use smallvec::SmallVec;

use super::cookie::{parse_cookies, Cookie};
use super::date::{parse_http_date, MIN_DATE};
use super::error::HeaderError;

/// Per-header value storage. Most headers carry exactly one value; two slots cover
/// the common repeated headers (`Accept`, `Cookie`) without heap allocation.
pub type ValueVec = SmallVec<[String; 2]>;

/// Raw header data as handed over by the transport layer: ASCII-lowercased names
/// mapped to their values in arrival order.
pub type RawHeaders = HashMap<String, ValueVec>;

/// Slice returned for headers that are not present.
static NO_VALUES: &[String] = &[];

/// Per-request typed view over raw HTTP headers.
///
/// Raw header data is fundamentally multi-valued, case-insensitive, and optional.
/// `HeaderStore` collapses that variability once, at the edge, so handler code never
/// re-implements "is this header present, and in what format":
///
/// - lookup is case-insensitive (names are normalized to ASCII lowercase),
/// - every accessor returns a deterministic typed default when its header is absent
///   (empty slice, empty string, zero, [`chrono::DateTime::MIN_UTC`]),
/// - a header that is present but malformed for its declared type is a
///   [`HeaderError`], never a silent default.
///
/// The store owns its data. It is built once per inbound request from the raw
/// transport headers and is read-only afterwards, so it can be shared freely within
/// the request without locking.
///
/// ```
/// use bindery::headers::HeaderStore;
///
/// let headers = HeaderStore::from_pairs([
///     ("Content-Type", "application/json"),
///     ("Content-Length", "42"),
/// ]);
/// assert_eq!(headers.content_type(), "application/json");
/// assert_eq!(headers.content_length()?, 42);
/// assert!(headers.accept().is_empty());
/// # Ok::<(), bindery::headers::HeaderError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderStore {
    raw: RawHeaders,
}

impl HeaderStore {
    /// Build a store from name → values entries, copying them into an owned,
    /// name-normalized map. Entries whose value sequence is empty are dropped;
    /// entries that collide after case folding are merged in iteration order.
    #[must_use]
    pub fn new<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: IntoIterator<Item = String>,
    {
        let mut raw = RawHeaders::new();
        for (name, values) in headers {
            let mut values = values.into_iter().peekable();
            if values.peek().is_none() {
                continue;
            }
            raw.entry(name.as_ref().to_ascii_lowercase())
                .or_default()
                .extend(values);
        }
        Self { raw }
    }

    /// Build a store from flat `(name, value)` pairs, one pair per value. Repeated
    /// names accumulate in pair order.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = RawHeaders::new();
        for (name, value) in pairs {
            raw.entry(name.as_ref().to_ascii_lowercase())
                .or_default()
                .push(value.into());
        }
        Self { raw }
    }

    /// Raw values for `name`, case-insensitive, in arrival order. Empty slice when
    /// the header is absent; never an error.
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        let values = if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.raw.get(&name.to_ascii_lowercase())
        } else {
            self.raw.get(name)
        };
        values.map_or(NO_VALUES, SmallVec::as_slice)
    }

    /// Whether at least one value is present for `name` (case-insensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }

    /// All header names in the store, lowercased. Iteration order is unspecified.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.raw.keys().map(String::as_str)
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    // ---- content negotiation / conditional request preference lists ----
    //
    // Order is preserved verbatim: several of these are quality-ranked by
    // convention, and interpreting `q=` weights is the caller's concern.

    /// `Accept` values in arrival order.
    #[must_use]
    pub fn accept(&self) -> &[String] {
        self.get("accept")
    }

    /// `Accept-Charset` values in arrival order.
    #[must_use]
    pub fn accept_charset(&self) -> &[String] {
        self.get("accept-charset")
    }

    /// `Accept-Encoding` values in arrival order.
    #[must_use]
    pub fn accept_encoding(&self) -> &[String] {
        self.get("accept-encoding")
    }

    /// `Accept-Language` values in arrival order.
    #[must_use]
    pub fn accept_language(&self) -> &[String] {
        self.get("accept-language")
    }

    /// `Cache-Control` directives in arrival order.
    #[must_use]
    pub fn cache_control(&self) -> &[String] {
        self.get("cache-control")
    }

    /// `If-Match` entity tags in arrival order.
    #[must_use]
    pub fn if_match(&self) -> &[String] {
        self.get("if-match")
    }

    /// `If-None-Match` entity tags in arrival order.
    #[must_use]
    pub fn if_none_match(&self) -> &[String] {
        self.get("if-none-match")
    }

    // ---- single-value string accessors: first value, or "" when absent ----

    /// First `Authorization` value.
    #[must_use]
    pub fn authorization(&self) -> &str {
        self.first("authorization")
    }

    /// First `Connection` value.
    #[must_use]
    pub fn connection(&self) -> &str {
        self.first("connection")
    }

    /// First `Content-Type` value.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.first("content-type")
    }

    /// First `Host` value.
    #[must_use]
    pub fn host(&self) -> &str {
        self.first("host")
    }

    /// First `If-Range` value.
    #[must_use]
    pub fn if_range(&self) -> &str {
        self.first("if-range")
    }

    /// First `Referer` value. The wire header keeps the protocol's historical
    /// spelling; the accessor does not.
    #[must_use]
    pub fn referrer(&self) -> &str {
        self.first("referer")
    }

    /// First `User-Agent` value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.first("user-agent")
    }

    // ---- typed accessors: absent is a default, malformed is an error ----

    /// `Content-Length` as a base-10 integer. `0` when absent; a present but
    /// non-numeric value is a protocol violation and surfaces as
    /// [`HeaderError::InvalidNumber`].
    pub fn content_length(&self) -> Result<u64, HeaderError> {
        self.number("content-length")
    }

    /// `Max-Forwards` as a base-10 integer, same contract as
    /// [`content_length`](Self::content_length).
    pub fn max_forwards(&self) -> Result<u32, HeaderError> {
        self.number("max-forwards")
    }

    /// `Date` as an RFC 1123 instant. [`chrono::DateTime::MIN_UTC`] when absent.
    pub fn date(&self) -> Result<DateTime<Utc>, HeaderError> {
        self.http_date("date")
    }

    /// `If-Modified-Since` as an RFC 1123 instant. [`chrono::DateTime::MIN_UTC`]
    /// when absent.
    pub fn if_modified_since(&self) -> Result<DateTime<Utc>, HeaderError> {
        self.http_date("if-modified-since")
    }

    /// `If-Unmodified-Since` as an RFC 1123 instant. [`chrono::DateTime::MIN_UTC`]
    /// when absent.
    pub fn if_unmodified_since(&self) -> Result<DateTime<Utc>, HeaderError> {
        self.http_date("if-unmodified-since")
    }

    /// Cookies decoded lazily from the `Cookie` header, in arrival order. Empty when
    /// the header is absent; malformed segments are skipped, not errors (see
    /// [`parse_cookies`]).
    pub fn cookies(&self) -> impl Iterator<Item = Cookie> + '_ {
        parse_cookies(self.get("cookie"))
    }

    fn first(&self, name: &str) -> &str {
        self.get(name).first().map_or("", String::as_str)
    }

    fn number<T>(&self, name: &'static str) -> Result<T, HeaderError>
    where
        T: FromStr + Default,
    {
        match self.get(name).first() {
            None => Ok(T::default()),
            Some(value) => value.parse().map_err(|_| HeaderError::InvalidNumber {
                name,
                value: value.clone(),
            }),
        }
    }

    fn http_date(&self, name: &'static str) -> Result<DateTime<Utc>, HeaderError> {
        match self.get(name).first() {
            None => Ok(MIN_DATE),
            Some(value) => parse_http_date(value).ok_or_else(|| HeaderError::InvalidDate {
                name,
                value: value.clone(),
            }),
        }
    }
}

/// Same contract as [`HeaderStore::get`]: raw values, empty slice on absence.
impl Index<&str> for HeaderStore {
    type Output = [String];

    fn index(&self, name: &str) -> &Self::Output {
        self.get(name)
    }
}
