//! Typed access to inbound HTTP headers
//!
//! The transport layer hands over raw header data: case-insensitive names, each
//! carrying an ordered sequence of string values, any of which may be absent. This
//! module normalizes that data once per request into a [`HeaderStore`] and exposes
//! it through named, typed accessors so handler code reads request metadata instead
//! of re-parsing strings.
//!
//! ## Contract
//!
//! The accessors follow one policy, applied uniformly:
//!
//! - **Absence is a default.** A missing header yields a type-appropriate value:
//!   empty slice for preference lists, empty string for single-value headers, `0`
//!   for numeric headers, the minimum UTC instant for date headers, an empty
//!   iterator for cookies. Callers never null-check.
//! - **Malformed presence is an error.** A `Content-Length` of `"abc"` or a date
//!   outside the RFC 1123 shape is a client protocol violation and surfaces as a
//!   [`HeaderError`] the caller must handle.
//!
//! ## Example
//!
//! ```
//! use bindery::headers::HeaderStore;
//!
//! let headers = HeaderStore::from_pairs([
//!     ("Accept", "application/json"),
//!     ("Accept", "text/html;q=0.9"),
//!     ("User-Agent", "demo/1.0"),
//!     ("Cookie", "session=abc123; theme=dark"),
//! ]);
//!
//! assert_eq!(headers.accept(), ["application/json", "text/html;q=0.9"]);
//! assert_eq!(headers.user_agent(), "demo/1.0");
//! assert_eq!(headers.host(), "");
//! assert_eq!(headers.cookies().count(), 2);
//! ```

mod cookie;
mod date;
mod error;
mod store;

pub use cookie::{parse_cookies, Cookie};
pub use date::HTTP_DATE_FORMAT;
pub use error::HeaderError;
pub use store::{HeaderStore, RawHeaders, ValueVec};
