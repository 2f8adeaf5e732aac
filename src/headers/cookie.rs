use tracing::debug;

/// A single name/value pair decoded from the `Cookie` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decode raw `Cookie` header values into discrete name/value pairs.
///
/// Each raw value is split on `;`; each segment is split on its first `=`, so values
/// containing `=` (base64, signed payloads) survive intact. Names and values are
/// trimmed of surrounding whitespace. A segment with no `=` or an empty name cannot
/// name a cookie and is skipped; its neighbours still decode. Output order follows
/// input order, duplicates included.
pub fn parse_cookies(raw_values: &[String]) -> impl Iterator<Item = Cookie> + '_ {
    raw_values
        .iter()
        .flat_map(|raw| raw.split(';'))
        .filter_map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                return None;
            }
            match segment.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() => {
                    Some(Cookie::new(name.trim(), value.trim()))
                }
                Some(_) => {
                    debug!(segment, "Cookie segment has an empty name, skipping");
                    None
                }
                None => {
                    debug!(segment, "Cookie segment has no '=', skipping");
                    None
                }
            }
        })
}
