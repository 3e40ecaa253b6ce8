//! Cookie store parsing and the CSRF token.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Cookie holding the backend's anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the backend expects the token in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Name/value cookies in `document.cookie` format (`a=1; b=2`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    entries: Vec<(String, String)>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie` header or `document.cookie` string.
    pub fn parse(header: &str) -> Self {
        let mut jar = Self::new();
        for pair in header.split(';') {
            if let Some((name, value)) = pair.split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    jar.set(name, value.trim());
                }
            }
        }
        jar
    }

    /// Value of a cookie. Empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove a cookie, returning whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != name);
        self.entries.len() != before
    }

    /// Apply one `Set-Cookie` response header.
    ///
    /// Deletions (an empty value, `Max-Age<=0` or a past `Expires`) remove
    /// the cookie. `Max-Age` wins over `Expires` when both are present.
    pub fn absorb_set_cookie(&mut self, set_cookie: &str) {
        self.absorb_set_cookie_at(set_cookie, Utc::now());
    }

    /// Same as [`absorb_set_cookie`](Self::absorb_set_cookie) with an explicit clock.
    pub fn absorb_set_cookie_at(&mut self, set_cookie: &str, now: DateTime<Utc>) {
        let mut parts = set_cookie.split(';');
        let Some((name, value)) = parts.next().and_then(|p| p.split_once('=')) else {
            return;
        };
        let name = name.trim();
        let value = value.trim().trim_matches('"');
        if name.is_empty() {
            return;
        }

        let mut max_age = None;
        let mut expires = None;
        for (key, attr) in parts.filter_map(|attr| attr.split_once('=')) {
            let key = key.trim();
            if key.eq_ignore_ascii_case("max-age") {
                max_age = attr.trim().parse::<i64>().ok();
            } else if key.eq_ignore_ascii_case("expires") {
                expires = parse_expires(attr.trim());
            }
        }

        let expired = match (max_age, expires) {
            (Some(age), _) => age <= 0,
            (None, Some(at)) => at <= now,
            (None, None) => false,
        };

        if expired || value.is_empty() {
            self.remove(name);
        } else {
            self.set(name, value);
        }
    }

    /// Render as a `Cookie` header value.
    pub fn header(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse an `Expires` date, accepting the legacy dashed form
/// (`Thu, 01-Jan-1970 00:00:00 GMT`) some servers still send.
fn parse_expires(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc2822(value) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%a, %d-%b-%Y %H:%M:%S GMT")
        .ok()
        .map(|at| at.and_utc())
}
