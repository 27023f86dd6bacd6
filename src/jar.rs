//! The cookie jar the API reads from and writes to.
//!
//! In a browser this is `document.cookie`: reading yields every visible cookie as
//! `name=value` pairs joined by `"; "`, and every write sets a single cookie from a
//! `name=value;attr=val;...` string. The host decides whether a write is accepted; nothing
//! is reported back to the writer.

use std::{
    fmt::Debug,
    sync::{Mutex, MutexGuard, PoisonError},
};

use cookie::Cookie;
use time::{Duration, OffsetDateTime};

pub trait CookieJar: Debug {
    /// Every visible cookie as `name=value` pairs separated by `;`.
    fn read(&self) -> String;

    /// Set one cookie from a cookie string.
    fn write(&self, cookie: &str);
}

/// An in-memory jar that applies the rules a browser applies to `document.cookie` writes.
///
/// - a write replaces the stored value of the same name, keeping its position;
/// - a `domain` that does not match the jar's host is rejected;
/// - `secure` is rejected unless the jar is a secure context;
/// - an `expires` in the past or a non-positive `max-age` removes the cookie.
///
/// Path scoping is not modelled: every stored cookie is visible.
#[derive(Debug)]
pub struct MemoryJar {
    host: String,
    secure_context: bool,
    entries: Mutex<Vec<(String, String)>>,
}

impl Default for MemoryJar {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryJar {
    /// A jar for `localhost` served over plain HTTP.
    pub fn new() -> Self {
        Self::for_host("localhost")
    }

    pub fn for_host<H: Into<String>>(host: H) -> Self {
        Self {
            host: host.into(),
            secure_context: false,
            entries: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_secure_context(mut self, secure_context: bool) -> Self {
        self.secure_context = secure_context;
        self
    }

    /// Write every `name=value` pair of a `;`-separated cookie string.
    #[must_use]
    pub fn with_cookies(self, cookies: &str) -> Self {
        for pair in cookies.split(';').filter(|pair| !pair.trim().is_empty()) {
            self.write(pair.trim());
        }
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_secure_context(&self) -> bool {
        self.secure_context
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    fn entries(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn domain_matches(&self, domain: &str) -> bool {
        let host = self.host.to_ascii_lowercase();
        let domain = domain.trim_start_matches('.').to_ascii_lowercase();
        host == domain
            || host
                .strip_suffix(domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    fn is_expired(cookie: &Cookie<'_>) -> bool {
        if let Some(max_age) = cookie.max_age() {
            return max_age <= Duration::ZERO;
        }
        cookie
            .expires_datetime()
            .is_some_and(|at| at <= OffsetDateTime::now_utc())
    }
}

impl CookieJar for MemoryJar {
    fn read(&self) -> String {
        self.entries()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, cookie: &str) {
        let cookie = match Cookie::parse(cookie) {
            Ok(cookie) => cookie,
            Err(err) => {
                tracing::warn!(err = %err, "ignoring unparseable cookie write");
                return;
            }
        };

        if let Some(domain) = cookie.domain()
            && !self.domain_matches(domain)
        {
            tracing::debug!(name = cookie.name(), domain, host = %self.host, "cookie rejected: domain mismatch");
            return;
        }

        if cookie.secure() == Some(true) && !self.secure_context {
            tracing::debug!(name = cookie.name(), "cookie rejected: secure cookie in insecure context");
            return;
        }

        let mut entries = self.entries();
        let position = entries.iter().position(|(name, _)| name == cookie.name());

        if Self::is_expired(&cookie) {
            if let Some(index) = position {
                entries.remove(index);
                tracing::debug!(name = cookie.name(), "cookie evicted");
            }
            return;
        }

        match position {
            Some(index) => entries[index].1 = cookie.value().to_owned(),
            None => entries.push((cookie.name().to_owned(), cookie.value().to_owned())),
        }
        tracing::debug!(name = cookie.name(), "cookie stored");
    }
}

/// The jar of the current browser document, backed by `document.cookie`.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct DocumentJar {
    document: web_sys::HtmlDocument,
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
impl DocumentJar {
    /// The jar of the window's document, or `None` outside an HTML document.
    pub fn new() -> Option<Self> {
        use wasm_bindgen::JsCast as _;

        let document = web_sys::window()?
            .document()?
            .dyn_into::<web_sys::HtmlDocument>()
            .ok()?;
        Some(Self { document })
    }
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
impl CookieJar for DocumentJar {
    fn read(&self) -> String {
        self.document.cookie().unwrap_or_else(|err| {
            tracing::warn!(err = ?err, "reading document.cookie failed");
            String::new()
        })
    }

    fn write(&self, cookie: &str) {
        if let Err(err) = self.document.set_cookie(cookie) {
            tracing::warn!(err = ?err, "writing document.cookie failed");
        }
    }
}
