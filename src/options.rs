use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
    codec,
    expires::{Expiration, expires},
};

/// `max_age` value meaning "no `max-age` attribute".
pub const DEFAULT_MAX_AGE: i64 = -1;

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The attributes client-side code is able to set on a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieOptions {
    pub(crate) path: Cow<'static, str>,
    pub(crate) domain: Cow<'static, str>,
    pub(crate) expiration: Option<Expiration>,
    pub(crate) max_age: i64,
    pub(crate) secure: bool,
    pub(crate) encode: bool,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "".into(),
            domain: "".into(),
            expiration: None,
            max_age: DEFAULT_MAX_AGE,
            secure: false,
            encode: false,
        }
    }
}

impl CookieOptions {
    #[must_use]
    pub fn with_path<P: Into<Cow<'static, str>>>(mut self, path: P) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_domain<D: Into<Cow<'static, str>>>(mut self, domain: D) -> Self {
        self.domain = domain.into();
        self
    }

    #[must_use]
    pub fn with_expiration<E: Into<Expiration>>(mut self, expiration: E) -> Self {
        self.expiration = Some(expiration.into());
        self
    }

    #[must_use]
    pub fn without_expiration(mut self) -> Self {
        self.expiration = None;
        self
    }

    /// Lifetime in seconds. Only positive values are written out.
    #[must_use]
    pub fn with_max_age(mut self, max_age: i64) -> Self {
        self.max_age = max_age;
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Base64 encode the value before it is percent-encoded.
    #[must_use]
    pub fn with_encode(mut self, encode: bool) -> Self {
        self.encode = encode;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn expiration(&self) -> Option<&Expiration> {
        self.expiration.as_ref()
    }

    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn encode(&self) -> bool {
        self.encode
    }

    /// Render the cookie string written to the jar for `name` and `value`.
    ///
    /// The name is written verbatim; callers validate it first.
    pub(crate) fn build_cookie(&self, name: &str, value: &str) -> String {
        let mut cookie = format!("{name}=");

        if self.encode {
            cookie.extend(utf8_percent_encode(&codec::encode(value), COMPONENT));
        } else {
            cookie.extend(utf8_percent_encode(value, COMPONENT));
        }
        cookie.push(';');

        if !self.path.is_empty() {
            cookie.push_str(&format!("path={};", self.path));
        }
        if !self.domain.is_empty() {
            cookie.push_str(&format!("domain={};", self.domain));
        }
        if let Some(expires) = expires(self.expiration.as_ref()) {
            cookie.push_str(&format!("expires={expires};"));
        }
        if self.max_age > 0 {
            cookie.push_str(&format!("max-age={};", self.max_age));
        }
        if self.secure {
            cookie.push_str("secure");
        }

        cookie
    }
}
