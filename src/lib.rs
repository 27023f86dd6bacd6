//! Read, write and delete document cookies.
//!
//! The crate formats cookies into the string a browser accepts through `document.cookie`, and
//! parses that string back into name/value pairs. The jar itself is injected as a
//! [`CookieJar`]: [`MemoryJar`] keeps cookies in memory and applies browser write rules, and
//! `DocumentJar` (feature `web`, `wasm32` only) talks to the real `document.cookie`.
//!
//! Two surfaces share the same behavior:
//! - free functions such as [`set_cookie`], [`get_cookie`] and [`delete_cookie`];
//! - the [`Cookie`] builder, which holds one cookie's fields until [`Cookie::save`].
//!
//! # Encoding
//! Values are always percent-encoded. With [`CookieOptions::with_encode`] they are base64
//! encoded first; read them back with [`get_cookie_decoded`] or [`Cookie::get_decoded`].
//!
//! # Silent rejection
//! A browser ignores writes it does not accept, such as a `domain` other than the current one
//! or a `secure` cookie on plain HTTP. Nothing here reports that; read the cookie back to check.

mod api;
mod builder;
pub mod codec;
mod error;
pub mod expires;
mod jar;
mod name;
mod options;

pub use crate::api::{
    EXPIRED_DATE, add_cookie, cookie_exists, cookie_has_value, delete_all_cookies,
    delete_cookie, get_all_cookies, get_cookie, get_cookie_decoded, set_cookie,
};
pub use crate::builder::{Cookie, CookieValue};
pub use crate::error::{Error, InvalidName, Result};
pub use crate::expires::Expiration;
pub use crate::jar::{CookieJar, MemoryJar};
pub use crate::name::assert_name_set;
pub use crate::options::{CookieOptions, DEFAULT_MAX_AGE};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use crate::jar::DocumentJar;
