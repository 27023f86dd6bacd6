//! Free functions over a [`CookieJar`].

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use crate::{
    codec,
    error::Result,
    jar::CookieJar,
    name::assert_name_set,
    options::CookieOptions,
};

/// Expiration written by [`delete_cookie`].
pub const EXPIRED_DATE: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// Set a cookie only if no cookie with the same name exists yet.
///
/// The check and the write are two separate jar operations.
pub fn add_cookie<J: CookieJar + ?Sized>(
    jar: &J,
    name: &str,
    value: &str,
    options: &CookieOptions,
) -> Result<()> {
    if cookie_exists(jar, name) {
        tracing::trace!(name, "cookie already exists, not adding");
        return Ok(());
    }
    set_cookie(jar, name, value, options)
}

/// Set a cookie, overriding any existing cookie with the same name.
///
/// The jar may silently refuse the write, e.g. for a foreign `domain` or a `secure` cookie
/// outside a secure context.
pub fn set_cookie<J: CookieJar + ?Sized>(
    jar: &J,
    name: &str,
    value: &str,
    options: &CookieOptions,
) -> Result<()> {
    assert_name_set(Some(name))?;
    let cookie = options.build_cookie(name, value);
    tracing::debug!(name, encode = options.encode(), "writing cookie");
    jar.write(&cookie);
    Ok(())
}

/// All visible cookies as a name to value map.
///
/// Values are percent-decoded; escapes that do not decode are kept as written.
pub fn get_all_cookies<J: CookieJar + ?Sized>(jar: &J) -> HashMap<String, String> {
    let text = jar.read();
    let mut cookies = HashMap::new();

    for pair in text.split(';') {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        cookies.insert(name.to_owned(), decode_component(value));
    }

    tracing::trace!(count = cookies.len(), "parsed cookie jar");
    cookies
}

/// The value of a cookie, or `default` if it is missing or empty.
pub fn get_cookie<J: CookieJar + ?Sized>(
    jar: &J,
    name: &str,
    default: Option<&str>,
) -> Option<String> {
    stored_value(jar, name).or_else(|| default.map(str::to_owned))
}

/// The base64-decoded value of a cookie, or `default` (not decoded) if it is missing or empty.
pub fn get_cookie_decoded<J: CookieJar + ?Sized>(
    jar: &J,
    name: &str,
    default: Option<&str>,
) -> Result<Option<String>> {
    match stored_value(jar, name) {
        Some(value) => codec::decode(&value).map(Some).inspect_err(|err| {
            tracing::warn!(name, err = %err, "cookie value failed to decode");
        }),
        None => Ok(default.map(str::to_owned)),
    }
}

/// Delete a cookie by writing it again with an expiration in the past.
pub fn delete_cookie<J: CookieJar + ?Sized>(jar: &J, name: &str) -> Result<()> {
    let options = CookieOptions::default().with_expiration(EXPIRED_DATE);
    set_cookie(jar, name, "", &options)
}

/// Delete every visible cookie.
pub fn delete_all_cookies<J: CookieJar + ?Sized>(jar: &J) -> Result<()> {
    for name in get_all_cookies(jar).keys() {
        delete_cookie(jar, name)?;
    }
    Ok(())
}

/// Whether a cookie with a non-empty value exists.
pub fn cookie_exists<J: CookieJar + ?Sized>(jar: &J, name: &str) -> bool {
    stored_value(jar, name).is_some()
}

/// Whether a cookie exists and holds exactly `value`.
pub fn cookie_has_value<J: CookieJar + ?Sized>(jar: &J, name: &str, value: &str) -> bool {
    get_all_cookies(jar).get(name).is_some_and(|stored| stored == value)
}

// Escapes that do not form UTF-8 leave the whole value as written.
fn decode_component(value: &str) -> String {
    match percent_decode_str(value).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_owned(),
    }
}

fn stored_value<J: CookieJar + ?Sized>(jar: &J, name: &str) -> Option<String> {
    get_all_cookies(jar)
        .remove(name)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, InvalidName, MemoryJar};

    #[test]
    fn parse_skips_empty_names_and_trims_keys() {
        let jar = MemoryJar::new().with_cookies("a=1;  b=2");
        let cookies = get_all_cookies(&jar);

        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "1");
        assert_eq!(cookies["b"], "2");
        assert!(get_all_cookies(&MemoryJar::new()).is_empty());
    }

    #[test]
    fn parse_keeps_malformed_escapes() {
        let jar = MemoryJar::new().with_cookies("pct=100%; mixed=a%20b%zz");
        let cookies = get_all_cookies(&jar);

        assert_eq!(cookies["pct"], "100%");
        assert_eq!(cookies["mixed"], "a b%zz");
    }

    #[test]
    fn parse_keeps_escapes_that_are_not_utf8() {
        let jar = MemoryJar::new().with_cookies("n=%FF%C3; tail=ok%C3");
        let cookies = get_all_cookies(&jar);

        assert_eq!(cookies["n"], "%FF%C3");
        assert_eq!(cookies["tail"], "ok%C3");
    }

    #[test]
    fn parse_keeps_equals_signs_in_values() {
        let jar = MemoryJar::new().with_cookies("b64=dmFsdWU=");
        assert_eq!(get_all_cookies(&jar)["b64"], "dmFsdWU=");
    }

    #[test]
    fn invalid_names_are_rejected_before_writing() {
        let jar = MemoryJar::new();
        let err = set_cookie(&jar, " \t", "value", &CookieOptions::default())
            .expect_err("blank name is rejected");

        assert!(matches!(err, Error::InvalidName(InvalidName::Blank)));
        assert!(jar.is_empty());
    }

    #[test]
    fn works_through_a_trait_object() {
        let jar = MemoryJar::new();
        let dyn_jar: &dyn CookieJar = &jar;
        set_cookie(dyn_jar, "name", "value", &CookieOptions::default())
            .expect("set_cookie succeeds");

        assert_eq!(get_cookie(dyn_jar, "name", None).as_deref(), Some("value"));
    }

    #[test]
    fn undecodable_value_is_an_error() {
        let jar = MemoryJar::new().with_cookies("name=not%20base64");
        assert!(matches!(
            get_cookie_decoded(&jar, "name", None),
            Err(Error::Base64(_))
        ));
    }
}
