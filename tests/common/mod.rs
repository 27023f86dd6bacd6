#![allow(dead_code)]

// Shared helpers for integration tests.
//
// Every test runs against a fresh `MemoryJar`, which applies the same acceptance rules a browser
// applies to `document.cookie` writes on `http://localhost/`.
use doc_cookies::{CookieJar, MemoryJar};

pub fn jar() -> MemoryJar {
    // An empty jar for `localhost` over plain HTTP.
    MemoryJar::new()
}

pub fn secure_jar() -> MemoryJar {
    // An empty jar for `localhost` over HTTPS.
    MemoryJar::new().with_secure_context(true)
}

pub fn jar_with(cookies: &[&str]) -> MemoryJar {
    // A jar after the given raw `document.cookie` writes.
    let jar = jar();
    for cookie in cookies {
        jar.write(cookie);
    }
    jar
}

pub fn document_cookie(jar: &MemoryJar) -> String {
    // What `document.cookie` would read back.
    jar.read()
}
