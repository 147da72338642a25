//! Session cookie plumbing
//!
//! The token is opaque to the client; these helpers only move it between the
//! Cookie/Set-Cookie headers and the session store.

use axum::http::HeaderMap;

/// Extract the session token from the request's Cookie header, if present
pub fn token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let raw = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;

    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == cookie_name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Build the Set-Cookie value that hands the session token to the browser.
///
/// Max-Age matches the absolute session TTL so the cookie and the
/// server-side session expire together.
pub fn session_cookie(cookie_name: &str, token: &str, ttl_secs: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        cookie_name, token, ttl_secs
    )
}

/// Build the Set-Cookie value that removes the session cookie
pub fn clear_session_cookie(cookie_name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", cookie_name)
}
