//! Signed session cookie handling.
//!
//! The cookie value is `<token>.<base64url(HMAC-SHA256(secret, token))>`.
//! A missing, malformed, or badly signed cookie all read the same way: no
//! session.

use anyhow::{anyhow, Result};
use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use super::state::AuthConfig;

pub const SESSION_COOKIE_NAME: &str = "sesamo_session";

type HmacSha256 = Hmac<Sha256>;

/// Build a `Set-Cookie` value carrying a freshly minted session token.
///
/// # Errors
///
/// Returns an error if the signing key is rejected or the cookie is not a
/// valid header value.
pub(super) fn session_cookie(config: &AuthConfig, token: u64) -> Result<HeaderValue> {
    let mac = token_mac(config.session_secret(), token)?;
    let signed = format!("{token}.{}", Base64UrlUnpadded::encode_string(&mac));
    let mut cookie = format!("{SESSION_COOKIE_NAME}={signed}; Path=/; HttpOnly; SameSite=Lax");
    if config.secure_cookies() {
        cookie.push_str("; Secure");
    }
    Ok(HeaderValue::from_str(&cookie)?)
}

/// Build a `Set-Cookie` value that removes the session cookie client-side.
///
/// # Errors
///
/// Returns an error if the cookie is not a valid header value.
pub(super) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.secure_cookies() {
        cookie.push_str("; Secure");
    }
    Ok(HeaderValue::from_str(&cookie)?)
}

/// Pull the session token out of the request cookies, checking its signature.
#[must_use]
pub(super) fn extract_session_token(headers: &HeaderMap, secret: &SecretString) -> Option<u64> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return verify_signed_token(secret, val);
        }
    }
    None
}

fn verify_signed_token(secret: &SecretString, value: &str) -> Option<u64> {
    let (token, mac_b64) = value.split_once('.')?;
    let token: u64 = token.parse().ok()?;
    let mac = Base64UrlUnpadded::decode_vec(mac_b64).ok()?;
    let mut expected = HmacSha256::new_from_slice(secret.expose_secret().as_bytes()).ok()?;
    expected.update(token.to_string().as_bytes());
    // verify_slice compares in constant time
    if expected.verify_slice(&mac).is_ok() {
        Some(token)
    } else {
        None
    }
}

fn token_mac(secret: &SecretString, token: u64) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|err| anyhow!("invalid cookie signing key: {err}"))?;
    mac.update(token.to_string().as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::{
        clear_session_cookie, extract_session_token, session_cookie, SESSION_COOKIE_NAME,
    };
    use crate::api::handlers::user::AuthConfig;
    use anyhow::{Context, Result};
    use axum::http::header::COOKIE;
    use axum::http::{HeaderMap, HeaderValue};
    use secrecy::SecretString;

    fn config() -> AuthConfig {
        AuthConfig::new(SecretString::from("seia"))
    }

    fn cookie_headers(set_cookie: &HeaderValue) -> Result<HeaderMap> {
        // Replay the Set-Cookie pair the way a client would: value only, no
        // attributes.
        let pair = set_cookie
            .to_str()?
            .split(';')
            .next()
            .context("empty cookie")?
            .to_string();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&pair)?);
        Ok(headers)
    }

    #[test]
    fn issued_cookie_round_trips() -> Result<()> {
        let config = config();
        let set_cookie = session_cookie(&config, 7)?;
        let headers = cookie_headers(&set_cookie)?;
        assert_eq!(
            extract_session_token(&headers, config.session_secret()),
            Some(7)
        );
        Ok(())
    }

    #[test]
    fn cookie_carries_expected_attributes() -> Result<()> {
        let set_cookie = session_cookie(&config(), 7)?;
        let value = set_cookie.to_str()?;
        assert!(value.starts_with(&format!("{SESSION_COOKIE_NAME}=7.")));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(!value.contains("Secure"));

        let secure = session_cookie(&config().with_secure_cookies(true), 7)?;
        assert!(secure.to_str()?.contains("Secure"));
        Ok(())
    }

    #[test]
    fn tampered_token_is_rejected() -> Result<()> {
        let config = config();
        let set_cookie = session_cookie(&config, 7)?;
        let pair = set_cookie
            .to_str()?
            .split(';')
            .next()
            .context("empty cookie")?
            .replacen("=7.", "=8.", 1);
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&pair)?);
        assert_eq!(extract_session_token(&headers, config.session_secret()), None);
        Ok(())
    }

    #[test]
    fn wrong_secret_is_rejected() -> Result<()> {
        let set_cookie = session_cookie(&config(), 7)?;
        let headers = cookie_headers(&set_cookie)?;
        let other = AuthConfig::new(SecretString::from("not-seia"));
        assert_eq!(extract_session_token(&headers, other.session_secret()), None);
        Ok(())
    }

    #[test]
    fn unsigned_or_malformed_values_are_rejected() -> Result<()> {
        let config = config();
        for value in ["7", "7.", "seven.mac", "7.!!!not-base64!!!"] {
            let mut headers = HeaderMap::new();
            headers.insert(
                COOKIE,
                HeaderValue::from_str(&format!("{SESSION_COOKIE_NAME}={value}"))?,
            );
            assert_eq!(
                extract_session_token(&headers, config.session_secret()),
                None,
                "value {value:?} should not verify"
            );
        }
        Ok(())
    }

    #[test]
    fn missing_cookie_reads_as_no_session() {
        let headers = HeaderMap::new();
        assert_eq!(
            extract_session_token(&headers, config().session_secret()),
            None
        );
    }

    #[test]
    fn cookie_is_found_among_others() -> Result<()> {
        let config = config();
        let set_cookie = session_cookie(&config, 9)?;
        let pair = set_cookie
            .to_str()?
            .split(';')
            .next()
            .context("empty cookie")?
            .to_string();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {pair}; lang=eo"))?,
        );
        assert_eq!(
            extract_session_token(&headers, config.session_secret()),
            Some(9)
        );
        Ok(())
    }

    #[test]
    fn clearing_cookie_expires_immediately() -> Result<()> {
        let value = clear_session_cookie(&config())?;
        let value = value.to_str()?;
        assert!(value.starts_with(&format!("{SESSION_COOKIE_NAME}=;")));
        assert!(value.contains("Max-Age=0"));
        Ok(())
    }
}
