//! Session persistence: `SessionState` carried in a signed cookie.
//!
//! Payload = URL-safe base64 of the JSON-encoded state; the jar signs it with a
//! key derived from SECRET_KEY. Missing, tampered or undecodable cookies read as "no session".

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha512};
use tracing::warn;

use crate::survey::SessionState;

pub const SESSION_COOKIE: &str = "survey_session";

/// Browsers silently drop cookies past ~4 KB; leave room for the signature and attributes.
pub const COOKIE_VALUE_LIMIT: usize = 3900;

/// Signing key for arbitrary-length secrets (SHA-512 yields the 64 bytes `Key` needs).
pub fn key_from_secret(secret: &str) -> Key {
  let digest = Sha512::digest(secret.as_bytes());
  Key::from(digest.as_slice())
}

pub fn encode(state: &SessionState) -> Result<String, serde_json::Error> {
  let json = serde_json::to_vec(state)?;
  Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode(value: &str) -> Option<SessionState> {
  let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
  serde_json::from_slice(&bytes).ok()
}

pub fn load(jar: &SignedCookieJar) -> Option<SessionState> {
  let cookie = jar.get(SESSION_COOKIE)?;
  let state = decode(cookie.value());
  if state.is_none() {
    warn!(target: "survey", "Discarding undecodable session cookie");
  }
  state
}

pub fn save(jar: SignedCookieJar, state: &SessionState) -> Result<SignedCookieJar, serde_json::Error> {
  let value = encode(state)?;
  if exceeds_cookie_limit(&value) {
    warn!(
      target: "survey",
      participant = %state.participant_id,
      bytes = value.len(),
      figures = state.figure_order.as_ref().map_or(0, Vec::len),
      "Session cookie exceeds browser size limit; progress may be lost"
    );
  }
  let cookie = Cookie::build((SESSION_COOKIE, value))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax);
  Ok(jar.add(cookie))
}

fn exceeds_cookie_limit(value: &str) -> bool {
  value.len() > COOKIE_VALUE_LIMIT
}
