use crate::constants::{
    SHARE_LEGACY_PARAM, SHARE_PASSPHRASE, SHARE_PBKDF2_ITERATIONS, SHARE_SALT, SHARE_TOKEN_PARAM,
};
use crate::errors::{AppError, AppResult};
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

/// AES-GCM nonce length in bytes (96 bits), prepended to the ciphertext.
const NONCE_LEN: usize = 12;

static CIPHER: OnceLock<Aes256Gcm> = OnceLock::new();

#[derive(Serialize)]
struct TokenPayload<'a> {
    outlet: &'a str,
    #[serde(rename = "issuedAtMs")]
    issued_at_ms: u64,
}

/// Decode-side view of the payload. Only the outlet is required; the
/// timestamp and any future fields are tolerated without validation.
#[derive(Deserialize)]
struct TokenPayloadIn {
    outlet: String,
}

/// AES-256-GCM cipher under the key derived from the embedded passphrase.
///
/// PBKDF2-HMAC-SHA256 with a fixed application salt and 100k iterations.
/// The passphrase ships inside the binary, so this is tamper resistance for
/// shared links, not confidentiality; nothing secret rides in a token.
fn cipher() -> &'static Aes256Gcm {
    CIPHER.get_or_init(|| {
        let mut key = [0u8; 32];
        pbkdf2_hmac::<Sha256>(SHARE_PASSPHRASE, SHARE_SALT, SHARE_PBKDF2_ITERATIONS, &mut key);
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key))
    })
}

/// Encrypts an outlet name into a URL-safe share token.
///
/// The payload is `{"outlet": …, "issuedAtMs": …}` encrypted under a fresh
/// random 96-bit nonce; the token is unpadded URL-safe base64 of
/// nonce‖ciphertext. Tokens are not deterministic (fresh nonce per call) but
/// every token round-trips through [`decode`] to the exact input.
pub fn encode(outlet: &str) -> AppResult<String> {
    let payload = TokenPayload {
        outlet,
        issued_at_ms: now_ms(),
    };
    let plaintext = serde_json::to_vec(&payload)?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher()
        .encrypt(&nonce, plaintext.as_slice())
        .map_err(|_| AppError::TokenError("encryption failed".to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(URL_SAFE_NO_PAD.encode(out))
}

/// Recovers the outlet name from a share token.
///
/// Any failure — malformed base64, truncated input, authentication failure,
/// non-JSON payload, or a payload without an outlet — yields `None`. Decoding
/// never panics and never surfaces an error; a bad token simply means no
/// outlet selection.
pub fn decode(token: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(token).ok()?;
    if bytes.len() <= NONCE_LEN {
        return None;
    }
    let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
    let plaintext = cipher().decrypt(Nonce::from_slice(nonce), ciphertext).ok()?;
    let payload: TokenPayloadIn = serde_json::from_slice(&plaintext).ok()?;
    Some(payload.outlet)
}

/// Builds a shareable URL carrying only the canonical `s` token parameter.
pub fn share_url(base: &str, outlet: &str) -> AppResult<String> {
    let mut url = Url::parse(base)?;
    let token = encode(outlet)?;
    url.query_pairs_mut()
        .clear()
        .append_pair(SHARE_TOKEN_PARAM, &token);
    Ok(url.to_string())
}

/// Extracts the selected outlet from an incoming URL.
///
/// The encrypted `s` parameter is tried first; the legacy plain `medio`
/// parameter is the fallback for old direct links. Returns `None` when
/// neither yields a selection.
pub fn outlet_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut legacy = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            k if k == SHARE_TOKEN_PARAM => {
                if let Some(outlet) = decode(&value) {
                    return Some(outlet);
                }
            }
            k if k == SHARE_LEGACY_PARAM => legacy = Some(value.into_owned()),
            _ => {}
        }
    }
    legacy.filter(|m| !m.is_empty())
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
