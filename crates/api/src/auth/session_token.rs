//! HMAC-signed session cookie values.
//!
//! A session cookie carries `<session-id>.<signature>` where the signature is
//! the URL-safe base64 HMAC-SHA256 of the UUID text under the server secret.
//! The signature is checked before the id is ever used for a lookup, so a
//! forged cookie never reaches storage.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tickbox_core::types::SessionId;

type HmacSha256 = Hmac<Sha256>;

/// Produce the signed cookie value for a session id.
pub fn sign_session_id(session_id: SessionId, secret: &str) -> String {
    let id_text = session_id.to_string();

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(id_text.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", id_text, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a signed cookie value and extract the session id.
///
/// Returns `None` for any malformed, tampered, or wrongly signed value; the
/// HMAC comparison itself is constant-time via [`Mac::verify_slice`].
pub fn verify_session_token(token: &str, secret: &str) -> Option<SessionId> {
    let (id_text, signature_b64) = token.split_once('.')?;

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(id_text.as_bytes());
    mac.verify_slice(&signature).ok()?;

    id_text.parse().ok()
}
