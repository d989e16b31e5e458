//! Session identifier generation.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;

/// Random bytes per session id (256 bits).
pub const SESSION_ID_BYTES: usize = 32;

/// Generate an unguessable session id: 32 bytes from the thread-local CSPRNG,
/// base64url-encoded without padding (43 characters).
pub fn generate_session_id() -> String {
    let bytes: [u8; SESSION_ID_BYTES] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}
