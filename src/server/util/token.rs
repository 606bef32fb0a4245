use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Generates an opaque bearer token from 32 random bytes.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}
