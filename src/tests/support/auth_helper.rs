use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Build the HTTP-Basic Authorization header pair used by route tests.
pub fn basic_auth(username: &str, password: &str) -> (&'static str, String) {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    ("Authorization", format!("Basic {encoded}"))
}
