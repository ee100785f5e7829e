pub mod argon2_hasher;
pub mod authenticator;
