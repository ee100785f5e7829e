/// Hashing seam for user secrets so the store never sees plaintext.
pub trait SecretHasher: Send + Sync {
    fn hash(&self, secret: &str) -> Result<String, String>;
    fn verify(&self, secret: &str, hashed: &str) -> Result<bool, String>;
}
