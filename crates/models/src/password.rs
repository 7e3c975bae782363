use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::errors::ModelError;

/// Hash a plaintext password into a PHC string.
pub fn hash_password(plain: &str) -> Result<String, ModelError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ModelError::Password(e.to_string()))
}

#[cfg(test)]
pub(crate) fn verify_password(plain: &str, hash: &str) -> bool {
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_roundtrip() {
        let hash = hash_password("S3curePass!").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("S3curePass!", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("S3curePass!", "not-a-phc-string"));
    }
}
