//! Password hashing using Argon2id
//!
//! Password fields never reach storage in clear text; they are replaced by a
//! PHC-format Argon2id hash with a random salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{FormError, FormResult};

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashParams {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub memory_cost: u32,
    /// Iterations (default: 2)
    pub time_cost: u32,
    /// Parallelism degree (default: 1)
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl HashParams {
    fn hasher(&self) -> FormResult<Argon2<'static>> {
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|e| FormError::Crypto(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash `secret` with a fresh salt, returning the PHC string
pub fn hash_secret(secret: &str, params: &HashParams) -> FormResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = params
        .hasher()?
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| FormError::Crypto(format!("Hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Check `secret` against a PHC string produced by [`hash_secret`]
pub fn verify_secret(secret: &str, phc: &str) -> FormResult<bool> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| FormError::Crypto(format!("Invalid password hash: {}", e)))?;
    // Parameters are read from the PHC string itself
    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> HashParams {
        HashParams {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let phc = hash_secret("Abcdef1!", &cheap()).unwrap();
        assert!(phc.starts_with("$argon2id$"));
        assert!(verify_secret("Abcdef1!", &phc).unwrap());
        assert!(!verify_secret("Abcdef1", &phc).unwrap());
    }

    #[test]
    fn test_same_secret_different_salt() {
        let a = hash_secret("Abcdef1!", &cheap()).unwrap();
        let b = hash_secret("Abcdef1!", &cheap()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_params() {
        let params = HashParams {
            memory_cost: 1,
            ..cheap()
        };
        assert!(matches!(hash_secret("x", &params), Err(FormError::Crypto(_))));
    }

    #[test]
    fn test_garbage_hash() {
        assert!(verify_secret("x", "not a hash").is_err());
    }
}
