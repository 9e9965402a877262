//! Cryptographic helpers for stepform
//!
//! Argon2id hashing of password fields before they are stored, and a
//! zeroizing string type for secrets read from the terminal.

pub mod hashing;
pub mod secure_memory;

pub use hashing::{hash_secret, verify_secret, HashParams};
pub use secure_memory::SecureString;
