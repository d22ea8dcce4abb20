// src/crypto/mod.rs
//! Field-level encryption for sensitive settings — no I/O, no database
//!
//! Values are encrypted with AES-256-CBC under a fresh random IV and stored
//! as `"<ivHex>:<cipherHex>"`. Which keys get this treatment is a pure
//! function of the key name (see [`is_sensitive_field`]).

mod cipher;
mod sensitive;

pub use cipher::FieldCipher;
pub use sensitive::{is_sensitive_field, sensitive_fields};
