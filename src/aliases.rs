// src/aliases.rs
//! Secret-holding types built on secure-gate
//!
//! Key material is zeroized on drop and never printed by `Debug`.

pub use secure_gate::fixed_alias;

// Fixed-size secrets
fixed_alias!(pub SettingsKey32, 32); // 256-bit AES key for sensitive setting values
