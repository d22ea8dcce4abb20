// src/crypto/cipher.rs
use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::aliases::SettingsKey32;
use secure_gate::RevealSecret;
use crate::config::EncryptionSection;
use crate::consts::{CIPHERTEXT_SEPARATOR, ENCRYPTION_KEY_HEX_LEN, IV_LEN};
use crate::error::{Result, SettingsError};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256-CBC codec for sensitive setting values
pub struct FieldCipher {
    key: SettingsKey32,
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}

impl FieldCipher {
    pub fn new(key: SettingsKey32) -> Self {
        Self { key }
    }

    /// Build from a 64-character hex secret.
    ///
    /// Anything else is a deployment error and is reported as
    /// [`SettingsError::Config`] rather than silently defaulted.
    pub fn from_hex(key_hex: &str) -> Result<Self> {
        let key_hex = key_hex.trim();
        if key_hex.len() != ENCRYPTION_KEY_HEX_LEN {
            return Err(SettingsError::Config(format!(
                "encryption key must be {ENCRYPTION_KEY_HEX_LEN} hex characters (32 bytes), got {}",
                key_hex.len()
            )));
        }
        let bytes = hex::decode(key_hex).map_err(|e| {
            SettingsError::Config(format!("encryption key is not valid hex: {e}"))
        })?;
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            SettingsError::Config("encryption key must decode to exactly 32 bytes".into())
        })?;
        Ok(Self::new(SettingsKey32::new(arr)))
    }

    pub fn from_config(section: &EncryptionSection) -> Result<Self> {
        match section.key_hex.as_deref() {
            Some(key_hex) => Self::from_hex(key_hex),
            None => Err(SettingsError::Config(
                "ENCRYPTION_KEY is not set; generate one with `openssl rand -hex 32`".into(),
            )),
        }
    }

    /// Encrypt under a fresh random IV → `"<ivHex>:<cipherHex>"`
    pub fn encrypt(&self, plaintext: &str) -> String {
        let iv: [u8; IV_LEN] = rand::random();
        let key: [u8; 32] = *self.key.expose_secret();
        let ciphertext = Aes256CbcEnc::new(&key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        format!(
            "{}{CIPHERTEXT_SEPARATOR}{}",
            hex::encode(iv),
            hex::encode(ciphertext)
        )
    }

    /// Exact inverse of [`FieldCipher::encrypt`].
    ///
    /// Malformed input, a wrong key, corrupted bytes and bad padding all
    /// surface as [`SettingsError::Crypto`].
    pub fn decrypt(&self, encoded: &str) -> Result<String> {
        let parts: Vec<&str> = encoded.split(CIPHERTEXT_SEPARATOR).collect();
        let [iv_hex, cipher_hex] = parts.as_slice() else {
            return Err(SettingsError::Crypto(format!(
                "invalid encrypted value: expected 2 parts, found {}",
                parts.len()
            )));
        };

        let iv: [u8; IV_LEN] = hex::decode(iv_hex)
            .map_err(|e| SettingsError::Crypto(format!("invalid IV hex: {e}")))?
            .try_into()
            .map_err(|_| SettingsError::Crypto(format!("IV must be {IV_LEN} bytes")))?;
        let ciphertext = hex::decode(cipher_hex)
            .map_err(|e| SettingsError::Crypto(format!("invalid ciphertext hex: {e}")))?;

        let key: [u8; 32] = *self.key.expose_secret();
        let plaintext = Aes256CbcDec::new(&key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| SettingsError::Crypto("decryption failed (wrong key or corrupted data)".into()))?;

        String::from_utf8(plaintext)
            .map_err(|_| SettingsError::Crypto("decrypted value is not valid UTF-8".into()))
    }
}
