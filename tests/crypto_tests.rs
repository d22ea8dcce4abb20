// tests/crypto_tests.rs
use showcase_settings::{is_sensitive_field, sensitive_fields, FieldCipher, SettingsError};

mod support;
use support::TEST_KEY_HEX;

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let cipher = FieldCipher::from_hex(TEST_KEY_HEX).unwrap();
    for plaintext in ["secret123", "", "with:colons:inside", "ünïcödé 🔐"] {
        let encoded = cipher.encrypt(plaintext);
        assert_eq!(cipher.decrypt(&encoded).unwrap(), plaintext);
    }
}

#[test]
fn test_same_plaintext_encrypts_differently() {
    let cipher = FieldCipher::from_hex(TEST_KEY_HEX).unwrap();
    assert_ne!(cipher.encrypt("secret123"), cipher.encrypt("secret123"));
}

#[test]
fn test_separate_instances_with_same_key_interoperate() {
    let a = FieldCipher::from_hex(TEST_KEY_HEX).unwrap();
    let b = FieldCipher::from_hex(&TEST_KEY_HEX.to_uppercase()).unwrap();
    assert_eq!(b.decrypt(&a.encrypt("shared")).unwrap(), "shared");
}

#[test]
fn test_bad_key_is_a_config_error() {
    let err = FieldCipher::from_hex(&TEST_KEY_HEX[..62]).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
    assert!(err.to_string().contains("64 hex characters"));
}

#[test]
fn test_malformed_encoded_value_is_a_crypto_error() {
    let cipher = FieldCipher::from_hex(TEST_KEY_HEX).unwrap();
    assert!(matches!(cipher.decrypt("plain"), Err(SettingsError::Crypto(_))));
    assert!(matches!(cipher.decrypt("a:b:c"), Err(SettingsError::Crypto(_))));
    assert!(matches!(cipher.decrypt("zz:zz"), Err(SettingsError::Crypto(_))));
}

#[test]
fn test_sensitivity_gating() {
    assert!(is_sensitive_field("email_smtp_password"));
    assert!(!is_sensitive_field("site_name"));
    assert_eq!(sensitive_fields(), vec!["email_smtp_password"]);
}
