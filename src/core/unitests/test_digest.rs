use crate::core::digest;

#[test]
fn test_reference_digest() {
    // digest the avatar service expects for this address.
    let hash = digest::md5_hex("test@example.com");
    assert_eq!(hash, "55502f40dc8b7c769880b10874abc9d0");
}

#[test]
fn test_deterministic() {
    assert_eq!(digest::md5_hex("hello"), digest::md5_hex("hello"));
    assert_eq!(digest::md5_hex("hello"), "5d41402abc4b2a76b9719d911017c592");
}

#[test]
fn test_empty_input() {
    assert_eq!(digest::md5_hex(""), "d41d8cd98f00b204e9800998ecf8427e");
}

#[test]
fn test_digest_shape() {
    let hash = digest::md5_hex("a@x.com");
    assert_eq!(hash.len(), 32);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}
