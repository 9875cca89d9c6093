/// Computes the lowercase hex MD5 digest of the input string.
///
/// The avatar service resolves accounts by the MD5 digest of the email
/// address, so the algorithm here is an external compatibility constraint
/// rather than a free choice.
pub fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}
