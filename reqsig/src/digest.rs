use crate::{
  error::{ReqSigError, ReqSigResult},
  request::RequestBody,
};
use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha512};

/// Digest input used in place of an empty or absent body.
/// The verifying side substitutes the same byte, so it must stay as is.
pub const EMPTY_BODY_SENTINEL: &[u8] = b"X";

/// Returns the `Digest` header value for the given body, base64 of SHA-512
pub fn body_digest(body: &RequestBody) -> ReqSigResult<String> {
  match body {
    RequestBody::Empty => Ok(digest_bytes(&[])),
    RequestBody::Serialized(bytes) => Ok(digest_bytes(bytes)),
    RequestBody::Unserialized { content_type } => Err(ReqSigError::InvalidBodyType(format!(
      "body of type `{content_type}` must be serialized before the request is signed"
    ))),
  }
}

/// Returns base64 of SHA-512 over the given bytes, or over the sentinel when they are empty
pub fn digest_bytes(bytes: &[u8]) -> String {
  let input = if bytes.is_empty() { EMPTY_BODY_SENTINEL } else { bytes };
  let mut hasher = Sha512::new();
  hasher.update(input);
  general_purpose::STANDARD.encode(hasher.finalize())
}

/// Verifies the consistency between the body and a received `Digest` header value
pub fn verify_body_digest(body: &RequestBody, digest: &str) -> ReqSigResult<()> {
  let expected = body_digest(body)?;
  if expected != digest.trim() {
    return Err(ReqSigError::InvalidDigest(
      "Digest header does not match the request body".to_string(),
    ));
  }
  Ok(())
}
