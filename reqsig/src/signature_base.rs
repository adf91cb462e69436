use crate::{
  crypto::{SigningKey, SigningKeyMaterial, VerifyingKey},
  digest::body_digest,
  error::{ReqSigError, ReqSigResult},
  request::SigningRequest,
  signature_headers::{AuthorizationParams, SignatureHeaders},
  trace::*,
};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp for the `Date` header, e.g. `2024-01-01T00:00:00Z`
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
  timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// String to sign
///
/// ```text
/// (request-target): <method> <path>[?<query>]
/// Date: <date>
/// Digest: <digest>
/// ```
///
/// Lines are joined by `\n` with no trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureBase {
  request_target: String,
  date: String,
  digest: String,
}

impl SignatureBase {
  /// Creates a new signature base from the request.
  /// Date and digest are computed once here and reused for both the signed text and the output headers.
  pub fn try_new(request: &SigningRequest) -> ReqSigResult<Self> {
    let digest = body_digest(request.body())?;
    Ok(Self {
      request_target: request.request_target(),
      date: format_date(&request.timestamp()),
      digest,
    })
  }

  /// Rebuild a signature base from received header values, for verification
  pub fn from_parts(request_target: impl Into<String>, date: impl Into<String>, digest: impl Into<String>) -> Self {
    Self {
      request_target: request_target.into(),
      date: date.into(),
      digest: digest.into(),
    }
  }

  pub fn request_target(&self) -> &str {
    &self.request_target
  }

  pub fn date(&self) -> &str {
    &self.date
  }

  pub fn digest(&self) -> &str {
    &self.digest
  }

  /// Returns the signature base string as bytes to be signed
  pub fn as_bytes(&self) -> Vec<u8> {
    self.to_string().into_bytes()
  }

  /// Sign the base and build Authorization, Digest and Date headers.
  /// Nothing is returned unless the signature succeeds.
  pub fn build_signature_headers<K: SigningKey>(&self, key: &SigningKeyMaterial<K>) -> ReqSigResult<SignatureHeaders> {
    let signature = key.sign(&self.as_bytes())?;
    let signature = general_purpose::STANDARD.encode(signature);
    let authorization = AuthorizationParams::new(key.key_id(), &key.alg(), &signature);
    debug!(
      "Signed `{}` at {} with key id {}",
      self.request_target,
      self.date,
      key.key_id()
    );
    Ok(SignatureHeaders::new(
      authorization.to_string(),
      self.digest.clone(),
      self.date.clone(),
    ))
  }

  /// Verify the base64 signature of the authorization header against this base
  pub fn verify_signature<V: VerifyingKey>(&self, key: &V, authorization: &AuthorizationParams) -> ReqSigResult<()> {
    let signature = general_purpose::STANDARD
      .decode(&authorization.signature)
      .map_err(|e| ReqSigError::ParseSignatureError(e.to_string()))?;
    key.verify(&self.as_bytes(), &signature)
  }
}

impl std::fmt::Display for SignatureBase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "(request-target): {}\nDate: {}\nDigest: {}",
      self.request_target, self.date, self.digest
    )
  }
}
