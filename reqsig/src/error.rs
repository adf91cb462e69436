use thiserror::Error;

/// Result type for request signature
pub type ReqSigResult<T> = std::result::Result<T, ReqSigError>;

/// Error type for request signature
#[derive(Error, Debug)]
pub enum ReqSigError {
  /* ----- Signing input errors ----- */
  /// Key id cannot be carried inside the quoted `keyid` field
  #[error("Invalid key id: {0}")]
  InvalidKeyId(String),
  /// Body is present but has not been serialized into its wire bytes yet
  #[error("Invalid body type: {0}")]
  InvalidBodyType(String),

  /* ----- Crypto errors ----- */
  /// Invalid private key
  #[error("Failed to parse private key: {0}")]
  ParsePrivateKeyError(String),
  /// Invalid public key
  #[error("Failed to parse public key: {0}")]
  ParsePublicKeyError(String),
  /// The underlying sign operation failed
  #[error("Signing primitive failure: {0}")]
  SigningPrimitiveFailure(String),
  /// Unknown algorithm name
  #[error("Invalid algorithm name: {0}")]
  InvalidAlgorithmName(String),

  /// Signature parse error
  #[error("Failed to parse signature: {0}")]
  ParseSignatureError(String),

  /* ----- Verification errors ----- */
  /// Authorization header does not follow the `Signature keyid=...` layout
  #[error("Failed to parse authorization header: {0}")]
  ParseAuthorizationError(String),
  /// Header set is not exactly Authorization, Digest and Date
  #[error("Invalid signature headers: {0}")]
  InvalidSignatureHeaders(String),
  /// Digest header does not match the body
  #[error("Invalid digest: {0}")]
  InvalidDigest(String),
  /// Key id in the authorization header is not the expected one
  #[error("Key id mismatch: {0}")]
  KeyIdMismatch(String),
  /// Date header is outside of the accepted window
  #[error("Stale date: {0}")]
  StaleDate(String),
  /// Invalid Signature
  #[error("Invalid Signature: {0}")]
  InvalidSignature(String),
}
