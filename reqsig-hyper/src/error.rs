use reqsig::prelude::ReqSigError;
use thiserror::Error;

/// Result type for request signature over http
pub type HyperSigResult<T> = std::result::Result<T, HyperSigError>;

/// Error type for request signature over http
#[derive(Error, Debug)]
pub enum HyperSigError {
  /// No signature headers found
  #[error("No signature headers found: {0}")]
  NoSignatureHeaders(String),

  /// Failed to parse signature headers
  #[error("Failed to stringify signature headers: {0}")]
  FailedToStrSignatureHeaders(#[from] http::header::ToStrError),

  /// Failed to parse header value
  #[error("Failed to parse header value: {0}")]
  InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

  /// Failed to parse header name
  #[error("Failed to parse header name: {0}")]
  InvalidHeaderName(#[from] http::header::InvalidHeaderName),

  /// Http body error
  #[error("Http body error: {0}")]
  HttpBodyError(String),

  /// Failed to encode a json body
  #[error("Failed to encode json body: {0}")]
  JsonEncodeError(#[from] serde_json::Error),

  /// Inherited from ReqSigError
  #[error("ReqSigError: {0}")]
  ReqSigError(#[from] ReqSigError),
}
