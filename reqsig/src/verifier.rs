use crate::{
  crypto::{AlgorithmName, VerifyingKey},
  digest::verify_body_digest,
  error::{ReqSigError, ReqSigResult},
  request::SigningRequest,
  signature_base::SignatureBase,
  signature_headers::{SignatureHeaders, COVERED_HEADERS},
  signer::{Clock, SystemClock},
  trace::*,
};
use chrono::{DateTime, Duration, Utc};

/// Verify the signature headers of a received request.
///
/// Method, path, query and body are taken from `request`, its timestamp is not consulted:
/// the string to sign is rebuilt from the received `Date` and `Digest` header values.
pub fn verify<V: VerifyingKey>(
  request: &SigningRequest,
  headers: &SignatureHeaders,
  key: &V,
  expected_key_id: Option<&str>,
) -> ReqSigResult<()> {
  let authorization = headers.authorization_params()?;

  let alg: AlgorithmName = authorization.algorithm.parse()?;
  if alg != key.alg() {
    return Err(ReqSigError::InvalidSignature(format!(
      "Algorithm `{alg}` does not match the verifying key"
    )));
  }
  if authorization.headers != COVERED_HEADERS {
    return Err(ReqSigError::ParseAuthorizationError(format!(
      "Unexpected covered headers: {}",
      authorization.headers
    )));
  }
  if let Some(expected) = expected_key_id {
    if authorization.keyid != expected {
      return Err(ReqSigError::KeyIdMismatch(format!(
        "expected `{expected}`, got `{}`",
        authorization.keyid
      )));
    }
  }

  verify_body_digest(request.body(), headers.digest())?;

  let base = SignatureBase::from_parts(request.request_target(), headers.date(), headers.digest());
  base.verify_signature(key, &authorization).map_err(|e| {
    warn!("Signature verification failed for `{}`: {e}", base.request_target());
    e
  })
}

/* -------------------------------- */
/// Verifier holding the public key matching a key id, with an optional freshness window on `Date`
pub struct RequestVerifier<V> {
  key: V,
  key_id: Option<String>,
  max_skew: Option<Duration>,
  clock: Box<dyn Clock>,
}

impl<V: VerifyingKey> RequestVerifier<V> {
  /// Accepts any key id, no freshness window
  pub fn new(key: V) -> Self {
    Self {
      key,
      key_id: None,
      max_skew: None,
      clock: Box::new(SystemClock),
    }
  }

  /// Require the `keyid` field to be exactly this value
  pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
    self.key_id = Some(key_id.into());
    self
  }

  /// Reject requests whose `Date` is further than `max_skew` from the verifier's clock
  pub fn with_max_skew(mut self, max_skew: Duration) -> Self {
    self.max_skew = Some(max_skew);
    self
  }

  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.clock = Box::new(clock);
    self
  }

  pub fn key_id(&self) -> Option<&str> {
    self.key_id.as_deref()
  }

  pub fn verify(&self, request: &SigningRequest, headers: &SignatureHeaders) -> ReqSigResult<()> {
    if let Some(max_skew) = self.max_skew {
      self.check_freshness(headers.date(), max_skew)?;
    }
    verify(request, headers, &self.key, self.key_id())
  }

  fn check_freshness(&self, date: &str, max_skew: Duration) -> ReqSigResult<()> {
    let date = DateTime::parse_from_rfc3339(date)
      .map_err(|e| ReqSigError::StaleDate(format!("Unparsable date `{date}`: {e}")))?
      .with_timezone(&Utc);
    let skew = (self.clock.now() - date).abs();
    if skew > max_skew {
      return Err(ReqSigError::StaleDate(format!(
        "Date {date} is {}s away from now",
        skew.num_seconds()
      )));
    }
    Ok(())
  }
}
