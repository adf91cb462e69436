use crate::{
  crypto::{SigningKey, SigningKeyMaterial},
  error::ReqSigResult,
  request::{RequestBody, SigningRequest},
  signature_base::SignatureBase,
  signature_headers::SignatureHeaders,
};
use chrono::{DateTime, Utc};

/* -------------------------------- */
/// Source of the signing time
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

/* -------------------------------- */
/// Sign a request and return the Authorization, Digest and Date headers to merge into it
pub fn sign<K: SigningKey>(request: &SigningRequest, key: &SigningKeyMaterial<K>) -> ReqSigResult<SignatureHeaders> {
  SignatureBase::try_new(request)?.build_signature_headers(key)
}

/// Request signer holding the key material for the lifetime of the process
///
/// Signing only reads the key, so a single signer can be shared between threads.
pub struct RequestSigner<K> {
  key: SigningKeyMaterial<K>,
}

impl<K> std::fmt::Debug for RequestSigner<K> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RequestSigner").field("key", &self.key).finish()
  }
}

impl<K: SigningKey> RequestSigner<K> {
  pub fn new(key: SigningKeyMaterial<K>) -> Self {
    Self { key }
  }

  pub fn key_id(&self) -> &str {
    self.key.key_id()
  }

  pub fn key_material(&self) -> &SigningKeyMaterial<K> {
    &self.key
  }

  /// Sign a request with the timestamp it carries.
  /// Use [`RequestSigner::sign_with_clock`] or [`RequestSigner::sign_now`] to stamp it when signing begins.
  pub fn sign(&self, request: &SigningRequest) -> ReqSigResult<SignatureHeaders> {
    sign(request, &self.key)
  }

  /// Sign a request built earlier, replacing its timestamp with the clock's reading at this point
  pub fn sign_with_clock<C: Clock + ?Sized>(&self, request: &SigningRequest, clock: &C) -> ReqSigResult<SignatureHeaders> {
    self.sign(&request.clone().with_timestamp(clock.now()))
  }

  /// Sign a request, reading the clock at the moment signing begins
  pub fn sign_now<C: Clock + ?Sized>(
    &self,
    method: &str,
    path: &str,
    query: Option<&str>,
    body: impl Into<RequestBody>,
    clock: &C,
  ) -> ReqSigResult<SignatureHeaders> {
    let mut request = SigningRequest::new(method, path).with_body(body);
    if let Some(query) = query {
      request = request.with_query(query);
    }
    self.sign_with_clock(&request, clock)
  }
}
