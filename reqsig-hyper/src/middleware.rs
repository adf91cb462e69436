use crate::{
  error::{HyperSigError, HyperSigResult},
  hyper_http::merge_signature_headers,
};
use bytes::Bytes;
use http::{header::CONTENT_TYPE, HeaderValue, Request};
use http_body_util::Full;
use reqsig::prelude::{Clock, ReqSigError, RequestBody, RequestSigner, SigningKey, SystemClock};
use tracing::debug;

const APPLICATION_JSON: &str = "application/json";

/* --------------------------------------- */
/// Body of a request travelling through the client pipeline
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OutgoingBody {
  #[default]
  Empty,
  /// Json document, not encoded yet
  Json(serde_json::Value),
  /// Final wire bytes
  Bytes(Bytes),
}

impl OutgoingBody {
  /// View of this body for the signer. A json document not encoded yet cannot be signed.
  pub fn to_request_body(&self) -> RequestBody {
    match self {
      OutgoingBody::Empty => RequestBody::Empty,
      OutgoingBody::Json(_) => RequestBody::Unserialized {
        content_type: APPLICATION_JSON.to_string(),
      },
      OutgoingBody::Bytes(bytes) => RequestBody::from(bytes.clone()),
    }
  }

  /// Wire bytes of the body, fails if an encoding step has not run
  pub fn into_bytes(self) -> HyperSigResult<Bytes> {
    match self {
      OutgoingBody::Empty => Ok(Bytes::new()),
      OutgoingBody::Bytes(bytes) => Ok(bytes),
      OutgoingBody::Json(_) => Err(HyperSigError::ReqSigError(ReqSigError::InvalidBodyType(
        "json body was not encoded before transmission".to_string(),
      ))),
    }
  }
}

impl From<Bytes> for OutgoingBody {
  fn from(bytes: Bytes) -> Self {
    OutgoingBody::Bytes(bytes)
  }
}

impl From<serde_json::Value> for OutgoingBody {
  fn from(value: serde_json::Value) -> Self {
    OutgoingBody::Json(value)
  }
}

/* --------------------------------------- */
/// A step of the client request pipeline that transforms the outgoing request in place
pub trait RequestMiddleware: Send + Sync {
  fn on_request(&self, req: &mut Request<OutgoingBody>) -> HyperSigResult<()>;
}

/// Encodes a json body into bytes and sets `content-type: application/json` unless already set.
/// Must run before [`RequestSigningMiddleware`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl RequestMiddleware for JsonEncoder {
  fn on_request(&self, req: &mut Request<OutgoingBody>) -> HyperSigResult<()> {
    let OutgoingBody::Json(value) = req.body() else {
      return Ok(());
    };
    let encoded = serde_json::to_vec(value)?;
    *req.body_mut() = OutgoingBody::Bytes(Bytes::from(encoded));
    if !req.headers().contains_key(CONTENT_TYPE) {
      req
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }
    Ok(())
  }
}

/// Signs the request and merges Authorization, Digest and Date into its headers.
/// Reads the clock when the hook runs, i.e. after every earlier step and right before transmission.
pub struct RequestSigningMiddleware<K, C = SystemClock> {
  signer: RequestSigner<K>,
  clock: C,
}

impl<K: SigningKey> RequestSigningMiddleware<K, SystemClock> {
  pub fn new(signer: RequestSigner<K>) -> Self {
    Self {
      signer,
      clock: SystemClock,
    }
  }
}

impl<K: SigningKey, C: Clock> RequestSigningMiddleware<K, C> {
  pub fn with_clock<C2: Clock>(self, clock: C2) -> RequestSigningMiddleware<K, C2> {
    RequestSigningMiddleware {
      signer: self.signer,
      clock,
    }
  }

  pub fn signer(&self) -> &RequestSigner<K> {
    &self.signer
  }
}

impl<K, C> RequestMiddleware for RequestSigningMiddleware<K, C>
where
  K: SigningKey + Send + Sync,
  C: Clock,
{
  fn on_request(&self, req: &mut Request<OutgoingBody>) -> HyperSigResult<()> {
    let body = req.body().to_request_body();
    let signature_headers = self
      .signer
      .sign_now(req.method().as_str(), req.uri().path(), req.uri().query(), body, &self.clock)?;
    debug!(
      "Signed {} {} with key id {}",
      req.method(),
      req.uri().path(),
      self.signer.key_id()
    );
    merge_signature_headers(req.headers_mut(), signature_headers)
  }
}

/* --------------------------------------- */
/// Ordered list of request middlewares
#[derive(Default)]
pub struct Pipeline {
  middlewares: Vec<Box<dyn RequestMiddleware>>,
}

impl Pipeline {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a step, steps run in insertion order
  pub fn with<M: RequestMiddleware + 'static>(mut self, middleware: M) -> Self {
    self.middlewares.push(Box::new(middleware));
    self
  }

  pub fn len(&self) -> usize {
    self.middlewares.len()
  }

  pub fn is_empty(&self) -> bool {
    self.middlewares.is_empty()
  }

  /// Run every step in order, stopping at the first error
  pub fn run(&self, req: &mut Request<OutgoingBody>) -> HyperSigResult<()> {
    self.middlewares.iter().try_for_each(|middleware| middleware.on_request(req))
  }

  /// Run the pipeline and turn the request into one ready for transmission
  pub fn prepare(&self, mut req: Request<OutgoingBody>) -> HyperSigResult<Request<Full<Bytes>>> {
    self.run(&mut req)?;
    let (parts, body) = req.into_parts();
    Ok(Request::from_parts(parts, Full::new(body.into_bytes()?)))
  }
}
