use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};

/* -------------------------------- */
/// Body of an outgoing request as seen by the signer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
  /// No body, or a zero-length one
  #[default]
  Empty,
  /// Final wire bytes, already encoded
  Serialized(Bytes),
  /// Body still waiting for an encoding step, e.g. a json document not yet turned into bytes
  Unserialized {
    /// media type the body would be encoded to
    content_type: String,
  },
}

impl RequestBody {
  pub fn is_empty(&self) -> bool {
    match self {
      RequestBody::Empty => true,
      RequestBody::Serialized(bytes) => bytes.is_empty(),
      RequestBody::Unserialized { .. } => false,
    }
  }
}

impl From<Bytes> for RequestBody {
  fn from(bytes: Bytes) -> Self {
    if bytes.is_empty() {
      RequestBody::Empty
    } else {
      RequestBody::Serialized(bytes)
    }
  }
}

impl From<Vec<u8>> for RequestBody {
  fn from(bytes: Vec<u8>) -> Self {
    Bytes::from(bytes).into()
  }
}

impl From<&[u8]> for RequestBody {
  fn from(bytes: &[u8]) -> Self {
    Bytes::copy_from_slice(bytes).into()
  }
}

impl From<String> for RequestBody {
  fn from(s: String) -> Self {
    Bytes::from(s).into()
  }
}

impl From<&str> for RequestBody {
  fn from(s: &str) -> Self {
    Bytes::copy_from_slice(s.as_bytes()).into()
  }
}

impl<T: Into<RequestBody>> From<Option<T>> for RequestBody {
  fn from(body: Option<T>) -> Self {
    body.map(Into::into).unwrap_or_default()
  }
}

/* -------------------------------- */
/// Input of a single signing operation
///
/// Method, path and query are trusted as given, the path carries no scheme or host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
  method: String,
  path: String,
  query: Option<String>,
  body: RequestBody,
  timestamp: DateTime<Utc>,
}

impl SigningRequest {
  /// Create a bodiless request without query, stamped with the current time.
  ///
  /// The stamp is the construction time. A request built ahead of signing should go through
  /// `RequestSigner::sign_with_clock` so that `Date` reflects the moment signing begins.
  pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
    Self {
      method: method.into(),
      path: path.into(),
      query: None,
      body: RequestBody::Empty,
      timestamp: Utc::now(),
    }
  }

  pub fn with_query(mut self, query: impl Into<String>) -> Self {
    self.query = Some(query.into());
    self
  }

  pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
    self.body = body.into();
    self
  }

  /// Set the signing time. Any timezone is accepted, it is stored in UTC.
  pub fn with_timestamp<Tz: TimeZone>(mut self, timestamp: DateTime<Tz>) -> Self {
    self.timestamp = timestamp.with_timezone(&Utc);
    self
  }

  pub fn method(&self) -> &str {
    &self.method
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn query(&self) -> Option<&str> {
    self.query.as_deref()
  }

  pub fn body(&self) -> &RequestBody {
    &self.body
  }

  pub fn timestamp(&self) -> DateTime<Utc> {
    self.timestamp
  }

  /// `<method in lower case> <path>[?<query>]`, the value of `(request-target)`
  pub fn request_target(&self) -> String {
    let method = self.method.to_lowercase();
    match self.query() {
      Some(query) if !query.is_empty() => format!("{} {}?{}", method, self.path, query),
      _ => format!("{} {}", method, self.path),
    }
  }
}
