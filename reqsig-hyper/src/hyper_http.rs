use crate::error::{HyperSigError, HyperSigResult};
use bytes::Bytes;
use http::{header::HeaderName, HeaderMap, HeaderValue, Request};
use http_body::Body;
use http_body_util::{BodyExt, Full};
use reqsig::prelude::{
  headers::{AUTHORIZATION, DATE, DIGEST},
  Clock, RequestSigner, RequestVerifier, SignatureHeaders, SigningKey, SigningRequest, VerifyingKey,
};
use std::future::Future;

// http's request specific extension to set and verify request signature

/* --------------------------------------- */
/// A trait about request signature for http request
pub trait MessageSignatureReq {
  type Error;

  /// Check if the request has Authorization, Digest and Date headers
  fn has_message_signature(&self) -> bool;

  /// Collect the body, sign the request and set Authorization, Digest and Date headers,
  /// overwriting existing values. The clock is read once the body has been collected.
  fn set_message_signature<K, C>(
    self,
    signer: &RequestSigner<K>,
    clock: &C,
  ) -> impl Future<Output = Result<Request<Full<Bytes>>, Self::Error>> + Send
  where
    Self: Sized,
    K: SigningKey + Sync,
    C: Clock + ?Sized;

  /// Collect the body and verify it together with method, path and query against the signature headers.
  /// The request is handed back with its collected body when valid.
  fn verify_message_signature<V>(
    self,
    verifier: &RequestVerifier<V>,
  ) -> impl Future<Output = Result<Request<Full<Bytes>>, Self::Error>> + Send
  where
    Self: Sized,
    V: VerifyingKey + Sync;
}

/* --------------------------------------- */
#[cfg(feature = "blocking")]
/// Synchronous counterpart of [`MessageSignatureReq`].
///
/// Every method delegates to the corresponding async method via `futures::executor::block_on`.
///
/// # Panics
///
/// All methods will panic if called from within an async runtime (e.g. a `tokio` task).
/// Use the async [`MessageSignatureReq`] methods instead when you are already in an async context.
pub trait MessageSignatureReqSync: MessageSignatureReq {
  fn set_message_signature_sync<K, C>(self, signer: &RequestSigner<K>, clock: &C) -> Result<Request<Full<Bytes>>, Self::Error>
  where
    Self: Sized,
    K: SigningKey + Sync,
    C: Clock + ?Sized;

  fn verify_message_signature_sync<V>(self, verifier: &RequestVerifier<V>) -> Result<Request<Full<Bytes>>, Self::Error>
  where
    Self: Sized,
    V: VerifyingKey + Sync;
}

/* --------------------------------------- */
impl<B> MessageSignatureReq for Request<B>
where
  B: Body + Send,
  <B as Body>::Data: Send,
{
  type Error = HyperSigError;

  fn has_message_signature(&self) -> bool {
    has_message_signature_inner(self.headers())
  }

  async fn set_message_signature<K, C>(self, signer: &RequestSigner<K>, clock: &C) -> HyperSigResult<Request<Full<Bytes>>>
  where
    Self: Sized,
    K: SigningKey + Sync,
    C: Clock + ?Sized,
  {
    let (mut parts, body) = self.into_parts();
    let body_bytes = collect_body(body).await?;

    let signature_headers = signer.sign_now(
      parts.method.as_str(),
      parts.uri.path(),
      parts.uri.query(),
      body_bytes.clone(),
      clock,
    )?;
    merge_signature_headers(&mut parts.headers, signature_headers)?;

    Ok(Request::from_parts(parts, Full::new(body_bytes)))
  }

  async fn verify_message_signature<V>(self, verifier: &RequestVerifier<V>) -> HyperSigResult<Request<Full<Bytes>>>
  where
    Self: Sized,
    V: VerifyingKey + Sync,
  {
    if !self.has_message_signature() {
      return Err(HyperSigError::NoSignatureHeaders(
        "The request does not have authorization, digest and date headers".to_string(),
      ));
    }
    let (parts, body) = self.into_parts();
    let body_bytes = collect_body(body).await?;

    let signature_headers = extract_signature_headers(&parts.headers)?;
    let mut received = SigningRequest::new(parts.method.as_str(), parts.uri.path()).with_body(body_bytes.clone());
    if let Some(query) = parts.uri.query() {
      received = received.with_query(query);
    }
    verifier.verify(&received, &signature_headers)?;

    Ok(Request::from_parts(parts, Full::new(body_bytes)))
  }
}

#[cfg(feature = "blocking")]
impl<B> MessageSignatureReqSync for Request<B>
where
  B: Body + Send,
  <B as Body>::Data: Send,
{
  fn set_message_signature_sync<K, C>(self, signer: &RequestSigner<K>, clock: &C) -> Result<Request<Full<Bytes>>, Self::Error>
  where
    Self: Sized,
    K: SigningKey + Sync,
    C: Clock + ?Sized,
  {
    futures::executor::block_on(self.set_message_signature(signer, clock))
  }

  fn verify_message_signature_sync<V>(self, verifier: &RequestVerifier<V>) -> Result<Request<Full<Bytes>>, Self::Error>
  where
    Self: Sized,
    V: VerifyingKey + Sync,
  {
    futures::executor::block_on(self.verify_message_signature(verifier))
  }
}

/* --------------------------------------- */
// inner functions
/// Returns the bytes object of the body
async fn collect_body<B>(body: B) -> HyperSigResult<Bytes>
where
  B: Body + Send,
  <B as Body>::Data: Send,
{
  let collected = body
    .collect()
    .await
    .map_err(|_e| HyperSigError::HttpBodyError("Failed to collect request body".to_string()))?;
  Ok(collected.to_bytes())
}

/// has message signature inner function
fn has_message_signature_inner(headers: &HeaderMap) -> bool {
  [AUTHORIZATION, DIGEST, DATE].iter().all(|name| headers.contains_key(*name))
}

/// Insert the signature headers, overwriting existing values.
/// All names and values are validated before the first insertion so the map is left untouched on error.
pub(crate) fn merge_signature_headers(headers: &mut HeaderMap, signature_headers: SignatureHeaders) -> HyperSigResult<()> {
  let converted = signature_headers
    .into_iter()
    .map(|(name, value)| -> HyperSigResult<(HeaderName, HeaderValue)> {
      Ok((HeaderName::from_bytes(name.as_bytes())?, HeaderValue::from_str(&value)?))
    })
    .collect::<HyperSigResult<Vec<_>>>()?;
  for (name, value) in converted {
    headers.insert(name, value);
  }
  Ok(())
}

/// Extract Authorization, Digest and Date from the header map
pub(crate) fn extract_signature_headers(headers: &HeaderMap) -> HyperSigResult<SignatureHeaders> {
  let pairs = [AUTHORIZATION, DIGEST, DATE]
    .iter()
    .flat_map(|name| headers.get_all(*name).into_iter().map(move |value| (*name, value)))
    .map(|(name, value)| value.to_str().map(|value| (name, value)))
    .collect::<Result<Vec<_>, _>>()?;
  Ok(SignatureHeaders::try_from_pairs(pairs)?)
}

/* --------------------------------------- */
#[cfg(test)]
#[path = "hyper_http_tests.rs"]
mod tests;
