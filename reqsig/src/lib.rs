mod crypto;
mod digest;
mod error;
mod request;
mod signature_base;
mod signature_headers;
mod signer;
#[cfg(test)]
mod test_keys;
mod trace;
mod verifier;

pub mod prelude {
  pub mod headers {
    pub use crate::signature_headers::{AUTHORIZATION, COVERED_HEADERS, DATE, DIGEST};
  }

  pub use crate::{
    crypto::{AlgorithmName, PublicKey, SecretKey, SigningKey, SigningKeyMaterial, VerifyingKey},
    digest::{body_digest, digest_bytes, verify_body_digest, EMPTY_BODY_SENTINEL},
    error::{ReqSigError, ReqSigResult},
    request::{RequestBody, SigningRequest},
    signature_base::{format_date, SignatureBase},
    signature_headers::{AuthorizationParams, SignatureHeaders},
    signer::{sign, Clock, FixedClock, RequestSigner, SystemClock},
    verifier::{verify, RequestVerifier},
  };
}

/* ----------------------------------------------------------------- */
