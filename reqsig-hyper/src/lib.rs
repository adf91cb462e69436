//! # reqsig-hyper
//!
//! `reqsig-hyper` plugs the `reqsig` request signer into `http` based clients.
//!
//! Two entry points are provided:
//!
//! - [`Pipeline`] of [`RequestMiddleware`] steps over `http::Request<OutgoingBody>`. The signing step
//!   ([`RequestSigningMiddleware`]) has to be placed after body encoding (e.g. [`JsonEncoder`]) so that the
//!   digest covers the bytes actually transmitted. A body that is still a json document is rejected.
//! - [`MessageSignatureReq`], an extension of `http::Request<B: http_body::Body>` that collects the body,
//!   signs it and sets `Authorization`, `Digest` and `Date` headers, or verifies them on the receiving end.
//!
//! ## Blocking API
//!
//! When the `blocking` feature is enabled (on by default), synchronous wrappers are provided via
//! [`MessageSignatureReqSync`]. These use `futures::executor::block_on` internally and are intended
//! **exclusively for non-async contexts**.

mod error;
mod hyper_http;
mod middleware;
#[cfg(test)]
mod test_keys;

pub use error::{HyperSigError, HyperSigResult};
#[cfg(feature = "blocking")]
pub use hyper_http::MessageSignatureReqSync;
pub use hyper_http::MessageSignatureReq;
pub use middleware::{JsonEncoder, OutgoingBody, Pipeline, RequestMiddleware, RequestSigningMiddleware};
pub use reqsig::prelude;

/* ----------------------------------------------------------------- */
