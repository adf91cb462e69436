use crate::{
  crypto::AlgorithmName,
  error::{ReqSigError, ReqSigResult},
};
use indexmap::IndexMap;
use std::str::FromStr;

/// Authorization header name
pub const AUTHORIZATION: &str = "Authorization";
/// Digest header name
pub const DIGEST: &str = "Digest";
/// Date header name
pub const DATE: &str = "Date";

/// Value of the `headers` field, the covered components in signing order
pub const COVERED_HEADERS: &str = "(request-target) Date Digest";

/// Authentication scheme prefix of the authorization header
const SIGNATURE_SCHEME: &str = "Signature ";

/* -------------------------------- */
/// Fields of the `Authorization: Signature ...` header
///
/// Field names, order and quoting are fixed, the verifier parses this exact layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationParams {
  /// key id, opaque to the signer
  pub keyid: String,
  /// algorithm name, `rsa-sha256`
  pub algorithm: String,
  /// covered headers, `(request-target) Date Digest`
  pub headers: String,
  /// base64 encoded signature
  pub signature: String,
}

impl AuthorizationParams {
  pub fn new(keyid: &str, algorithm: &AlgorithmName, signature: &str) -> Self {
    Self {
      keyid: keyid.to_string(),
      algorithm: algorithm.to_string(),
      headers: COVERED_HEADERS.to_string(),
      signature: signature.to_string(),
    }
  }
}

impl std::fmt::Display for AuthorizationParams {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}keyid=\"{}\",algorithm=\"{}\",headers=\"{}\",signature=\"{}\"",
      SIGNATURE_SCHEME, self.keyid, self.algorithm, self.headers, self.signature
    )
  }
}

impl FromStr for AuthorizationParams {
  type Err = ReqSigError;

  /// Parse `Signature keyid="..",algorithm="..",headers="..",signature=".."`
  fn from_str(value: &str) -> Result<Self, Self::Err> {
    let mut rest = value
      .trim()
      .strip_prefix(SIGNATURE_SCHEME)
      .ok_or(ReqSigError::ParseAuthorizationError(
        "Authorization header must use the `Signature` scheme".to_string(),
      ))?;

    // values are quoted and never contain `"`, so a field ends at its closing quote
    let mut map = IndexMap::new();
    loop {
      let (name, after_name) = rest
        .split_once('=')
        .ok_or(ReqSigError::ParseAuthorizationError(format!("Invalid field: {rest}")))?;
      let name = name.trim();
      let (inner, after_value) = after_name
        .strip_prefix('"')
        .and_then(|v| v.split_once('"'))
        .ok_or(ReqSigError::ParseAuthorizationError(format!(
          "Field value must be quoted: {name}"
        )))?;
      if !matches!(name, "keyid" | "algorithm" | "headers" | "signature") {
        return Err(ReqSigError::ParseAuthorizationError(format!("Unknown field: {name}")));
      }
      if map.insert(name, inner).is_some() {
        return Err(ReqSigError::ParseAuthorizationError(format!("Duplicate field: {name}")));
      }
      match after_value.strip_prefix(',') {
        Some(next) => rest = next,
        None if after_value.trim().is_empty() => break,
        None => {
          return Err(ReqSigError::ParseAuthorizationError(format!(
            "Unexpected characters after field {name}: {after_value}"
          )))
        }
      }
    }

    let mut take = |name: &str| {
      map
        .swap_remove(name)
        .map(|v| v.to_string())
        .ok_or(ReqSigError::ParseAuthorizationError(format!("Missing field: {name}")))
    };
    Ok(Self {
      keyid: take("keyid")?,
      algorithm: take("algorithm")?,
      headers: take("headers")?,
      signature: take("signature")?,
    })
  }
}

/* -------------------------------- */
/// Headers produced by a signing operation, exactly Authorization, Digest and Date in this order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
  headers: IndexMap<&'static str, String>,
}

impl SignatureHeaders {
  pub(crate) fn new(authorization: String, digest: String, date: String) -> Self {
    let mut headers = IndexMap::with_capacity(3);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(DIGEST, digest);
    headers.insert(DATE, date);
    Self { headers }
  }

  /// Collect the three headers from received (name, value) pairs, names compared case-insensitively
  pub fn try_from_pairs<'a, I>(pairs: I) -> ReqSigResult<Self>
  where
    I: IntoIterator<Item = (&'a str, &'a str)>,
  {
    let mut authorization = None;
    let mut digest = None;
    let mut date = None;
    for (name, value) in pairs {
      let slot = if name.eq_ignore_ascii_case(AUTHORIZATION) {
        &mut authorization
      } else if name.eq_ignore_ascii_case(DIGEST) {
        &mut digest
      } else if name.eq_ignore_ascii_case(DATE) {
        &mut date
      } else {
        continue;
      };
      if slot.replace(value.to_string()).is_some() {
        return Err(ReqSigError::InvalidSignatureHeaders(format!("Duplicate header: {name}")));
      }
    }
    let missing = |name: &str| ReqSigError::InvalidSignatureHeaders(format!("Missing header: {name}"));
    Ok(Self::new(
      authorization.ok_or_else(|| missing(AUTHORIZATION))?,
      digest.ok_or_else(|| missing(DIGEST))?,
      date.ok_or_else(|| missing(DATE))?,
    ))
  }

  pub fn authorization(&self) -> &str {
    &self.headers[AUTHORIZATION]
  }

  pub fn digest(&self) -> &str {
    &self.headers[DIGEST]
  }

  pub fn date(&self) -> &str {
    &self.headers[DATE]
  }

  /// Parsed fields of the authorization header
  pub fn authorization_params(&self) -> ReqSigResult<AuthorizationParams> {
    AuthorizationParams::from_str(self.authorization())
  }

  /// Iterate over (name, value) in header order
  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
    self.headers.iter().map(|(k, v)| (*k, v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.headers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.headers.is_empty()
  }
}

impl IntoIterator for SignatureHeaders {
  type Item = (&'static str, String);
  type IntoIter = indexmap::map::IntoIter<&'static str, String>;

  fn into_iter(self) -> Self::IntoIter {
    self.headers.into_iter()
  }
}
