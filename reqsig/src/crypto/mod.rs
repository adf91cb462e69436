mod asymmetric;

use crate::error::{ReqSigError, ReqSigResult};

pub use asymmetric::{PublicKey, SecretKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Algorithm names as they appear in the `algorithm` field of the authorization header
pub enum AlgorithmName {
  RsaSha256,
}

impl AlgorithmName {
  pub fn as_str(&self) -> &'static str {
    match self {
      AlgorithmName::RsaSha256 => "rsa-sha256",
    }
  }
}

impl std::fmt::Display for AlgorithmName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl core::str::FromStr for AlgorithmName {
  type Err = ReqSigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "rsa-sha256" => Ok(Self::RsaSha256),
      _ => Err(ReqSigError::InvalidAlgorithmName(s.to_string())),
    }
  }
}

/// SigningKey trait
///
/// Opaque private key handle. The signer never looks at key bytes, it only calls `sign`.
pub trait SigningKey {
  fn sign(&self, data: &[u8]) -> ReqSigResult<Vec<u8>>;
  fn alg(&self) -> AlgorithmName;
}

/// VerifyingKey trait
pub trait VerifyingKey {
  fn verify(&self, data: &[u8], signature: &[u8]) -> ReqSigResult<()>;
  fn alg(&self) -> AlgorithmName;
}

impl<T: SigningKey + ?Sized> SigningKey for &T {
  fn sign(&self, data: &[u8]) -> ReqSigResult<Vec<u8>> {
    (**self).sign(data)
  }
  fn alg(&self) -> AlgorithmName {
    (**self).alg()
  }
}

impl<T: VerifyingKey + ?Sized> VerifyingKey for &T {
  fn verify(&self, data: &[u8], signature: &[u8]) -> ReqSigResult<()> {
    (**self).verify(data, signature)
  }
  fn alg(&self) -> AlgorithmName {
    (**self).alg()
  }
}

impl<T: SigningKey + ?Sized> SigningKey for std::sync::Arc<T> {
  fn sign(&self, data: &[u8]) -> ReqSigResult<Vec<u8>> {
    (**self).sign(data)
  }
  fn alg(&self) -> AlgorithmName {
    (**self).alg()
  }
}

/* -------------------------------- */
/// Private key handle together with the key id the server uses to look up the matching public key.
///
/// Built once at startup and shared read-only afterwards.
pub struct SigningKeyMaterial<K> {
  key_id: String,
  key: K,
}

impl<K: SigningKey> SigningKeyMaterial<K> {
  /// Fails when the key id contains `"` or a control character, which the quoted `keyid` field cannot carry
  pub fn new(key_id: impl Into<String>, key: K) -> ReqSigResult<Self> {
    let key_id = key_id.into();
    if let Some(c) = key_id.chars().find(|c| *c == '"' || c.is_control()) {
      return Err(ReqSigError::InvalidKeyId(format!("{key_id:?} contains {c:?}")));
    }
    Ok(Self { key_id, key })
  }

  /// Opaque key identifier, passed verbatim into the `keyid` field
  pub fn key_id(&self) -> &str {
    &self.key_id
  }

  pub fn key(&self) -> &K {
    &self.key
  }

  /// Sign data with the underlying key handle
  pub fn sign(&self, data: &[u8]) -> ReqSigResult<Vec<u8>> {
    self.key.sign(data)
  }

  pub fn alg(&self) -> AlgorithmName {
    self.key.alg()
  }
}

impl SigningKeyMaterial<SecretKey> {
  /// Build key material from a PEM encoded RSA private key
  pub fn from_pem(key_id: impl Into<String>, pem: &str) -> ReqSigResult<Self> {
    Self::new(key_id, SecretKey::from_pem(pem)?)
  }
}

impl<K> std::fmt::Debug for SigningKeyMaterial<K> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SigningKeyMaterial")
      .field("key_id", &self.key_id)
      .finish_non_exhaustive()
  }
}
