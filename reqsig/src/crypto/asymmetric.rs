use super::AlgorithmName;
use crate::{
  error::{ReqSigError, ReqSigResult},
  trace::*,
};
use rsa::{
  pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
  pkcs1v15,
  pkcs8::{DecodePrivateKey, DecodePublicKey, Document},
  signature::{Keypair, SignatureEncoding, Signer, Verifier},
  RsaPrivateKey, RsaPublicKey,
};
use sha2::Sha256;

/// PEM labels accepted for RSA keys
mod pem_labels {
  /// PKCS#1 private key
  pub const RSA_PRIVATE_KEY: &str = "RSA PRIVATE KEY";
  /// PKCS#8 private key
  pub const PRIVATE_KEY: &str = "PRIVATE KEY";
  /// PKCS#1 public key
  pub const RSA_PUBLIC_KEY: &str = "RSA PUBLIC KEY";
  /// SubjectPublicKeyInfo
  pub const PUBLIC_KEY: &str = "PUBLIC KEY";
}

/* -------------------------------- */
/// Secret key for request signature, RSASSA-PKCS1-v1_5 with SHA-256
#[derive(Clone)]
pub enum SecretKey {
  /// rsa-sha256
  RsaSha256(pkcs1v15::SigningKey<Sha256>),
}

impl SecretKey {
  /// Derive secret key from PKCS#8 der bytes
  pub fn from_der(der: &[u8]) -> ReqSigResult<Self> {
    let sk = RsaPrivateKey::from_pkcs8_der(der).map_err(|e| ReqSigError::ParsePrivateKeyError(e.to_string()))?;
    debug!("Read RSA private key from PKCS#8 der");
    Ok(Self::from(sk))
  }

  /// Derive secret key from pem string, either PKCS#1 `RSA PRIVATE KEY` or PKCS#8 `PRIVATE KEY`
  pub fn from_pem(pem: &str) -> ReqSigResult<Self> {
    let (tag, doc) = Document::from_pem(pem.trim()).map_err(|e| ReqSigError::ParsePrivateKeyError(e.to_string()))?;
    let sk = match tag {
      pem_labels::RSA_PRIVATE_KEY => {
        debug!("Read PKCS#1 RSA private key");
        RsaPrivateKey::from_pkcs1_der(doc.as_bytes()).map_err(|e| ReqSigError::ParsePrivateKeyError(e.to_string()))?
      }
      pem_labels::PRIVATE_KEY => {
        debug!("Read PKCS#8 RSA private key");
        RsaPrivateKey::from_pkcs8_der(doc.as_bytes()).map_err(|e| ReqSigError::ParsePrivateKeyError(e.to_string()))?
      }
      _ => return Err(ReqSigError::ParsePrivateKeyError(format!("Invalid tag: {tag}"))),
    };
    Ok(Self::from(sk))
  }

  /// Get public key from secret key
  pub fn public_key(&self) -> PublicKey {
    match &self {
      Self::RsaSha256(sk) => PublicKey::RsaSha256(sk.verifying_key()),
    }
  }
}

impl From<RsaPrivateKey> for SecretKey {
  fn from(sk: RsaPrivateKey) -> Self {
    Self::RsaSha256(pkcs1v15::SigningKey::<Sha256>::new(sk))
  }
}

impl super::SigningKey for SecretKey {
  /// Sign data
  fn sign(&self, data: &[u8]) -> ReqSigResult<Vec<u8>> {
    match &self {
      Self::RsaSha256(sk) => super::SigningKey::sign(sk, data),
    }
  }

  fn alg(&self) -> AlgorithmName {
    AlgorithmName::RsaSha256
  }
}

/// Any RustCrypto RSA PKCS#1 v1.5 signing key over SHA-256 can be used as a handle directly
impl super::SigningKey for pkcs1v15::SigningKey<Sha256> {
  fn sign(&self, data: &[u8]) -> ReqSigResult<Vec<u8>> {
    let sig = self
      .try_sign(data)
      .map_err(|e| ReqSigError::SigningPrimitiveFailure(e.to_string()))?;
    Ok(sig.to_vec())
  }

  fn alg(&self) -> AlgorithmName {
    AlgorithmName::RsaSha256
  }
}

/* -------------------------------- */
/// Public key for request signature
#[derive(Clone)]
pub enum PublicKey {
  /// rsa-sha256
  RsaSha256(pkcs1v15::VerifyingKey<Sha256>),
}

impl PublicKey {
  /// Convert from pem string, either SubjectPublicKeyInfo `PUBLIC KEY` or PKCS#1 `RSA PUBLIC KEY`
  pub fn from_pem(pem: &str) -> ReqSigResult<Self> {
    let (tag, doc) = Document::from_pem(pem.trim()).map_err(|e| ReqSigError::ParsePublicKeyError(e.to_string()))?;
    let pk = match tag {
      pem_labels::PUBLIC_KEY => {
        RsaPublicKey::from_public_key_der(doc.as_bytes()).map_err(|e| ReqSigError::ParsePublicKeyError(e.to_string()))?
      }
      pem_labels::RSA_PUBLIC_KEY => {
        RsaPublicKey::from_pkcs1_der(doc.as_bytes()).map_err(|e| ReqSigError::ParsePublicKeyError(e.to_string()))?
      }
      _ => return Err(ReqSigError::ParsePublicKeyError(format!("Invalid tag: {tag}"))),
    };
    Ok(Self::from(pk))
  }
}

impl From<RsaPublicKey> for PublicKey {
  fn from(pk: RsaPublicKey) -> Self {
    Self::RsaSha256(pkcs1v15::VerifyingKey::<Sha256>::new(pk))
  }
}

impl super::VerifyingKey for PublicKey {
  /// Verify signature
  fn verify(&self, data: &[u8], signature: &[u8]) -> ReqSigResult<()> {
    match self {
      Self::RsaSha256(vk) => super::VerifyingKey::verify(vk, data, signature),
    }
  }

  fn alg(&self) -> AlgorithmName {
    AlgorithmName::RsaSha256
  }
}

impl super::VerifyingKey for pkcs1v15::VerifyingKey<Sha256> {
  fn verify(&self, data: &[u8], signature: &[u8]) -> ReqSigResult<()> {
    let sig = pkcs1v15::Signature::try_from(signature).map_err(|e| ReqSigError::ParseSignatureError(e.to_string()))?;
    Verifier::verify(self, data, &sig).map_err(|e| ReqSigError::InvalidSignature(e.to_string()))
  }

  fn alg(&self) -> AlgorithmName {
    AlgorithmName::RsaSha256
  }
}
