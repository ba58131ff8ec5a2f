// Copyright 2024 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Private and public key parsing.
//!
//! Keys arrive in whichever DER encoding the caller had at hand, so both
//! parsers walk an ordered list of encodings and return the first key that
//! parses. When every encoding fails, the error from the *last* attempt is
//! reported so that diagnostics stay stable.

use std::fmt;

use log::debug;
use pkcs8::{der::Decode, DecodePrivateKey, EncodePublicKey, ObjectIdentifier, PrivateKeyInfo};
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    RsaPrivateKey, RsaPublicKey,
};
use thiserror::Error;
use x509_parser::{prelude::FromDer, x509::SubjectPublicKeyInfo};

use crate::{
    base64,
    raw_signature::oids::{EC_PUBLICKEY_OID, ED25519_OID, RSA_OID},
    ErrorKind, SigningAlg,
};

// Same OIDs as in `oids`, but typed for the RustCrypto `pkcs8` crate.
const PKCS8_EC_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const PKCS8_ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
const PKCS8_RSA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const PKCS8_P256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const PKCS8_P384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const PKCS8_P521_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

type PrivateKeyParser = fn(&[u8]) -> Result<PrivateKey, KeyError>;
type PublicKeyParser = fn(&[u8]) -> Result<PublicKey, KeyError>;

const PRIVATE_KEY_PARSERS: [(&str, PrivateKeyParser); 3] = [
    ("EC", parse_ec_private_key),
    ("PKCS8", parse_pkcs8_private_key),
    ("PKCS1", parse_pkcs1_private_key),
];

const PUBLIC_KEY_PARSERS: [(&str, PublicKeyParser); 2] = [
    ("PKCS1", parse_pkcs1_public_key),
    ("PKIX", parse_pkix_public_key),
];

/// A private key usable by one of the built-in signers.
#[non_exhaustive]
pub enum PrivateKey {
    /// NIST P-256 key (ES256).
    P256(p256::SecretKey),

    /// NIST P-384 key (ES384).
    P384(p384::SecretKey),

    /// NIST P-521 key (ES512).
    P521(p521::SecretKey),

    /// Ed25519 key (EdDSA).
    Ed25519(ed25519_dalek::SigningKey),

    /// RSA key (PS256, PS384, PS512).
    Rsa(Box<RsaPrivateKey>),
}

impl PrivateKey {
    /// Short name of the key type, for diagnostics.
    pub fn key_type(&self) -> &'static str {
        match self {
            Self::P256(_) => "EC P-256",
            Self::P384(_) => "EC P-384",
            Self::P521(_) => "EC P-521",
            Self::Ed25519(_) => "Ed25519",
            Self::Rsa(_) => "RSA",
        }
    }

    /// Return `true` if this key can produce signatures for `alg`.
    ///
    /// ECDSA algorithms are bound to their curve: ES256 requires P-256,
    /// ES384 requires P-384, and ES512 requires P-521.
    pub fn supports(&self, alg: SigningAlg) -> bool {
        matches!(
            (self, alg),
            (Self::P256(_), SigningAlg::Es256)
                | (Self::P384(_), SigningAlg::Es384)
                | (Self::P521(_), SigningAlg::Es512)
                | (Self::Ed25519(_), SigningAlg::Ed25519)
                | (
                    Self::Rsa(_),
                    SigningAlg::Ps256 | SigningAlg::Ps384 | SigningAlg::Ps512
                )
        )
    }

    /// Return the public half of this key.
    pub fn public_key(&self) -> Result<PublicKey, KeyError> {
        let doc = match self {
            Self::P256(key) => key.public_key().to_public_key_der(),
            Self::P384(key) => key.public_key().to_public_key_der(),
            Self::P521(key) => key.public_key().to_public_key_der(),
            Self::Ed25519(key) => key.verifying_key().to_public_key_der(),
            Self::Rsa(key) => RsaPublicKey::from(key.as_ref()).to_public_key_der(),
        }
        .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;

        Ok(PublicKey(doc.as_bytes().to_vec()))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&self.key_type()).finish()
    }
}

/// Parse a DER-encoded private key.
///
/// Tries, in order, an EC private key (SEC1) on each supported curve, a
/// PKCS #8 `PrivateKeyInfo`, and a PKCS #1 `RSAPrivateKey`.
pub fn parse_private_key(der: &[u8]) -> Result<PrivateKey, KeyError> {
    let mut last_error = None;

    for (encoding, parse) in PRIVATE_KEY_PARSERS {
        match parse(der) {
            Ok(key) => {
                debug!("parsed {} private key as {encoding}", key.key_type());
                return Ok(key);
            }
            Err(err) => {
                debug!("private key is not {encoding}: {err}");
                last_error = Some(err);
            }
        }
    }

    Err(last_error.unwrap_or(KeyError::NoPrivateKey))
}

/// Parse a PEM-wrapped private key.
///
/// The first PEM block whose label ends in `PRIVATE KEY` is decoded with
/// [`parse_private_key`]; other blocks (such as `EC PARAMETERS`) are skipped.
/// If no block carries such a label, the first block is used as is.
pub fn parse_private_key_pem(pem_text: &[u8]) -> Result<PrivateKey, KeyError> {
    let blocks = pem::parse_many(pem_text).map_err(|e| KeyError::InvalidPem(e.to_string()))?;

    let block = blocks
        .iter()
        .find(|block| block.tag().ends_with("PRIVATE KEY"))
        .or(blocks.first())
        .ok_or(KeyError::NoPrivateKey)?;

    parse_private_key(block.contents())
}

/// A public key, normalized to DER-encoded `SubjectPublicKeyInfo`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    /// Wrap DER-encoded `SubjectPublicKeyInfo` bytes after checking that they
    /// describe a supported key type.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, KeyError> {
        parse_pkix_public_key(der)
    }

    /// Return the DER-encoded `SubjectPublicKeyInfo`.
    pub fn as_spki_der(&self) -> &[u8] {
        &self.0
    }

    /// Return the key as single-line base64 of its `SubjectPublicKeyInfo`.
    pub fn to_base64(&self) -> String {
        base64::encode(&self.0)
    }

    /// Return the key as a `PUBLIC KEY` PEM block whose base64 body is a
    /// single line.
    pub fn to_pem(&self) -> String {
        format!(
            "-----BEGIN PUBLIC KEY-----\n{}\n-----END PUBLIC KEY-----\n",
            self.to_base64()
        )
    }
}

/// Parse a DER-encoded public key.
///
/// Tries a PKCS #1 `RSAPublicKey` first, then a PKIX `SubjectPublicKeyInfo`.
pub fn parse_public_key(der: &[u8]) -> Result<PublicKey, KeyError> {
    let mut last_error = None;

    for (encoding, parse) in PUBLIC_KEY_PARSERS {
        match parse(der) {
            Ok(key) => {
                debug!("parsed public key as {encoding}");
                return Ok(key);
            }
            Err(err) => {
                debug!("public key is not {encoding}: {err}");
                last_error = Some(err);
            }
        }
    }

    Err(last_error.unwrap_or(KeyError::NoPublicKey))
}

/// Parse a PEM-wrapped public key using [`parse_public_key`].
pub fn parse_public_key_pem(pem_text: &[u8]) -> Result<PublicKey, KeyError> {
    let blocks = pem::parse_many(pem_text).map_err(|e| KeyError::InvalidPem(e.to_string()))?;

    let block = blocks
        .iter()
        .find(|block| block.tag().ends_with("PUBLIC KEY"))
        .or(blocks.first())
        .ok_or(KeyError::NoPublicKey)?;

    parse_public_key(block.contents())
}

fn parse_ec_private_key(der: &[u8]) -> Result<PrivateKey, KeyError> {
    if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
        return Ok(PrivateKey::P256(key));
    }

    if let Ok(key) = p384::SecretKey::from_sec1_der(der) {
        return Ok(PrivateKey::P384(key));
    }

    p521::SecretKey::from_sec1_der(der)
        .map(PrivateKey::P521)
        .map_err(|e| KeyError::InvalidEcPrivateKey(e.to_string()))
}

fn parse_pkcs8_private_key(der: &[u8]) -> Result<PrivateKey, KeyError> {
    let info =
        PrivateKeyInfo::from_der(der).map_err(|e| KeyError::InvalidPkcs8(e.to_string()))?;

    let oid = info.algorithm.oid;
    let pkcs8_err = |e: pkcs8::Error| KeyError::InvalidPkcs8(e.to_string());

    if oid == PKCS8_EC_OID {
        let curve = info
            .algorithm
            .parameters_oid()
            .map_err(|e| KeyError::InvalidPkcs8(e.to_string()))?;

        if curve == PKCS8_P256_OID {
            p256::SecretKey::from_pkcs8_der(der)
                .map(PrivateKey::P256)
                .map_err(pkcs8_err)
        } else if curve == PKCS8_P384_OID {
            p384::SecretKey::from_pkcs8_der(der)
                .map(PrivateKey::P384)
                .map_err(pkcs8_err)
        } else if curve == PKCS8_P521_OID {
            p521::SecretKey::from_pkcs8_der(der)
                .map(PrivateKey::P521)
                .map_err(pkcs8_err)
        } else {
            Err(KeyError::UnsupportedKeyAlgorithm(format!("EC curve {curve}")))
        }
    } else if oid == PKCS8_ED25519_OID {
        ed25519_dalek::SigningKey::from_pkcs8_der(der)
            .map(PrivateKey::Ed25519)
            .map_err(|e| KeyError::InvalidPkcs8(e.to_string()))
    } else if oid == PKCS8_RSA_OID {
        RsaPrivateKey::from_pkcs8_der(der)
            .map(|key| PrivateKey::Rsa(Box::new(key)))
            .map_err(pkcs8_err)
    } else {
        Err(KeyError::UnsupportedKeyAlgorithm(oid.to_string()))
    }
}

fn parse_pkcs1_private_key(der: &[u8]) -> Result<PrivateKey, KeyError> {
    RsaPrivateKey::from_pkcs1_der(der)
        .map(|key| PrivateKey::Rsa(Box::new(key)))
        .map_err(|e| KeyError::InvalidPkcs1(e.to_string()))
}

fn parse_pkcs1_public_key(der: &[u8]) -> Result<PublicKey, KeyError> {
    let key =
        RsaPublicKey::from_pkcs1_der(der).map_err(|e| KeyError::InvalidPkcs1(e.to_string()))?;

    let doc = key
        .to_public_key_der()
        .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;

    Ok(PublicKey(doc.as_bytes().to_vec()))
}

fn parse_pkix_public_key(der: &[u8]) -> Result<PublicKey, KeyError> {
    let (rem, spki) = SubjectPublicKeyInfo::from_der(der)
        .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;

    if !rem.is_empty() {
        return Err(KeyError::InvalidPublicKey(
            "trailing data after SubjectPublicKeyInfo".to_string(),
        ));
    }

    let alg = &spki.algorithm.algorithm;
    if *alg != EC_PUBLICKEY_OID && *alg != ED25519_OID && *alg != RSA_OID {
        return Err(KeyError::UnsupportedKeyAlgorithm(alg.to_id_string()));
    }

    Ok(PublicKey(der.to_vec()))
}

/// Describes errors that can occur while parsing key material.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum KeyError {
    /// The PEM wrapper could not be decoded.
    #[error("invalid PEM ({0})")]
    InvalidPem(String),

    /// No private key block was found.
    #[error("no private key found")]
    NoPrivateKey,

    /// No public key block was found.
    #[error("no public key found")]
    NoPublicKey,

    /// The data is not a SEC1 EC private key on a supported curve.
    #[error("invalid EC private key ({0})")]
    InvalidEcPrivateKey(String),

    /// The data is not a usable PKCS #8 private key.
    #[error("invalid PKCS8 private key ({0})")]
    InvalidPkcs8(String),

    /// The data is not a PKCS #1 RSA key.
    #[error("invalid PKCS1 RSA key ({0})")]
    InvalidPkcs1(String),

    /// The data is not a usable `SubjectPublicKeyInfo`.
    #[error("invalid public key ({0})")]
    InvalidPublicKey(String),

    /// The key uses an algorithm this crate cannot sign or verify with.
    #[error("unsupported key algorithm ({0})")]
    UnsupportedKeyAlgorithm(String),
}

impl KeyError {
    /// Return the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPem(_) => ErrorKind::Format,
            Self::UnsupportedKeyAlgorithm(_) => ErrorKind::Algorithm,
            _ => ErrorKind::Key,
        }
    }
}
