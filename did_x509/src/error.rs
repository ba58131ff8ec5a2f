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

use thiserror::Error;

use sign1_crypto::{
    cert_chain::CertificateChainError, cert_trust::CertificateTrustError, ErrorKind,
};

/// Describes errors that can occur while building or resolving a `did:x509`
/// identifier.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum DidX509Error {
    /// The certificate chain could not be decoded.
    #[error(transparent)]
    CertificateChainError(#[from] CertificateChainError),

    /// The certificate chain did not verify.
    #[error(transparent)]
    CertificateTrustError(#[from] CertificateTrustError),

    /// A `did:x509` identifier needs a leaf and at least one CA certificate.
    #[error("certificate chain too short; at least 2 certificates are required")]
    ChainTooShort,

    /// The fingerprint index does not name a non-leaf certificate.
    #[error("fingerprint index {index} out of bounds for a chain of {len} certificates")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,

        /// Number of certificates in the chain.
        len: usize,
    },

    /// The identifier is not a well-formed `did:x509` string.
    #[error("invalid DID ({0})")]
    InvalidDid(String),

    /// The DID method is not `x509`.
    #[error("unsupported DID method ({0})")]
    UnsupportedMethod(String),

    /// The `did:x509` version is not `0`.
    #[error("unsupported did:x509 version ({0})")]
    UnsupportedVersion(String),

    /// The fingerprint hash algorithm is not one of SHA-256/384/512.
    #[error("unsupported fingerprint algorithm ({0})")]
    UnsupportedFingerprintAlgorithm(String),

    /// No CA certificate in the chain has the identifier's fingerprint.
    #[error("unexpected certificate fingerprint")]
    UnexpectedFingerprint,

    /// A policy clause is malformed.
    #[error("invalid policy ({0})")]
    InvalidPolicy(String),

    /// A policy clause names an unknown policy.
    #[error("unsupported policy ({0})")]
    UnsupportedPolicy(String),

    /// A `subject` clause names the same field twice.
    #[error("duplicate field '{0}'")]
    DuplicateField(String),

    /// A `subject` field does not match the leaf certificate.
    #[error("subject field {key} does not match '{value}'")]
    SubjectMismatch {
        /// The subject key from the policy.
        key: String,

        /// The unescaped value the policy expects.
        value: String,
    },

    /// A `san` clause names an unknown SAN type.
    #[error("unsupported SAN type ({0})")]
    UnsupportedSanType(String),

    /// The leaf has no matching subject alternative name.
    #[error("SAN not found ({0})")]
    SanNotFound(String),

    /// An OID in a policy clause is not in dotted decimal form.
    #[error("invalid OID ({0})")]
    InvalidOid(String),

    /// The leaf does not carry the requested extended key usage.
    #[error("EKU not found ({0})")]
    EkuNotFound(String),

    /// The leaf's Fulcio issuer extension does not match.
    #[error("Fulcio issuer not found ({0})")]
    IssuerNotFound(String),

    /// A percent-escaped value is malformed.
    #[error("invalid escape sequence in '{0}'")]
    InvalidEscape(String),

    /// The leaf's key usage allows neither digital signatures nor key
    /// agreement.
    #[error("leaf certificate key usage must include digital signature or key agreement")]
    IncompatibleKeyUsage,

    /// The leaf public key cannot be expressed as a JSON Web Key.
    #[error("unsupported leaf public key ({0})")]
    UnsupportedPublicKey(String),

    /// The DID document could not be serialized.
    #[error("unable to serialize DID document ({0})")]
    JsonError(String),
}

impl DidX509Error {
    /// Return the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CertificateChainError(err) => err.kind(),
            Self::CertificateTrustError(err) => err.kind(),

            Self::ChainTooShort | Self::IndexOutOfBounds { .. } => ErrorKind::Chain,

            Self::InvalidDid(_)
            | Self::UnsupportedMethod(_)
            | Self::UnsupportedVersion(_)
            | Self::InvalidEscape(_)
            | Self::JsonError(_) => ErrorKind::Format,

            Self::UnsupportedFingerprintAlgorithm(_) => ErrorKind::Algorithm,

            Self::UnexpectedFingerprint
            | Self::InvalidPolicy(_)
            | Self::UnsupportedPolicy(_)
            | Self::DuplicateField(_)
            | Self::SubjectMismatch { .. }
            | Self::UnsupportedSanType(_)
            | Self::SanNotFound(_)
            | Self::InvalidOid(_)
            | Self::EkuNotFound(_)
            | Self::IssuerNotFound(_)
            | Self::IncompatibleKeyUsage => ErrorKind::Policy,

            Self::UnsupportedPublicKey(_) => ErrorKind::Key,
        }
    }
}
