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

use crate::{
    cert_chain::CertificateChainError,
    cert_trust::CertificateTrustError,
    raw_signature::{keys::KeyError, RawSignatureValidationError, RawSignerError},
    ErrorKind,
};

/// Describes errors that can occur when processing or generating [COSE]
/// signatures.
///
/// [COSE]: https://datatracker.ietf.org/doc/rfc9052/
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum CoseError {
    /// An error occurred while parsing CBOR.
    #[error("error while parsing CBOR ({0})")]
    CborParsingError(String),

    /// An error occurred while generating CBOR.
    #[error("error while generating CBOR ({0})")]
    CborGenerationError(String),

    /// The protected header has no `alg` value.
    #[error("missing algorithm in protected header")]
    AlgorithmMissing,

    /// The `alg` value is a text label rather than an integer.
    #[error("algorithm in protected header must be an integer")]
    AlgorithmInvalidType,

    /// The `alg` value is not one of the supported signing algorithms.
    #[error("unsupported signing algorithm ({0})")]
    UnsupportedSigningAlgorithm(String),

    /// The protected header has no `x5chain` value.
    #[error("missing x5chain in protected header")]
    ChainMissing,

    /// The `x5chain` value is neither a byte string nor a non-empty array of
    /// byte strings.
    #[error("x5chain must be a byte string or an array of byte strings")]
    ChainInvalidType,

    /// The protected header has no text content type.
    #[error("missing content type in protected header")]
    ContentTypeMissing,

    /// The payload is detached.
    #[error("missing payload")]
    MissingPayload,

    /// An ECDSA signature was DER-encoded instead of the P1363 form COSE
    /// requires.
    #[error("ECDSA signature must be in P1363 format")]
    InvalidEcdsaSignature,

    /// The embedded certificate chain is malformed.
    #[error(transparent)]
    CertificateChainError(#[from] CertificateChainError),

    /// The embedded certificate chain is not trusted.
    #[error(transparent)]
    CertificateTrustError(#[from] CertificateTrustError),

    /// The signature does not verify.
    #[error(transparent)]
    RawSignatureValidationError(#[from] RawSignatureValidationError),

    /// The signature could not be produced.
    #[error(transparent)]
    RawSignerError(#[from] RawSignerError),

    /// A supplied key is unusable.
    #[error(transparent)]
    KeyError(#[from] KeyError),
}

impl CoseError {
    /// Return the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CborParsingError(_) | Self::CborGenerationError(_) | Self::MissingPayload => {
                ErrorKind::Format
            }
            Self::AlgorithmMissing
            | Self::AlgorithmInvalidType
            | Self::UnsupportedSigningAlgorithm(_) => ErrorKind::Algorithm,
            Self::ChainMissing | Self::ChainInvalidType => ErrorKind::Chain,
            Self::ContentTypeMissing => ErrorKind::Format,
            Self::InvalidEcdsaSignature => ErrorKind::Signature,
            Self::CertificateChainError(err) => err.kind(),
            Self::CertificateTrustError(err) => err.kind(),
            Self::RawSignatureValidationError(err) => err.kind(),
            Self::RawSignerError(err) => err.kind(),
            Self::KeyError(err) => err.kind(),
        }
    }
}
