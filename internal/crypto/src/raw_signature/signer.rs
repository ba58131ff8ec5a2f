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

use log::warn;
use thiserror::Error;

use crate::{
    cert_chain::{CertificateChain, CertificateChainError},
    raw_signature::{
        keys::{parse_private_key_pem, KeyError},
        rust_native, Salt,
    },
    ErrorKind, SigningAlg,
};

/// Implementations of the `RawSigner` trait generate a cryptographic signature
/// over an arbitrary byte array.
pub trait RawSigner {
    /// Return a raw signature over the original byte slice.
    ///
    /// ECDSA signatures are returned in the fixed-width P1363 `r | s` form.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, RawSignerError>;

    /// Return the algorithm implemented by this signer.
    fn alg(&self) -> SigningAlg;

    /// Return the signing certificate chain.
    ///
    /// Each certificate is encoded in DER format and sequenced from
    /// end-entity certificate to the outermost certificate authority.
    fn cert_chain(&self) -> Result<Vec<Vec<u8>>, RawSignerError>;
}

/// Return a built-in [`RawSigner`] instance using the provided PEM-encoded
/// certificate chain and PEM-wrapped private key.
///
/// The private key may be a SEC1 EC key, a PKCS #8 key, or a PKCS #1 RSA key.
/// Returns an error if the key type cannot produce `alg` signatures. A key
/// that does not match the leaf certificate is accepted with a warning, since
/// verification will reject the resulting document anyway.
pub fn signer_from_cert_chain_and_private_key(
    cert_chain: &[u8],
    private_key: &[u8],
    alg: SigningAlg,
    salt: Salt,
) -> Result<Box<dyn RawSigner>, RawSignerError> {
    let chain = CertificateChain::from_pem(cert_chain)?;
    let key = parse_private_key_pem(private_key)?;

    match (key.public_key(), chain.leaf().public_key_der()) {
        (Ok(key_spki), Ok(leaf_spki)) if key_spki.as_spki_der() != leaf_spki.as_slice() => {
            warn!(
                "private key does not match the public key of {}",
                chain.leaf().subject()
            );
        }
        _ => (),
    }

    rust_native::signers::signer_from_private_key(key, chain.to_der(), alg, salt)
}

/// Describes errors that can be identified when generating a raw signature.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum RawSignerError {
    /// The private key is of a type that cannot produce signatures for the
    /// requested algorithm.
    #[error("{key_type} key cannot be used for {alg} signatures")]
    AlgorithmMismatch {
        /// The requested algorithm.
        alg: SigningAlg,

        /// The type of the private key supplied.
        key_type: &'static str,
    },

    /// The signing certificate chain is unusable.
    #[error(transparent)]
    CertificateChainError(#[from] CertificateChainError),

    /// The private key is unusable.
    #[error(transparent)]
    KeyError(#[from] KeyError),

    /// The signing credentials are invalid for another reason.
    #[error("invalid signing credentials ({0})")]
    InvalidSigningCredentials(String),

    /// An unexpected internal error occured while generating the signature.
    #[error("internal error ({0})")]
    InternalError(String),
}

impl RawSignerError {
    /// Return the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlgorithmMismatch { .. } => ErrorKind::Algorithm,
            Self::CertificateChainError(err) => err.kind(),
            Self::KeyError(err) => err.kind(),
            Self::InvalidSigningCredentials(_) | Self::InternalError(_) => ErrorKind::Key,
        }
    }
}
