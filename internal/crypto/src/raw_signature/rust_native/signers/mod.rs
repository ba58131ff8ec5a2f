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

//! This module binds Rust native logic for generating raw signatures to this
//! crate's [`RawSigner`] trait.

use crate::raw_signature::{
    keys::PrivateKey, RawSigner, RawSignerError, Salt, SigningAlg,
};

mod ecdsa_signer;
use ecdsa_signer::EcdsaSigner;

mod ed25519_signer;
use ed25519_signer::Ed25519Signer;

mod rsa_signer;
use rsa_signer::RsaSigner;

/// Return a [`RawSigner`] for an already parsed private key.
///
/// `cert_chain` is the DER encoding of each certificate, leaf first.
pub(crate) fn signer_from_private_key(
    key: PrivateKey,
    cert_chain: Vec<Vec<u8>>,
    alg: SigningAlg,
    salt: Salt,
) -> Result<Box<dyn RawSigner>, RawSignerError> {
    if !key.supports(alg) {
        return Err(RawSignerError::AlgorithmMismatch {
            alg,
            key_type: key.key_type(),
        });
    }

    Ok(match key {
        PrivateKey::P256(key) => Box::new(EcdsaSigner::new(
            ecdsa_signer::EcdsaSigningKey::Es256(key.into()),
            cert_chain,
            salt,
        )),
        PrivateKey::P384(key) => Box::new(EcdsaSigner::new(
            ecdsa_signer::EcdsaSigningKey::Es384(key.into()),
            cert_chain,
            salt,
        )),
        PrivateKey::P521(key) => Box::new(EcdsaSigner::new(
            ecdsa_signer::EcdsaSigningKey::Es512(key.into()),
            cert_chain,
            salt,
        )),
        PrivateKey::Ed25519(key) => Box::new(Ed25519Signer::new(key, cert_chain)),
        PrivateKey::Rsa(key) => Box::new(RsaSigner::new(*key, alg, cert_chain, salt)?),
    })
}
