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

use ecdsa::signature::RandomizedSigner;
use p256::ecdsa::{Signature as P256Signature, SigningKey as P256SigningKey};
use p384::ecdsa::{Signature as P384Signature, SigningKey as P384SigningKey};
use p521::{ecdsa::Signature as P521Signature, NistP521};

use crate::raw_signature::{RawSigner, RawSignerError, Salt, SigningAlg};

// Signing keys for each curve are different types.
pub(crate) enum EcdsaSigningKey {
    Es256(P256SigningKey),
    Es384(P384SigningKey),
    // The generic key, since `p521::ecdsa::SigningKey` ignores the caller's RNG.
    Es512(ecdsa::SigningKey<NistP521>),
}

pub(crate) struct EcdsaSigner {
    cert_chain: Vec<Vec<u8>>,
    signing_key: EcdsaSigningKey,
    salt: Salt,
}

impl EcdsaSigner {
    pub(crate) fn new(signing_key: EcdsaSigningKey, cert_chain: Vec<Vec<u8>>, salt: Salt) -> Self {
        Self {
            cert_chain,
            signing_key,
            salt,
        }
    }
}

impl RawSigner for EcdsaSigner {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, RawSignerError> {
        // RFC 6979 nonces, with the salt stream mixed in as added entropy.
        let mut rng = self.salt.rng();

        match self.signing_key {
            EcdsaSigningKey::Es256(ref key) => {
                let signature: P256Signature = key
                    .try_sign_with_rng(&mut rng, data)
                    .map_err(|e| RawSignerError::InternalError(e.to_string()))?;
                Ok(signature.to_vec())
            }
            EcdsaSigningKey::Es384(ref key) => {
                let signature: P384Signature = key
                    .try_sign_with_rng(&mut rng, data)
                    .map_err(|e| RawSignerError::InternalError(e.to_string()))?;
                Ok(signature.to_vec())
            }
            EcdsaSigningKey::Es512(ref key) => {
                let signature: P521Signature = key
                    .try_sign_with_rng(&mut rng, data)
                    .map_err(|e| RawSignerError::InternalError(e.to_string()))?;
                Ok(signature.to_vec())
            }
        }
    }

    fn alg(&self) -> SigningAlg {
        match self.signing_key {
            EcdsaSigningKey::Es256(_) => SigningAlg::Es256,
            EcdsaSigningKey::Es384(_) => SigningAlg::Es384,
            EcdsaSigningKey::Es512(_) => SigningAlg::Es512,
        }
    }

    fn cert_chain(&self) -> Result<Vec<Vec<u8>>, RawSignerError> {
        Ok(self.cert_chain.clone())
    }
}
