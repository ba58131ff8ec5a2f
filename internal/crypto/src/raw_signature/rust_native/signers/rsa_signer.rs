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

use rsa::{
    pss::SigningKey,
    signature::{RandomizedSigner, SignatureEncoding},
    RsaPrivateKey,
};
use sha2::{Sha256, Sha384, Sha512};

use crate::raw_signature::{RawSigner, RawSignerError, Salt, SigningAlg};

enum RsaSigningAlg {
    Ps256,
    Ps384,
    Ps512,
}

pub(crate) struct RsaSigner {
    alg: RsaSigningAlg,
    cert_chain: Vec<Vec<u8>>,
    private_key: RsaPrivateKey,
    salt: Salt,
}

impl RsaSigner {
    pub(crate) fn new(
        private_key: RsaPrivateKey,
        alg: SigningAlg,
        cert_chain: Vec<Vec<u8>>,
        salt: Salt,
    ) -> Result<Self, RawSignerError> {
        let alg = match alg {
            SigningAlg::Ps256 => RsaSigningAlg::Ps256,
            SigningAlg::Ps384 => RsaSigningAlg::Ps384,
            SigningAlg::Ps512 => RsaSigningAlg::Ps512,
            _ => {
                return Err(RawSignerError::InternalError(
                    "RsaSigner should be used only for SigningAlg::Ps***".to_string(),
                ));
            }
        };

        Ok(Self {
            alg,
            cert_chain,
            private_key,
            salt,
        })
    }
}

impl RawSigner for RsaSigner {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, RawSignerError> {
        // Supplies both the PSS salt and the blinding factor.
        let mut rng = self.salt.rng();

        let sig = match self.alg {
            RsaSigningAlg::Ps256 => SigningKey::<Sha256>::new(self.private_key.clone())
                .try_sign_with_rng(&mut rng, data)
                .map(|sig| sig.to_vec()),

            RsaSigningAlg::Ps384 => SigningKey::<Sha384>::new(self.private_key.clone())
                .try_sign_with_rng(&mut rng, data)
                .map(|sig| sig.to_vec()),

            RsaSigningAlg::Ps512 => SigningKey::<Sha512>::new(self.private_key.clone())
                .try_sign_with_rng(&mut rng, data)
                .map(|sig| sig.to_vec()),
        };

        sig.map_err(|e| RawSignerError::InternalError(e.to_string()))
    }

    fn alg(&self) -> SigningAlg {
        match self.alg {
            RsaSigningAlg::Ps256 => SigningAlg::Ps256,
            RsaSigningAlg::Ps384 => SigningAlg::Ps384,
            RsaSigningAlg::Ps512 => SigningAlg::Ps512,
        }
    }

    fn cert_chain(&self) -> Result<Vec<Vec<u8>>, RawSignerError> {
        Ok(self.cert_chain.clone())
    }
}
