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

use ed25519_dalek::{Signer, SigningKey};

use crate::raw_signature::{RawSigner, RawSignerError, SigningAlg};

// Ed25519 is deterministic, so the salt setting has no effect here.
pub(crate) struct Ed25519Signer {
    cert_chain: Vec<Vec<u8>>,
    signing_key: SigningKey,
}

impl Ed25519Signer {
    pub(crate) fn new(signing_key: SigningKey, cert_chain: Vec<Vec<u8>>) -> Self {
        Self {
            cert_chain,
            signing_key,
        }
    }
}

impl RawSigner for Ed25519Signer {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, RawSignerError> {
        let signature = self.signing_key.sign(data);
        Ok(signature.to_bytes().to_vec())
    }

    fn alg(&self) -> SigningAlg {
        SigningAlg::Ed25519
    }

    fn cert_chain(&self) -> Result<Vec<Vec<u8>>, RawSignerError> {
        Ok(self.cert_chain.clone())
    }
}
