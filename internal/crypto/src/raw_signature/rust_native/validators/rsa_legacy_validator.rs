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
    pkcs1v15::{Signature, VerifyingKey},
    signature::Verifier,
};
use sha2::{Sha256, Sha384, Sha512};

use super::rsa_validator::rsa_public_key;
use crate::raw_signature::{RawSignatureValidationError, RawSignatureValidator};

/// An `RsaLegacyValidator` can validate PKCS #1 v1.5 RSA signatures. These
/// never appear in COSE_Sign1 documents but are common on X.509 certificates.
pub(crate) enum RsaLegacyValidator {
    Rsa256,
    Rsa384,
    Rsa512,
}

impl RawSignatureValidator for RsaLegacyValidator {
    fn validate(
        &self,
        sig: &[u8],
        data: &[u8],
        public_key: &[u8],
    ) -> Result<(), RawSignatureValidationError> {
        let signature = Signature::try_from(sig)
            .map_err(|_| RawSignatureValidationError::InvalidSignature)?;

        let public_key = rsa_public_key(public_key)?;

        let result = match self {
            Self::Rsa256 => VerifyingKey::<Sha256>::new(public_key).verify(data, &signature),
            Self::Rsa384 => VerifyingKey::<Sha384>::new(public_key).verify(data, &signature),
            Self::Rsa512 => VerifyingKey::<Sha512>::new(public_key).verify(data, &signature),
        };

        result.map_err(|_| RawSignatureValidationError::SignatureMismatch)
    }
}
