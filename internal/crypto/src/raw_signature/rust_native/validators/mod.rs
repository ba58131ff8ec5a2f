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

//! This module binds Rust native logic for validating raw signatures to this
//! crate's [`RawSignatureValidator`] trait.

use x509_parser::oid_registry::Oid;

use crate::raw_signature::{oids::*, RawSignatureValidator, SigningAlg};

mod ecdsa_validator;
pub(crate) use ecdsa_validator::EcdsaValidator;

mod ed25519_validator;
pub(crate) use ed25519_validator::Ed25519Validator;

mod rsa_legacy_validator;
pub(crate) use rsa_legacy_validator::RsaLegacyValidator;

mod rsa_validator;
pub(crate) use rsa_validator::RsaValidator;

/// Return a validator for the given signing algorithm.
pub(crate) fn validator_for_signing_alg(alg: SigningAlg) -> Option<Box<dyn RawSignatureValidator>> {
    match alg {
        SigningAlg::Ed25519 => Some(Box::new(Ed25519Validator {})),
        SigningAlg::Ps256 => Some(Box::new(RsaValidator::Ps256)),
        SigningAlg::Ps384 => Some(Box::new(RsaValidator::Ps384)),
        SigningAlg::Ps512 => Some(Box::new(RsaValidator::Ps512)),
        SigningAlg::Es256 => Some(Box::new(EcdsaValidator::Es256)),
        SigningAlg::Es384 => Some(Box::new(EcdsaValidator::Es384)),
        SigningAlg::Es512 => Some(Box::new(EcdsaValidator::Es512)),
    }
}

/// Select validator based on signature algorithm and hash algorithm.
///
/// For PKCS #1 v1.5 signatures `sig_alg` is the plain `rsaEncryption` OID. For
/// RSASSA-PSS `hash_alg` is the hash named in the PSS parameters.
pub(crate) fn validator_for_sig_and_hash_algs(
    sig_alg: &Oid,
    hash_alg: &Oid,
) -> Option<Box<dyn RawSignatureValidator>> {
    // Handle legacy RSA.
    if *sig_alg == RSA_OID {
        if *hash_alg == SHA256_OID {
            return Some(Box::new(RsaLegacyValidator::Rsa256));
        } else if *hash_alg == SHA384_OID {
            return Some(Box::new(RsaLegacyValidator::Rsa384));
        } else if *hash_alg == SHA512_OID {
            return Some(Box::new(RsaLegacyValidator::Rsa512));
        }
    }

    // Handle RSA-PSS.
    if *sig_alg == RSA_PSS_OID {
        if *hash_alg == SHA256_OID {
            return Some(Box::new(RsaValidator::Ps256));
        } else if *hash_alg == SHA384_OID {
            return Some(Box::new(RsaValidator::Ps384));
        } else if *hash_alg == SHA512_OID {
            return Some(Box::new(RsaValidator::Ps512));
        }
    }

    // Handle elliptical curve and hash combinations.
    if *sig_alg == ECDSA_WITH_SHA256_OID {
        return Some(Box::new(EcdsaValidator::Es256));
    } else if *sig_alg == ECDSA_WITH_SHA384_OID {
        return Some(Box::new(EcdsaValidator::Es384));
    } else if *sig_alg == ECDSA_WITH_SHA512_OID {
        return Some(Box::new(EcdsaValidator::Es512));
    }

    if *sig_alg == ED25519_OID {
        return Some(Box::new(Ed25519Validator {}));
    }

    None
}
