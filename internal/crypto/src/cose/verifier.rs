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

use coset::{CborSerializable, CoseSign1, TaggedCborSerializable};
use log::{debug, info};

use crate::{
    base64,
    cert_chain::{Certificate, CertificateChain},
    cert_trust::verify_certificate_chain,
    cose::{CoseError, Sign1Headers},
    ec_utils::ec_curve_from_public_key_der,
    raw_signature::{keys::PublicKey, validator_for_signing_alg, RawSignatureValidationError},
    SigningAlg,
};

// First byte of a CBOR item carrying tag 18 (COSE_Sign1).
const COSE_SIGN1_TAG_BYTE: u8 = 0xd2;

/// A claims document that has been decoded but not verified.
#[derive(Clone, Debug)]
pub struct DecodedCoseSign1 {
    /// The protected header fields.
    pub headers: Sign1Headers,

    /// The embedded payload, if any.
    pub payload: Option<Vec<u8>>,

    /// The raw signature.
    pub signature: Vec<u8>,

    sign1: CoseSign1,
}

impl DecodedCoseSign1 {
    /// Return the `Sig_structure` bytes covered by the signature.
    ///
    /// The protected header is used exactly as it was encoded.
    pub fn tbs_data(&self) -> Vec<u8> {
        self.sign1.tbs_data(b"")
    }
}

/// Decode a claims document without verifying anything but its structure.
///
/// Both tagged (tag 18) and untagged COSE_Sign1 encodings are accepted.
pub fn decode_cose_sign1(cose_bytes: &[u8]) -> Result<DecodedCoseSign1, CoseError> {
    let sign1 = if cose_bytes.first() == Some(&COSE_SIGN1_TAG_BYTE) {
        CoseSign1::from_tagged_slice(cose_bytes)
    } else {
        CoseSign1::from_slice(cose_bytes)
    }
    .map_err(|e| CoseError::CborParsingError(e.to_string()))?;

    let headers = Sign1Headers::from_header(&sign1.protected.header)?;

    Ok(DecodedCoseSign1 {
        headers,
        payload: sign1.payload.clone(),
        signature: sign1.signature.clone(),
        sign1,
    })
}

/// Return the certificate chain embedded in a claims document as
/// concatenated single-line PEM blocks, without verifying anything.
pub fn print_chain(cose_bytes: &[u8]) -> Result<String, CoseError> {
    let decoded = decode_cose_sign1(cose_bytes)?;
    let chain = CertificateChain::from_der_list(&decoded.headers.x5chain.to_der_list())?;
    Ok(chain.to_pem())
}

/// The verified contents of a claims document.
///
/// Only [`Verifier::verify_signature`] constructs this type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnpackedCoseSign1 {
    /// Value of the `iss` header, if present.
    pub issuer: Option<String>,

    /// Value of the `feed` header, if present.
    pub feed: Option<String>,

    /// Payload content type.
    pub content_type: String,

    /// The embedded payload.
    pub payload: Vec<u8>,

    /// Base64 of the leaf certificate's `SubjectPublicKeyInfo`.
    pub leaf_public_key_b64: String,

    /// Base64 of the leaf certificate.
    pub leaf_cert_b64: String,

    /// The embedded chain as concatenated single-line PEM blocks.
    pub chain_pem: String,

    /// The embedded chain, leaf first.
    pub cert_chain: CertificateChain,

    /// The signing algorithm.
    pub alg: SigningAlg,
}

/// A `Verifier` checks a claims document's certificate chain and signature.
///
/// By default the last certificate of the embedded chain is the only trust
/// anchor, the signature is checked with the leaf certificate's key, and
/// certificates must be valid now.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verifier<'a> {
    trusted_roots: Option<&'a [Certificate]>,
    public_key: Option<&'a PublicKey>,
    ignore_expiry: bool,
}

impl<'a> Verifier<'a> {
    /// Create a verifier with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `roots` instead of the chain's last certificate as trust anchors.
    ///
    /// The embedded chain may then omit its root.
    pub fn with_trusted_roots(mut self, roots: &'a [Certificate]) -> Self {
        self.trusted_roots = Some(roots);
        self
    }

    /// Check the signature with `public_key` instead of the leaf's key.
    pub fn with_public_key(mut self, public_key: &'a PublicKey) -> Self {
        self.public_key = Some(public_key);
        self
    }

    /// Check validity windows at the leaf's `notAfter` time instead of now.
    pub fn with_ignore_expiry(mut self, ignore_expiry: bool) -> Self {
        self.ignore_expiry = ignore_expiry;
        self
    }

    /// Decode and verify a claims document.
    pub fn verify_signature(&self, cose_bytes: &[u8]) -> Result<UnpackedCoseSign1, CoseError> {
        let decoded = decode_cose_sign1(cose_bytes)?;
        let alg = decoded.headers.alg;

        let chain = CertificateChain::from_der_list(&decoded.headers.x5chain.to_der_list())?;

        let paths = verify_certificate_chain(&chain, self.trusted_roots, self.ignore_expiry)?;
        debug!("certificate chain verified; {} path(s)", paths.len());

        let content_type = decoded
            .headers
            .content_type
            .clone()
            .ok_or(CoseError::ContentTypeMissing)?;

        let payload = decoded.payload.clone().ok_or(CoseError::MissingPayload)?;

        let leaf_spki = chain.leaf().public_key_der()?;

        let spki = match self.public_key {
            Some(public_key) => public_key.as_spki_der().to_vec(),
            None => leaf_spki.clone(),
        };

        // COSE requires the fixed-width P1363 form for ECDSA signatures.
        if alg.is_ecdsa() {
            if let Some(curve) = ec_curve_from_public_key_der(&spki) {
                if decoded.signature.len() != curve.p1363_sig_len() {
                    return Err(CoseError::InvalidEcdsaSignature);
                }
            }
        }

        let validator = validator_for_signing_alg(alg)
            .ok_or(RawSignatureValidationError::UnsupportedAlgorithm)?;

        validator.validate(&decoded.signature, &decoded.tbs_data(), &spki)?;

        info!("{alg} signature verified for {}", chain.leaf().subject());

        Ok(UnpackedCoseSign1 {
            issuer: decoded.headers.issuer,
            feed: decoded.headers.feed,
            content_type,
            payload,
            leaf_public_key_b64: base64::encode(&leaf_spki),
            leaf_cert_b64: chain.leaf().to_base64(),
            chain_pem: chain.to_pem(),
            cert_chain: chain,
            alg,
        })
    }
}
