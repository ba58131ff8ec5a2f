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

//! Utilities for working with the EC signatures used in ECDSA COSE
//! signatures.

use asn1_rs::FromDer;
use x509_parser::{
    der_parser::{
        der::{parse_der_integer, parse_der_sequence_defined_g},
        error::BerResult,
    },
    x509::SubjectPublicKeyInfo,
};

use crate::raw_signature::{
    oids::{EC_PUBLICKEY_OID, PRIME256V1_OID, SECP384R1_OID, SECP521R1_OID},
    RawSignatureValidationError,
};

/// NIST curves supported by `EcdsaValidator`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EcdsaCurve {
    /// NIST curve P-256
    P256,

    /// NIST curve P-384
    P384,

    /// NIST curve P-521
    P521,
}

impl EcdsaCurve {
    // Returns the P1363 r|s signature size for a given curve.
    pub(crate) fn p1363_sig_len(&self) -> usize {
        match self {
            EcdsaCurve::P256 => 64,
            EcdsaCurve::P384 => 96,
            EcdsaCurve::P521 => 132,
        }
    }
}

/// Parse an ASN.1 DER `ECDSA-Sig-Value` into its `r` and `s` components.
pub(crate) fn parse_ec_der_sig(data: &[u8]) -> BerResult<EcSigComps> {
    parse_der_sequence_defined_g(|content: &[u8], _| {
        let (rem1, r) = parse_der_integer(content)?;
        let (rem2, s) = parse_der_integer(rem1)?;

        Ok((
            rem2,
            EcSigComps {
                r: r.as_slice()?,
                s: s.as_slice()?,
            },
        ))
    })(data)
}

pub(crate) struct EcSigComps<'a> {
    pub r: &'a [u8],
    pub s: &'a [u8],
}

/// Return the fixed-width P1363 form of `sig` for `curve`.
///
/// A signature that already has the P1363 length is returned unchanged,
/// even when its bytes also parse as DER. Anything else is converted from
/// DER if possible and otherwise returned as is.
pub(crate) fn normalize_ec_signature(sig: &[u8], curve: EcdsaCurve) -> Vec<u8> {
    if sig.len() == curve.p1363_sig_len() {
        return sig.to_vec();
    }

    der_to_p1363(sig, curve.p1363_sig_len()).unwrap_or_else(|_| sig.to_vec())
}

/// Convert a DER-encoded ECDSA signature to the fixed-width P1363 `r | s`
/// form with a total length of `sig_len` bytes.
pub(crate) fn der_to_p1363(
    data: &[u8],
    sig_len: usize,
) -> Result<Vec<u8>, RawSignatureValidationError> {
    if ![64usize, 96, 132].contains(&sig_len) {
        return Err(RawSignatureValidationError::UnsupportedAlgorithm);
    }

    let (rem, p) =
        parse_ec_der_sig(data).map_err(|_| RawSignatureValidationError::InvalidSignature)?;

    if !rem.is_empty() {
        return Err(RawSignatureValidationError::InvalidSignature);
    }

    let width = sig_len / 2;

    let mut p1363 = Vec::with_capacity(sig_len);
    p1363.extend(fixed_width(p.r, width)?);
    p1363.extend(fixed_width(p.s, width)?);

    Ok(p1363)
}

fn fixed_width(component: &[u8], width: usize) -> Result<Vec<u8>, RawSignatureValidationError> {
    let first_nonzero = component
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(component.len());
    let trimmed = &component[first_nonzero..];

    if trimmed.len() > width {
        return Err(RawSignatureValidationError::InvalidSignature);
    }

    let mut out = vec![0u8; width - trimmed.len()];
    out.extend_from_slice(trimmed);
    Ok(out)
}

// Returns supported EcdsaCurve for given public key.
pub(crate) fn ec_curve_from_public_key_der(public_key: &[u8]) -> Option<EcdsaCurve> {
    let (_, pk) = SubjectPublicKeyInfo::from_der(public_key).ok()?;

    let public_key_alg = &pk.algorithm;

    if public_key_alg.algorithm == EC_PUBLICKEY_OID {
        if let Some(parameters) = &public_key_alg.parameters {
            let named_curve_oid = parameters.as_oid().ok()?;

            // Find supported curve.
            if named_curve_oid == PRIME256V1_OID {
                return Some(EcdsaCurve::P256);
            } else if named_curve_oid == SECP384R1_OID {
                return Some(EcdsaCurve::P384);
            } else if named_curve_oid == SECP521R1_OID {
                return Some(EcdsaCurve::P521);
            }
        }
    }

    None
}
