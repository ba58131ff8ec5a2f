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

use std::fmt;

use log::debug;
use sign1_crypto::{
    cert_chain::{Certificate, CertificateChain},
    cert_trust::verify_certificate_chain,
};
use x509_parser::certificate::X509Certificate;

use crate::{did::fingerprint, DidDocument, DidX509, DidX509Error, Jwk};

/// Steps of a resolution, in order. A failure at any step ends resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolveStage {
    /// The chain and the DID string have been parsed.
    Parsed,

    /// The chain verifies with its last certificate as the trust anchor.
    ChainVerified,

    /// The fingerprint names a CA certificate on every verified path.
    FingerprintChecked,

    /// Every policy holds for the leaf.
    PolicyEvaluated,

    /// The DID document has been built.
    DocumentBuilt,
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parsed => "parsed",
            Self::ChainVerified => "chain verified",
            Self::FingerprintChecked => "fingerprint checked",
            Self::PolicyEvaluated => "policy evaluated",
            Self::DocumentBuilt => "document built",
        })
    }
}

/// Resolve `did` against the PEM certificate chain `chain_pem`.
///
/// The chain (leaf first) is verified with its last certificate as the only
/// trust anchor. With `ignore_expiry` set, validity is checked at the leaf's
/// `notAfter` time, so an expired chain still resolves.
pub fn resolve(
    chain_pem: &[u8],
    did: &str,
    ignore_expiry: bool,
) -> Result<DidDocument, DidX509Error> {
    let chain = CertificateChain::from_pem(chain_pem)?;
    let parsed: DidX509 = did.parse()?;
    reached(ResolveStage::Parsed);

    if chain.as_slice().len() < 2 {
        return Err(DidX509Error::ChainTooShort);
    }

    let paths = verify_certificate_chain(&chain, None, ignore_expiry)?;
    reached(ResolveStage::ChainVerified);

    for path in &paths {
        check_fingerprint(&parsed, &path.as_slice()[1..])?;
    }
    reached(ResolveStage::FingerprintChecked);

    for path in &paths {
        let leaf = x509(path.leaf())?;
        for policy in &parsed.policies {
            policy.evaluate(&leaf)?;
        }
    }
    reached(ResolveStage::PolicyEvaluated);

    let document = build_document(did, &x509(chain.leaf())?)?;
    reached(ResolveStage::DocumentBuilt);

    Ok(document)
}

fn reached(stage: ResolveStage) {
    debug!("did:x509 resolution: {stage}");
}

fn x509(cert: &Certificate) -> Result<X509Certificate<'_>, DidX509Error> {
    Ok(cert.x509()?)
}

fn check_fingerprint(did: &DidX509, ca_certs: &[Certificate]) -> Result<(), DidX509Error> {
    if ca_certs
        .iter()
        .any(|cert| fingerprint(did.fingerprint_alg, cert.as_der()) == did.fingerprint)
    {
        Ok(())
    } else {
        Err(DidX509Error::UnexpectedFingerprint)
    }
}

fn build_document(did: &str, leaf: &X509Certificate) -> Result<DidDocument, DidX509Error> {
    let (assertion_method, key_agreement) = match leaf.key_usage() {
        Ok(Some(ku)) => (ku.value.digital_signature(), ku.value.key_agreement()),
        _ => (true, true),
    };

    if !assertion_method && !key_agreement {
        return Err(DidX509Error::IncompatibleKeyUsage);
    }

    let jwk = Jwk::from_spki(leaf.public_key())?;

    Ok(DidDocument::new(did, jwk, assertion_method, key_agreement))
}
