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

//! Positional X.509 path validation.
//!
//! The leaf is `chain[0]`. Unless the caller supplies its own trust anchors,
//! the last certificate of the chain is the only trusted root and every
//! certificate in between forms the intermediate pool. Paths are built from
//! the leaf, through the pool, to a root; every path that validates is
//! returned.

use asn1_rs::{Any, Class, FromDer, Header, Tag};
use log::debug;
use thiserror::Error;
use x509_parser::{
    certificate::X509Certificate, oid_registry::Oid, time::ASN1Time, x509::AlgorithmIdentifier,
};

use crate::{
    cert_chain::{Certificate, CertificateChain, MAX_CHAIN_LEN},
    internal::time,
    raw_signature::{oids::*, validator_for_sig_and_hash_algs},
    ErrorKind,
};

// Bounds on the path search. The pool comes from an untrusted `x5chain`, so
// certificates that share a name and key must not turn the search into an
// enumeration of every permutation.
const MAX_SIGNATURE_CHECKS: usize = 2 * MAX_CHAIN_LEN;
const MAX_PATH_EXTENSIONS: usize = 10 * MAX_CHAIN_LEN;

struct Node<'a> {
    cert: &'a Certificate,
    x509: X509Certificate<'a>,
    is_root: bool,
}

/// Verify `chain` and return every validated path from its leaf to a root.
///
/// `trusted_roots` replaces the chain's own last certificate as the set of
/// trust anchors; every certificate after the leaf then joins the
/// intermediate pool, so a chain that stops short of its root can still
/// reach one of `trusted_roots`. With `ignore_expiry` set, validity windows
/// are checked at the leaf's `notAfter` time instead of the current time,
/// which accepts an expired chain as long as it was consistent when the leaf
/// expired.
///
/// Name constraints and path length constraints are not enforced, and any
/// extended key usage is accepted. The search stops once its signature check
/// or path budget is spent and returns the paths found so far.
pub fn verify_certificate_chain(
    chain: &CertificateChain,
    trusted_roots: Option<&[Certificate]>,
    ignore_expiry: bool,
) -> Result<Vec<CertificateChain>, CertificateTrustError> {
    let (roots, intermediates): (Vec<&Certificate>, &[Certificate]) = match trusted_roots {
        Some(roots) => (roots.iter().collect(), &chain.as_slice()[1..]),
        None => (vec![chain.root()], chain.intermediates()),
    };

    let leaf = chain.leaf();
    let mut pool: Vec<&Certificate> = vec![leaf];

    for cert in intermediates.iter().chain(roots.iter().copied()) {
        if !pool.contains(&cert) {
            pool.push(cert);
        }
    }

    let nodes = pool
        .into_iter()
        .map(|cert| {
            Ok(Node {
                cert,
                x509: cert
                    .x509()
                    .map_err(|e| CertificateTrustError::InvalidCertificate(e.to_string()))?,
                is_root: roots.contains(&cert),
            })
        })
        .collect::<Result<Vec<_>, CertificateTrustError>>()?;

    let at = reference_time(&nodes[0].x509, ignore_expiry)?;

    if !nodes[0].x509.validity().is_valid_at(at) {
        debug!("leaf {} is not valid at {at}", nodes[0].x509.subject());
        return Err(CertificateTrustError::ChainVerificationFailed);
    }

    let mut search = PathSearch::new(&nodes, at);
    search.extend(&mut vec![0]);

    if search.found.is_empty() {
        debug!("no path from {} to a trusted root", nodes[0].x509.subject());
        return Err(CertificateTrustError::ChainVerificationFailed);
    }

    search
        .found
        .into_iter()
        .map(|path| {
            CertificateChain::new(path.into_iter().map(|i| nodes[i].cert.clone()).collect())
                .map_err(|e| CertificateTrustError::InvalidCertificate(e.to_string()))
        })
        .collect()
}

fn reference_time(
    leaf: &X509Certificate,
    ignore_expiry: bool,
) -> Result<ASN1Time, CertificateTrustError> {
    if ignore_expiry {
        return Ok(leaf.validity().not_after);
    }

    ASN1Time::from_timestamp(time::utc_now().timestamp()).map_err(|e| {
        debug!("unable to represent current time: {e}");
        CertificateTrustError::ChainVerificationFailed
    })
}

// Depth-first search over the pool. Each (child, parent) pair is checked at
// most once; `issued_by[child][parent]` caches the outcome.
struct PathSearch<'n, 'a> {
    nodes: &'n [Node<'a>],
    at: ASN1Time,
    issued_by: Vec<Vec<Option<bool>>>,
    signature_checks: usize,
    extensions: usize,
    found: Vec<Vec<usize>>,
}

impl<'n, 'a> PathSearch<'n, 'a> {
    fn new(nodes: &'n [Node<'a>], at: ASN1Time) -> Self {
        Self {
            nodes,
            at,
            issued_by: vec![vec![None; nodes.len()]; nodes.len()],
            signature_checks: 0,
            extensions: 0,
            found: vec![],
        }
    }

    fn budget_spent(&self) -> bool {
        self.signature_checks >= MAX_SIGNATURE_CHECKS || self.extensions >= MAX_PATH_EXTENSIONS
    }

    fn extend(&mut self, path: &mut Vec<usize>) {
        let Some(&current) = path.last() else {
            return;
        };

        if self.nodes[current].is_root {
            self.found.push(path.clone());
            return;
        }

        if path.len() >= MAX_CHAIN_LEN {
            return;
        }

        for candidate in 0..self.nodes.len() {
            if path.contains(&candidate) {
                continue;
            }

            if self.budget_spent() {
                debug!(
                    "path search stopped after {} signature checks and {} extensions",
                    self.signature_checks, self.extensions
                );
                return;
            }

            if self.is_issued_by(current, candidate) {
                self.extensions += 1;
                path.push(candidate);
                self.extend(path);
                path.pop();
            }
        }
    }

    fn is_issued_by(&mut self, child: usize, parent: usize) -> bool {
        if let Some(known) = self.issued_by[child][parent] {
            return known;
        }

        let nodes = self.nodes;
        let child_x509 = &nodes[child].x509;
        let parent_x509 = &nodes[parent].x509;

        // Only pairs that reach the signature check count against the budget.
        let issued = if child_x509.issuer().as_raw() != parent_x509.subject().as_raw() {
            false
        } else {
            self.signature_checks += 1;
            is_issued_by(child_x509, parent_x509, self.at)
        };

        self.issued_by[child][parent] = Some(issued);
        issued
    }
}

fn is_issued_by(child: &X509Certificate, parent: &X509Certificate, at: ASN1Time) -> bool {
    if child.issuer().as_raw() != parent.subject().as_raw() {
        return false;
    }

    if !parent.is_ca() {
        debug!("{} is not a CA certificate", parent.subject());
        return false;
    }

    if !parent.validity().is_valid_at(at) {
        debug!("{} is not valid at {at}", parent.subject());
        return false;
    }

    let Some((sig_alg, hash_alg)) = signature_algs(child) else {
        debug!(
            "unsupported signature algorithm {} on {}",
            child.signature_algorithm.algorithm.to_id_string(),
            child.subject()
        );
        return false;
    };

    let Some(validator) = validator_for_sig_and_hash_algs(&sig_alg, &hash_alg) else {
        return false;
    };

    match validator.validate(
        child.signature_value.as_ref(),
        child.tbs_certificate.as_ref(),
        parent.public_key().raw,
    ) {
        Ok(()) => true,
        Err(err) => {
            debug!(
                "signature on {} does not verify with key of {}: {err}",
                child.subject(),
                parent.subject()
            );
            false
        }
    }
}

// Maps a certificate signature algorithm to the (signature, hash) OID pair
// understood by `validator_for_sig_and_hash_algs`.
fn signature_algs(cert: &X509Certificate) -> Option<(Oid<'static>, Oid<'static>)> {
    let alg = &cert.signature_algorithm.algorithm;

    if *alg == SHA256_WITH_RSAENCRYPTION_OID {
        Some((RSA_OID, SHA256_OID))
    } else if *alg == SHA384_WITH_RSAENCRYPTION_OID {
        Some((RSA_OID, SHA384_OID))
    } else if *alg == SHA512_WITH_RSAENCRYPTION_OID {
        Some((RSA_OID, SHA512_OID))
    } else if *alg == ECDSA_WITH_SHA256_OID {
        Some((ECDSA_WITH_SHA256_OID, SHA256_OID))
    } else if *alg == ECDSA_WITH_SHA384_OID {
        Some((ECDSA_WITH_SHA384_OID, SHA384_OID))
    } else if *alg == ECDSA_WITH_SHA512_OID {
        Some((ECDSA_WITH_SHA512_OID, SHA512_OID))
    } else if *alg == RSA_PSS_OID {
        rsa_pss_hash_alg(&cert.signature_algorithm).map(|hash| (RSA_PSS_OID, hash))
    } else if *alg == ED25519_OID {
        Some((ED25519_OID, ED25519_OID))
    } else {
        None
    }
}

// RSASSA-PSS-params ::= SEQUENCE {
//     hashAlgorithm      [0] HashAlgorithm,
//     maskGenAlgorithm   [1] MaskGenAlgorithm,
//     ... }
//
// Only SHA-2 hashes are recognized, and MGF1 must use the same hash.
fn rsa_pss_hash_alg(alg: &AlgorithmIdentifier) -> Option<Oid<'static>> {
    let seq = alg.parameters.as_ref()?.as_sequence().ok()?;

    let (_, (hash_alg, mgf_alg)) = seq
        .parse(|i| {
            let (i, hash_alg) = context_specific_alg(i, 0)?;
            let (i, mgf_alg) = context_specific_alg(i, 1)?;

            // Ignore anything that follows these two parameters.
            Ok((i, (hash_alg, mgf_alg)))
        })
        .ok()?;

    let mgf_any = mgf_alg.parameters?;
    let mgf_params = mgf_any.as_sequence().ok()?;
    let (_, mgf_hash) = Any::from_der(&mgf_params.content).ok()?;
    let mgf_hash = mgf_hash.as_oid().ok()?;

    if hash_alg.algorithm != mgf_hash {
        return None;
    }

    [SHA256_OID, SHA384_OID, SHA512_OID]
        .into_iter()
        .find(|oid| hash_alg.algorithm == *oid)
}

fn context_specific_alg(
    i: &[u8],
    tag: u32,
) -> asn1_rs::ParseResult<'_, AlgorithmIdentifier<'_>> {
    let (i, header) = Header::from_der(i)?;
    if header.class() != Class::ContextSpecific || header.tag() != Tag(tag) {
        return Err(nom::Err::Error(asn1_rs::Error::BerValueError));
    }

    AlgorithmIdentifier::from_der(i).map_err(|_| nom::Err::Error(asn1_rs::Error::BerValueError))
}

/// Describes errors that can be identified when checking a certificate
/// chain.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum CertificateTrustError {
    /// No path from the leaf to a trusted root could be validated.
    ///
    /// The specific reason is logged at debug level.
    #[error("certificate chain verification failed")]
    ChainVerificationFailed,

    /// A certificate in the chain or trust anchors could not be parsed.
    #[error("invalid certificate ({0})")]
    InvalidCertificate(String),
}

impl CertificateTrustError {
    /// Return the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ChainVerificationFailed => ErrorKind::Chain,
            Self::InvalidCertificate(_) => ErrorKind::Format,
        }
    }
}
