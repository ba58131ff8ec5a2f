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

use log::{debug, info};
use sign1_crypto::cert_chain::CertificateChain;

use crate::{
    did::fingerprint,
    escape::escape,
    policy::{eku_oids, subject_values},
    resolve, DidX509Error, FingerprintAlg,
};

const COMMON_NAME_OID: &str = "2.5.4.3";

/// Build a `did:x509` identifier for a PEM certificate chain.
///
/// The fingerprint is taken over `chain[fingerprint_index]`, which must be
/// one of the CA certificates (`1..N`). `policy_name` is one of:
///
/// * `CN`: match the leaf's common name (`subject:CN:<cn>`)
/// * `EKU`: match one of the leaf's extended key usages, preferring one
///   that is not predefined by RFC 5280
/// * anything else: used literally as the policy section, with `subject`
///   values escaped
///
/// With `strict` set, the new identifier is resolved against the same chain
/// (ignoring expiry) and any resolution error is returned.
pub fn make_did(
    fingerprint_alg: FingerprintAlg,
    fingerprint_index: usize,
    chain_pem: &[u8],
    policy_name: &str,
    strict: bool,
) -> Result<String, DidX509Error> {
    let chain = CertificateChain::from_pem(chain_pem)?;
    let certs = chain.as_slice();

    if fingerprint_index < 1 || fingerprint_index >= certs.len() {
        return Err(DidX509Error::IndexOutOfBounds {
            index: fingerprint_index,
            len: certs.len(),
        });
    }

    let fingerprint = fingerprint(fingerprint_alg, certs[fingerprint_index].as_der());

    let leaf = chain.leaf().x509()?;

    let policy = match policy_name.to_ascii_uppercase().as_str() {
        "CN" => {
            let cn = subject_values(&leaf, COMMON_NAME_OID)
                .last()
                .copied()
                .ok_or_else(|| {
                    DidX509Error::InvalidPolicy("leaf certificate has no common name".to_string())
                })?;

            format!("subject:CN:{}", escape(cn))
        }

        "EKU" => {
            let oid = eku_oids(&leaf).into_iter().next().ok_or_else(|| {
                DidX509Error::InvalidPolicy(
                    "leaf certificate has no extended key usage".to_string(),
                )
            })?;

            format!("eku:{oid}")
        }

        _ => escape_custom_policy(policy_name)?,
    };

    let did = format!("did:x509:0:{fingerprint_alg}:{fingerprint}::{policy}");
    debug!("built {did}");

    if strict {
        resolve(chain_pem, &did, true)?;
        info!("did:x509 resolved correctly");
    }

    Ok(did)
}

// Escapes the values of every `subject` clause; other clauses pass through.
fn escape_custom_policy(policy: &str) -> Result<String, DidX509Error> {
    if policy.is_empty() {
        return Err(DidX509Error::InvalidPolicy("empty policy".to_string()));
    }

    policy
        .split("::")
        .map(|clause| {
            let tokens: Vec<&str> = clause.split(':').collect();

            if tokens[0] != "subject" {
                return Ok(clause.to_string());
            }

            if tokens.len() < 3 || tokens.len() % 2 == 0 {
                return Err(DidX509Error::InvalidPolicy(format!(
                    "invalid 'subject' policy {clause}"
                )));
            }

            Ok(tokens
                .iter()
                .enumerate()
                .map(|(i, token)| {
                    if i > 0 && i % 2 == 0 {
                        escape(token)
                    } else {
                        token.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(":"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|clauses| clauses.join("::"))
}
