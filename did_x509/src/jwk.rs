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

use serde::{Deserialize, Serialize};
use sign1_crypto::base64::encode_url_safe_no_pad;
use x509_parser::{public_key::PublicKey, x509::SubjectPublicKeyInfo};

use crate::DidX509Error;

const EC_PUBLIC_KEY_OID: &str = "1.2.840.10045.2.1";
const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";
const ED25519_OID: &str = "1.3.101.112";

/// A public JSON Web Key ([RFC 7517]) for an EC, RSA, or Ed25519 key.
///
/// [RFC 7517]: https://datatracker.ietf.org/doc/html/rfc7517
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Jwk {
    /// Key type: `EC`, `RSA`, or `OKP`.
    pub kty: String,

    /// Curve name for `EC` and `OKP` keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,

    /// X coordinate (`EC`) or public key (`OKP`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,

    /// Y coordinate (`EC`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,

    /// Modulus (`RSA`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,

    /// Public exponent (`RSA`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

impl Jwk {
    /// Build a JWK from a certificate's `SubjectPublicKeyInfo`.
    pub fn from_spki(spki: &SubjectPublicKeyInfo) -> Result<Self, DidX509Error> {
        let alg = spki.algorithm.algorithm.to_id_string();
        let key: &[u8] = &spki.subject_public_key.data;

        match alg.as_str() {
            EC_PUBLIC_KEY_OID => {
                let curve = spki
                    .algorithm
                    .parameters
                    .as_ref()
                    .and_then(|p| p.as_oid().ok())
                    .map(|oid| oid.to_id_string())
                    .unwrap_or_default();

                let crv = match curve.as_str() {
                    "1.2.840.10045.3.1.7" => "P-256",
                    "1.3.132.0.34" => "P-384",
                    "1.3.132.0.35" => "P-521",
                    _ => {
                        return Err(DidX509Error::UnsupportedPublicKey(format!(
                            "EC curve {curve}"
                        )))
                    }
                };

                // Uncompressed point: 0x04 | x | y.
                if key.first() != Some(&0x04) || key.len() % 2 != 1 {
                    return Err(DidX509Error::UnsupportedPublicKey(
                        "compressed EC point".to_string(),
                    ));
                }

                let (x, y) = key[1..].split_at(key.len() / 2);

                Ok(Self {
                    kty: "EC".to_string(),
                    crv: Some(crv.to_string()),
                    x: Some(encode_url_safe_no_pad(x)),
                    y: Some(encode_url_safe_no_pad(y)),
                    n: None,
                    e: None,
                })
            }

            RSA_ENCRYPTION_OID => {
                let Ok(PublicKey::RSA(rsa)) = spki.parsed() else {
                    return Err(DidX509Error::UnsupportedPublicKey(
                        "malformed RSA key".to_string(),
                    ));
                };

                Ok(Self {
                    kty: "RSA".to_string(),
                    crv: None,
                    x: None,
                    y: None,
                    n: Some(encode_url_safe_no_pad(trim_leading_zeros(rsa.modulus))),
                    e: Some(encode_url_safe_no_pad(trim_leading_zeros(rsa.exponent))),
                })
            }

            ED25519_OID => Ok(Self {
                kty: "OKP".to_string(),
                crv: Some("Ed25519".to_string()),
                x: Some(encode_url_safe_no_pad(key)),
                y: None,
                n: None,
                e: None,
            }),

            _ => Err(DidX509Error::UnsupportedPublicKey(alg)),
        }
    }
}

fn trim_leading_zeros(value: &[u8]) -> &[u8] {
    let start = value
        .iter()
        .position(|b| *b != 0)
        .unwrap_or(value.len().saturating_sub(1));
    &value[start..]
}
