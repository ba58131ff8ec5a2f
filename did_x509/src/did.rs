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

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use sign1_crypto::{base64, hash};

use crate::{
    escape::{escape, unescape},
    policy::subject_key_oid,
    DidX509Error,
};

#[allow(clippy::unwrap_used)]
static FINGERPRINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

#[allow(clippy::unwrap_used)]
static DOTTED_OID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)+$").unwrap());

const METHOD: &str = "x509";
const VERSION: &str = "0";

/// Subject attribute keys understood without spelling out their OID.
const SUBJECT_KEYS: [&str; 10] = [
    "C",
    "O",
    "OU",
    "L",
    "S",
    "ST",
    "STREET",
    "POSTALCODE",
    "SERIALNUMBER",
    "CN",
];

/// Hash algorithm used for a certificate fingerprint.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FingerprintAlg {
    /// SHA-256
    #[default]
    Sha256,

    /// SHA-384
    Sha384,

    /// SHA-512
    Sha512,
}

impl FingerprintAlg {
    /// Return the name used in `did:x509` strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => hash::sha256(data),
            Self::Sha384 => hash::sha384(data),
            Self::Sha512 => hash::sha512(data),
        }
    }
}

impl FromStr for FingerprintAlg {
    type Err = DidX509Error;

    fn from_str(alg: &str) -> Result<Self, Self::Err> {
        match alg {
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(DidX509Error::UnsupportedFingerprintAlgorithm(
                alg.to_string(),
            )),
        }
    }
}

impl fmt::Display for FingerprintAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Return the base64url (unpadded) digest of a DER-encoded certificate.
pub fn fingerprint(alg: FingerprintAlg, cert_der: &[u8]) -> String {
    base64::encode_url_safe_no_pad(&alg.digest(cert_der))
}

/// Kinds of subject alternative name a `san` policy can match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SanType {
    /// `dns`
    Dns,

    /// `email`
    Email,

    /// `ipaddress`
    IpAddress,

    /// `uri`
    Uri,
}

impl SanType {
    /// Return the name used in `did:x509` strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dns => "dns",
            Self::Email => "email",
            Self::IpAddress => "ipaddress",
            Self::Uri => "uri",
        }
    }
}

impl FromStr for SanType {
    type Err = DidX509Error;

    fn from_str(san_type: &str) -> Result<Self, Self::Err> {
        match san_type {
            "dns" => Ok(Self::Dns),
            "email" => Ok(Self::Email),
            "ipaddress" => Ok(Self::IpAddress),
            "uri" => Ok(Self::Uri),
            _ => Err(DidX509Error::UnsupportedSanType(san_type.to_string())),
        }
    }
}

/// A parsed `did:x509` policy clause.
///
/// Values are held unescaped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DidPolicy {
    /// `subject:<key>:<value>[:<key>:<value>...]`
    Subject(Vec<(String, String)>),

    /// `san:<type>:<value>`
    San(SanType, String),

    /// `eku:<oid>`
    Eku(String),

    /// `fulcio-issuer:<issuer without https://>`
    FulcioIssuer(String),
}

impl DidPolicy {
    fn parse(clause: &str) -> Result<Self, DidX509Error> {
        let mut parts = clause.split(':');

        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        if args.is_empty() {
            return Err(DidX509Error::InvalidPolicy(clause.to_string()));
        }

        match name {
            "subject" => {
                if args.len() % 2 != 0 {
                    return Err(DidX509Error::InvalidPolicy(
                        "subject policy requires key-value pairs".to_string(),
                    ));
                }

                let mut fields: Vec<(String, String)> = Vec::with_capacity(args.len() / 2);

                for pair in args.chunks(2) {
                    let key = pair[0];

                    // `S` and `ST` name one attribute, as does its dotted OID.
                    if fields.iter().any(|(k, _)| subject_key_oid(k) == subject_key_oid(key)) {
                        return Err(DidX509Error::DuplicateField(key.to_string()));
                    }

                    if !SUBJECT_KEYS.contains(&key) && !DOTTED_OID.is_match(key) {
                        return Err(DidX509Error::InvalidPolicy(format!(
                            "unsupported subject key {key}"
                        )));
                    }

                    fields.push((key.to_string(), unescape(pair[1])?));
                }

                Ok(Self::Subject(fields))
            }

            "san" => {
                let [san_type, value] = args[..] else {
                    return Err(DidX509Error::InvalidPolicy(
                        "exactly one SAN type and value required".to_string(),
                    ));
                };

                Ok(Self::San(san_type.parse()?, unescape(value)?))
            }

            "eku" => {
                let [oid] = args[..] else {
                    return Err(DidX509Error::InvalidPolicy(
                        "exactly one EKU required".to_string(),
                    ));
                };

                if !DOTTED_OID.is_match(oid) {
                    return Err(DidX509Error::InvalidOid(oid.to_string()));
                }

                Ok(Self::Eku(oid.to_string()))
            }

            "fulcio-issuer" => {
                let [issuer] = args[..] else {
                    return Err(DidX509Error::InvalidPolicy(
                        "exactly one Fulcio issuer required".to_string(),
                    ));
                };

                Ok(Self::FulcioIssuer(unescape(issuer)?))
            }

            _ => Err(DidX509Error::UnsupportedPolicy(name.to_string())),
        }
    }
}

impl fmt::Display for DidPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subject(fields) => {
                f.write_str("subject")?;
                for (key, value) in fields {
                    write!(f, ":{key}:{}", escape(value))?;
                }
                Ok(())
            }
            Self::San(san_type, value) => write!(f, "san:{}:{}", san_type.as_str(), escape(value)),
            Self::Eku(oid) => write!(f, "eku:{oid}"),
            Self::FulcioIssuer(issuer) => write!(f, "fulcio-issuer:{}", escape(issuer)),
        }
    }
}

/// A parsed `did:x509` identifier.
///
/// ```text
/// did:x509:0:<fingerprint alg>:<fingerprint>::<policy>[::<policy>...]
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DidX509 {
    /// Method version. Always `0`.
    pub version: String,

    /// Hash algorithm of [`Self::fingerprint`].
    pub fingerprint_alg: FingerprintAlg,

    /// Base64url digest of one of the chain's CA certificates.
    pub fingerprint: String,

    /// Policies the leaf certificate must satisfy, in order.
    pub policies: Vec<DidPolicy>,
}

impl FromStr for DidX509 {
    type Err = DidX509Error;

    fn from_str(did: &str) -> Result<Self, Self::Err> {
        let mut top = did.split("::");

        let prefix = top.next().unwrap_or_default();
        let clauses: Vec<&str> = top.collect();

        if clauses.is_empty() {
            return Err(DidX509Error::InvalidDid("no policy section".to_string()));
        }

        let pre: Vec<&str> = prefix.split(':').collect();

        if pre.len() < 2 || pre[0] != "did" || pre[1] != METHOD {
            return Err(DidX509Error::UnsupportedMethod(
                pre.iter().take(2).copied().collect::<Vec<_>>().join(":"),
            ));
        }

        match pre.get(2) {
            Some(&VERSION) => (),
            version => {
                return Err(DidX509Error::UnsupportedVersion(
                    version.copied().unwrap_or_default().to_string(),
                ));
            }
        }

        let [_, _, version, alg, fingerprint] = pre[..] else {
            return Err(DidX509Error::InvalidDid(prefix.to_string()));
        };

        let fingerprint_alg = alg.parse()?;

        if !FINGERPRINT.is_match(fingerprint) {
            return Err(DidX509Error::InvalidDid(format!(
                "malformed fingerprint {fingerprint}"
            )));
        }

        let policies = clauses
            .into_iter()
            .map(DidPolicy::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: version.to_string(),
            fingerprint_alg,
            fingerprint: fingerprint.to_string(),
            policies,
        })
    }
}

impl fmt::Display for DidX509 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "did:{METHOD}:{}:{}:{}",
            self.version, self.fingerprint_alg, self.fingerprint
        )?;

        for policy in &self.policies {
            write!(f, "::{policy}")?;
        }

        Ok(())
    }
}
