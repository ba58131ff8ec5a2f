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

use ciborium::value::Value;
use coset::{
    iana::{self, EnumI64},
    Header, HeaderBuilder, Label, RegisteredLabel, RegisteredLabelWithPrivate,
};

use crate::{cose::CoseError, SigningAlg};

/// Text label of the optional issuer (`iss`) protected header.
pub const ISSUER_LABEL: &str = "iss";

/// Text label of the optional feed protected header.
pub const FEED_LABEL: &str = "feed";

/// The two legal shapes of an `x5chain` header value.
///
/// From [RFC 9360]: if a single certificate is conveyed, it is placed in a
/// CBOR byte string. If multiple certificates are conveyed, a CBOR array of
/// byte strings is used, with each certificate being in its own byte string.
///
/// [RFC 9360]: https://datatracker.ietf.org/doc/html/rfc9360#section-2
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum X5Chain {
    /// A single DER-encoded certificate.
    Single(Vec<u8>),

    /// DER-encoded certificates, leaf first.
    Chain(Vec<Vec<u8>>),
}

impl X5Chain {
    /// Choose the shape for a list of DER-encoded certificates: a single
    /// certificate becomes [`X5Chain::Single`].
    pub fn from_der_list(mut certs: Vec<Vec<u8>>) -> Self {
        if certs.len() == 1 {
            Self::Single(certs.remove(0))
        } else {
            Self::Chain(certs)
        }
    }

    /// Return the DER-encoded certificates, leaf first.
    pub fn to_der_list(&self) -> Vec<Vec<u8>> {
        match self {
            Self::Single(cert) => vec![cert.clone()],
            Self::Chain(certs) => certs.clone(),
        }
    }

    // The only place where the shape of an x5chain value is interpreted.
    pub(crate) fn from_value(value: &Value) -> Result<Self, CoseError> {
        match value {
            Value::Bytes(cert) => Ok(Self::Single(cert.clone())),

            Value::Array(items) if !items.is_empty() => items
                .iter()
                .map(|item| match item {
                    Value::Bytes(cert) => Ok(cert.clone()),
                    _ => Err(CoseError::ChainInvalidType),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Chain),

            _ => Err(CoseError::ChainInvalidType),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match self {
            Self::Single(cert) => Value::Bytes(cert.clone()),
            Self::Chain(certs) => Value::Array(certs.iter().cloned().map(Value::Bytes).collect()),
        }
    }
}

/// The protected header fields of a claims document.
///
/// Labels outside this set are ignored when decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sign1Headers {
    /// Signature algorithm (label 1).
    pub alg: SigningAlg,

    /// Payload content type (label 3). Only text content types are kept.
    pub content_type: Option<String>,

    /// Signer certificate chain (label 33).
    pub x5chain: X5Chain,

    /// Issuer (`iss`).
    pub issuer: Option<String>,

    /// Feed (`feed`).
    pub feed: Option<String>,
}

impl Sign1Headers {
    /// Extract the claims document fields from a decoded protected header.
    pub fn from_header(header: &Header) -> Result<Self, CoseError> {
        let alg = signing_alg_from_header(header)?;

        let content_type = match &header.content_type {
            Some(RegisteredLabel::Text(content_type)) => Some(content_type.clone()),
            _ => None,
        };

        let x5chain_label = iana::HeaderParameter::X5Chain.to_i64();

        let mut x5chain = None;
        let mut issuer = None;
        let mut feed = None;

        for (label, value) in &header.rest {
            match label {
                Label::Int(label) if *label == x5chain_label => {
                    x5chain = Some(X5Chain::from_value(value)?);
                }
                Label::Text(label) if label == ISSUER_LABEL => {
                    issuer = value.as_text().map(str::to_owned);
                }
                Label::Text(label) if label == FEED_LABEL => {
                    feed = value.as_text().map(str::to_owned);
                }
                _ => (),
            }
        }

        Ok(Self {
            alg,
            content_type,
            x5chain: x5chain.ok_or(CoseError::ChainMissing)?,
            issuer,
            feed,
        })
    }

    /// Build a protected header.
    ///
    /// Entries are emitted in canonical order: `alg` (1), content type (3),
    /// `x5chain` (33), then `iss` and `feed`.
    pub fn to_header(&self) -> Header {
        let mut builder = HeaderBuilder::new().algorithm(iana_algorithm(self.alg));

        if let Some(content_type) = &self.content_type {
            builder = builder.content_type(content_type.clone());
        }

        builder = builder.value(
            iana::HeaderParameter::X5Chain.to_i64(),
            self.x5chain.to_value(),
        );

        if let Some(issuer) = &self.issuer {
            builder = builder.text_value(ISSUER_LABEL.to_string(), Value::Text(issuer.clone()));
        }

        if let Some(feed) = &self.feed {
            builder = builder.text_value(FEED_LABEL.to_string(), Value::Text(feed.clone()));
        }

        builder.build()
    }
}

fn signing_alg_from_header(header: &Header) -> Result<SigningAlg, CoseError> {
    let Some(alg) = &header.alg else {
        return Err(CoseError::AlgorithmMissing);
    };

    match alg {
        RegisteredLabelWithPrivate::Assigned(iana::Algorithm::PS256) => Ok(SigningAlg::Ps256),
        RegisteredLabelWithPrivate::Assigned(iana::Algorithm::PS384) => Ok(SigningAlg::Ps384),
        RegisteredLabelWithPrivate::Assigned(iana::Algorithm::PS512) => Ok(SigningAlg::Ps512),
        RegisteredLabelWithPrivate::Assigned(iana::Algorithm::ES256) => Ok(SigningAlg::Es256),
        RegisteredLabelWithPrivate::Assigned(iana::Algorithm::ES384) => Ok(SigningAlg::Es384),
        RegisteredLabelWithPrivate::Assigned(iana::Algorithm::ES512) => Ok(SigningAlg::Es512),
        RegisteredLabelWithPrivate::Assigned(iana::Algorithm::EdDSA) => Ok(SigningAlg::Ed25519),

        RegisteredLabelWithPrivate::Assigned(alg) => Err(
            CoseError::UnsupportedSigningAlgorithm(alg.to_i64().to_string()),
        ),
        RegisteredLabelWithPrivate::PrivateUse(alg) => {
            Err(CoseError::UnsupportedSigningAlgorithm(alg.to_string()))
        }
        RegisteredLabelWithPrivate::Text(_) => Err(CoseError::AlgorithmInvalidType),
    }
}

fn iana_algorithm(alg: SigningAlg) -> iana::Algorithm {
    match alg {
        SigningAlg::Ps256 => iana::Algorithm::PS256,
        SigningAlg::Ps384 => iana::Algorithm::PS384,
        SigningAlg::Ps512 => iana::Algorithm::PS512,
        SigningAlg::Es256 => iana::Algorithm::ES256,
        SigningAlg::Es384 => iana::Algorithm::ES384,
        SigningAlg::Es512 => iana::Algorithm::ES512,
        SigningAlg::Ed25519 => iana::Algorithm::EdDSA,
    }
}
