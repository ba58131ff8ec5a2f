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

//! Evaluation of parsed policies against a leaf certificate.

use std::net::{Ipv4Addr, Ipv6Addr};

use log::debug;
use x509_parser::{
    certificate::X509Certificate,
    extensions::{ExtendedKeyUsage, GeneralName},
};

use crate::{DidPolicy, DidX509Error, SanType};

const FULCIO_ISSUER_OID: &str = "1.3.6.1.4.1.57264.1.1";

// Extended key usages that `x509-parser` decodes into named flags, in the
// order `eku` lookups report them.
fn predefined_ekus(eku: &ExtendedKeyUsage) -> [(&'static str, bool); 7] {
    [
        ("2.5.29.37.0", eku.any),
        ("1.3.6.1.5.5.7.3.1", eku.server_auth),
        ("1.3.6.1.5.5.7.3.2", eku.client_auth),
        ("1.3.6.1.5.5.7.3.3", eku.code_signing),
        ("1.3.6.1.5.5.7.3.4", eku.email_protection),
        ("1.3.6.1.5.5.7.3.8", eku.time_stamping),
        ("1.3.6.1.5.5.7.3.9", eku.ocsp_signing),
    ]
}

impl DidPolicy {
    /// Check this policy against `leaf`.
    pub(crate) fn evaluate(&self, leaf: &X509Certificate) -> Result<(), DidX509Error> {
        match self {
            Self::Subject(fields) => {
                for (key, value) in fields {
                    check_subject_field(leaf, key, value)?;
                }
                Ok(())
            }
            Self::San(san_type, value) => check_san(leaf, *san_type, value),
            Self::Eku(oid) => check_eku(leaf, oid),
            Self::FulcioIssuer(issuer) => check_fulcio_issuer(leaf, issuer),
        }
    }
}

/// Map a subject policy key to its attribute OID. Dotted OIDs map to themselves.
pub(crate) fn subject_key_oid(key: &str) -> &str {
    match key {
        "C" => "2.5.4.6",
        "O" => "2.5.4.10",
        "OU" => "2.5.4.11",
        "L" => "2.5.4.7",
        "S" | "ST" => "2.5.4.8",
        "STREET" => "2.5.4.9",
        "POSTALCODE" => "2.5.4.17",
        "SERIALNUMBER" => "2.5.4.5",
        "CN" => "2.5.4.3",
        oid => oid,
    }
}

/// Return every value of the subject attribute `oid`, in certificate order.
pub(crate) fn subject_values<'a>(leaf: &'a X509Certificate, oid: &str) -> Vec<&'a str> {
    leaf.subject()
        .iter_attributes()
        .filter(|attr| attr.attr_type().to_id_string() == oid)
        .filter_map(|attr| attr.as_str().ok())
        .collect()
}

fn check_subject_field(leaf: &X509Certificate, key: &str, value: &str) -> Result<(), DidX509Error> {
    let mut values = subject_values(leaf, subject_key_oid(key));

    // Single-valued in practice; the last occurrence wins.
    if matches!(key, "CN" | "SERIALNUMBER") {
        values = values.last().copied().into_iter().collect();
    }

    if values.iter().any(|v| *v == value) {
        Ok(())
    } else {
        debug!("subject {key} values {values:?} do not include {value:?}");
        Err(DidX509Error::SubjectMismatch {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn check_san(leaf: &X509Certificate, san_type: SanType, value: &str) -> Result<(), DidX509Error> {
    let san = leaf
        .subject_alternative_name()
        .ok()
        .flatten()
        .map(|ext| ext.value.general_names.clone())
        .unwrap_or_default();

    let found = san.iter().any(|name| match (san_type, name) {
        (SanType::Dns, GeneralName::DNSName(dns)) => *dns == value,
        (SanType::Email, GeneralName::RFC822Name(email)) => *email == value,
        (SanType::Uri, GeneralName::URI(uri)) => *uri == value,
        (SanType::IpAddress, GeneralName::IPAddress(ip)) => {
            ip_address_to_string(ip).is_some_and(|ip| ip == value)
        }
        _ => false,
    });

    if found {
        Ok(())
    } else {
        Err(DidX509Error::SanNotFound(format!(
            "{}:{value}",
            san_type.as_str()
        )))
    }
}

fn ip_address_to_string(ip: &[u8]) -> Option<String> {
    match ip.len() {
        4 => {
            let octets: [u8; 4] = ip.try_into().ok()?;
            Some(Ipv4Addr::from(octets).to_string())
        }
        16 => {
            let octets: [u8; 16] = ip.try_into().ok()?;
            Some(Ipv6Addr::from(octets).to_string())
        }
        _ => None,
    }
}

/// Return the leaf's extended key usage OIDs: unknown usages first, then the
/// predefined ones.
pub(crate) fn eku_oids(leaf: &X509Certificate) -> Vec<String> {
    let Ok(Some(eku)) = leaf.extended_key_usage() else {
        return vec![];
    };

    let eku = eku.value;

    eku.other
        .iter()
        .map(|oid| oid.to_id_string())
        .chain(
            predefined_ekus(eku)
                .into_iter()
                .filter(|(_, present)| *present)
                .map(|(oid, _)| oid.to_string()),
        )
        .collect()
}

fn check_eku(leaf: &X509Certificate, oid: &str) -> Result<(), DidX509Error> {
    if eku_oids(leaf).iter().any(|eku| eku == oid) {
        Ok(())
    } else {
        Err(DidX509Error::EkuNotFound(oid.to_string()))
    }
}

fn check_fulcio_issuer(leaf: &X509Certificate, issuer: &str) -> Result<(), DidX509Error> {
    let expected = format!("https://{issuer}");

    let found = leaf.extensions().iter().any(|ext| {
        ext.oid.to_id_string() == FULCIO_ISSUER_OID && ext.value == expected.as_bytes()
    });

    if found {
        Ok(())
    } else {
        Err(DidX509Error::IssuerNotFound(expected))
    }
}
