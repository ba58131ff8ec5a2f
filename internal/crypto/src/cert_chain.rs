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

//! PEM and DER handling for ordered X.509 certificate chains.
//!
//! A chain is always ordered leaf first. The last certificate is treated as
//! the root and everything in between as intermediates.

use std::fmt;

use log::debug;
use thiserror::Error;
use x509_parser::{certificate::X509Certificate, pem::Pem, prelude::FromDer};

use crate::{base64, ErrorKind};

/// Maximum number of certificates accepted in a chain.
pub const MAX_CHAIN_LEN: usize = 100;

const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// A single DER-encoded X.509 certificate that is known to parse.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Certificate {
    der: Vec<u8>,
}

impl Certificate {
    /// Wrap a DER-encoded certificate after checking that it parses and that
    /// no data follows it.
    pub fn from_der(der: &[u8]) -> Result<Self, CertificateChainError> {
        let (rem, _) = X509Certificate::from_der(der)
            .map_err(|e| CertificateChainError::InvalidCertificate(e.to_string()))?;

        if !rem.is_empty() {
            return Err(CertificateChainError::InvalidCertificate(
                "trailing data after certificate".to_string(),
            ));
        }

        Ok(Self { der: der.to_vec() })
    }

    /// Return the DER encoding of this certificate.
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Return a parsed view of this certificate.
    pub fn x509(&self) -> Result<X509Certificate<'_>, CertificateChainError> {
        X509Certificate::from_der(&self.der)
            .map(|(_, cert)| cert)
            .map_err(|e| CertificateChainError::InvalidCertificate(e.to_string()))
    }

    /// Return the DER-encoded `SubjectPublicKeyInfo` of this certificate.
    pub fn public_key_der(&self) -> Result<Vec<u8>, CertificateChainError> {
        Ok(self.x509()?.public_key().raw.to_vec())
    }

    /// Return the certificate subject in RFC 4514 form, for diagnostics.
    pub fn subject(&self) -> String {
        self.x509()
            .map(|cert| cert.subject().to_string())
            .unwrap_or_default()
    }

    /// Return the certificate as single-line base64.
    pub fn to_base64(&self) -> String {
        certificate_to_base64(self)
    }

    /// Return the certificate as a `CERTIFICATE` PEM block.
    pub fn to_pem(&self) -> String {
        certificate_to_pem(self)
    }
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("subject", &self.subject())
            .finish()
    }
}

/// Parse every `CERTIFICATE` block of a PEM document, in order.
///
/// Blocks with other labels are skipped. Any certificate that fails to parse
/// fails the whole call, as does a document without certificates.
pub fn pem_to_certificates(pem: &[u8]) -> Result<Vec<Certificate>, CertificateChainError> {
    let mut certs = vec![];

    for block in Pem::iter_from_buffer(pem) {
        let block = block.map_err(|e| CertificateChainError::InvalidPem(e.to_string()))?;

        if block.label != CERTIFICATE_LABEL {
            debug!("skipping PEM block labelled {}", block.label);
            continue;
        }

        certs.push(Certificate::from_der(&block.contents)?);
    }

    if certs.is_empty() {
        return Err(CertificateChainError::NoCertificates);
    }

    Ok(certs)
}

/// Return the DER encoding of each certificate.
pub fn certificates_to_der(certs: &[Certificate]) -> Vec<Vec<u8>> {
    certs.iter().map(|c| c.der.clone()).collect()
}

/// Return a certificate as a `CERTIFICATE` PEM block whose base64 body is a
/// single line.
pub fn certificate_to_pem(cert: &Certificate) -> String {
    format!(
        "-----BEGIN {CERTIFICATE_LABEL}-----\n{}\n-----END {CERTIFICATE_LABEL}-----\n",
        certificate_to_base64(cert)
    )
}

/// Return a certificate as single-line base64.
pub fn certificate_to_base64(cert: &Certificate) -> String {
    base64::encode(&cert.der)
}

/// An ordered certificate chain of 1 to [`MAX_CHAIN_LEN`] certificates.
///
/// Index 0 is the leaf and the last element is the root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateChain(Vec<Certificate>);

impl CertificateChain {
    /// Create a chain, enforcing the length limits.
    pub fn new(certs: Vec<Certificate>) -> Result<Self, CertificateChainError> {
        if certs.is_empty() {
            return Err(CertificateChainError::EmptyChain);
        }

        if certs.len() > MAX_CHAIN_LEN {
            return Err(CertificateChainError::ChainTooLong(certs.len()));
        }

        Ok(Self(certs))
    }

    /// Parse a PEM document with [`pem_to_certificates`] and build a chain.
    pub fn from_pem(pem: &[u8]) -> Result<Self, CertificateChainError> {
        Self::new(pem_to_certificates(pem)?)
    }

    /// Build a chain from DER-encoded certificates.
    pub fn from_der_list<T: AsRef<[u8]>>(ders: &[T]) -> Result<Self, CertificateChainError> {
        let certs = ders
            .iter()
            .map(|der| Certificate::from_der(der.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(certs)
    }

    /// The end-entity certificate.
    pub fn leaf(&self) -> &Certificate {
        &self.0[0]
    }

    /// The last certificate of the chain.
    pub fn root(&self) -> &Certificate {
        &self.0[self.0.len() - 1]
    }

    /// Certificates strictly between the leaf and the root.
    pub fn intermediates(&self) -> &[Certificate] {
        if self.0.len() <= 2 {
            &[]
        } else {
            &self.0[1..self.0.len() - 1]
        }
    }

    /// All certificates, leaf first.
    pub fn as_slice(&self) -> &[Certificate] {
        &self.0
    }

    /// Return the DER encoding of each certificate, leaf first.
    pub fn to_der(&self) -> Vec<Vec<u8>> {
        certificates_to_der(&self.0)
    }

    /// Return the chain as concatenated single-line PEM blocks.
    pub fn to_pem(&self) -> String {
        self.0.iter().map(certificate_to_pem).collect()
    }
}

/// Describes errors that can occur while decoding certificate chains.
#[derive(Debug, Eq, Error, PartialEq)]
#[non_exhaustive]
pub enum CertificateChainError {
    /// The PEM document could not be decoded.
    #[error("invalid PEM ({0})")]
    InvalidPem(String),

    /// A certificate could not be parsed.
    #[error("invalid certificate ({0})")]
    InvalidCertificate(String),

    /// The PEM document contains no certificates.
    #[error("no certificates found")]
    NoCertificates,

    /// A chain must contain at least one certificate.
    #[error("certificate chain is empty")]
    EmptyChain,

    /// The chain exceeds [`MAX_CHAIN_LEN`] certificates.
    #[error(
        "certificate chain has {0} certificates; at most {max} are allowed",
        max = MAX_CHAIN_LEN
    )]
    ChainTooLong(usize),
}

impl CertificateChainError {
    /// Return the broad classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPem(_) | Self::InvalidCertificate(_) => ErrorKind::Format,
            _ => ErrorKind::Chain,
        }
    }
}
