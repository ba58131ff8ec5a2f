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

use coset::{CoseSign1Builder, HeaderBuilder, TaggedCborSerializable};
use log::debug;

use crate::{
    cose::{CoseError, Sign1Headers, X5Chain},
    raw_signature::{signer_from_cert_chain_and_private_key, RawSigner, Salt},
    SigningAlg,
};

/// Given a payload and a [`RawSigner`] instance, generate a tagged COSE_Sign1
/// claims document with an embedded payload.
///
/// The protected header carries the signer's algorithm and certificate chain
/// plus the content type, issuer, and feed from `headers`; the `alg` and
/// `x5chain` fields of `headers` are replaced with the signer's values. The
/// unprotected header is empty.
pub fn sign(
    signer: &dyn RawSigner,
    payload: &[u8],
    headers: &Sign1Headers,
) -> Result<Vec<u8>, CoseError> {
    let headers = Sign1Headers {
        alg: signer.alg(),
        x5chain: X5Chain::from_der_list(signer.cert_chain()?),
        ..headers.clone()
    };

    let sign1 = CoseSign1Builder::new()
        .protected(headers.to_header())
        .unprotected(HeaderBuilder::new().build())
        .payload(payload.to_vec())
        .try_create_signature(b"", |tbs| signer.sign(tbs))?
        .build();

    debug!("signed {} byte payload with {}", payload.len(), headers.alg);

    sign1
        .to_tagged_vec()
        .map_err(|e| CoseError::CborGenerationError(e.to_string()))
}

/// Create a claims document from PEM-encoded signing credentials.
///
/// `cert_chain` is the signer's chain, leaf first. `private_key` is a
/// PEM-wrapped SEC1, PKCS #8, or PKCS #1 key that must be usable with `alg`.
#[allow(clippy::too_many_arguments)]
pub fn create_cose_sign1(
    payload: &[u8],
    issuer: Option<&str>,
    feed: Option<&str>,
    content_type: &str,
    cert_chain: &[u8],
    private_key: &[u8],
    alg: SigningAlg,
    salt: Salt,
) -> Result<Vec<u8>, CoseError> {
    let signer = signer_from_cert_chain_and_private_key(cert_chain, private_key, alg, salt)?;

    let headers = Sign1Headers {
        alg,
        content_type: Some(content_type.to_owned()),
        x5chain: X5Chain::Chain(vec![]),
        issuer: issuer.map(str::to_owned),
        feed: feed.map(str::to_owned),
    };

    sign(signer.as_ref(), payload, &headers)
}
