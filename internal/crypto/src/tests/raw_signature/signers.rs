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

use crate::{
    cert_chain::CertificateChain,
    raw_signature::{
        signer_from_cert_chain_and_private_key, validator_for_signing_alg, RawSignerError, Salt,
        SigningAlg,
    },
    ErrorKind,
};

const SAMPLE_DATA: &[u8] = b"some sample content to sign";

fn leaf_public_key(cert_chain: &[u8]) -> Vec<u8> {
    CertificateChain::from_pem(cert_chain)
        .unwrap()
        .leaf()
        .public_key_der()
        .unwrap()
}

fn sign_and_validate(cert_chain: &[u8], private_key: &[u8], alg: SigningAlg) -> Vec<u8> {
    let signer =
        signer_from_cert_chain_and_private_key(cert_chain, private_key, alg, Salt::Random)
            .unwrap();

    assert_eq!(signer.alg(), alg);

    let signature = signer.sign(SAMPLE_DATA).unwrap();

    let validator = validator_for_signing_alg(alg).unwrap();
    validator
        .validate(&signature, SAMPLE_DATA, &leaf_public_key(cert_chain))
        .unwrap();

    signature
}

#[test]
fn es256() {
    let signature = sign_and_validate(
        include_bytes!("../../../tests/fixtures/certs/self_signed_es256.pem"),
        include_bytes!("../../../tests/fixtures/certs/self_signed_es256.key"),
        SigningAlg::Es256,
    );

    assert_eq!(signature.len(), 64);
}

#[test]
fn es384() {
    let signature = sign_and_validate(
        include_bytes!("../../../tests/fixtures/certs/es384_chain.pem"),
        include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key"),
        SigningAlg::Es384,
    );

    assert_eq!(signature.len(), 96);
}

#[test]
fn es512() {
    let signature = sign_and_validate(
        include_bytes!("../../../tests/fixtures/certs/es512_chain.pem"),
        include_bytes!("../../../tests/fixtures/certs/es512_leaf_sec1.key"),
        SigningAlg::Es512,
    );

    assert_eq!(signature.len(), 132);
}

#[test]
fn ps256() {
    let signature = sign_and_validate(
        include_bytes!("../../../tests/fixtures/certs/ps256_chain.pem"),
        include_bytes!("../../../tests/fixtures/certs/ps256_leaf_pkcs1.key"),
        SigningAlg::Ps256,
    );

    assert_eq!(signature.len(), 256);
}

#[test]
fn ps384_and_ps512_with_same_key() {
    for alg in [SigningAlg::Ps384, SigningAlg::Ps512] {
        sign_and_validate(
            include_bytes!("../../../tests/fixtures/certs/ps256_chain.pem"),
            include_bytes!("../../../tests/fixtures/certs/ps256_leaf_pkcs8.key"),
            alg,
        );
    }
}

#[test]
fn ed25519() {
    let signature = sign_and_validate(
        include_bytes!("../../../tests/fixtures/certs/ed25519_chain.pem"),
        include_bytes!("../../../tests/fixtures/certs/ed25519_leaf.key"),
        SigningAlg::Ed25519,
    );

    assert_eq!(signature.len(), 64);
}

#[test]
fn zero_salt_is_deterministic() {
    let cases: [(&[u8], &[u8], SigningAlg); 3] = [
        (
            include_bytes!("../../../tests/fixtures/certs/es384_chain.pem"),
            include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key"),
            SigningAlg::Es384,
        ),
        (
            include_bytes!("../../../tests/fixtures/certs/ps256_chain.pem"),
            include_bytes!("../../../tests/fixtures/certs/ps256_leaf_pkcs1.key"),
            SigningAlg::Ps384,
        ),
        (
            include_bytes!("../../../tests/fixtures/certs/es512_chain.pem"),
            include_bytes!("../../../tests/fixtures/certs/es512_leaf_sec1.key"),
            SigningAlg::Es512,
        ),
    ];

    for (cert_chain, private_key, alg) in cases {
        let signer =
            signer_from_cert_chain_and_private_key(cert_chain, private_key, alg, Salt::Zero)
                .unwrap();

        let first = signer.sign(SAMPLE_DATA).unwrap();
        let second = signer.sign(SAMPLE_DATA).unwrap();
        assert_eq!(first, second, "{alg} signatures differ");

        validator_for_signing_alg(alg)
            .unwrap()
            .validate(&first, SAMPLE_DATA, &leaf_public_key(cert_chain))
            .unwrap();
    }
}

#[test]
fn random_salt_differs() {
    let cases: [(&[u8], &[u8], SigningAlg); 3] = [
        (
            include_bytes!("../../../tests/fixtures/certs/es384_chain.pem"),
            include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key"),
            SigningAlg::Es384,
        ),
        (
            include_bytes!("../../../tests/fixtures/certs/es512_chain.pem"),
            include_bytes!("../../../tests/fixtures/certs/es512_leaf_sec1.key"),
            SigningAlg::Es512,
        ),
        (
            include_bytes!("../../../tests/fixtures/certs/ps256_chain.pem"),
            include_bytes!("../../../tests/fixtures/certs/ps256_leaf_pkcs1.key"),
            SigningAlg::Ps256,
        ),
    ];

    for (cert_chain, private_key, alg) in cases {
        let signer =
            signer_from_cert_chain_and_private_key(cert_chain, private_key, alg, Salt::Random)
                .unwrap();

        assert_ne!(
            signer.sign(SAMPLE_DATA).unwrap(),
            signer.sign(SAMPLE_DATA).unwrap()
        );
    }
}

#[test]
fn algorithm_mismatch() {
    let err = signer_from_cert_chain_and_private_key(
        include_bytes!("../../../tests/fixtures/certs/es384_chain.pem"),
        include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key"),
        SigningAlg::Es256,
        Salt::Random,
    )
    .err()
    .unwrap();

    assert_eq!(
        err,
        RawSignerError::AlgorithmMismatch {
            alg: SigningAlg::Es256,
            key_type: "EC P-384"
        }
    );
    assert_eq!(err.kind(), ErrorKind::Algorithm);

    let err = signer_from_cert_chain_and_private_key(
        include_bytes!("../../../tests/fixtures/certs/ps256_chain.pem"),
        include_bytes!("../../../tests/fixtures/certs/ps256_leaf_pkcs1.key"),
        SigningAlg::Ed25519,
        Salt::Random,
    )
    .err()
    .unwrap();

    assert_eq!(err.kind(), ErrorKind::Algorithm);
}

#[test]
fn mismatched_leaf_is_accepted() {
    // The key does not belong to the leaf; signing still works.
    let signer = signer_from_cert_chain_and_private_key(
        include_bytes!("../../../tests/fixtures/certs/other_leaf_chain.pem"),
        include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key"),
        SigningAlg::Es384,
        Salt::Random,
    )
    .unwrap();

    assert!(signer.sign(SAMPLE_DATA).is_ok());
}

#[test]
fn cert_chain_is_der_leaf_first() {
    let cert_chain = include_bytes!("../../../tests/fixtures/certs/es384_chain.pem");

    let signer = signer_from_cert_chain_and_private_key(
        cert_chain,
        include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key"),
        SigningAlg::Es384,
        Salt::Random,
    )
    .unwrap();

    let expected = CertificateChain::from_pem(cert_chain).unwrap().to_der();
    assert_eq!(signer.cert_chain().unwrap(), expected);
}

#[test]
fn bad_credentials() {
    let err = signer_from_cert_chain_and_private_key(
        b"no certificates here",
        include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key"),
        SigningAlg::Es384,
        Salt::Random,
    )
    .err()
    .unwrap();
    assert_eq!(err.kind(), ErrorKind::Chain);

    let err = signer_from_cert_chain_and_private_key(
        include_bytes!("../../../tests/fixtures/certs/es384_chain.pem"),
        include_bytes!("../../../tests/fixtures/certs/es384_chain.pem"),
        SigningAlg::Es384,
        Salt::Random,
    )
    .err()
    .unwrap();
    assert_eq!(err.kind(), ErrorKind::Key);
}
