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

use rsa::signature::{SignatureEncoding, Signer};

use crate::{
    cert_chain::CertificateChain,
    raw_signature::{
        keys::{parse_private_key_pem, PrivateKey},
        oids::*,
        signer_from_cert_chain_and_private_key, validator_for_sig_and_hash_algs,
        validator_for_signing_alg, RawSignatureValidationError, Salt, SigningAlg,
    },
    ErrorKind,
};

const SAMPLE_DATA: &[u8] = b"some sample content to sign";

const ES384_CHAIN: &[u8] = include_bytes!("../../../tests/fixtures/certs/es384_chain.pem");
const ES384_KEY: &[u8] = include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key");
const PS256_CHAIN: &[u8] = include_bytes!("../../../tests/fixtures/certs/ps256_chain.pem");
const PS256_KEY: &[u8] = include_bytes!("../../../tests/fixtures/certs/ps256_leaf_pkcs1.key");

fn signature_and_public_key(
    cert_chain: &[u8],
    private_key: &[u8],
    alg: SigningAlg,
) -> (Vec<u8>, Vec<u8>) {
    let signer =
        signer_from_cert_chain_and_private_key(cert_chain, private_key, alg, Salt::Zero)
            .unwrap();

    let public_key = CertificateChain::from_pem(cert_chain)
        .unwrap()
        .leaf()
        .public_key_der()
        .unwrap();

    (signer.sign(SAMPLE_DATA).unwrap(), public_key)
}

#[test]
fn every_alg_has_a_validator() {
    for alg in [
        SigningAlg::Es256,
        SigningAlg::Es384,
        SigningAlg::Es512,
        SigningAlg::Ps256,
        SigningAlg::Ps384,
        SigningAlg::Ps512,
        SigningAlg::Ed25519,
    ] {
        assert!(validator_for_signing_alg(alg).is_some());
    }
}

#[test]
fn es384_bad_signature() {
    let (mut signature, pub_key) =
        signature_and_public_key(ES384_CHAIN, ES384_KEY, SigningAlg::Es384);
    signature[10] ^= 0xff;

    let validator = validator_for_signing_alg(SigningAlg::Es384).unwrap();

    assert_eq!(
        validator
            .validate(&signature, SAMPLE_DATA, &pub_key)
            .unwrap_err(),
        RawSignatureValidationError::SignatureMismatch
    );
}

#[test]
fn es384_bad_data() {
    let (signature, pub_key) = signature_and_public_key(ES384_CHAIN, ES384_KEY, SigningAlg::Es384);

    let mut data = SAMPLE_DATA.to_vec();
    data[10] = 0;

    let validator = validator_for_signing_alg(SigningAlg::Es384).unwrap();

    let err = validator.validate(&signature, &data, &pub_key).unwrap_err();
    assert_eq!(err, RawSignatureValidationError::SignatureMismatch);
    assert_eq!(err.kind(), ErrorKind::Signature);
}

#[test]
fn es384_der_signature() {
    let (signature, pub_key) = signature_and_public_key(ES384_CHAIN, ES384_KEY, SigningAlg::Es384);

    let der = p384::ecdsa::Signature::from_slice(&signature)
        .unwrap()
        .to_der()
        .as_bytes()
        .to_vec();

    let validator = validator_for_signing_alg(SigningAlg::Es384).unwrap();
    validator.validate(&der, SAMPLE_DATA, &pub_key).unwrap();
}

#[test]
fn es384_truncated_signature() {
    let (signature, pub_key) = signature_and_public_key(ES384_CHAIN, ES384_KEY, SigningAlg::Es384);

    let validator = validator_for_signing_alg(SigningAlg::Es384).unwrap();

    assert_eq!(
        validator
            .validate(&signature[..40], SAMPLE_DATA, &pub_key)
            .unwrap_err(),
        RawSignatureValidationError::InvalidSignature
    );
}

#[test]
fn ed25519_rejects_ec_key() {
    let (signature, pub_key) = signature_and_public_key(ES384_CHAIN, ES384_KEY, SigningAlg::Es384);

    let validator = validator_for_signing_alg(SigningAlg::Ed25519).unwrap();

    let err = validator
        .validate(&signature[..64], SAMPLE_DATA, &pub_key)
        .unwrap_err();
    assert_eq!(err, RawSignatureValidationError::InvalidPublicKey);
    assert_eq!(err.kind(), ErrorKind::Key);
}

#[test]
fn ps256_bad_signature() {
    let (mut signature, pub_key) =
        signature_and_public_key(PS256_CHAIN, PS256_KEY, SigningAlg::Ps256);
    signature[100] ^= 0x01;

    let validator = validator_for_signing_alg(SigningAlg::Ps256).unwrap();

    assert_eq!(
        validator
            .validate(&signature, SAMPLE_DATA, &pub_key)
            .unwrap_err(),
        RawSignatureValidationError::SignatureMismatch
    );
}

#[test]
fn ps256_wrong_hash() {
    let (signature, pub_key) = signature_and_public_key(PS256_CHAIN, PS256_KEY, SigningAlg::Ps256);

    let validator = validator_for_signing_alg(SigningAlg::Ps384).unwrap();

    assert_eq!(
        validator
            .validate(&signature, SAMPLE_DATA, &pub_key)
            .unwrap_err(),
        RawSignatureValidationError::SignatureMismatch
    );
}

#[test]
fn rsa_pkcs1v15_by_oid() {
    let PrivateKey::Rsa(key) = parse_private_key_pem(PS256_KEY).unwrap() else {
        panic!("expected an RSA key");
    };

    let signing_key = rsa::pkcs1v15::SigningKey::<sha2::Sha256>::new(*key);
    let signature = signing_key.sign(SAMPLE_DATA).to_vec();

    let pub_key = CertificateChain::from_pem(PS256_CHAIN)
        .unwrap()
        .leaf()
        .public_key_der()
        .unwrap();

    let validator = validator_for_sig_and_hash_algs(&RSA_OID, &SHA256_OID).unwrap();
    validator.validate(&signature, SAMPLE_DATA, &pub_key).unwrap();

    let validator = validator_for_sig_and_hash_algs(&RSA_OID, &SHA384_OID).unwrap();
    assert_eq!(
        validator
            .validate(&signature, SAMPLE_DATA, &pub_key)
            .unwrap_err(),
        RawSignatureValidationError::SignatureMismatch
    );
}

#[test]
fn validators_by_oid() {
    assert!(validator_for_sig_and_hash_algs(&RSA_PSS_OID, &SHA512_OID).is_some());
    assert!(validator_for_sig_and_hash_algs(&ECDSA_WITH_SHA384_OID, &SHA384_OID).is_some());
    assert!(validator_for_sig_and_hash_algs(&ED25519_OID, &ED25519_OID).is_some());

    assert!(validator_for_sig_and_hash_algs(&RSA_PSS_OID, &ED25519_OID).is_none());
    assert!(validator_for_sig_and_hash_algs(&SECP384R1_OID, &SHA384_OID).is_none());
}
