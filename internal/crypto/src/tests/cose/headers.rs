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
    iana, CborSerializable, CoseSign1Builder, Header, HeaderBuilder,
    RegisteredLabelWithPrivate, TaggedCborSerializable,
};

use crate::{
    cose::{decode_cose_sign1, CoseError, Sign1Headers, Verifier, X5Chain},
    raw_signature::{signer_from_cert_chain_and_private_key, RawSigner, Salt},
    ErrorKind, SigningAlg,
};

const ES384_CHAIN: &[u8] = include_bytes!("../../../tests/fixtures/certs/es384_chain.pem");
const ES384_KEY: &[u8] = include_bytes!("../../../tests/fixtures/certs/es384_leaf_sec1.key");
const SELF_SIGNED: &[u8] = include_bytes!("../../../tests/fixtures/certs/self_signed_es256.pem");
const SELF_SIGNED_KEY: &[u8] =
    include_bytes!("../../../tests/fixtures/certs/self_signed_es256.key");

const X5CHAIN: i64 = 33;

fn es384_signer() -> Box<dyn RawSigner> {
    signer_from_cert_chain_and_private_key(ES384_CHAIN, ES384_KEY, SigningAlg::Es384, Salt::Zero)
        .unwrap()
}

fn x5chain_value(signer: &dyn RawSigner) -> Value {
    Value::Array(
        signer
            .cert_chain()
            .unwrap()
            .into_iter()
            .map(Value::Bytes)
            .collect(),
    )
}

// Signs `protected` as given, so headers that `sign` would never produce can
// be exercised.
fn build(signer: &dyn RawSigner, protected: Header, payload: Option<&[u8]>) -> Vec<u8> {
    let mut builder = CoseSign1Builder::new().protected(protected);
    if let Some(payload) = payload {
        builder = builder.payload(payload.to_vec());
    }

    builder
        .try_create_signature(b"", |tbs| signer.sign(tbs))
        .unwrap()
        .build()
        .to_tagged_vec()
        .unwrap()
}

#[test]
fn x5chain_shapes() {
    assert_eq!(
        X5Chain::from_der_list(vec![vec![1, 2, 3]]),
        X5Chain::Single(vec![1, 2, 3])
    );

    let chain = X5Chain::from_der_list(vec![vec![1], vec![2]]);
    assert_eq!(chain, X5Chain::Chain(vec![vec![1], vec![2]]));
    assert_eq!(chain.to_der_list(), vec![vec![1], vec![2]]);

    assert_eq!(X5Chain::Single(vec![7]).to_der_list(), vec![vec![7]]);
}

#[test]
fn x5chain_values() {
    assert_eq!(
        X5Chain::from_value(&Value::Bytes(vec![1])).unwrap(),
        X5Chain::Single(vec![1])
    );

    assert_eq!(
        X5Chain::from_value(&Value::Array(vec![Value::Bytes(vec![1]), Value::Bytes(vec![2])]))
            .unwrap(),
        X5Chain::Chain(vec![vec![1], vec![2]])
    );

    for bad in [
        Value::Array(vec![]),
        Value::Array(vec![Value::Bytes(vec![1]), Value::Integer(2.into())]),
        Value::Map(vec![]),
        Value::Text("cert".to_string()),
    ] {
        assert_eq!(
            X5Chain::from_value(&bad).unwrap_err(),
            CoseError::ChainInvalidType
        );
    }
}

#[test]
fn canonical_header_order() {
    let headers = Sign1Headers {
        alg: SigningAlg::Es384,
        content_type: Some("application/json".to_string()),
        x5chain: X5Chain::Single(vec![1, 2, 3]),
        issuer: Some("did:x509:0:sha256:abc::eku:1.2.3".to_string()),
        feed: Some("feed".to_string()),
    };

    let bytes = headers.to_header().to_vec().unwrap();
    let value: Value = ciborium::de::from_reader(bytes.as_slice()).unwrap();

    let keys: Vec<Value> = value
        .into_map()
        .unwrap()
        .into_iter()
        .map(|(k, _)| k)
        .collect();

    assert_eq!(
        keys,
        vec![
            Value::Integer(1.into()),
            Value::Integer(3.into()),
            Value::Integer(33.into()),
            Value::Text("iss".to_string()),
            Value::Text("feed".to_string()),
        ]
    );
}

#[test]
fn header_round_trip() {
    let headers = Sign1Headers {
        alg: SigningAlg::Ed25519,
        content_type: Some("text/plain".to_string()),
        x5chain: X5Chain::Chain(vec![vec![1], vec![2]]),
        issuer: None,
        feed: Some("feed".to_string()),
    };

    assert_eq!(Sign1Headers::from_header(&headers.to_header()).unwrap(), headers);
}

#[test]
fn single_certificate_x5chain() {
    let signer = signer_from_cert_chain_and_private_key(
        SELF_SIGNED,
        SELF_SIGNED_KEY,
        SigningAlg::Es256,
        Salt::Random,
    )
    .unwrap();

    let cert = signer.cert_chain().unwrap().remove(0);

    let protected = HeaderBuilder::new()
        .algorithm(iana::Algorithm::ES256)
        .content_type("text/plain".to_string())
        .value(X5CHAIN, Value::Bytes(cert))
        .build();

    let doc = build(signer.as_ref(), protected, Some(b"single"));

    let decoded = decode_cose_sign1(&doc).unwrap();
    assert!(matches!(decoded.headers.x5chain, X5Chain::Single(_)));

    let unpacked = Verifier::new().verify_signature(&doc).unwrap();
    assert_eq!(unpacked.payload, b"single");
    assert_eq!(unpacked.cert_chain.as_slice().len(), 1);
}

#[test]
fn map_x5chain() {
    let signer = es384_signer();

    let protected = HeaderBuilder::new()
        .algorithm(iana::Algorithm::ES384)
        .content_type("text/plain".to_string())
        .value(X5CHAIN, Value::Map(vec![]))
        .build();

    let doc = build(signer.as_ref(), protected, Some(b"map"));

    let err = decode_cose_sign1(&doc).unwrap_err();
    assert_eq!(err, CoseError::ChainInvalidType);
    assert_eq!(err.kind(), ErrorKind::Chain);
}

#[test]
fn missing_x5chain() {
    let signer = es384_signer();

    let protected = HeaderBuilder::new()
        .algorithm(iana::Algorithm::ES384)
        .content_type("text/plain".to_string())
        .build();

    let doc = build(signer.as_ref(), protected, Some(b"no chain"));

    assert_eq!(decode_cose_sign1(&doc).unwrap_err(), CoseError::ChainMissing);
}

#[test]
fn missing_alg() {
    let signer = es384_signer();

    let protected = HeaderBuilder::new()
        .content_type("text/plain".to_string())
        .value(X5CHAIN, x5chain_value(signer.as_ref()))
        .build();

    let doc = build(signer.as_ref(), protected, Some(b"no alg"));

    let err = decode_cose_sign1(&doc).unwrap_err();
    assert_eq!(err, CoseError::AlgorithmMissing);
    assert_eq!(err.kind(), ErrorKind::Algorithm);
}

#[test]
fn text_alg() {
    let signer = es384_signer();

    let mut protected = HeaderBuilder::new()
        .content_type("text/plain".to_string())
        .value(X5CHAIN, x5chain_value(signer.as_ref()))
        .build();
    protected.alg = Some(RegisteredLabelWithPrivate::Text("ES384".to_string()));

    let doc = build(signer.as_ref(), protected, Some(b"text alg"));

    assert_eq!(
        decode_cose_sign1(&doc).unwrap_err(),
        CoseError::AlgorithmInvalidType
    );
}

#[test]
fn unsupported_alg() {
    let signer = es384_signer();

    let protected = HeaderBuilder::new()
        .algorithm(iana::Algorithm::A128GCM)
        .content_type("text/plain".to_string())
        .value(X5CHAIN, x5chain_value(signer.as_ref()))
        .build();

    let doc = build(signer.as_ref(), protected, Some(b"aes"));

    assert_eq!(
        decode_cose_sign1(&doc).unwrap_err(),
        CoseError::UnsupportedSigningAlgorithm("1".to_string())
    );
}

#[test]
fn missing_content_type() {
    let signer = es384_signer();

    let protected = HeaderBuilder::new()
        .algorithm(iana::Algorithm::ES384)
        .value(X5CHAIN, x5chain_value(signer.as_ref()))
        .build();

    let doc = build(signer.as_ref(), protected, Some(b"untyped"));

    let decoded = decode_cose_sign1(&doc).unwrap();
    assert_eq!(decoded.headers.content_type, None);

    assert_eq!(
        Verifier::new().verify_signature(&doc).unwrap_err(),
        CoseError::ContentTypeMissing
    );
}

#[test]
fn detached_payload() {
    let signer = es384_signer();

    let protected = HeaderBuilder::new()
        .algorithm(iana::Algorithm::ES384)
        .content_type("text/plain".to_string())
        .value(X5CHAIN, x5chain_value(signer.as_ref()))
        .build();

    let doc = build(signer.as_ref(), protected, None);

    assert_eq!(
        Verifier::new().verify_signature(&doc).unwrap_err(),
        CoseError::MissingPayload
    );
}

#[test]
fn unknown_labels_ignored() {
    let signer = es384_signer();

    let protected = HeaderBuilder::new()
        .algorithm(iana::Algorithm::ES384)
        .content_type("text/plain".to_string())
        .value(X5CHAIN, x5chain_value(signer.as_ref()))
        .text_value("svn".to_string(), Value::Integer(3.into()))
        .value(-70001, Value::Bool(true))
        .build();

    let doc = build(signer.as_ref(), protected, Some(b"extra"));

    let unpacked = Verifier::new().verify_signature(&doc).unwrap();
    assert_eq!(unpacked.issuer, None);
    assert_eq!(unpacked.feed, None);
}

#[test]
fn not_cbor() {
    let err = decode_cose_sign1(b"not a claims document").unwrap_err();
    assert!(matches!(err, CoseError::CborParsingError(_)));
    assert_eq!(err.kind(), ErrorKind::Format);

    let signer = es384_signer();
    let protected = HeaderBuilder::new()
        .algorithm(iana::Algorithm::ES384)
        .value(X5CHAIN, x5chain_value(signer.as_ref()))
        .build();
    let doc = build(signer.as_ref(), protected, Some(b"truncated"));

    assert!(matches!(
        decode_cose_sign1(&doc[..doc.len() - 10]).unwrap_err(),
        CoseError::CborParsingError(_)
    ));
}
