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

use crate::{DidX509Error, Jwk};

/// JSON-LD context of every DID document.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

const KEY_ID: &str = "key-1";

/// A resolved `did:x509` DID document.
///
/// The single verification method is the leaf certificate's public key.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DidDocument {
    /// JSON-LD context.
    #[serde(rename = "@context")]
    pub context: String,

    /// The DID being described.
    pub id: String,

    /// The leaf key.
    #[serde(rename = "verificationMethod")]
    pub verification_method: Vec<VerificationMethod>,

    /// Present when the leaf may sign.
    #[serde(
        rename = "assertionMethod",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub assertion_method: Vec<String>,

    /// Present when the leaf may be used for key agreement.
    #[serde(rename = "keyAgreement", default, skip_serializing_if = "Vec::is_empty")]
    pub key_agreement: Vec<String>,
}

/// A `JsonWebKey2020` verification method.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VerificationMethod {
    /// `<did>#key-1`
    pub id: String,

    /// Always `JsonWebKey2020`.
    #[serde(rename = "type")]
    pub method_type: String,

    /// The DID that controls this key.
    pub controller: String,

    /// The leaf public key.
    #[serde(rename = "publicKeyJwk")]
    pub public_key_jwk: Jwk,
}

impl DidDocument {
    pub(crate) fn new(
        did: &str,
        jwk: Jwk,
        assertion_method: bool,
        key_agreement: bool,
    ) -> Self {
        let key_id = format!("{did}#{KEY_ID}");

        Self {
            context: DID_CONTEXT.to_string(),
            id: did.to_string(),
            verification_method: vec![VerificationMethod {
                id: key_id.clone(),
                method_type: "JsonWebKey2020".to_string(),
                controller: did.to_string(),
                public_key_jwk: jwk,
            }],
            assertion_method: if assertion_method {
                vec![key_id.clone()]
            } else {
                vec![]
            },
            key_agreement: if key_agreement { vec![key_id] } else { vec![] },
        }
    }

    /// Render the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DidX509Error> {
        serde_json::to_string_pretty(self).map_err(|e| DidX509Error::JsonError(e.to_string()))
    }
}
