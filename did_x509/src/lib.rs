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

#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg, doc_cfg_hide))]

mod did;
pub use did::{fingerprint, DidPolicy, DidX509, FingerprintAlg, SanType};

mod document;
pub use document::{DidDocument, VerificationMethod, DID_CONTEXT};

pub(crate) mod escape;

mod error;
pub use error::DidX509Error;

mod jwk;
pub use jwk::Jwk;

mod make_did;
pub use make_did::make_did;

mod policy;

mod resolver;
pub use resolver::{resolve, ResolveStage};

pub use sign1_crypto::ErrorKind;

#[cfg(test)]
pub(crate) mod tests;
