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

use std::fmt;

/// Broad classification of every error this crate (and `did-x509`) reports.
///
/// Callers that only need to decide how to react to a failure can branch on
/// the kind instead of matching every concrete error variant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// Malformed CBOR, PEM, DER, or DID text.
    Format,

    /// Missing, unsupported, or mismatched algorithm.
    Algorithm,

    /// Missing, too short, too long, or untrusted certificate chain.
    Chain,

    /// Signature verification failure.
    Signature,

    /// A did:x509 policy did not match the certificate.
    Policy,

    /// No usable key encoding was found.
    Key,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Format => "format error",
            Self::Algorithm => "algorithm error",
            Self::Chain => "certificate chain error",
            Self::Signature => "signature error",
            Self::Policy => "policy error",
            Self::Key => "key error",
        })
    }
}
