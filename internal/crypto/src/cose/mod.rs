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

//! COSE_Sign1 claims documents whose protected header carries the signer's
//! certificate chain.
//!
//! A claims document is a [COSE_Sign1] structure with an embedded payload. Its
//! protected header contains the signing algorithm, the payload content type,
//! the `x5chain` certificate chain ([RFC 9360]), and optionally the text-keyed
//! `iss` and `feed` labels.
//!
//! [COSE_Sign1]: https://datatracker.ietf.org/doc/html/rfc9052#section-4.2
//! [RFC 9360]: https://datatracker.ietf.org/doc/html/rfc9360

mod error;
pub use error::CoseError;

mod headers;
pub use headers::{Sign1Headers, X5Chain, FEED_LABEL, ISSUER_LABEL};

mod sign;
pub use sign::{create_cose_sign1, sign};

mod verifier;
pub use verifier::{decode_cose_sign1, print_chain, DecodedCoseSign1, UnpackedCoseSign1, Verifier};
