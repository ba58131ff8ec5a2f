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

//! Base64 convenience functions.
//!
//! Encoded output never contains line breaks. Callers compare these strings
//! directly, so the single-line form is part of the contract.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    DecodeError, Engine as _,
};

/// Encode a byte slice as standard (padded) base64.
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard (padded) base64.
pub fn decode(data: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(data)
}

/// Encode a byte slice as URL-safe base64 without padding.
pub fn encode_url_safe_no_pad(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}
