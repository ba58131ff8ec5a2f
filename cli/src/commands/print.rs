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

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::commands::{verify, Trust};

#[derive(Debug, Parser)]
pub struct Print {
    /// Path to the COSE_Sign1 document.
    #[clap(long = "in")]
    pub input: PathBuf,

    #[clap(flatten)]
    pub trust: Trust,
}

impl Print {
    pub fn execute(&self) -> Result<()> {
        let unpacked = verify(&self.input, None, &self.trust)?;

        println!("iss: {}", unpacked.issuer.as_deref().unwrap_or_default());
        println!("feed: {}", unpacked.feed.as_deref().unwrap_or_default());
        println!("cty: {}", unpacked.content_type);
        println!("alg: {}", unpacked.alg);
        println!("pubkey: {}", unpacked.leaf_public_key_b64);
        println!("pubcert: {}", unpacked.leaf_cert_b64);
        println!("payload:\n{}", String::from_utf8_lossy(&unpacked.payload));
        println!("chain:\n{}", unpacked.chain_pem);

        Ok(())
    }
}
