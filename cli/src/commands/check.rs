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

use anyhow::{Context, Result};
use clap::Parser;
use did_x509::resolve;
use log::info;

use crate::commands::{read_input, verify, Trust};

#[derive(Debug, Parser)]
pub struct Check {
    /// Path to the COSE_Sign1 document.
    #[clap(long = "in")]
    pub input: PathBuf,

    /// Path to a public key (PEM) to check the signature with instead of the leaf's key.
    #[clap(long = "pub")]
    pub public_key: Option<PathBuf>,

    #[clap(flatten)]
    pub trust: Trust,

    /// Path to a certificate chain (PEM) to resolve `--did` against. Defaults to the
    /// embedded chain.
    #[clap(long)]
    pub chain: Option<PathBuf>,

    /// did:x509 identifier to resolve.
    #[clap(long)]
    pub did: Option<String>,
}

impl Check {
    pub fn execute(&self) -> Result<()> {
        let unpacked = verify(&self.input, self.public_key.as_deref(), &self.trust)?;

        println!("COSE_Sign1 document verified");

        info!("iss: {}", unpacked.issuer.as_deref().unwrap_or_default());
        info!("feed: {}", unpacked.feed.as_deref().unwrap_or_default());
        info!("cty: {}", unpacked.content_type);
        info!("pubkey: {}", unpacked.leaf_public_key_b64);
        info!("pubcert: {}", unpacked.leaf_cert_b64);
        info!("payload:\n{}", String::from_utf8_lossy(&unpacked.payload));

        let Some(did) = &self.did else {
            return Ok(());
        };

        let chain_pem = match &self.chain {
            Some(path) => read_input(path)?,
            None => unpacked.chain_pem.into_bytes(),
        };

        let doc = resolve(&chain_pem, did, true)
            .with_context(|| format!("Failed to resolve {did}"))?;

        println!("{}", doc.to_json()?);

        Ok(())
    }
}
