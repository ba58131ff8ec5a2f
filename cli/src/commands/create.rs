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
use log::info;
use sign1_crypto::{
    cose::create_cose_sign1,
    raw_signature::{Salt, SigningAlg},
};

use crate::commands::{read_input, write_output};

#[derive(Debug, Parser)]
pub struct Create {
    /// Path to the payload to sign.
    #[clap(long)]
    pub claims: PathBuf,

    /// Content type of the payload.
    #[clap(long, default_value = "application/unknown+json")]
    pub content_type: String,

    /// Path to the signer's certificate chain in PEM format, leaf first.
    #[clap(long)]
    pub chain: PathBuf,

    /// Path to the leaf certificate's private key in PEM format.
    #[clap(long)]
    pub key: PathBuf,

    /// Path to output file.
    #[clap(long, default_value = "out.cose")]
    pub out: PathBuf,

    /// Salt for PS* signatures: `rand` or `zero`.
    #[clap(long, default_value = "rand")]
    pub salt: Salt,

    /// Signing algorithm (PS256, PS384, PS512, ES256, ES384, ES512, EdDSA).
    #[clap(long, default_value = "PS384")]
    pub algo: SigningAlg,

    /// The party making the claims.
    #[clap(long)]
    pub issuer: Option<String>,

    /// Identifier for an artifact within the scope of the issuer.
    #[clap(long)]
    pub feed: Option<String>,
}

impl Create {
    pub fn execute(&self) -> Result<()> {
        let payload = read_input(&self.claims)?;
        let chain = read_input(&self.chain)?;
        let key = read_input(&self.key)?;

        let cose = create_cose_sign1(
            &payload,
            self.issuer.as_deref(),
            self.feed.as_deref(),
            &self.content_type,
            &chain,
            &key,
            self.algo,
            self.salt,
        )
        .context("Failed to create COSE_Sign1 document")?;

        write_output(&self.out, &cose)?;
        info!("wrote {} bytes to {:?}", cose.len(), self.out);

        Ok(())
    }
}
