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
use did_x509::{make_did, FingerprintAlg};

use crate::commands::read_input;

#[derive(Debug, Parser)]
pub struct DidX509 {
    /// Path to the certificate chain in PEM format, leaf first.
    #[clap(long)]
    pub chain: PathBuf,

    /// Hash algorithm for the certificate fingerprint (sha256, sha384, sha512).
    #[clap(long, default_value = "sha256")]
    pub fingerprint_algorithm: FingerprintAlg,

    /// Index of the fingerprinted certificate in the chain (1 is the first issuer).
    #[clap(short, long = "index", default_value_t = 1)]
    pub i: usize,

    /// Policy: `CN`, `EKU`, or a custom policy such as `subject:O:Contoso Ltd`.
    #[clap(long, default_value = "CN")]
    pub policy: String,

    /// Resolve the generated DID against the chain before printing it.
    #[clap(long)]
    pub strict: bool,
}

impl DidX509 {
    pub fn execute(&self) -> Result<()> {
        let chain = read_input(&self.chain)?;

        let did = make_did(
            self.fingerprint_algorithm,
            self.i,
            &chain,
            &self.policy,
            self.strict,
        )
        .context("Failed to make did:x509")?;

        println!("{did}");
        Ok(())
    }
}
