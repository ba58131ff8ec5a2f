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

mod chain;
mod check;
mod create;
mod did;
mod leaf;
mod print;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::debug;
use sign1_crypto::{
    cert_chain::{pem_to_certificates, Certificate},
    cose::{UnpackedCoseSign1, Verifier},
    raw_signature::keys::{parse_public_key_pem, PublicKey},
};

pub use self::{
    chain::Chain, check::Check, create::Create, did::DidX509, leaf::Leaf, print::Print,
};

/// Tool for creating and checking COSE_Sign1 claims documents.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    /// Use verbose output (-vv very verbose output).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign a claims file and write a COSE_Sign1 document.
    Create(Create),
    /// Verify a COSE_Sign1 document and optionally resolve a did:x509 against its chain.
    Check(Check),
    /// Verify a COSE_Sign1 document and print its contents.
    Print(Print),
    /// Write the leaf public key and certificate of a verified document.
    Leaf(Leaf),
    /// Print a did:x509 identifier for a certificate chain.
    #[command(name = "did:x509")]
    DidX509(DidX509),
    /// Print the certificate chain embedded in a document without verifying it.
    Chain(Chain),
}

#[derive(Debug, Default, Args)]
pub struct Trust {
    /// Path to file containing trusted root CA certificates in PEM format.
    #[clap(long, env = "SIGN1UTIL_ROOT")]
    pub root: Option<PathBuf>,
}

impl Trust {
    fn load_roots(&self) -> Result<Option<Vec<Certificate>>> {
        let Some(path) = &self.root else {
            return Ok(None);
        };

        let roots = pem_to_certificates(&read_input(path)?)
            .with_context(|| format!("Failed to load trusted roots from {:?}", path))?;

        debug!("loaded {} trusted root(s) from {:?}", roots.len(), path);
        Ok(Some(roots))
    }
}

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read input from path: {:?}", path))
}

pub(crate) fn write_output(path: &Path, data: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, data).with_context(|| format!("Failed to write output to path: {:?}", path))
}

/// Decode and verify the document at `input`.
pub(crate) fn verify(
    input: &Path,
    public_key: Option<&Path>,
    trust: &Trust,
) -> Result<UnpackedCoseSign1> {
    let cose = read_input(input)?;
    let roots = trust.load_roots()?;

    let public_key: Option<PublicKey> = match public_key {
        Some(path) => Some(
            parse_public_key_pem(&read_input(path)?)
                .with_context(|| format!("Failed to load public key from {:?}", path))?,
        ),
        None => None,
    };

    let mut verifier = Verifier::new();

    if let Some(roots) = roots.as_deref() {
        verifier = verifier.with_trusted_roots(roots);
    }

    if let Some(public_key) = public_key.as_ref() {
        verifier = verifier.with_public_key(public_key);
    }

    verifier
        .verify_signature(&cose)
        .with_context(|| format!("Failed to verify {:?}", input))
}
