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
use log::info;

use crate::commands::{verify, write_output, Trust};

#[derive(Debug, Parser)]
pub struct Leaf {
    /// Path to the COSE_Sign1 document.
    #[clap(long = "in")]
    pub input: PathBuf,

    /// Output file for the base64 leaf public key.
    #[clap(long, default_value = "leafkey.pem")]
    pub keyout: PathBuf,

    /// Output file for the base64 leaf certificate.
    #[clap(long, default_value = "leafcert.pem")]
    pub certout: PathBuf,

    #[clap(flatten)]
    pub trust: Trust,
}

impl Leaf {
    pub fn execute(&self) -> Result<()> {
        let unpacked = verify(&self.input, None, &self.trust)?;

        write_output(&self.keyout, &unpacked.leaf_public_key_b64)?;
        write_output(&self.certout, &unpacked.leaf_cert_b64)?;

        info!("wrote leaf key to {:?} and certificate to {:?}", self.keyout, self.certout);
        Ok(())
    }
}
