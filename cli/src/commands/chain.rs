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
use sign1_crypto::cose::print_chain;

use crate::commands::read_input;

#[derive(Debug, Parser)]
pub struct Chain {
    /// Path to the COSE_Sign1 document.
    #[clap(long = "in")]
    pub input: PathBuf,
}

impl Chain {
    pub fn execute(&self) -> Result<()> {
        let cose = read_input(&self.input)?;
        let chain = print_chain(&cose)
            .with_context(|| format!("Failed to read certificate chain from {:?}", self.input))?;

        print!("{chain}");
        Ok(())
    }
}
