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

#![doc = include_str!("../README.md")]

use anyhow::Result;
use clap::Parser;

mod commands;
use commands::{CliArgs, Commands};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // RUST_LOG wins over -v when it is set.
    let level = match args.verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match args.command {
        Commands::Create(create) => create.execute(),
        Commands::Check(check) => check.execute(),
        Commands::Print(print) => print.execute(),
        Commands::Leaf(leaf) => leaf.execute(),
        Commands::DidX509(did) => did.execute(),
        Commands::Chain(chain) => chain.execute(),
    }
}
