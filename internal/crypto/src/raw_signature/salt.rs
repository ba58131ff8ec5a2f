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

use std::{fmt, str::FromStr};

use rand::{rngs::ThreadRng, CryptoRng, RngCore};

/// Source of the randomness consumed while signing.
///
/// [`Salt::Zero`] replaces the random stream with zero bytes so that signing
/// the same input twice produces byte-identical output. It exists for test
/// fixtures and for reproducible fragment hashes; it must not be used for
/// production signatures.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Salt {
    /// Draw from the thread-local CSPRNG.
    #[default]
    Random,

    /// Use a stream of zero bytes.
    Zero,
}

impl Salt {
    pub(crate) fn rng(&self) -> SaltRng {
        match self {
            Self::Random => SaltRng::Random(rand::thread_rng()),
            Self::Zero => SaltRng::Zero,
        }
    }
}

impl FromStr for Salt {
    type Err = UnknownSaltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rand" => Ok(Self::Random),
            "zero" => Ok(Self::Zero),
            _ => Err(UnknownSaltError(s.to_owned())),
        }
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Random => "rand",
            Self::Zero => "zero",
        })
    }
}

/// This error is thrown when a salt type other than "rand" or "zero" is
/// requested.
#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown salt type ({0}); expected \"rand\" or \"zero\"")]
pub struct UnknownSaltError(pub String);

pub(crate) enum SaltRng {
    Random(ThreadRng),
    Zero,
}

impl RngCore for SaltRng {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Random(rng) => rng.next_u32(),
            Self::Zero => 0,
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Random(rng) => rng.next_u64(),
            Self::Zero => 0,
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match self {
            Self::Random(rng) => rng.fill_bytes(dest),
            Self::Zero => dest.fill(0),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// The zero stream is only reachable through `Salt::Zero`, which callers
// select explicitly for reproducible output.
impl CryptoRng for SaltRng {}
