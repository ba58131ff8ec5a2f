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

use rand::RngCore;

use crate::raw_signature::{Salt, UnknownSaltError};

#[test]
fn salt_from_str() {
    assert_eq!("rand".parse(), Ok(Salt::Random));
    assert_eq!("zero".parse(), Ok(Salt::Zero));

    let r: Result<Salt, UnknownSaltError> = "pepper".parse();
    assert_eq!(r, Err(UnknownSaltError("pepper".to_string())));
}

#[test]
fn salt_display() {
    assert_eq!(Salt::Random.to_string(), "rand");
    assert_eq!(Salt::Zero.to_string(), "zero");
    assert_eq!(Salt::default(), Salt::Random);
}

#[test]
fn zero_rng() {
    let mut rng = Salt::Zero.rng();

    let mut buf = [0xffu8; 32];
    rng.fill_bytes(&mut buf);

    assert_eq!(buf, [0u8; 32]);
    assert_eq!(rng.next_u64(), 0);
}

#[test]
fn random_rng() {
    let mut rng = Salt::Random.rng();

    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    rng.fill_bytes(&mut a);
    rng.fill_bytes(&mut b);

    assert_ne!(a, b);
}
