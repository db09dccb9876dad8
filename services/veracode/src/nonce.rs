// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Fresh per-request values: the nonce and the timestamp.
//!
//! Neither value may be cached or pooled across requests.

use hmacsign_core::time::now;
use hmacsign_core::{Error, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// Fill `size` bytes from the operating system's secure random source.
///
/// A failing source is reported as [`hmacsign_core::ErrorKind::RandomSource`].
/// There is no fallback to a weaker generator.
pub fn generate_nonce(size: usize) -> Result<Vec<u8>> {
    generate_nonce_with(&mut OsRng, size)
}

/// Fill `size` bytes from `rng`, surfacing its failures instead of retrying.
pub(crate) fn generate_nonce_with(rng: &mut impl RngCore, size: usize) -> Result<Vec<u8>> {
    let mut nonce = vec![0u8; size];
    rng.try_fill_bytes(&mut nonce).map_err(|e| {
        Error::random_source("failed to read nonce from secure random source").with_source(e)
    })?;

    Ok(nonce)
}

/// Current wall clock time in milliseconds since the unix epoch.
pub fn current_timestamp_millis() -> i64 {
    now().timestamp_millis()
}

/// A random source that always fails, as an exhausted entropy pool would.
#[cfg(test)]
pub(crate) struct FailingRng;

#[cfg(test)]
impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        unreachable!("signing must only use try_fill_bytes")
    }

    fn next_u64(&mut self) -> u64 {
        unreachable!("signing must only use try_fill_bytes")
    }

    fn fill_bytes(&mut self, _: &mut [u8]) {
        unreachable!("signing must only use try_fill_bytes")
    }

    fn try_fill_bytes(&mut self, _: &mut [u8]) -> std::result::Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "entropy source unavailable",
        )))
    }
}
