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

use std::fmt::{Debug, Formatter};

use hmacsign_core::{utils::Redact, Result, SigningCredential};

use crate::key::decode_secret;

/// Credential for veracode api.
///
/// The secret is kept in its hexadecimal form and decoded on every signing
/// so that a malformed secret always surfaces as an error at signing time.
#[derive(Clone)]
pub struct Credential {
    /// API key id, passed through literally.
    pub key_id: String,
    /// API key secret, hexadecimal encoded.
    pub key_secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }

    /// Decode the hex secret into raw key bytes.
    pub fn secret_bytes(&self) -> Result<Vec<u8>> {
        decode_secret(&self.key_secret)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key_id", &Redact::from(&self.key_id))
            .field("key_secret", &Redact::full(&self.key_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.key_id.is_empty() && !self.key_secret.is_empty()
    }
}
