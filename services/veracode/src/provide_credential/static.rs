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

use crate::Credential;
use async_trait::async_trait;
use hmacsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides static credentials that are provided at initialization time.
#[derive(Debug)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with the given key pair.
    pub fn new(key_id: &str, key_secret: &str) -> Self {
        Self {
            credential: Credential::new(key_id, key_secret),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_credential_provider() -> anyhow::Result<()> {
        let provider = StaticCredentialProvider::new("key1", "deadbeef");
        let cred = provider
            .provide_credential(&Context::new())
            .await?
            .expect("static provider must return a credential");

        assert_eq!(cred.key_id, "key1");
        assert_eq!(cred.key_secret, "deadbeef");
        Ok(())
    }

    #[test]
    fn test_static_credential_provider_debug_hides_secret() {
        let secret = "00112233445566778899aabbccddeeff00112233445566778899aabbccddee";
        let provider = StaticCredentialProvider::new("3ddaeeb10ca690df", secret);
        let s = format!("{provider:?}");

        assert!(s.contains("key_secret: ***"), "unexpected debug output: {s}");
        for fragment in [&secret[..3], &secret[secret.len() - 3..], secret] {
            assert!(!s.contains(fragment), "secret leaked in: {s}");
        }
    }
}
