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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use hmacsign_core::{Context, Error, ProvideCredential, Result};
use ini::Ini;
use log::debug;

/// ProfileCredentialProvider loads veracode credentials from the credentials file.
///
/// ```ini
/// [default]
/// veracode_api_key_id = <key id>
/// veracode_api_key_secret = <hex secret>
/// ```
///
/// The file is `~/.veracode/credentials` unless `VERACODE_API_CREDENTIALS_FILE`
/// or [`ProfileCredentialProvider::with_credentials_file`] points elsewhere.
///
/// The profile to use is determined by:
/// 1. The profile specified via `with_profile()`
/// 2. The `VERACODE_API_PROFILE` environment variable
/// 3. Default to "default"
#[derive(Debug, Default)]
pub struct ProfileCredentialProvider {
    profile: Option<String>,
    credentials_file: Option<String>,
}

impl ProfileCredentialProvider {
    /// Create a new ProfileCredentialProvider with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the profile name to use.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the path to the credentials file.
    pub fn with_credentials_file(mut self, path: impl Into<String>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for ProfileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let path = self
            .credentials_file
            .clone()
            .or_else(|| ctx.env_var(VERACODE_API_CREDENTIALS_FILE))
            .unwrap_or_else(|| VERACODE_CREDENTIALS_PATH.to_string());

        let Some(expanded_path) = ctx.expand_home_dir(&path) else {
            debug!("failed to expand homedir for path: {path}");
            return Ok(None);
        };

        let content = match ctx.file_read_as_string(&expanded_path).await {
            Ok(content) => content,
            Err(err) => {
                debug!("failed to read credentials file {expanded_path}: {err:?}");
                return Ok(None);
            }
        };

        let conf = Ini::load_from_str(&content).map_err(|e| {
            Error::config_invalid(format!("failed to parse credentials file {expanded_path}"))
                .with_source(e)
        })?;

        let profile = self
            .profile
            .clone()
            .or_else(|| ctx.env_var(VERACODE_API_PROFILE))
            .unwrap_or_else(|| VERACODE_DEFAULT_PROFILE.to_string());

        let Some(props) = conf.section(Some(profile.as_str())) else {
            debug!("profile {profile} not found in credentials file");
            return Ok(None);
        };

        match (
            props.get(VERACODE_API_KEY_ID_PROPERTY),
            props.get(VERACODE_API_KEY_SECRET_PROPERTY),
        ) {
            (Some(key_id), Some(key_secret)) => {
                debug!("loading credential from profile {profile}");
                Ok(Some(Credential::new(key_id, key_secret)))
            }
            _ => {
                debug!("profile {profile} is incomplete, skipping");
                Ok(None)
            }
        }
    }
}
