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

/// Scheme name that prefixes every authorization header.
pub const VERACODE_HMAC_SHA_256: &str = "VERACODE-HMAC-SHA-256";
/// Protocol version literal mixed into the key derivation.
pub const VERACODE_REQUEST_VERSION: &str = "vcode_request_version_1";
/// Nonce length in bytes.
pub const NONCE_SIZE: usize = 16;

// Env values used in veracode services.
pub const VERACODE_API_KEY_ID: &str = "VERACODE_API_KEY_ID";
pub const VERACODE_API_KEY_SECRET: &str = "VERACODE_API_KEY_SECRET";
pub const VERACODE_API_PROFILE: &str = "VERACODE_API_PROFILE";
pub const VERACODE_API_CREDENTIALS_FILE: &str = "VERACODE_API_CREDENTIALS_FILE";

// Credentials file layout.
pub const VERACODE_CREDENTIALS_PATH: &str = "~/.veracode/credentials";
pub const VERACODE_DEFAULT_PROFILE: &str = "default";
pub const VERACODE_API_KEY_ID_PROPERTY: &str = "veracode_api_key_id";
pub const VERACODE_API_KEY_SECRET_PROPERTY: &str = "veracode_api_key_secret";
