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

//! Signer for the Veracode HMAC authentication scheme.
//!
//! Every request is signed with a key derived through a chain of
//! HMAC-SHA256 applications over a fresh nonce, the current timestamp and the
//! protocol version, then over the canonical request data:
//!
//! ```text
//! VERACODE-HMAC-SHA-256 id=<key_id>,ts=<millis>,nonce=<HEX>,sig=<HEX>
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use hmacsign_core::{Context, OsEnv, Signer};
//! use hmacsign_file_read_tokio::TokioFileRead;
//! use hmacsign_veracode::{DefaultCredentialProvider, RequestSigner};
//!
//! # async fn example() -> hmacsign_core::Result<()> {
//! let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
//! let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());
//!
//! let mut parts = http::Request::get("https://api.veracode.com/appsec/v1/applications")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

pub mod constants;

mod credential;
pub use credential::Credential;

mod key;
pub use key::decode_secret;

mod nonce;
pub use nonce::{current_timestamp_millis, generate_nonce};

mod signature;
pub use signature::{calculate_signature, canonical_data};

mod header;
pub use header::AuthorizationHeader;

mod sign_request;
pub use sign_request::{compute_authorization_header, RequestSigner};

mod provide_credential;
pub use provide_credential::*;
