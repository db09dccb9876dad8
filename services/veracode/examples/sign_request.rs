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

//! Print the veracode authorization header for a request.
//!
//! ```shell
//! export VERACODE_API_KEY_ID=...
//! export VERACODE_API_KEY_SECRET=...
//! RUST_LOG=debug cargo run --example sign_request -- GET https://api.veracode.com/appsec/v1/applications
//! ```
//!
//! Credentials are taken from the environment first and from
//! `~/.veracode/credentials` otherwise.

use anyhow::{anyhow, Result};
use hmacsign_core::{Context, OsEnv, Signer};
use hmacsign_file_read_tokio::TokioFileRead;
use hmacsign_veracode::{DefaultCredentialProvider, RequestSigner};
use http::header::AUTHORIZATION;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (method, url) = match (args.next(), args.next()) {
        (Some(method), Some(url)) => (method, url),
        (Some(url), None) => ("GET".to_string(), url),
        _ => return Err(anyhow!("usage: sign_request [METHOD] URL")),
    };

    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());

    let mut parts = http::Request::builder()
        .method(method.as_str())
        .uri(url.as_str())
        .body(())?
        .into_parts()
        .0;
    signer.sign(&mut parts, None).await?;

    println!("{}: {}", AUTHORIZATION, parts.headers[AUTHORIZATION].to_str()?);
    Ok(())
}
