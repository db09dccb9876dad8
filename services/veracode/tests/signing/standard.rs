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

use super::{init_signer, request_parts, KEY_ID, KEY_SECRET};
use anyhow::Result;
use hmacsign_core::ErrorKind;
use hmacsign_veracode::constants::{NONCE_SIZE, VERACODE_HMAC_SHA_256};
use hmacsign_veracode::{
    calculate_signature, canonical_data, compute_authorization_header, decode_secret,
    AuthorizationHeader,
};
use http::header::AUTHORIZATION;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn signed_header(parts: &http::request::Parts) -> Result<AuthorizationHeader> {
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .expect("authorization header must be set");
    Ok(value.to_str()?.parse()?)
}

#[test_case("GET", "https://api.veracode.com/appsec/v1/applications?page=0&size=50", "api.veracode.com", "/appsec/v1/applications?page=0&size=50"; "get with query")]
#[test_case("POST", "https://api.veracode.com/appsec/v1/applications", "api.veracode.com", "/appsec/v1/applications"; "post without query")]
#[test_case("DELETE", "https://api.veracode.eu:443/api/authn/v2/users/self", "api.veracode.eu", "/api/authn/v2/users/self"; "explicit port")]
#[test_case("PUT", "http://localhost:8080", "localhost", "/"; "root path")]
#[tokio::test]
async fn test_signed_request_verifies(
    method: &str,
    uri: &str,
    host: &str,
    request_uri: &str,
) -> Result<()> {
    let signer = init_signer(KEY_ID, KEY_SECRET);
    let mut parts = request_parts(method, uri);
    signer.sign(&mut parts, None).await?;

    let header = signed_header(&parts)?;
    assert_eq!(header.algorithm, VERACODE_HMAC_SHA_256);
    assert_eq!(header.key_id, KEY_ID);
    assert_eq!(header.nonce.len(), NONCE_SIZE);
    assert!(header.timestamp.parse::<i64>().is_ok());

    // Recompute the way a verifier would, from the values embedded in the header.
    let data = canonical_data(KEY_ID, host, request_uri, method);
    let expected = calculate_signature(
        &decode_secret(KEY_SECRET)?,
        &header.nonce,
        header.timestamp.as_bytes(),
        data.as_bytes(),
    );
    assert_eq!(header.signature, expected.to_vec());
    Ok(())
}

#[tokio::test]
async fn test_each_request_gets_a_fresh_nonce() -> Result<()> {
    let signer = init_signer(KEY_ID, KEY_SECRET);
    let uri = "https://api.veracode.com/appsec/v1/applications";

    let mut first = request_parts("GET", uri);
    signer.sign(&mut first, None).await?;
    let mut second = request_parts("GET", uri);
    signer.sign(&mut second, None).await?;

    let first = signed_header(&first)?;
    let second = signed_header(&second)?;
    assert_ne!(first.nonce, second.nonce);
    assert_ne!(first.signature, second.signature);
    Ok(())
}

#[tokio::test]
async fn test_invalid_secret_leaves_request_unsigned() {
    for secret in ["xyz", "abc"] {
        let signer = init_signer(KEY_ID, secret);
        let mut parts = request_parts("GET", "https://api.veracode.com/appsec/v1/applications");

        let err = signer.sign(&mut parts, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(!err.is_retryable());
        assert!(parts.headers.get(AUTHORIZATION).is_none());
    }
}

#[tokio::test]
async fn test_request_without_host_is_rejected() {
    let signer = init_signer(KEY_ID, KEY_SECRET);
    let mut parts = request_parts("GET", "/appsec/v1/applications");

    let err = signer.sign(&mut parts, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(parts.headers.get(AUTHORIZATION).is_none());
}

#[test]
fn test_compute_authorization_header_format() -> Result<()> {
    let uri = "https://api.veracode.com/appsec/v1/applications".parse()?;
    let value = compute_authorization_header(&uri, "GET", KEY_ID, KEY_SECRET)?;

    let prefix = format!("{VERACODE_HMAC_SHA_256} id={KEY_ID},ts=");
    assert!(value.starts_with(&prefix), "unexpected header: {value}");

    // Uppercase hex only for nonce and sig.
    let header: AuthorizationHeader = value.parse()?;
    assert!(value.ends_with(&format!(
        "nonce={},sig={}",
        hex::encode_upper(&header.nonce),
        hex::encode_upper(&header.signature)
    )));
    assert_eq!(header.to_string(), value);
    Ok(())
}

#[test]
fn test_compute_authorization_header_rejects_bad_secret() {
    let uri = "https://api.veracode.com/appsec/v1/applications"
        .parse()
        .expect("uri must parse");

    let err = compute_authorization_header(&uri, "GET", KEY_ID, "not-hex").unwrap_err();
    assert!(err.is_credential_error());
}
