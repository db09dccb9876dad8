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

use std::time::Duration;

use async_trait::async_trait;
use hmacsign_core::time::DateTime;
use hmacsign_core::{Context, Error, Result, SignRequest};
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{HeaderValue, Uri};
use log::debug;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::NONCE_SIZE;
use crate::credential::Credential;
use crate::header::AuthorizationHeader;
use crate::key::decode_secret;
use crate::nonce::{current_timestamp_millis, generate_nonce_with};
use crate::signature::{calculate_signature, canonical_data};

/// Compute the `Authorization` header value for a veracode api request.
///
/// A fresh nonce and the current timestamp are drawn for every call. On error
/// no header is produced and the request must not be sent.
///
/// ```
/// use hmacsign_veracode::compute_authorization_header;
///
/// let uri = "https://api.veracode.com/appsec/v1/applications?page=0".parse().unwrap();
/// let header = compute_authorization_header(&uri, "GET", "key1", "deadbeef").unwrap();
/// assert!(header.starts_with("VERACODE-HMAC-SHA-256 id=key1,ts="));
/// ```
pub fn compute_authorization_header(
    uri: &Uri,
    method: &str,
    key_id: &str,
    key_secret: &str,
) -> Result<String> {
    compute_authorization_header_with(&mut OsRng, uri, method, key_id, key_secret)
}

fn compute_authorization_header_with(
    rng: &mut impl RngCore,
    uri: &Uri,
    method: &str,
    key_id: &str,
    key_secret: &str,
) -> Result<String> {
    let secret = decode_secret(key_secret)?;
    let nonce = generate_nonce_with(rng, NONCE_SIZE)?;
    let timestamp = current_timestamp_millis().to_string();

    let header = build_header(uri, method, key_id, &secret, nonce, timestamp)?;
    Ok(header.to_string())
}

/// RequestSigner that implements Veracode HMAC authentication.
///
/// The header is inserted into the request as a sensitive `Authorization` value.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    nonce: Option<Vec<u8>>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Reusing a nonce defeats replay protection.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: Vec<u8>) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Build the header and insert it, `req` stays untouched on error.
    fn sign_parts(&self, rng: &mut impl RngCore, req: &mut Parts, cred: &Credential) -> Result<()> {
        let secret = cred.secret_bytes()?;
        let nonce = match &self.nonce {
            Some(nonce) => nonce.clone(),
            None => generate_nonce_with(rng, NONCE_SIZE)?,
        };
        let timestamp = self
            .time
            .map(|t| t.timestamp_millis())
            .unwrap_or_else(current_timestamp_millis)
            .to_string();

        let header = build_header(
            &req.uri,
            req.method.as_str(),
            &cred.key_id,
            &secret,
            nonce,
            timestamp,
        )?;

        let mut value: HeaderValue = header.to_string().parse()?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        Ok(())
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "veracode hmac does not support query signing",
            ));
        }

        self.sign_parts(&mut OsRng, req, cred)
    }
}

/// Sign with the given nonce and timestamp, both go into the signature and the header.
fn build_header(
    uri: &Uri,
    method: &str,
    key_id: &str,
    secret: &[u8],
    nonce: Vec<u8>,
    timestamp: String,
) -> Result<AuthorizationHeader> {
    let host = request_host(uri)?;
    let request_uri = request_uri(uri);

    let data = canonical_data(key_id, host, &request_uri, method);
    debug!("canonical data: {data}");

    let signature = calculate_signature(secret, &nonce, timestamp.as_bytes(), data.as_bytes());
    Ok(AuthorizationHeader::new(key_id, timestamp, nonce, signature))
}

/// Host without port. IPv6 literals lose their brackets.
fn request_host(uri: &Uri) -> Result<&str> {
    let host = uri
        .host()
        .ok_or_else(|| Error::request_invalid("request without host is invalid for signing"))?;

    Ok(host.trim_start_matches('[').trim_end_matches(']'))
}

/// Path plus query exactly as sent on the wire, path defaults to `/`.
fn request_uri(uri: &Uri) -> String {
    let path = match uri.path() {
        "" => "/",
        path => path,
    };

    match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nonce::FailingRng;
    use hmacsign_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const SECRET: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddee";
    const GOLDEN: &str = "VERACODE-HMAC-SHA-256 id=key1,ts=1700000000000,\
        nonce=0102030405060708090A0B0C0D0E0F10,\
        sig=FF4D039DE6DCEF7FBF422AB3057E5F8B966D2D21919D707D30F4CED7BE438BFC";

    fn fixed_signer() -> RequestSigner {
        RequestSigner::new()
            .with_time(DateTime::from_timestamp_millis(1_700_000_000_000).unwrap())
            .with_nonce((1..=16).collect())
    }

    fn parts(method: &str, uri: &str) -> Parts {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test_case("https://api.example.com/v1/items?x=1", "api.example.com", "/v1/items?x=1"; "path and query")]
    #[test_case("https://api.example.com:8443/v1/items", "api.example.com", "/v1/items"; "port is dropped")]
    #[test_case("https://api.example.com", "api.example.com", "/"; "empty path")]
    #[test_case("http://[::1]:8080/a?b=c&d", "::1", "/a?b=c&d"; "ipv6 host")]
    #[test_case("https://api.example.com/a%20b?q=%2F", "api.example.com", "/a%20b?q=%2F"; "escapes kept")]
    fn test_request_target(uri: &str, host: &str, target: &str) {
        let uri: Uri = uri.parse().unwrap();
        assert_eq!(request_host(&uri).unwrap(), host);
        assert_eq!(request_uri(&uri), target);
    }

    #[test]
    fn test_request_without_host() {
        let uri: Uri = "/v1/items".parse().unwrap();
        let err = request_host(&uri).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_build_header_golden() -> Result<()> {
        let uri: Uri = "https://api.example.com/v1/items?x=1".parse()?;
        let header = build_header(
            &uri,
            "GET",
            "key1",
            &decode_secret(SECRET)?,
            (1..=16).collect(),
            "1700000000000".to_string(),
        )?;

        assert_eq!(header.to_string(), GOLDEN);
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_request() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut req = parts("GET", "https://api.example.com/v1/items?x=1");
        let cred = Credential::new("key1", SECRET);
        fixed_signer()
            .sign_request(&Context::new(), &mut req, Some(&cred), None)
            .await?;

        let value = &req.headers[AUTHORIZATION];
        assert!(value.is_sensitive());
        assert_eq!(value.to_str()?, GOLDEN);
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_request_without_credential() {
        let mut req = parts("GET", "https://api.example.com/v1/items");
        let err = fixed_signer()
            .sign_request(&Context::new(), &mut req, None, None)
            .await
            .unwrap_err();

        assert!(err.is_credential_error());
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_sign_request_with_bad_secret() {
        let mut req = parts("GET", "https://api.example.com/v1/items");
        let cred = Credential::new("key1", "abc");
        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut req, Some(&cred), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_sign_request_rejects_query_signing() {
        let mut req = parts("GET", "https://api.example.com/v1/items");
        let cred = Credential::new("key1", SECRET);
        let err = RequestSigner::new()
            .sign_request(
                &Context::new(),
                &mut req,
                Some(&cred),
                Some(Duration::from_secs(60)),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_compute_authorization_header_is_fresh() -> Result<()> {
        let uri: Uri = "https://api.example.com/v1/items?x=1".parse()?;

        let a = compute_authorization_header(&uri, "GET", "key1", SECRET)?;
        let b = compute_authorization_header(&uri, "GET", "key1", SECRET)?;
        assert_ne!(a, b);

        let a: AuthorizationHeader = a.parse()?;
        let b: AuthorizationHeader = b.parse()?;
        assert_eq!(a.nonce.len(), NONCE_SIZE);
        assert_eq!(b.nonce.len(), NONCE_SIZE);
        assert_ne!(a.nonce, b.nonce);
        Ok(())
    }

    #[test]
    fn test_compute_authorization_header_verifies() -> Result<()> {
        let uri: Uri = "https://api.example.com/v1/items?x=1".parse()?;
        let header: AuthorizationHeader =
            compute_authorization_header(&uri, "POST", "key1", SECRET)?.parse()?;

        let data = canonical_data("key1", "api.example.com", "/v1/items?x=1", "POST");
        let expected = calculate_signature(
            &decode_secret(SECRET)?,
            &header.nonce,
            header.timestamp.as_bytes(),
            data.as_bytes(),
        );
        assert_eq!(header.signature, expected.to_vec());
        Ok(())
    }

    #[test]
    fn test_compute_authorization_header_with_failing_random_source() {
        let uri: Uri = "https://api.example.com/v1/items".parse().unwrap();
        let err =
            compute_authorization_header_with(&mut FailingRng, &uri, "GET", "key1", SECRET)
                .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RandomSource);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_sign_with_failing_random_source() {
        let mut req = parts("GET", "https://api.example.com/v1/items");
        let cred = Credential::new("key1", SECRET);
        let err = RequestSigner::new()
            .sign_parts(&mut FailingRng, &mut req, &cred)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RandomSource);
        assert!(err.is_retryable());
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }
}
