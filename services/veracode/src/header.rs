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

use std::fmt;
use std::str::FromStr;
use std::str::Split;

use hmacsign_core::Error;

use crate::constants::VERACODE_HMAC_SHA_256;

/// AuthorizationHeader is the structured form of the header value.
///
/// ## Format
///
/// ```text
/// VERACODE-HMAC-SHA-256 id=<key_id>,ts=<timestamp>,nonce=<NONCE>,sig=<SIGNATURE>
/// ```
///
/// Nonce and signature are rendered as uppercase hex. Parsing accepts either case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    /// Scheme name, always [`VERACODE_HMAC_SHA_256`] for headers built here.
    pub algorithm: String,
    /// API key id.
    pub key_id: String,
    /// Milliseconds since the unix epoch as a decimal string.
    pub timestamp: String,
    /// Raw nonce bytes.
    pub nonce: Vec<u8>,
    /// Raw signature bytes.
    pub signature: Vec<u8>,
}

impl AuthorizationHeader {
    /// Assemble a header for the veracode hmac scheme.
    pub fn new(
        key_id: impl Into<String>,
        timestamp: impl Into<String>,
        nonce: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            algorithm: VERACODE_HMAC_SHA_256.to_string(),
            key_id: key_id.into(),
            timestamp: timestamp.into(),
            nonce: nonce.into(),
            signature: signature.into(),
        }
    }
}

impl fmt::Display for AuthorizationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} id={},ts={},nonce={},sig={}",
            self.algorithm,
            self.key_id,
            self.timestamp,
            hex::encode_upper(&self.nonce),
            hex::encode_upper(&self.signature)
        )
    }
}

impl FromStr for AuthorizationHeader {
    type Err = Error;

    /// Parse a header value back into its fields.
    ///
    /// Fields must appear in the emitted order. Key ids containing `,` cannot
    /// be parsed back.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algorithm, params) = s
            .split_once(' ')
            .ok_or_else(|| Error::request_invalid("authorization header has no parameters"))?;

        let mut fields = params.split(',');
        let key_id = next_field(&mut fields, "id")?;
        let timestamp = next_field(&mut fields, "ts")?;
        let nonce = next_field(&mut fields, "nonce")?;
        let signature = next_field(&mut fields, "sig")?;
        if fields.next().is_some() {
            return Err(Error::request_invalid(
                "authorization header has trailing fields",
            ));
        }

        let decode = |name: &str, value: &str| {
            hex::decode(value).map_err(|e| {
                Error::request_invalid(format!("authorization header field {name} is not hex"))
                    .with_source(e)
            })
        };

        Ok(Self {
            algorithm: algorithm.to_string(),
            key_id: key_id.to_string(),
            timestamp: timestamp.to_string(),
            nonce: decode("nonce", nonce)?,
            signature: decode("sig", signature)?,
        })
    }
}

fn next_field<'a>(fields: &mut Split<'a, char>, name: &str) -> Result<&'a str, Error> {
    fields
        .next()
        .and_then(|field| field.strip_prefix(name))
        .and_then(|field| field.strip_prefix('='))
        .ok_or_else(|| Error::request_invalid(format!("authorization header misses field {name}")))
}
