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

use hmacsign_core::hash::{hmac_sha256, SHA256_DIGEST_SIZE};

use crate::constants::VERACODE_REQUEST_VERSION;

/// Build the canonical data that gets signed.
///
/// ## Format
///
/// ```text
/// id=<key_id>&host=<host>&url=<request_uri>&method=<method>
/// ```
///
/// Fields are substituted literally, the order is fixed.
pub fn canonical_data(key_id: &str, host: &str, request_uri: &str, method: &str) -> String {
    format!("id={key_id}&host={host}&url={request_uri}&method={method}")
}

/// Derive the request signature through the HMAC-SHA256 chain.
///
/// ```text
/// k1        = HMAC(secret, nonce)
/// k2        = HMAC(k1, timestamp)
/// k3        = HMAC(k2, "vcode_request_version_1")
/// signature = HMAC(k3, data)
/// ```
///
/// Each digest keys the next step. The same nonce and timestamp must be
/// embedded in the header, otherwise the receiver cannot verify it.
pub fn calculate_signature(
    secret: &[u8],
    nonce: &[u8],
    timestamp: &[u8],
    data: &[u8],
) -> [u8; SHA256_DIGEST_SIZE] {
    let nonce_key = hmac_sha256(secret, nonce);
    let timestamp_key = hmac_sha256(&nonce_key, timestamp);
    let signing_key = hmac_sha256(&timestamp_key, VERACODE_REQUEST_VERSION.as_bytes());
    hmac_sha256(&signing_key, data)
}
