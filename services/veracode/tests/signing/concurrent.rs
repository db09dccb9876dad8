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
use hmacsign_veracode::AuthorizationHeader;
use http::header::AUTHORIZATION;
use std::collections::HashSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_signing_never_shares_nonces() -> Result<()> {
    let signer = init_signer(KEY_ID, KEY_SECRET);

    let mut tasks = Vec::new();
    for i in 0..64 {
        let signer = signer.clone();
        tasks.push(tokio::spawn(async move {
            let mut parts = request_parts(
                "GET",
                &format!("https://api.veracode.com/appsec/v1/applications/{i}"),
            );
            signer.sign(&mut parts, None).await?;

            let value = parts.headers[AUTHORIZATION].to_str()?.to_string();
            anyhow::Ok(value.parse::<AuthorizationHeader>()?)
        }));
    }

    let mut nonces = HashSet::new();
    for task in tasks {
        let header = task.await??;
        assert!(nonces.insert(header.nonce), "nonce reused across requests");
    }
    assert_eq!(nonces.len(), 64);
    Ok(())
}
