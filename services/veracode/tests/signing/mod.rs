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

mod concurrent;
mod standard;

use hmacsign_core::{Context, Signer, StaticEnv};
use hmacsign_veracode::{Credential, RequestSigner, StaticCredentialProvider};
use http::request::Parts;

pub const KEY_ID: &str = "key1";
pub const KEY_SECRET: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddee";

pub fn init_signer(key_id: &str, key_secret: &str) -> Signer<Credential> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_env(StaticEnv::default());
    Signer::new(
        ctx,
        StaticCredentialProvider::new(key_id, key_secret),
        RequestSigner::new(),
    )
}

pub fn request_parts(method: &str, uri: &str) -> Parts {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(())
        .expect("request must build")
        .into_parts()
        .0
}
