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

use hmacsign_core::{Error, Result};

/// Decode a hexadecimal api key secret into raw bytes.
///
/// Both lowercase and uppercase digits are accepted. Odd length input or
/// any non-hex character fails with a credential error and nothing is signed.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    hex::decode(secret).map_err(|e| {
        Error::credential_invalid("api key secret is not valid hexadecimal").with_source(e)
    })
}
