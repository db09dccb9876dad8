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

//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// Use [`Redact::full`] for secrets: nothing but the emptiness of the value is shown.
pub struct Redact<'a> {
    value: &'a str,
    partial: bool,
}

impl<'a> Redact<'a> {
    /// Redact the whole value, no characters are revealed.
    pub fn full(value: &'a str) -> Self {
        Redact {
            value,
            partial: false,
        }
    }
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact {
            value,
            partial: true,
        }
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::from(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.value;
        let length = value.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if !self.partial
            || length < 12
            || !value.is_char_boundary(3)
            || !value.is_char_boundary(length - 3)
        {
            f.write_str("***")
        } else {
            f.write_str(&value[..3])?;
            f.write_str("***")?;
            f.write_str(&value[length - 3..])
        }
    }
}
