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
/// Integration keys and hosts stay distinguishable in logs. Secrets must go
/// through [`Redact::secret`], which hides every character.
pub struct Redact<'a> {
    value: &'a str,
    secret: bool,
}

impl<'a> Redact<'a> {
    fn new(value: &'a str) -> Self {
        Self {
            value,
            secret: false,
        }
    }

    /// Hide the value entirely, only telling whether it is set.
    pub fn secret(self) -> Self {
        Self {
            secret: true,
            ..self
        }
    }
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact::new(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::new(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact::new(""),
            Some(v) => Redact::new(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.value;
        let length = value.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if self.secret
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
