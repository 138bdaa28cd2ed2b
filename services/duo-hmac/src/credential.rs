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

use std::fmt::{Debug, Formatter};

use duosign_core::{utils::Redact, SigningCredential};

/// Credential for the partner API.
#[derive(Clone)]
pub struct Credential {
    /// Integration key, the public identifier of the calling application.
    pub integration_key: String,
    /// Secret key used to key the HMAC. Never transmitted.
    pub secret_key: String,
    /// API host, without scheme, e.g. `api-xxxxxxxx.duosecurity.com`.
    pub api_host: String,
}

impl Credential {
    /// Create a new credential.
    ///
    /// A leading `https://` or `http://` and trailing `/` on `api_host` are
    /// stripped: the canonical string and the uri both carry the bare host.
    pub fn new(
        integration_key: impl Into<String>,
        secret_key: impl Into<String>,
        api_host: impl AsRef<str>,
    ) -> Self {
        Self {
            integration_key: integration_key.into(),
            secret_key: secret_key.into(),
            api_host: normalize_host(api_host.as_ref()),
        }
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);
    host.trim_end_matches('/').to_string()
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("integration_key", &Redact::from(&self.integration_key))
            .field("secret_key", &Redact::from(&self.secret_key).secret())
            .field("api_host", &Redact::from(&self.api_host))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.integration_key.is_empty() && !self.secret_key.is_empty() && !self.api_host.is_empty()
    }
}
