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

use super::constants::*;
use crate::SignatureVersion;
use duosign_core::{utils::Redact, Context, Result};

/// Config carries all the configuration for the duo-hmac signer.
#[derive(Clone, Default)]
pub struct Config {
    /// `integration_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DUO_IKEY`]
    /// - env value: [`IKEY`]
    pub integration_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DUO_SKEY`]
    /// - env value: [`SKEY`]
    pub secret_key: Option<String>,
    /// `api_host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DUO_HOST`]
    /// - env value: [`HOST`]
    pub api_host: Option<String>,
    /// `signature_version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DUO_SIGNATURE_VERSION`]
    pub signature_version: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set integration_key
    pub fn with_integration_key(mut self, integration_key: impl Into<String>) -> Self {
        self.integration_key = Some(integration_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set api_host
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = Some(api_host.into());
        self
    }

    /// Set signature_version
    pub fn with_signature_version(mut self, signature_version: impl Into<String>) -> Self {
        self.signature_version = Some(signature_version.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(DUO_IKEY).or_else(|| ctx.env_var(IKEY)) {
            self.integration_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(DUO_SKEY).or_else(|| ctx.env_var(SKEY)) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(DUO_HOST).or_else(|| ctx.env_var(HOST)) {
            self.api_host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(DUO_SIGNATURE_VERSION) {
            self.signature_version.get_or_insert(v);
        }

        self
    }

    /// Parse the configured signature version, defaulting to v2.
    pub fn signature_version(&self) -> Result<SignatureVersion> {
        match &self.signature_version {
            None => Ok(SignatureVersion::default()),
            Some(v) => v.parse(),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("integration_key", &Redact::from(&self.integration_key))
            .field("secret_key", &Redact::from(&self.secret_key).secret())
            .field("api_host", &Redact::from(&self.api_host))
            .field("signature_version", &self.signature_version)
            .finish()
    }
}
