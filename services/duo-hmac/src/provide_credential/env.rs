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

use async_trait::async_trait;
use duosign_core::{Context, ProvideCredential, Result};

use crate::{Config, Credential};

/// EnvCredentialProvider loads credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `DUO_IKEY` (or `IKEY`): The integration key
/// - `DUO_SKEY` (or `SKEY`): The secret key
/// - `DUO_HOST` (or `HOST`): The API host
///
/// All three must be present, otherwise nothing is provided.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = Config::new().from_env(ctx);

        match (config.integration_key, config.secret_key, config.api_host) {
            (Some(ikey), Some(skey), Some(host)) => Ok(Some(Credential::new(ikey, skey, host))),
            _ => Ok(None),
        }
    }
}
