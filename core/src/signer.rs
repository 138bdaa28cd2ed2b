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

use crate::{
    Context, Error, ProvideCredential, Result, SignRequest, SigningCredential, SigningRequest,
    SigningResult,
};
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// The credential is fixed when the signer is built; concurrent `sign` calls
/// share nothing mutable.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    builder: Arc<dyn SignRequest<Credential = C>>,
    credential: Arc<C>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer with an already loaded credential.
    pub fn new(ctx: Context, credential: C, builder: impl SignRequest<Credential = C>) -> Self {
        Self {
            ctx,
            builder: Arc::new(builder),
            credential: Arc::new(credential),
        }
    }

    /// Load the credential once from `provider` and create a signer with it.
    ///
    /// Fails with [`crate::ErrorKind::InvalidCredentials`] when the provider has
    /// no credential or the credential is not valid, so a misconfigured process
    /// never gets to sign anything.
    pub async fn load(
        ctx: Context,
        provider: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Result<Self> {
        let credential = provider
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| Error::invalid_credentials("no credential could be loaded"))?;
        if !credential.is_valid() {
            return Err(Error::invalid_credentials(format!(
                "loaded credential is incomplete: {credential:?}"
            )));
        }

        log::info!("signer loaded credential: {credential:?}");
        Ok(Self::new(ctx, credential, builder))
    }

    /// The credential this signer signs with.
    pub fn credential(&self) -> &C {
        &self.credential
    }

    /// Signing request.
    pub fn sign(&self, req: &SigningRequest) -> Result<SigningResult> {
        self.builder.sign_request(&self.ctx, req, &self.credential)
    }

    /// Normalize an inbound JSON object and sign it.
    pub fn sign_json(&self, value: &serde_json::Value) -> Result<SigningResult> {
        self.sign(&SigningRequest::from_json(value)?)
    }
}
