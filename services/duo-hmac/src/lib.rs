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

//! Signer for the Duo-style partner API.
//!
//! Requests are signed with HMAC-SHA512 over a newline-joined canonical
//! string and carried in a `Basic` authorization header.
//!
//! ## Example
//!
//! ```no_run
//! use duosign_core::{Context, Result, Signer, SigningRequest};
//! use duosign_duo_hmac::{Credential, RequestSigner};
//!
//! # fn example() -> Result<()> {
//! let signer = Signer::new(
//!     Context::new(),
//!     Credential::new("DIXXXXXXXXXXXXXXXXXX", "secret_key", "api-xxxxxxxx.duosecurity.com"),
//!     RequestSigner::new(),
//! );
//!
//! let req = SigningRequest::new("GET", "/admin/v1/users")?.with_param("limit", "10");
//! let result = signer.sign(&req)?;
//! println!("{}", result.uri);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

pub mod canonicalize;

mod sign_request;
pub use sign_request::{assemble, encode_credential, sign, RequestSigner, SignatureVersion};

mod provide_credential;
pub use provide_credential::*;

mod constants;

use duosign_core::{Context, Result, Signer};

/// Build a signer from the process environment.
///
/// Credentials are resolved by [`DefaultCredentialProvider`] and the
/// signature version by [`Config::from_env`]. Missing or invalid
/// credentials fail here, before any request is signed.
pub async fn signer_from_env(ctx: Context) -> Result<Signer<Credential>> {
    let version = Config::new().from_env(&ctx).signature_version()?;
    let builder = RequestSigner::new().with_signature_version(version);

    Signer::load(ctx, DefaultCredentialProvider::new(), builder).await
}
