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

//! Core components for signing partner API requests.
//!
//! This crate provides the foundational types and traits for the duosign ecosystem.
//! It defines the abstractions that a concrete signing scheme plugs into.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds the environment access and the clock
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and request signing (`SignRequest`)
//! - **Signer**: The orchestrator holding one immutable credential and a request signer
//! - **Values**: `SigningRequest` in, `SigningResult` out, with the JSON normalization a service boundary needs
//!
//! ## Example
//!
//! ```no_run
//! use duosign_core::{Context, Result, Signer, SignRequest, SigningCredential};
//! use duosign_core::{SigningRequest, SigningResult};
//! use std::collections::BTreeMap;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &SigningRequest,
//!         cred: &Self::Credential,
//!     ) -> Result<SigningResult> {
//!         Ok(SigningResult {
//!             uri: req.path.clone(),
//!             headers: BTreeMap::from([("Authorization".to_string(), cred.key.clone())]),
//!             body: None,
//!         })
//!     }
//! }
//!
//! # fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), MyCredential { key: "k".into() }, MySigner);
//! let result = signer.sign(&SigningRequest::new("GET", "/check")?)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! The crate also provides utility modules:
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting and the [`time::Clock`] abstraction
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, NoopEnv, OsEnv, StaticEnv};
mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential};
mod chain;
pub use chain::ProvideCredentialChain;
mod request;
pub use request::{Parameters, SigningRequest, SigningResult};
mod signer;
pub use signer::Signer;
