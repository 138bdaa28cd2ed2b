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

//! Canonical-string HMAC request signer.
use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use http::header::HeaderName;
use http::HeaderValue;
use http::Method;
use log::debug;

use super::canonicalize::*;
use super::constants::*;
use super::credential::Credential;
use duosign_core::hash::{base64_encode, hmac_sha512};
use duosign_core::time::format_rfc2822_date;
use duosign_core::{Context, Error, Result, SignRequest, SigningRequest, SigningResult};

/// Canonicalization published by the target API.
///
/// Both versions key HMAC-SHA512 with the secret key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureVersion {
    /// Five-line canonical string: date, method, host, path, parameters.
    #[default]
    V2,
    /// V2 lines plus the SHA-512 of the body and of the `x-duo-*` headers.
    /// Write methods carry their parameters as a JSON body.
    V5,
}

impl FromStr for SignatureVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "v2" => Ok(SignatureVersion::V2),
            "5" | "v5" => Ok(SignatureVersion::V5),
            v => Err(Error::config_invalid(format!(
                "unsupported signature version: {v}"
            ))),
        }
    }
}

impl Display for SignatureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureVersion::V2 => write!(f, "v2"),
            SignatureVersion::V5 => write!(f, "v5"),
        }
    }
}

/// Compute the HMAC-SHA512 digest of `string_to_sign`.
///
/// An empty secret key is rejected instead of signing with it.
pub fn sign(string_to_sign: &str, secret_key: &[u8]) -> Result<Vec<u8>> {
    if secret_key.is_empty() {
        return Err(Error::invalid_credentials("secret key is empty"));
    }
    Ok(hmac_sha512(secret_key, string_to_sign.as_bytes()))
}

/// Encode the Basic credential: `base64(integration_key + ":" + hex(digest))`.
pub fn encode_credential(integration_key: &str, digest: &[u8]) -> String {
    let hex = hex::encode(digest);
    let mut pair = String::with_capacity(integration_key.len() + 1 + hex.len());
    pair.push_str(integration_key);
    pair.push(':');
    pair.push_str(&hex);
    base64_encode(pair.as_bytes())
}

/// Assemble the signed result.
///
/// - `uri`: host followed by path, no scheme.
/// - `Authorization`: `Basic <credential>`.
/// - `x-duo-date`: the same date string that was signed.
/// - `Content-type`: `application/json`.
/// - `body`: the canonical parameter string.
pub fn assemble(
    date: &str,
    method: &Method,
    host: &str,
    path: &str,
    canonical_params: &str,
    credential: &str,
) -> SigningResult {
    let uri = format!("{host}{path}");
    debug!("assembled signed request: {method} {uri}");

    SigningResult {
        uri,
        headers: BTreeMap::from([
            (AUTHORIZATION.to_string(), format!("Basic {credential}")),
            (CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()),
            (X_DUO_DATE.to_string(), date.to_string()),
        ]),
        body: Some(canonical_params.to_string()),
    }
}

/// Reject headers that are not legal HTTP headers, that repeat a name, or that
/// would overwrite a header the signer owns.
fn validate_headers(headers: &[(String, String)]) -> Result<()> {
    let mut seen = HashSet::with_capacity(headers.len());

    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())?;
        HeaderValue::from_str(value)?;

        if [AUTHORIZATION, CONTENT_TYPE, X_DUO_DATE]
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(name))
        {
            return Err(Error::invalid_input(format!(
                "header '{name}' is set by the signer and cannot be supplied"
            )));
        }
        if !seen.insert(header_name) {
            return Err(Error::invalid_input(format!(
                "header '{name}' is supplied more than once"
            )));
        }
    }

    Ok(())
}

/// RequestSigner that implements the canonical-string HMAC authorization.
#[derive(Debug, Default)]
pub struct RequestSigner {
    version: SignatureVersion,
}

impl RequestSigner {
    /// Create a signer using the default signature version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signature version.
    pub fn with_signature_version(mut self, version: SignatureVersion) -> Self {
        self.version = version;
        self
    }

    /// The signature version this signer produces.
    pub fn signature_version(&self) -> SignatureVersion {
        self.version
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        ctx: &Context,
        req: &SigningRequest,
        cred: &Self::Credential,
    ) -> Result<SigningResult> {
        if cred.integration_key.is_empty() {
            return Err(Error::invalid_credentials("integration key is empty"));
        }
        if cred.secret_key.is_empty() {
            return Err(Error::invalid_credentials("secret key is empty"));
        }
        if cred.api_host.is_empty() {
            return Err(Error::config_invalid("api host is empty"));
        }
        if !req.path.starts_with('/') {
            return Err(Error::invalid_input(format!(
                "path must start with '/', got '{}'",
                req.path
            )));
        }
        validate_headers(&req.headers)?;

        // Read the clock once: the signed date and the header must match.
        let date = format_rfc2822_date(ctx.now());
        let method = req.method.as_str();
        let host = cred.api_host.as_str();

        let (string_to_sign, canonical_params, body) = match self.version {
            SignatureVersion::V2 => {
                let params = canonicalize_params(&req.params);
                let s = canonical_string(&date, method, host, &req.path, &params);
                (s, params, None)
            }
            SignatureVersion::V5 if is_write_method(&req.method) => {
                let body = json_body(&req.params)?;
                let s = canonical_string_v5(
                    &date,
                    method,
                    host,
                    &req.path,
                    "",
                    &body,
                    &req.headers,
                );
                (s, String::new(), Some(body))
            }
            SignatureVersion::V5 => {
                let params = canonicalize_params(&req.params);
                let s = canonical_string_v5(
                    &date,
                    method,
                    host,
                    &req.path,
                    &params,
                    "",
                    &req.headers,
                );
                (s, params, None)
            }
        };
        debug!("{} string to sign: {:?}", self.version, &string_to_sign);

        let digest = sign(&string_to_sign, cred.secret_key.as_bytes())?;
        let credential = encode_credential(&cred.integration_key, &digest);

        let mut result = assemble(
            &date,
            &req.method,
            host,
            &req.path,
            &canonical_params,
            &credential,
        );

        if self.version == SignatureVersion::V5 {
            if body.is_none() && !canonical_params.is_empty() {
                result.uri.push('?');
                result.uri.push_str(&canonical_params);
            }
            result.body = body;
        }

        for (name, value) in &req.headers {
            result.headers.insert(name.clone(), value.clone());
        }

        Ok(result)
    }
}
