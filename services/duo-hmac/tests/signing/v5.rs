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

use super::{decode_basic, signer, DATE, IKEY};
use anyhow::Result;
use duosign_core::SigningRequest;
use duosign_duo_hmac::SignatureVersion;
use pretty_assertions::assert_eq;

#[test]
fn test_sign_v5_json_body() -> Result<()> {
    let req = SigningRequest::new("POST", "/admin/v2/policies")?
        .with_param("policy_name", "new-test-policy")
        .with_header("X-Duo-Trace", "abc")
        .with_header("Custom-Header", "test-value");
    let result = signer("api-1234.example.com", SignatureVersion::V5).sign(&req)?;

    assert_eq!("api-1234.example.com/admin/v2/policies", result.uri);
    assert_eq!(
        Some(r#"{"policy_name":"new-test-policy"}"#),
        result.body.as_deref()
    );
    assert_eq!(
        Some("Basic RElXSjhYNkFFWU9SNU9NQzZUUTE6OGRlNTEyNWQ4ZWM5ZGI2MDQwM2FiNzFiNDgwMDQ1NmZkMjA1MjlmYjdkODRkZmQ1MWM3Y2QxZTU3MDU5NjljYmFlZmM4YzFiOTVlZDQ5OTY3NWUwYTgxNzU0YzNjYmU2MTM4YTUwYjE0MzJlNDM0OThhYzg2ZjIxMWY5OGVjZDE="),
        result.header("Authorization")
    );
    assert_eq!(Some("abc"), result.header("X-Duo-Trace"));
    assert_eq!(Some("test-value"), result.header("Custom-Header"));
    assert_eq!(Some(DATE), result.header("x-duo-date"));
    Ok(())
}

#[test]
fn test_sign_v5_query() -> Result<()> {
    let req = SigningRequest::new("GET", "/admin/v1/users")?
        .with_param("offset", "0")
        .with_param("limit", "10");
    let result = signer("api-1234.example.com", SignatureVersion::V5).sign(&req)?;

    assert_eq!(
        "api-1234.example.com/admin/v1/users?limit=10&offset=0",
        result.uri
    );
    assert_eq!(None, result.body);
    assert_eq!(
        Some("Basic RElXSjhYNkFFWU9SNU9NQzZUUTE6ODQwMTUyNGJiZmQxOTM2Yjg5YWNiZDg4ZDRkMjZlYjU0NWVmNTRmZjMxYjFhYjVlNjI1Yzg2YTZkZDI1MWJmN2I2NWI4OGZhOTVmNjczZWJhZmMxNzIxODRhYTRkMTlhNDc1ODE2YThkNDcyYjg0YWNhNDVhOTBiMjQ2MjkxNDg="),
        result.header("Authorization")
    );
    Ok(())
}

#[test]
fn test_sign_v5_without_params_keeps_bare_uri() -> Result<()> {
    let result = signer("api-1234.example.com", SignatureVersion::V5)
        .sign(&SigningRequest::new("DELETE", "/admin/v1/users/DU123")?)?;

    assert_eq!("api-1234.example.com/admin/v1/users/DU123", result.uri);
    assert_eq!(None, result.body);
    Ok(())
}

#[test]
fn test_sign_v5_x_duo_headers_are_signed() -> Result<()> {
    let s = signer("api-1234.example.com", SignatureVersion::V5);
    let base = SigningRequest::new("POST", "/admin/v2/policies")?.with_param("a", "1");

    let plain = s.sign(&base.clone().with_header("Custom-Header", "one"))?;
    let other = s.sign(&base.clone().with_header("Custom-Header", "two"))?;
    let traced = s.sign(&base.with_header("X-Duo-Trace", "one"))?;

    // Only x-duo-* headers feed the signature.
    assert_eq!(plain.header("Authorization"), other.header("Authorization"));
    assert_ne!(plain.header("Authorization"), traced.header("Authorization"));

    let (ikey, digest) = decode_basic(traced.header("Authorization").unwrap());
    assert_eq!(IKEY, ikey);
    assert_eq!(128, digest.len());
    Ok(())
}

#[test]
fn test_sign_v5_differs_from_v2() -> Result<()> {
    let req = SigningRequest::new("GET", "/admin/v2/settings")?;
    let v2 = signer("api-1234.example.com", SignatureVersion::V2).sign(&req)?;
    let v5 = signer("api-1234.example.com", SignatureVersion::V5).sign(&req)?;

    assert_ne!(v2.header("Authorization"), v5.header("Authorization"));
    assert_eq!(v2.header("x-duo-date"), v5.header("x-duo-date"));
    Ok(())
}
