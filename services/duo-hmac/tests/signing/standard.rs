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

use super::{decode_basic, fixed_context, signer, DATE, IKEY, SKEY};
use anyhow::Result;
use chrono::{TimeDelta, TimeZone, Utc};
use duosign_core::time::{Clock, DateTime};
use duosign_core::{Context, ErrorKind, Signer, SigningRequest};
use duosign_duo_hmac::canonicalize::canonical_string;
use duosign_duo_hmac::{encode_credential, sign, Credential, RequestSigner, SignatureVersion};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;

#[test]
fn test_sign_settings_golden() -> Result<()> {
    let result = signer("api-1234.example.com", SignatureVersion::V2)
        .sign(&SigningRequest::new("GET", "/admin/v2/settings")?)?;

    assert_eq!("api-1234.example.com/admin/v2/settings", result.uri);
    assert_eq!(Some(DATE), result.header("x-duo-date"));
    assert_eq!(Some("application/json"), result.header("Content-type"));
    assert_eq!(
        Some("Basic RElXSjhYNkFFWU9SNU9NQzZUUTE6ZDdiOGMzMTA4NWQ0ZWRhNzdkNDA5OTllNzk5ODllOWVkMmE0ZmUwZTgxMDhiZTJjMDEyMjIzZDI0MWJjOWNkODE4N2EzYzUyNWU2YjJkMGQ2MzIxY2QzODA5MWIxYzdlNTM0NWEzOTA3Y2NiMjg0N2RkNjk1MjZmOTk0YzM3NTQ="),
        result.header("Authorization")
    );
    assert_eq!(Some(""), result.body.as_deref());
    Ok(())
}

#[test]
fn test_sign_account_list_golden() -> Result<()> {
    let req = SigningRequest::new("POST", "/accounts/v1/account/list")?
        .with_param("username", "root")
        .with_param("realname", "First Last");
    let result = signer("API-XXXXXXXX.duosecurity.com", SignatureVersion::V2).sign(&req)?;

    assert_eq!(
        Some("Basic RElXSjhYNkFFWU9SNU9NQzZUUTE6NGU5YWRiNjkwODFlZDNlOTAwMDQ4Njk2NTA2ZDM4YjdjNWZlODkwMjQ3MGVlOTZkYWVjNTZjNTUzY2E1ZjNiZTAzNzZlMGY1YTg5ZjQ3YTZjYmVhZmEwYTFiNzhiOTk3ZTkwYmVkYTYxMDg5ZDQyYTczNzI2OTFhYzFmMzYzNmM="),
        result.header("Authorization")
    );
    assert_eq!(
        Some("realname=First%20Last&username=root"),
        result.body.as_deref()
    );
    Ok(())
}

#[test]
fn test_sign_duplicate_keys() -> Result<()> {
    let req = SigningRequest::new("GET", "/admin/v1/users")?
        .with_param("tag", "b")
        .with_param("tag", "a")
        .with_param("q", "a&b=c%d")
        .with_param("name", "José ü")
        .with_param("empty", "");
    let result = signer("api-1234.example.com", SignatureVersion::V2).sign(&req)?;

    assert_eq!(
        Some("empty=&name=Jos%C3%A9%20%C3%BC&q=a%26b%3Dc%25d&tag=a&tag=b"),
        result.body.as_deref()
    );
    assert_eq!(
        Some("Basic RElXSjhYNkFFWU9SNU9NQzZUUTE6NTg4Njk1ODFmZDkyOTMyZTFiNTM3Y2EzZTYwZTg5YTNjODQxODg0OWU3ZmMzNjk3ODM4MDU2MTdjM2E5ZWMwMmM4MjhlYjEyMzI5YjM2NTAxYmE1Y2M0NjRkNTA0MTcxMTRhMzMzN2Q2OGRhY2E4M2UwZWZmN2U2ZDYyMGZhNjY="),
        result.header("Authorization")
    );
    Ok(())
}

#[test]
fn test_sign_is_deterministic() -> Result<()> {
    let s = signer("api-1234.example.com", SignatureVersion::V2);
    let req = SigningRequest::new("GET", "/admin/v1/users")?
        .with_param("limit", "10")
        .with_param("offset", "0");

    assert_eq!(s.sign(&req)?, s.sign(&req)?);
    Ok(())
}

#[test]
fn test_sign_parameter_order_independent() -> Result<()> {
    let s = signer("api-1234.example.com", SignatureVersion::V2);
    let a = SigningRequest::new("GET", "/admin/v1/users")?
        .with_param("limit", "10")
        .with_param("offset", "0")
        .with_param("tag", "x");
    let b = SigningRequest::new("GET", "/admin/v1/users")?
        .with_param("tag", "x")
        .with_param("offset", "0")
        .with_param("limit", "10");

    assert_eq!(s.sign(&a)?, s.sign(&b)?);
    Ok(())
}

#[test]
fn test_credential_shape() -> Result<()> {
    let s = signer("api-1234.example.com", SignatureVersion::V2);
    for path in ["/a", "/admin/v1/users", "/auth/v2/check"] {
        let result = s.sign(&SigningRequest::new("GET", path)?.with_param("k", path))?;
        let (ikey, digest) = decode_basic(result.header("Authorization").unwrap());

        assert_eq!(IKEY, ikey);
        assert_eq!(128, digest.len());
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
    Ok(())
}

/// A clock that moves one second forward on every read.
#[derive(Debug)]
struct TickingClock {
    start: DateTime,
    reads: AtomicI64,
}

impl Clock for TickingClock {
    fn now(&self) -> DateTime {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + TimeDelta::seconds(n)
    }
}

#[test]
fn test_date_header_matches_signed_date() -> Result<()> {
    let ctx = fixed_context().with_clock(TickingClock {
        start: Utc
            .with_ymd_and_hms(2011, 6, 21, 20, 33, 20)
            .single()
            .expect("date must be valid"),
        reads: AtomicI64::new(0),
    });
    let s = Signer::new(
        ctx,
        Credential::new(IKEY, SKEY, "api-1234.example.com"),
        RequestSigner::new(),
    );

    let req = SigningRequest::new("GET", "/admin/v1/users")?.with_param("limit", "10");
    for _ in 0..3 {
        let result = s.sign(&req)?;
        let date = result.header("x-duo-date").expect("date header must be set");

        // Rebuild the signature from the date the header carries.
        let string_to_sign = canonical_string(
            date,
            "GET",
            "api-1234.example.com",
            "/admin/v1/users",
            "limit=10",
        );
        let digest = sign(&string_to_sign, SKEY.as_bytes())?;
        let expected = format!("Basic {}", encode_credential(IKEY, &digest));
        assert_eq!(Some(expected.as_str()), result.header("Authorization"));
    }
    Ok(())
}

#[test]
fn test_date_header_from_system_clock() -> Result<()> {
    let s = Signer::new(
        Context::new(),
        Credential::new(IKEY, "secret", "api-1234.example.com"),
        RequestSigner::new(),
    );
    let before = Utc::now();
    let result = s.sign(&SigningRequest::new("GET", "/admin/v1/users")?)?;

    let date = result.header("x-duo-date").expect("date header must be set");
    let signed = chrono::DateTime::parse_from_rfc2822(date)?;
    assert!(signed.timestamp() >= before.timestamp());
    assert!(date.ends_with(" -0000"));
    Ok(())
}

#[test]
fn test_sign_concurrently() -> Result<()> {
    let s = signer("api-1234.example.com", SignatureVersion::V2);
    let req = SigningRequest::new("GET", "/admin/v2/settings")?;
    let expected = s.sign(&req)?;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let s = s.clone();
            let req = req.clone();
            thread::spawn(move || s.sign(&req).expect("sign must succeed"))
        })
        .collect();

    for h in handles {
        assert_eq!(expected, h.join().expect("thread must not panic"));
    }
    Ok(())
}

#[test]
fn test_sign_empty_secret() -> Result<()> {
    let s = Signer::new(
        fixed_context(),
        Credential::new(IKEY, "", "api-1234.example.com"),
        RequestSigner::new(),
    );

    let err = s
        .sign(&SigningRequest::new("GET", "/admin/v2/settings")?)
        .unwrap_err();
    assert_eq!(ErrorKind::InvalidCredentials, err.kind());
    Ok(())
}

#[test]
fn test_sign_rejects_reserved_header() -> Result<()> {
    let req = SigningRequest::new("GET", "/admin/v2/settings")?.with_header("X-Duo-Date", "now");

    let err = signer("api-1234.example.com", SignatureVersion::V2)
        .sign(&req)
        .unwrap_err();
    assert_eq!(ErrorKind::InvalidInput, err.kind());
    Ok(())
}
