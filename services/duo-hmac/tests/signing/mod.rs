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

mod standard;
mod v5;

use chrono::{TimeZone, Utc};
use duosign_core::hash::base64_decode;
use duosign_core::time::FixedClock;
use duosign_core::{Context, Signer};
use duosign_duo_hmac::{Credential, RequestSigner, SignatureVersion};

pub const IKEY: &str = "DIWJ8X6AEYOR5OMC6TQ1";
pub const SKEY: &str = "Zh5eGmUq9zpfQnyUIu5OL9iWoMMv5ZNmk3zLJ4Ep";
pub const DATE: &str = "Tue, 21 Jun 2011 20:33:20 -0000";

/// Context with the clock pinned to [`DATE`].
pub fn fixed_context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    let t = Utc
        .with_ymd_and_hms(2011, 6, 21, 20, 33, 20)
        .single()
        .expect("date must be valid");
    Context::new().with_clock(FixedClock(t))
}

pub fn signer(host: &str, version: SignatureVersion) -> Signer<Credential> {
    Signer::new(
        fixed_context(),
        Credential::new(IKEY, SKEY, host),
        RequestSigner::new().with_signature_version(version),
    )
}

/// Decode a `Basic` authorization value into `(identifier, digest)`.
pub fn decode_basic(authorization: &str) -> (String, String) {
    let encoded = authorization
        .strip_prefix("Basic ")
        .expect("authorization must use the Basic scheme");
    let decoded = String::from_utf8(base64_decode(encoded).expect("must be valid base64"))
        .expect("must be valid utf-8");
    let (ikey, digest) = decoded.split_once(':').expect("must contain a colon");
    (ikey.to_string(), digest.to_string())
}
