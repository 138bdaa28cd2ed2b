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

//! Canonical forms fed to the HMAC.
//!
//! Every function here is pure: same input, same bytes out. The verifying
//! server rebuilds these strings on its side, so any drift in escaping,
//! ordering or casing yields a signature it rejects.

use std::collections::BTreeMap;

use http::Method;
use percent_encoding::utf8_percent_encode;
use serde_json::Value;

use super::constants::*;
use duosign_core::hash::hex_sha512;
use duosign_core::{Parameters, Result};

/// Percent-encode a key or value.
///
/// ALPHA, DIGIT, `-`, `.`, `_` and `~` pass through; every other UTF-8 byte
/// becomes `%XX` with uppercase hex.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, &PARAM_ENCODE_SET).to_string()
}

/// Canonicalize request parameters.
///
/// ## Format
///
/// ```text
/// encode(k1) + "=" + encode(v1) + "&" + encode(k2) + "=" + encode(v2) ...
/// ```
///
/// Pairs are sorted by encoded key, then by encoded value, comparing bytes.
/// Repeated keys stay separate pairs. An empty value still yields `key=`.
/// An empty parameter set yields the empty string.
pub fn canonicalize_params(params: &Parameters) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    pairs.sort_unstable();

    let mut s = String::with_capacity(pairs.iter().map(|(k, v)| k.len() + v.len() + 2).sum());
    for (i, (k, v)) in pairs.iter().enumerate() {
        if i > 0 {
            s.push('&');
        }
        s.push_str(k);
        s.push('=');
        s.push_str(v);
    }
    s
}

/// Build the canonical string to sign.
///
/// ## Format
///
/// ```text
/// Date + "\n" +
/// UPPERCASE(Method) + "\n" +
/// lowercase(Host) + "\n" +
/// Path + "\n" +
/// CanonicalizedParams
/// ```
///
/// No trailing newline. The path is used verbatim.
pub fn canonical_string(
    date: &str,
    method: &str,
    host: &str,
    path: &str,
    canonical_params: &str,
) -> String {
    let method = method.to_ascii_uppercase();
    let host = host.to_ascii_lowercase();

    [date, method.as_str(), host.as_str(), path, canonical_params].join("\n")
}

/// Build the v5 canonical string to sign.
///
/// ## Format
///
/// ```text
/// canonical_string(..) + "\n" +
/// HexSHA512(Body) + "\n" +
/// HexSHA512(CanonicalizedXDuoHeaders)
/// ```
pub fn canonical_string_v5(
    date: &str,
    method: &str,
    host: &str,
    path: &str,
    canonical_params: &str,
    body: &str,
    headers: &[(String, String)],
) -> String {
    let mut s = canonical_string(date, method, host, path, canonical_params);
    s.push('\n');
    s.push_str(&hex_sha512(body.as_bytes()));
    s.push('\n');
    s.push_str(&hex_sha512(canonicalize_x_duo_headers(headers).as_bytes()));
    s
}

/// Canonicalize the `x-duo-*` headers.
///
/// Names are lowercased and sorted; other headers are ignored. The result is
/// `name1 \0 value1 \0 name2 \0 value2 ...`.
pub fn canonicalize_x_duo_headers(headers: &[(String, String)]) -> String {
    let mut duo: Vec<(String, &str)> = headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.as_str()))
        .filter(|(k, _)| k.starts_with(X_DUO_PREFIX))
        .collect();
    duo.sort_unstable();

    let mut parts = Vec::with_capacity(duo.len() * 2);
    for (k, v) in &duo {
        parts.push(k.as_str());
        parts.push(*v);
    }
    parts.join("\0")
}

/// Render parameters as the JSON body of a write request.
///
/// Keys are sorted and separators compact. A key given once maps to a string.
/// A repeated key, or one supplied as a list, maps to an array of its values
/// in insertion order.
pub fn json_body(params: &Parameters) -> Result<String> {
    let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (k, v) in params.iter() {
        grouped.entry(k).or_default().push(v);
    }

    let body: BTreeMap<&str, Value> = grouped
        .into_iter()
        .map(|(k, vs)| {
            if vs.len() == 1 && !params.is_list(k) {
                (k, Value::from(vs[0]))
            } else {
                (k, Value::from(vs))
            }
        })
        .collect();

    Ok(serde_json::to_string(&body)?)
}

/// Methods whose parameters travel in the request body.
pub fn is_write_method(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}
