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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used by the duo-hmac service.
pub const DUO_IKEY: &str = "DUO_IKEY";
pub const DUO_SKEY: &str = "DUO_SKEY";
pub const DUO_HOST: &str = "DUO_HOST";
pub const DUO_SIGNATURE_VERSION: &str = "DUO_SIGNATURE_VERSION";

// Unprefixed names accepted as a fallback.
pub const IKEY: &str = "IKEY";
pub const SKEY: &str = "SKEY";
pub const HOST: &str = "HOST";

// Headers owned by the signer.
pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-type";
pub const X_DUO_DATE: &str = "x-duo-date";
pub const X_DUO_PREFIX: &str = "x-duo-";

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Escape everything except ALPHA, DIGIT and `-`, `.`, `_`, `~`.
///
/// Space becomes `%20`, never `+`.
pub static PARAM_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
