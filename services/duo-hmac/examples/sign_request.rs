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

use anyhow::Result;
use duosign_core::{Context, OsEnv, SigningRequest};
use duosign_duo_hmac::signer_from_env;
use std::io::Read;

/// Read a JSON request from stdin and print the signed result as JSON.
///
/// ```shell
/// DUO_IKEY=... DUO_SKEY=... DUO_HOST=... \
///   cargo run --example sign_request <<< '{"method":"GET","path":"/admin/v1/users","parameters":{}}'
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let signer = signer_from_env(Context::new().with_env(OsEnv)).await?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let result = signer.sign(&SigningRequest::from_json_str(&input)?)?;
    println!("{}", result.to_json()?);
    Ok(())
}
