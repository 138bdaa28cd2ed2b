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

use std::collections::{BTreeMap, BTreeSet};

use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// Request parameters as an ordered multimap.
///
/// Keys may repeat: a list-valued parameter is stored as one pair per value.
/// Insertion order is kept for echoing, but it never affects the signature.
///
/// Keys pushed as lists are remembered, so a list with a single value can
/// still be rendered as a list in a JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pairs: Vec<(String, String)>,
    lists: BTreeSet<String>,
}

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new pair.
    #[inline]
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Push a list-valued parameter, one pair per value.
    ///
    /// The key is marked as a list even if `values` holds zero or one item.
    pub fn push_list<V: Into<String>>(
        &mut self,
        key: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) {
        let key = key.into();
        for v in values {
            self.pairs.push((key.clone(), v.into()));
        }
        self.lists.insert(key);
    }

    /// Whether `key` was supplied as a list.
    pub fn is_list(&self, key: &str) -> bool {
        self.lists.contains(key)
    }

    /// Push a pair given as raw bytes.
    ///
    /// Both key and value must be valid UTF-8, since the canonical form
    /// percent-encodes UTF-8 byte sequences.
    pub fn try_push_bytes(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let key = std::str::from_utf8(key).map_err(|e| {
            Error::invalid_input("parameter key is not valid UTF-8").with_source(e)
        })?;
        let value = std::str::from_utf8(value).map_err(|e| {
            Error::invalid_input(format!("parameter '{key}' is not valid UTF-8")).with_source(e)
        })?;
        self.push(key, value);
        Ok(())
    }

    /// Number of pairs, counting every value of a repeated key.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All values of `key` in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            lists: BTreeSet::new(),
        }
    }
}

impl From<Vec<(String, String)>> for Parameters {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self {
            pairs,
            lists: BTreeSet::new(),
        }
    }
}

/// Normalize the JSON shapes accepted at the service boundary.
///
/// - `null`: no parameters.
/// - object: `{"k": "v"}`, or `{"k": ["a", "b"]}` for a list-valued parameter.
/// - array of pairs: `[["k", "v"], ["k", "w"]]`.
///
/// Numbers, booleans and nested objects must be stringified by the caller.
impl TryFrom<&Value> for Parameters {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        let mut params = Parameters::new();

        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (k, v) in map {
                    match v {
                        Value::String(s) => params.push(k, s),
                        Value::Array(items) => {
                            let values = items
                                .iter()
                                .map(|item| match item {
                                    Value::String(s) => Ok(s.as_str()),
                                    _ => Err(non_string_parameter(k)),
                                })
                                .collect::<Result<Vec<_>>>()?;
                            params.push_list(k, values);
                        }
                        _ => return Err(non_string_parameter(k)),
                    }
                }
            }
            Value::Array(pairs) => {
                for pair in pairs {
                    match pair.as_array().map(Vec::as_slice) {
                        Some([Value::String(k), Value::String(v)]) => params.push(k, v),
                        Some([Value::String(k), _]) => return Err(non_string_parameter(k)),
                        _ => {
                            return Err(Error::invalid_input(
                                "parameters must be given as [key, value] string pairs",
                            ))
                        }
                    }
                }
            }
            _ => {
                return Err(Error::invalid_input(
                    "parameters must be an object or an array of [key, value] pairs",
                ))
            }
        }

        Ok(params)
    }
}

fn non_string_parameter(key: &str) -> Error {
    Error::invalid_input(format!("parameter '{key}' must be a string"))
}

/// The request to be signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request path, starting with `/`.
    pub path: String,
    /// Request parameters.
    pub params: Parameters,
    /// Extra headers supplied by the caller, in the order given.
    pub headers: Vec<(String, String)>,
}

impl SigningRequest {
    /// Create a new request without parameters.
    ///
    /// The method is matched case-insensitively; the path must start with `/`.
    pub fn new(method: &str, path: impl Into<String>) -> Result<Self> {
        if method.is_empty() {
            return Err(Error::invalid_input("method must not be empty"));
        }
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;

        let path = path.into();
        if !path.starts_with('/') {
            return Err(Error::invalid_input(format!(
                "path must start with '/', got '{path}'"
            )));
        }

        Ok(Self {
            method,
            path,
            params: Parameters::new(),
            headers: Vec::new(),
        })
    }

    /// Append a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push(key, value);
        self
    }

    /// Replace all parameters.
    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    /// Append an extra header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Build a request from the inbound JSON object
    /// `{"method", "path", "parameters", "header"?}`.
    ///
    /// The optional header map is also accepted under `headers`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(obj) = value else {
            return Err(Error::invalid_input("request body must be a JSON object"));
        };

        let method = required_str(obj, "method")?;
        let path = required_str(obj, "path")?;
        let params = obj
            .get("parameters")
            .ok_or_else(|| Error::invalid_input("missing 'parameters' element in the request body"))?;

        let mut req = Self::new(method, path)?.with_params(Parameters::try_from(params)?);

        match obj.get("header").or_else(|| obj.get("headers")) {
            None | Some(Value::Null) => {}
            Some(Value::Object(headers)) => {
                for (name, v) in headers {
                    let Value::String(v) = v else {
                        return Err(Error::invalid_input(format!(
                            "header '{name}' must be a string"
                        )));
                    };
                    req = req.with_header(name, v);
                }
            }
            Some(_) => return Err(Error::invalid_input("header must be a JSON object")),
        }

        Ok(req)
    }

    /// Parse and build a request from an inbound JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| Error::invalid_input("request body is not valid JSON").with_source(e))?;
        Self::from_json(&value)
    }
}

fn required_str<'a>(obj: &'a serde_json::Map<String, Value>, field: &str) -> Result<&'a str> {
    match obj.get(field) {
        None => Err(Error::invalid_input(format!(
            "missing '{field}' element in the request body"
        ))),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(Error::invalid_input(format!("'{field}' must be a string"))),
    }
}

/// The signed authentication material for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningResult {
    /// Target uri without scheme: host followed by path.
    pub uri: String,
    /// Headers to send, including `Authorization`, `Content-type` and `x-duo-date`.
    pub headers: BTreeMap<String, String>,
    /// Outbound body representation, if any.
    pub body: Option<String>,
}

impl SigningResult {
    /// Get a header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Serialize into the outbound JSON object `{"uri", "headers", "body"}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
