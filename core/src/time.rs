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

//! Time related utils.

use std::fmt::Debug;

use chrono::Utc;


/// DateTime is the alias of `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime from the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into the date header value used by the signing scheme:
/// `"Mon, 15 Aug 2022 16:50:12 -0000"`
///
/// Sub-second precision is dropped and the zone marker is always `-0000`.
pub fn format_rfc2822_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S -0000").to_string()
}

/// Clock is the time source used to date a signature.
///
/// Signing reads the clock exactly once per request.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Current time in UTC.
    fn now(&self) -> DateTime;
}

/// SystemClock reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        now()
    }
}

/// FixedClock always returns the same instant.
///
/// This is useful for testing or for reproducing a signature.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}
