/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use chrono::{DateTime, Datelike, Month, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;
use parse_duration::parse;

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }

#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

pub fn current_year()->i32 {
    utc_now().year()
}

/// parse calendar dates as they show up in CSV exports of web services.
/// We accept ISO dates, slash separated dates and ISO date times (for which we only keep the date part).
/// Everything else is `None` - callers have to decide if that is an error
pub fn parse_lenient_date (s: &str)->Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() { return None }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) { return Some(d) }
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%SZ"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) { return Some(dt.date()) }
    }

    DateTime::parse_from_rfc3339(s).ok().map( |dt| dt.date_naive())
}

/// get chrono Month from full English name ("January") or its 3-letter abbreviation, ignoring case
pub fn month_from_name (s: &str)->Option<Month> {
    s.trim().parse::<Month>().ok()
}

pub fn month_of (date: &NaiveDate)->Month {
    // month() is always 1..=12
    Month::try_from( date.month() as u8).unwrap_or(Month::January)
}

pub fn month_names()->Vec<&'static str> {
    (1u8..=12).filter_map( |m| Month::try_from(m).ok()).map(|m| m.name()).collect()
}

//--- serde support for config files

pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}

pub fn serialize_duration<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error>  {
    let dfm = format!("{}s", dur.as_secs());
    s.serialize_str(&dfm)
}
