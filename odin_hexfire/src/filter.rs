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

//! row predicates over fetched hotspot tables. All predicates are independent of each other, i.e. the order in
//! which they are applied does not matter

use chrono::{Datelike, Month};
use odin_common::datetime::{current_year, month_from_name, month_of};
use crate::firms::{FirmsTable, Hotspot};
use crate::errors::{Result, invalid_control};

pub const FIRST_YEAR: i32 = 2001;
pub const ALL: &str = "All";

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum HotspotPredicate {
    MinConfidence(u8),
    Year(i32),
    Month(Month),
}

impl HotspotPredicate {
    /// rows without (parseable) confidence or acquisition date never match the respective predicate
    pub fn matches (&self, hs: &Hotspot)->bool {
        match self {
            HotspotPredicate::MinConfidence(min) => hs.confidence.map( |c| c.percent() >= *min).unwrap_or(false),
            HotspotPredicate::Year(year) => hs.acq_date.map( |d| d.year() == *year).unwrap_or(false),
            HotspotPredicate::Month(month) => hs.acq_date.map( |d| month_of(&d) == *month).unwrap_or(false),
        }
    }
}

/// the filter settings of the UI. `None` values (and a zero min_confidence) mean "no restriction"
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub struct HotspotFilter {
    pub min_confidence: u8,
    pub year: Option<i32>,
    pub month: Option<Month>,
}

impl HotspotFilter {
    /// the active predicates for the given table. The confidence predicate is only active if
    /// the table has a confidence column and the threshold is positive
    pub fn predicates (&self, table: &FirmsTable)->Vec<HotspotPredicate> {
        let mut preds = Vec::with_capacity(3);

        if table.has_confidence_column() && self.min_confidence > 0 {
            preds.push( HotspotPredicate::MinConfidence( self.min_confidence));
        }
        if let Some(year) = self.year {
            preds.push( HotspotPredicate::Year(year));
        }
        if let Some(month) = self.month {
            preds.push( HotspotPredicate::Month(month));
        }

        preds
    }

    pub fn apply (&self, table: &FirmsTable)->FirmsTable {
        apply_predicates( table, &self.predicates( table))
    }
}

pub fn apply_predicates (table: &FirmsTable, preds: &[HotspotPredicate])->FirmsTable {
    let hotspots: Vec<Hotspot> = table.hotspots.iter()
        .filter( |hs| preds.iter().all( |p| p.matches(hs)))
        .cloned()
        .collect();

    table.with_hotspots( hotspots)
}

//--- control value parsing

fn is_all (s: &str)->bool { s.trim().eq_ignore_ascii_case(ALL) }

/// "All" or a year between 2001 and the current year
pub fn parse_year_selection (s: &str)->Result<Option<i32>> {
    if is_all(s) { return Ok(None) }

    let year: i32 = s.trim().parse().map_err( |_| invalid_control!("year '{}'", s))?;
    let last_year = current_year();
    if (FIRST_YEAR..=last_year).contains(&year) {
        Ok( Some(year) )
    } else {
        Err( invalid_control!("year {} not in {}..={}", year, FIRST_YEAR, last_year))
    }
}

/// "All" or an English month name
pub fn parse_month_selection (s: &str)->Result<Option<Month>> {
    if is_all(s) { return Ok(None) }

    month_from_name(s).map( Some).ok_or_else( || invalid_control!("month '{}'", s))
}

/// the year selection choices, most recent first
pub fn year_choices ()->Vec<String> {
    let mut choices = vec![ ALL.to_string() ];
    choices.extend( (FIRST_YEAR..=current_year()).rev().map( |y| y.to_string()));
    choices
}

pub fn month_choices ()->Vec<String> {
    let mut choices = vec![ ALL.to_string() ];
    choices.extend( odin_common::datetime::month_names().into_iter().map( |m| m.to_string()));
    choices
}
