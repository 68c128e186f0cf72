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

//! one request cycle of the hexfire map:
//! ```text
//!   controls -> fetch (memoized) -> filter -> aggregate -> classify -> features
//! ```
//! Every stage works on the data of the current cycle only, in particular classification thresholds are
//! recomputed for each cycle from the current set of cells.
//! "No data" (failed or empty fetch) and "no matches" (nothing left after filtering) are regular outcomes,
//! not errors. Errors are only returned for invalid control values.

use chrono::Month;
use serde::Serialize;
use geojson::FeatureCollection;
use tracing::{debug, info, warn};

use crate::{
    ControlDefaults,
    classify::{Thresholds, classify_cells},
    errors::{Result, invalid_control, op_failed},
    features::build_feature_collection,
    filter::{HotspotFilter, FIRST_YEAR},
    firms::{FirmsQuery, FirmsSensor, FirmsTable, HotspotFetcher},
    hexbin::{HexIndex, aggregate, check_resolution},
};

pub const NO_MATCHES_MSG: &str = "No data available for the selected filters.";

/// the values of all interactive controls. Each change of any of them triggers a new request cycle
#[derive(Debug,Clone,PartialEq)]
pub struct HexfireControls {
    pub days: u8,
    pub bbox: String,
    pub sensor: FirmsSensor,
    pub min_confidence: u8,
    pub year: Option<i32>,
    pub month: Option<Month>,
    pub resolution: u8,
}

impl HexfireControls {
    pub fn from_defaults (defaults: &ControlDefaults)->Self {
        HexfireControls {
            days: defaults.days,
            bbox: defaults.bbox.clone(),
            sensor: defaults.sensor,
            min_confidence: defaults.min_confidence,
            year: None,
            month: None,
            resolution: defaults.resolution
        }
    }

    pub fn validate (&self)->Result<()> {
        self.query()?;
        check_resolution( self.resolution)?;

        if self.min_confidence > 100 {
            return Err( invalid_control!("min confidence {} > 100", self.min_confidence))
        }
        if let Some(year) = self.year {
            if year < FIRST_YEAR || year > odin_common::datetime::current_year() {
                return Err( invalid_control!("year {}", year))
            }
        }
        Ok(())
    }

    pub fn query (&self)->Result<FirmsQuery> {
        FirmsQuery::new( &self.bbox, self.days, self.sensor)
    }

    pub fn filter (&self)->HotspotFilter {
        HotspotFilter { min_confidence: self.min_confidence, year: self.year, month: self.month }
    }
}

impl Default for HexfireControls {
    fn default()->Self { HexfireControls::from_defaults( &ControlDefaults::default()) }
}

/// fetch and filter result of a request cycle. This is also what we export as CSV
#[derive(Debug,Clone)]
pub struct FilteredHotspots {
    pub sensor: FirmsSensor,
    pub fetched: usize,
    pub fetch_error: Option<String>,
    pub table: FirmsTable,
}

impl FilteredHotspots {
    pub fn fetched_caption (&self)->String {
        format!("Fetched {} points from NASA FIRMS {}", self.fetched, self.sensor)
    }

    pub fn filtered_caption (&self)->String {
        format!("After filtering: {} points remain.", self.table.len())
    }

    /// the status lines shown above the map
    pub fn captions (&self)->Vec<String> {
        vec![ self.fetched_caption(), self.filtered_caption() ]
    }
}

pub async fn fetch_filtered (fetcher: &mut HotspotFetcher, controls: &HexfireControls)->Result<FilteredHotspots> {
    controls.validate()?;

    let query = controls.query()?;
    let fetch_result = fetcher.fetch( &query).await;
    let table = controls.filter().apply( &fetch_result.table);
    debug!("{} of {} hotspots remain after filtering", table.len(), fetch_result.table.len());

    Ok( FilteredHotspots {
        sensor: controls.sensor,
        fetched: fetch_result.table.len(),
        fetch_error: fetch_result.error,
        table
    })
}

/// the renderable result of a request cycle
#[derive(Debug,Serialize)]
pub struct HexMap {
    pub captions: Vec<String>,
    pub fetched: usize,
    pub filtered: usize,
    pub n_cells: usize,
    pub thresholds: Thresholds,
    pub features: FeatureCollection,
}

#[derive(Debug,Serialize)]
#[serde(tag="status", rename_all="snake_case")]
pub enum HexfireOutcome {
    NoData { message: String },
    NoMatches { fetched: usize, captions: Vec<String>, message: String },
    Map(HexMap),
}

/// aggregate, classify and build features for already filtered hotspots
pub fn build_outcome<I: HexIndex> (index: &I, filtered: &FilteredHotspots, resolution: u8)->Result<HexfireOutcome> {
    if filtered.fetched == 0 {
        let message = filtered.fetch_error.clone()
            .unwrap_or_else( || format!("No data returned from NASA FIRMS {}", filtered.sensor));
        return Ok( HexfireOutcome::NoData { message } )
    }

    if filtered.table.is_empty() {
        warn!("no hotspots left after filtering {} fetched", filtered.fetched);
        return Ok( HexfireOutcome::NoMatches {
            fetched: filtered.fetched,
            captions: filtered.captions(),
            message: NO_MATCHES_MSG.to_string()
        })
    }

    let cells = aggregate( index, &filtered.table, resolution)?;

    if let Some((thresholds, classified)) = classify_cells( cells) {
        info!("{} hotspots aggregated into {} cells at resolution {}", filtered.table.len(), classified.len(), resolution);

        Ok( HexfireOutcome::Map( HexMap {
            captions: filtered.captions(),
            fetched: filtered.fetched,
            filtered: filtered.table.len(),
            n_cells: classified.len(),
            thresholds,
            features: build_feature_collection( index, &classified)
        }))
    } else {
        // a non-empty table always occupies at least one cell
        Err( op_failed!("no cells for {} hotspots", filtered.table.len()))
    }
}

pub async fn run_pipeline<I: HexIndex> (fetcher: &mut HotspotFetcher, index: &I, controls: &HexfireControls)->Result<HexfireOutcome> {
    let filtered = fetch_filtered( fetcher, controls).await?;
    build_outcome( index, &filtered, controls.resolution)
}
