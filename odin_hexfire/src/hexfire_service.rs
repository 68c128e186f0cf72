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

//! the HTTP surface of the hexfire dashboard. All routes are GET:
//! ```text
//!   /hexfire             - the dashboard page
//!   /hexfire/hexfire.js  - the page script
//!   /hexfire/config      - control definitions, view/layer config, legend and reading notes
//!   /hexfire/map?..      - JSON outcome of one request cycle
//!   /hexfire/csv?..      - the filtered hotspot table as CSV download
//! ```
//! map and csv take the control values as query parameters (days,bbox,sensor,confidence,year,month,resolution),
//! missing ones are taken from the configured defaults.

use std::{ops::RangeInclusive, str::FromStr, sync::Arc};
use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use odin_common::net::mime_type_for_extension;

use crate::{
    ControlDefaults, HexfireConfig, LayerConfig, ViewConfig,
    classify::{LegendEntry, legend},
    errors::{OdinHexfireError, Result, invalid_control},
    export::{EXPORT_FILENAME, to_csv_bytes},
    filter::{month_choices, parse_month_selection, parse_year_selection, year_choices},
    firms::{FirmsSensor, HotspotFetcher, MAX_DAYS, MIN_DAYS},
    hexbin::{HEX_RESOLUTIONS, HexIndex},
    pipeline::{HexfireControls, HexfireOutcome, build_outcome, fetch_filtered},
};

const PAGE: &str = include_str!("../assets/hexfire.html");
const SCRIPT: &str = include_str!("../assets/hexfire.js");

const AXIS_NOTE: &str = "X-axis: Frequency, Y-axis: Intensity. Hex height = frequency, Color = mean intensity";

const READING_NOTES: [&str; 4] = [
    "Dark large hexes = frequent, intense fires (high risk)",
    "Purple = frequent, moderate intensity",
    "Blue = rare, intense",
    "Pale = rare, low intensity",
];

/// shared server state. The fetcher lock is held across the upstream request so that FIRMS requests
/// are processed one at a time
pub struct HexfireState<I: HexIndex> {
    pub config: HexfireConfig,
    pub fetcher: Mutex<HotspotFetcher>,
    pub index: I,
}

impl<I: HexIndex> HexfireState<I> {
    pub fn new (config: HexfireConfig, fetcher: HotspotFetcher, index: I)->Self {
        HexfireState { config, fetcher: Mutex::new(fetcher), index }
    }
}

pub fn router<I: HexIndex + 'static> (state: Arc<HexfireState<I>>)->Router {
    Router::new()
        .route( "/hexfire", get( page_handler))
        .route( "/hexfire/hexfire.js", get( script_handler))
        .route( "/hexfire/config", get( config_handler::<I>))
        .route( "/hexfire/map", get( map_handler::<I>))
        .route( "/hexfire/csv", get( csv_handler::<I>))
        .with_state( state)
}

/* #region control query ******************************************************************************************/

/// raw control values as they come in from the page. All fields are optional
#[derive(Debug,Clone,Default,Deserialize)]
pub struct ControlsQuery {
    pub days: Option<u8>,
    pub bbox: Option<String>,
    pub sensor: Option<String>,
    pub confidence: Option<u8>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub resolution: Option<u8>,
}

impl ControlsQuery {
    pub fn to_controls (&self, defaults: &ControlDefaults)->Result<HexfireControls> {
        let mut controls = HexfireControls::from_defaults( defaults);

        if let Some(days) = self.days { controls.days = days }
        if let Some(bbox) = &self.bbox { controls.bbox = bbox.clone() }
        if let Some(sensor) = &self.sensor {
            controls.sensor = FirmsSensor::from_str( sensor.trim()).map_err( |_| invalid_control!("sensor '{}'", sensor))?;
        }
        if let Some(confidence) = self.confidence { controls.min_confidence = confidence }
        if let Some(year) = &self.year { controls.year = parse_year_selection( year)? }
        if let Some(month) = &self.month { controls.month = parse_month_selection( month)? }
        if let Some(resolution) = self.resolution { controls.resolution = resolution }

        controls.validate()?;
        Ok(controls)
    }
}

/* #endregion control query */

/* #region error response *****************************************************************************************/

/// maps pipeline errors to plain text responses. Invalid control values are client errors
#[derive(Debug)]
pub struct HexfireResponseError(pub OdinHexfireError);

impl From<OdinHexfireError> for HexfireResponseError {
    fn from (e: OdinHexfireError)->Self { HexfireResponseError(e) }
}

impl IntoResponse for HexfireResponseError {
    fn into_response (self)->Response {
        let status = match &self.0 {
            OdinHexfireError::InvalidControl(_) |
            OdinHexfireError::BboxError(_) |
            OdinHexfireError::ResolutionError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        };
        if status == StatusCode::BAD_REQUEST {
            debug!("rejected request: {}", self.0);
        } else {
            warn!("request failed: {}", self.0);
        }
        (status, self.0.to_string()).into_response()
    }
}

type HandlerResult<T> = std::result::Result<T, HexfireResponseError>;

/* #endregion error response */

/* #region config response ****************************************************************************************/

#[derive(Debug,Serialize)]
pub struct SensorChoice {
    pub value: String,
    pub label: &'static str,
}

#[derive(Debug,Serialize)]
pub struct ValueRange {
    pub min: u8,
    pub max: u8,
}

impl From<RangeInclusive<u8>> for ValueRange {
    fn from (r: RangeInclusive<u8>)->Self { ValueRange { min: *r.start(), max: *r.end() } }
}

/// everything the page needs to build its controls, map and legend
#[derive(Debug,Serialize)]
pub struct HexfireClientConfig {
    pub sensors: Vec<SensorChoice>,
    pub years: Vec<String>,
    pub months: Vec<String>,
    pub days: ValueRange,
    pub confidence: ValueRange,
    pub resolution: ValueRange,
    pub defaults: ControlDefaults,
    pub view: ViewConfig,
    pub layer: LayerConfig,
    pub legend: Vec<LegendEntry>,
    pub axis_note: &'static str,
    pub notes: Vec<&'static str>,
}

impl HexfireClientConfig {
    pub fn new (config: &HexfireConfig)->Self {
        HexfireClientConfig {
            sensors: FirmsSensor::iter().map( |s| SensorChoice { value: s.to_string(), label: s.label() }).collect(),
            years: year_choices(),
            months: month_choices(),
            days: (MIN_DAYS..=MAX_DAYS).into(),
            confidence: (0u8..=100).into(),
            resolution: HEX_RESOLUTIONS.into(),
            defaults: config.defaults.clone(),
            view: config.view,
            layer: config.layer,
            legend: legend(),
            axis_note: AXIS_NOTE,
            notes: READING_NOTES.to_vec()
        }
    }
}

/* #endregion config response */

/* #region handlers ***********************************************************************************************/

async fn page_handler ()->Html<&'static str> {
    Html(PAGE)
}

async fn script_handler ()->impl IntoResponse {
    let mime_type = mime_type_for_extension("js").unwrap_or("text/javascript");
    ([(header::CONTENT_TYPE, mime_type)], SCRIPT)
}

async fn config_handler<I: HexIndex + 'static> (State(state): State<Arc<HexfireState<I>>>)->Json<HexfireClientConfig> {
    Json( HexfireClientConfig::new( &state.config))
}

async fn map_handler<I: HexIndex + 'static> (State(state): State<Arc<HexfireState<I>>>, Query(q): Query<ControlsQuery>)->HandlerResult<Json<HexfireOutcome>> {
    let controls = q.to_controls( &state.config.defaults)?;

    let filtered = {
        let mut fetcher = state.fetcher.lock().await;
        fetch_filtered( &mut fetcher, &controls).await?
    };

    let outcome = build_outcome( &state.index, &filtered, controls.resolution)?;
    Ok( Json(outcome) )
}

async fn csv_handler<I: HexIndex + 'static> (State(state): State<Arc<HexfireState<I>>>, Query(q): Query<ControlsQuery>)->HandlerResult<Response> {
    let controls = q.to_controls( &state.config.defaults)?;

    let filtered = {
        let mut fetcher = state.fetcher.lock().await;
        fetch_filtered( &mut fetcher, &controls).await?
    };

    if filtered.fetched == 0 {
        let msg = filtered.fetch_error.unwrap_or_else( || format!("No data returned from NASA FIRMS {}", filtered.sensor));
        return Ok( (StatusCode::NOT_FOUND, msg).into_response() )
    }

    let data = to_csv_bytes( &filtered.table)?;

    let mut headers = HeaderMap::new();
    headers.insert( header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILENAME);
    if let Ok(hv) = HeaderValue::from_str( &disposition) {
        headers.insert( header::CONTENT_DISPOSITION, hv);
    }

    Ok( (StatusCode::OK, headers, Body::from(data)).into_response() )
}

/* #endregion handlers */
