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
#![allow(unused)]

//! a module that imports active fire detections (hotspots) from NASAs Fire Information for Resource Management
//! System (FIRMS) area API, see https://firms.modaps.eosdis.nasa.gov/api/area/
//!
//!   [BASE_URL]/[MAP_KEY]/[SOURCE]/[AREA_COORDINATES]/[DAY_RANGE]
//!    e.g. https://firms.modaps.eosdis.nasa.gov/api/area/csv/<map-key>/MODIS_NRT/68,8,98,37/3
//!
//! Only full day ranges are allowed (1-10). Responses are memoized per (area, day range, source) for a
//! configurable time-to-live since the upstream data only changes with new satellite overpasses and the
//! map key is rate limited.

use std::{io, sync::Arc, time::Duration};
use serde::{Serialize,Deserialize};
use chrono::NaiveDate;
use csv::{StringRecord, ReaderBuilder};
use reqwest::Client;
use async_trait::async_trait;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::{debug, info, warn, error};

use odin_common::{
    datetime::{self, deserialize_duration, serialize_duration},
    geo::{GeoPoint, GeoRect},
    net::{self, redacted_url},
    ttl_cache::TtlCache
};
use crate::errors::{OdinHexfireError, Result, invalid_control};

pub const MIN_DAYS: u8 = 1;
pub const MAX_DAYS: u8 = 10;

pub const DEFAULT_BASE_URL: &str = "https://firms.modaps.eosdis.nasa.gov/api/area/csv";

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct FirmsConfig {
    pub base_url: String,
    pub map_key: String,  // keep this private - it is rate limited

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub cache_ttl: Duration,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub request_timeout: Duration,
}

impl Default for FirmsConfig {
    fn default()->Self {
        FirmsConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            map_key: "$FIRMS_MAP_KEY".to_string(),
            cache_ttl: datetime::minutes(15),
            request_timeout: datetime::secs(60)
        }
    }
}

/* #region sensors and queries ***********************************************************************************/

/// the near-real-time FIRMS data sources we support
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,EnumString,Display,EnumIter,AsRefStr)]
pub enum FirmsSensor {
    #[strum(serialize="MODIS_NRT")]
    #[serde(rename="MODIS_NRT")]
    ModisNrt,

    #[strum(serialize="VIIRS_SNPP_NRT")]
    #[serde(rename="VIIRS_SNPP_NRT")]
    ViirsSnppNrt,

    #[strum(serialize="VIIRS_NOAA20_NRT")]
    #[serde(rename="VIIRS_NOAA20_NRT")]
    ViirsNoaa20Nrt,
}

impl FirmsSensor {
    pub fn label (&self)->&'static str {
        match self {
            FirmsSensor::ModisNrt => "MODIS (Terra/Aqua)",
            FirmsSensor::ViirsSnppNrt => "VIIRS SNPP",
            FirmsSensor::ViirsNoaa20Nrt => "VIIRS NOAA-20",
        }
    }
}

/// the parameters that identify a FIRMS area request. This is also the cache key, i.e. the bounding box text
/// is kept verbatim (modulo surrounding whitespace) after it was validated
#[derive(Debug,Clone,PartialEq,Eq,Hash)]
pub struct FirmsQuery {
    pub bbox: String,
    pub days: u8,
    pub sensor: FirmsSensor,
}

impl FirmsQuery {
    pub fn new (bbox: &str, days: u8, sensor: FirmsSensor)->Result<Self> {
        let bbox = bbox.trim();
        let _rect: GeoRect = bbox.parse()?;

        if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
            return Err( invalid_control!("days {} not in {}..={}", days, MIN_DAYS, MAX_DAYS))
        }

        Ok( FirmsQuery { bbox: bbox.to_string(), days, sensor } )
    }
}

/* #endregion sensors and queries */

/* #region hotspot table ******************************************************************************************/

/// detection confidence as reported by the different instruments. MODIS uses percentages, VIIRS uses
/// low/nominal/high classes
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub enum HotspotConfidence {
    Percent(u8),
    Low,
    Nominal,
    High
}

impl HotspotConfidence {
    pub fn parse (s: &str)->Option<HotspotConfidence> {
        let s = s.trim();
        match s {
            "l" | "low" => Some(HotspotConfidence::Low),
            "n" | "nominal" => Some(HotspotConfidence::Nominal),
            "h" | "high" => Some(HotspotConfidence::High),
            _ => {
                let v: f64 = s.parse().ok()?;
                if (0.0..=100.0).contains(&v) { Some( HotspotConfidence::Percent( v.round() as u8)) } else { None }
            }
        }
    }

    /// the percentage used for threshold comparison. Classes map to the lower bound of the corresponding
    /// MODIS confidence class (low: 0-30, nominal: 30-80, high: 80-100)
    pub fn percent (&self)->u8 {
        match self {
            HotspotConfidence::Percent(p) => *p,
            HotspotConfidence::Low => 0,
            HotspotConfidence::Nominal => 30,
            HotspotConfidence::High => 80,
        }
    }
}

/// one detection of the FIRMS CSV response. We keep the raw record so that we can export (filtered) rows verbatim
#[derive(Debug,Clone)]
pub struct Hotspot {
    pub pos: GeoPoint,
    pub acq_date: Option<NaiveDate>, // None if unparseable
    pub intensity: Option<f64>,      // brightness temperature [K] (MODIS 'brightness', VIIRS 'bright_ti4'), None if missing
    pub confidence: Option<HotspotConfidence>,
    pub record: StringRecord,
}

impl Hotspot {
    #[inline] pub fn latitude (&self)->f64 { self.pos.latitude_degrees() }
    #[inline] pub fn longitude (&self)->f64 { self.pos.longitude_degrees() }
}

/// column positions of the fields we need
#[derive(Debug,Clone,Copy)]
struct ColumnIndices {
    latitude: usize,
    longitude: usize,
    acq_date: usize,
    intensity: usize,
    confidence: Option<usize>,
}

impl ColumnIndices {
    fn from_headers (headers: &StringRecord)->Result<Self> {
        let find = |name: &str| headers.iter().position( |h| h.trim() == name);
        let required = |name: &str| find(name).ok_or_else( || OdinHexfireError::MissingColumn(name.to_string()));

        Ok( ColumnIndices {
            latitude: required("latitude")?,
            longitude: required("longitude")?,
            acq_date: required("acq_date")?,
            intensity: find("brightness").or_else( || find("bright_ti4"))
                .ok_or_else( || OdinHexfireError::MissingColumn("brightness".to_string()))?,
            confidence: find("confidence")
        })
    }
}

/// the (parsed) table of hotspots we got from FIRMS
#[derive(Debug,Clone,Default)]
pub struct FirmsTable {
    pub headers: StringRecord,
    pub hotspots: Vec<Hotspot>,
    has_confidence: bool,
}

impl FirmsTable {
    pub fn empty()->Self { FirmsTable::default() }

    #[inline] pub fn len (&self)->usize { self.hotspots.len() }
    #[inline] pub fn is_empty (&self)->bool { self.hotspots.is_empty() }

    pub fn has_confidence_column (&self)->bool { self.has_confidence }

    /// a new table with the same columns but a different set of rows
    pub fn with_hotspots (&self, hotspots: Vec<Hotspot>)->FirmsTable {
        FirmsTable { headers: self.headers.clone(), hotspots, has_confidence: self.has_confidence }
    }

    pub fn from_csv_str (input: &str)->Result<Self> {
        Self::from_reader( input.as_bytes())
    }

    /// parse FIRMS CSV. Required columns are latitude, longitude, acq_date and brightness (MODIS) or bright_ti4 (VIIRS).
    /// Rows without finite coordinates are dropped, rows with missing intensity, invalid dates or confidence values
    /// are kept (with None values)
    pub fn from_reader (reader: impl io::Read)->Result<Self> {
        let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let cols = ColumnIndices::from_headers( &headers)?;

        let mut hotspots: Vec<Hotspot> = Vec::new();
        let mut n_dropped = 0;

        for res in csv_reader.records() {
            let record = res?;
            match Self::parse_record( &cols, record) {
                Some(hs) => hotspots.push(hs),
                None => n_dropped += 1
            }
        }

        if n_dropped > 0 {
            warn!("dropped {} FIRMS records without valid position", n_dropped);
        }

        Ok( FirmsTable { headers, hotspots, has_confidence: cols.confidence.is_some() } )
    }

    fn parse_record (cols: &ColumnIndices, record: StringRecord)->Option<Hotspot> {
        let num = |idx: usize| -> Option<f64> {
            record.get(idx).and_then( |s| s.trim().parse::<f64>().ok()).filter( |v| v.is_finite())
        };

        let lat = num(cols.latitude)?;
        let lon = num(cols.longitude)?;
        let intensity = num(cols.intensity);

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            debug!("hotspot position out of range: {lat},{lon}");
            return None
        }

        let acq_date = record.get(cols.acq_date).and_then( datetime::parse_lenient_date);
        let confidence = cols.confidence.and_then( |idx| record.get(idx)).and_then( HotspotConfidence::parse);

        Some( Hotspot { pos: GeoPoint::from_lon_lat_degrees(lon, lat), acq_date, intensity, confidence, record } )
    }
}

/* #endregion hotspot table */

/* #region data retrieval *****************************************************************************************/

/// abstraction of the transport so that we can run the pipeline on recorded data
#[async_trait]
pub trait FirmsSource: Send + Sync {
    async fn get_csv (&self, url: &str)->Result<String>;
}

pub struct HttpFirmsSource {
    client: Client
}

impl HttpFirmsSource {
    pub fn new (timeout: Duration)->Result<Self> {
        let client = net::client_with_timeout( timeout)?;
        Ok( HttpFirmsSource { client } )
    }
}

#[async_trait]
impl FirmsSource for HttpFirmsSource {
    async fn get_csv (&self, url: &str)->Result<String> {
        Ok( net::get_text( &self.client, url, &None).await? )
    }
}

/// the outcome of a FIRMS request. Failures are not errors for the caller, they result in an empty table
/// and a message that should be shown to the user
#[derive(Debug,Clone)]
pub struct FetchResult {
    pub table: Arc<FirmsTable>,
    pub error: Option<String>,
}

impl FetchResult {
    fn failed (msg: String)->Self {
        FetchResult { table: Arc::new( FirmsTable::empty()), error: Some(msg) }
    }
}

/// FIRMS retrieval with time based memoization of results (including failed requests, which are not retried
/// before the respective cache entry expires)
pub struct HotspotFetcher {
    config: FirmsConfig,
    source: Arc<dyn FirmsSource>,
    cache: TtlCache<FirmsQuery,FetchResult>,
}

impl HotspotFetcher {
    pub fn new (config: FirmsConfig, source: Arc<dyn FirmsSource>)->Self {
        let cache = TtlCache::new( config.cache_ttl);
        HotspotFetcher { config, source, cache }
    }

    pub fn request_url (&self, query: &FirmsQuery)->String {
        format!( "{}/{}/{}/{}/{}",
                 self.config.base_url.trim_end_matches('/'), self.config.map_key, query.sensor, query.bbox, query.days)
    }

    pub fn cache_len (&self)->usize { self.cache.len() }

    pub async fn fetch (&mut self, query: &FirmsQuery)->FetchResult {
        if let Some(res) = self.cache.get( query) {
            debug!("using cached FIRMS data for {:?}", query);
            return res.clone()
        }

        let url = self.request_url( query);
        let log_url = redacted_url( &url, &self.config.map_key);
        info!("requesting FIRMS data from {}", log_url);

        let result = match self.source.get_csv( &url).await.and_then( |body| FirmsTable::from_csv_str( &body)) {
            Ok(table) => {
                info!("got {} {} hotspots for {}", table.len(), query.sensor, query.bbox);
                FetchResult { table: Arc::new(table), error: None }
            }
            Err(e) => {
                let msg = redacted_url( &e.to_string(), &self.config.map_key);
                error!("FIRMS request {} failed: {}", log_url, msg);
                FetchResult::failed( format!("Error fetching data from FIRMS API: {msg}"))
            }
        };

        self.cache.purge_expired();
        self.cache.insert( query.clone(), result.clone());
        result
    }
}

/* #endregion data retrieval */
