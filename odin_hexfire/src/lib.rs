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

//! live NASA FIRMS fire detections aggregated into H3 hexagons and shown as a bivariate
//! (frequency x intensity) extruded hexagon map.
//!
//! The processing chain for each request is
//! ```text
//!   fetch (firms) -> filter -> aggregate (hexbin) -> classify -> build features -> serve (hexfire_service)
//! ```
//! with [`pipeline`] driving one complete request cycle.

use std::{net::SocketAddr, path::Path, fs};
use serde::{Serialize,Deserialize};
use odin_common::strings::env_expand;

pub mod errors;
pub use errors::{OdinHexfireError, Result};

pub mod firms;
pub mod filter;
pub mod hexbin;
pub mod classify;
pub mod features;
pub mod export;
pub mod pipeline;
pub mod hexfire_service;

use firms::{FirmsConfig, FirmsSensor};

/// the top level configuration of the hexfire server, normally loaded from `configs/hexfire.ron`
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct HexfireConfig {
    pub sock_addr: SocketAddr,
    pub firms: FirmsConfig,
    pub view: ViewConfig,
    pub layer: LayerConfig,
    pub defaults: ControlDefaults,
}

impl Default for HexfireConfig {
    fn default()->Self {
        HexfireConfig {
            sock_addr: SocketAddr::from( ([127,0,0,1], 9040)),
            firms: FirmsConfig::default(),
            view: ViewConfig::default(),
            layer: LayerConfig::default(),
            defaults: ControlDefaults::default()
        }
    }
}

/// initial camera position of the map
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct ViewConfig {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl Default for ViewConfig {
    fn default()->Self { ViewConfig { longitude: 80.0, latitude: 22.0, zoom: 4.1, pitch: 30.0 } }
}

/// rendering flags of the hexagon layer. Fill color and elevation are always taken from the
/// `color` and `elevation` feature properties
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LayerConfig {
    pub opacity: f64,
    pub stroked: bool,
    pub filled: bool,
    pub extruded: bool,
    pub pickable: bool,
    pub auto_highlight: bool,
}

impl Default for LayerConfig {
    fn default()->Self {
        LayerConfig { opacity: 0.8, stroked: false, filled: true, extruded: true, pickable: true, auto_highlight: true }
    }
}

/// initial values of the interactive controls. Year and month always start with "All"
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ControlDefaults {
    pub days: u8,
    pub bbox: String,
    pub sensor: FirmsSensor,
    pub min_confidence: u8,
    pub resolution: u8,
}

impl Default for ControlDefaults {
    fn default()->Self {
        ControlDefaults {
            days: 3,
            bbox: "68,8,98,37".to_string(),
            sensor: FirmsSensor::ModisNrt,
            min_confidence: 75,
            resolution: 5
        }
    }
}

/// load a RON config file. A `map_key` of the form `$VAR` is expanded from the environment
pub fn load_config<P: AsRef<Path>> (path: P) -> Result<HexfireConfig> {
    let input = fs::read_to_string( path.as_ref())?;
    parse_config( &input)
}

pub fn parse_config (input: &str) -> Result<HexfireConfig> {
    let mut config: HexfireConfig = ron::de::from_str( input)?;
    config.firms.map_key = env_expand( &config.firms.map_key);
    Ok(config)
}
