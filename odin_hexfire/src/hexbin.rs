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

//! spatial aggregation of hotspots into hexagonal cells.
//!
//! The hexagon grid itself is an external capability that is abstracted by the [`HexIndex`] trait. We do not
//! make any assumptions about cell identifiers other than they can be compared, hashed, ordered and displayed.
//! The production implementation is [`H3Index`], which uses the [h3o](https://docs.rs/h3o) crate.

use std::{collections::BTreeMap, fmt::{Debug, Display}, hash::Hash, ops::RangeInclusive};
use h3o::{CellIndex, LatLng, Resolution};
use odin_common::MeanAccumulator;
use crate::firms::FirmsTable;
use crate::errors::{Result, invalid_control};

/// the resolutions we support - smaller is coarser
pub const HEX_RESOLUTIONS: RangeInclusive<u8> = 3..=7;

pub trait HexIndex: Send + Sync {
    type Cell: Copy + Eq + Hash + Ord + Display + Debug + Send + Sync;

    /// the cell that contains the given point at the given resolution
    fn point_to_cell (&self, lat: f64, lon: f64, resolution: u8)->Result<Self::Cell>;

    /// cell boundary as (lat,lon) degree tuples in the order provided by the index. The ring is not closed
    fn cell_boundary (&self, cell: Self::Cell)->Vec<(f64,f64)>;
}

/// the Uber H3 hierarchical hexagon grid
#[derive(Debug,Clone,Copy,Default)]
pub struct H3Index;

impl HexIndex for H3Index {
    type Cell = CellIndex;

    fn point_to_cell (&self, lat: f64, lon: f64, resolution: u8)->Result<CellIndex> {
        let res = Resolution::try_from(resolution)?;
        let ll = LatLng::new( lat, lon)?;
        Ok( ll.to_cell(res) )
    }

    fn cell_boundary (&self, cell: CellIndex)->Vec<(f64,f64)> {
        cell.boundary().iter().map( |ll| (ll.lat(), ll.lng())).collect()
    }
}

/// aggregated hotspot data of one occupied cell
#[derive(Debug,Clone,PartialEq)]
pub struct HexCell<C> {
    pub cell: C,
    pub count: usize,         // all hotspots in the cell, including those without intensity
    pub mean_intensity: f64,  // NaN if no hotspot of the cell has an intensity value
    pub mean_lat: f64,  // for reference, not used for rendering
    pub mean_lon: f64,
}

#[derive(Debug,Clone,Copy)]
struct CellStats {
    intensity: MeanAccumulator,
    lat: MeanAccumulator,
    lon: MeanAccumulator,
}

impl CellStats {
    fn new()->Self {
        CellStats { intensity: MeanAccumulator::new(), lat: MeanAccumulator::new(), lon: MeanAccumulator::new() }
    }
}

pub fn check_resolution (resolution: u8)->Result<u8> {
    if HEX_RESOLUTIONS.contains(&resolution) {
        Ok(resolution)
    } else {
        Err( invalid_control!("hex resolution {} not in {:?}", resolution, HEX_RESOLUTIONS))
    }
}

/// group all hotspots of the table by cell. The result contains one entry per occupied cell, ordered by cell id
pub fn aggregate<I: HexIndex> (index: &I, table: &FirmsTable, resolution: u8)->Result<Vec<HexCell<I::Cell>>> {
    let mut cells: BTreeMap<I::Cell,CellStats> = BTreeMap::new();

    for hs in &table.hotspots {
        let cell = index.point_to_cell( hs.latitude(), hs.longitude(), resolution)?;
        let stats = cells.entry(cell).or_insert_with( CellStats::new);
        if let Some(intensity) = hs.intensity {
            stats.intensity.add( intensity);
        }
        stats.lat.add( hs.latitude());
        stats.lon.add( hs.longitude());
    }

    Ok( cells.into_iter().map( |(cell,stats)| HexCell {
        cell,
        count: stats.lat.n,
        mean_intensity: stats.intensity.mean,
        mean_lat: stats.lat.mean,
        mean_lon: stats.lon.mean
    }).collect() )
}
