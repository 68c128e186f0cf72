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

//! bivariate (frequency x intensity) classification of hexagon cells.
//!
//! Each cell is put into one of four classes by two independent splits at the 90th percentile of the
//! respective distribution over all cells of the current request:
//! ```text
//!                       intensity < p90     intensity >= p90
//!   count >= p90        purple              deep purple/black     (tall)
//!   count <  p90        light grey          blue                  (short)
//! ```
//! Note the split is `>=`, which means degenerate distributions (all cells have the same value) put all
//! cells into the high class.

use serde::Serialize;
use crate::hexbin::HexCell;

pub type Rgb = [u8;3];

pub const HIGH_FREQ_HIGH_INTENSITY: Rgb = [50, 0, 70];    // deep purple/black
pub const HIGH_FREQ_LOW_INTENSITY: Rgb = [120, 0, 180];   // purple
pub const LOW_FREQ_HIGH_INTENSITY: Rgb = [0, 70, 255];    // blue
pub const LOW_FREQ_LOW_INTENSITY: Rgb = [200, 200, 220];  // light grey

pub const TALL_ELEVATION: u32 = 2000;
pub const SHORT_ELEVATION: u32 = 400;

/// linearly interpolated quantile of sorted (ascending) values, `None` if there are no values.
/// This uses the (n-1)*q rank position, i.e. q=0 is the min and q=1 the max value
pub fn quantile (sorted: &[f64], q: f64)->Option<f64> {
    if sorted.is_empty() { return None }

    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;

    if lo == hi {
        Some( sorted[lo])
    } else {
        let frac = pos - lo as f64;
        Some( sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
    }
}

/// median and 90th percentile of a distribution
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct QuantilePair {
    pub p50: f64,
    pub p90: f64,
}

impl QuantilePair {
    /// quantiles over the finite values, `None` if there are none
    pub fn from_values (mut values: Vec<f64>)->Option<Self> {
        values.retain( |v| v.is_finite());
        values.sort_by( |a,b| a.total_cmp(b));
        Some( QuantilePair { p50: quantile( &values, 0.5)?, p90: quantile( &values, 0.9)? } )
    }
}

/// the thresholds of one request cycle. All cells of a request have to be classified with the same instance
#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct Thresholds {
    pub frequency: QuantilePair,
    pub intensity: QuantilePair,
}

impl Thresholds {
    /// `None` if there are no cells. Cells without mean intensity (NaN) are ignored for the intensity quantiles,
    /// if no cell has one the intensity thresholds are NaN and all cells are classified as low intensity
    pub fn compute<C> (cells: &[HexCell<C>])->Option<Self> {
        let frequency = QuantilePair::from_values( cells.iter().map( |c| c.count as f64).collect())?;
        let intensity = QuantilePair::from_values( cells.iter().map( |c| c.mean_intensity).collect())
            .unwrap_or( QuantilePair { p50: f64::NAN, p90: f64::NAN });
        Some( Thresholds { frequency, intensity } )
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
#[serde(rename_all="lowercase")]
pub enum Level { Low, High }

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize)]
pub struct BivariateClass {
    pub frequency: Level,
    pub intensity: Level,
}

impl BivariateClass {
    pub fn of (count: usize, mean_intensity: f64, thresholds: &Thresholds)->Self {
        let frequency = if count as f64 >= thresholds.frequency.p90 { Level::High } else { Level::Low };
        let intensity = if mean_intensity >= thresholds.intensity.p90 { Level::High } else { Level::Low };
        BivariateClass { frequency, intensity }
    }

    pub fn color (&self)->Rgb {
        match (self.frequency, self.intensity) {
            (Level::High, Level::High) => HIGH_FREQ_HIGH_INTENSITY,
            (Level::High, Level::Low) => HIGH_FREQ_LOW_INTENSITY,
            (Level::Low, Level::High) => LOW_FREQ_HIGH_INTENSITY,
            (Level::Low, Level::Low) => LOW_FREQ_LOW_INTENSITY,
        }
    }

    /// elevation only depends on frequency
    pub fn elevation (&self)->u32 {
        match self.frequency {
            Level::High => TALL_ELEVATION,
            Level::Low => SHORT_ELEVATION,
        }
    }
}

/// pure per-cell classification into (fill color, elevation)
pub fn classify (count: usize, mean_intensity: f64, thresholds: &Thresholds)->(Rgb,u32) {
    let class = BivariateClass::of( count, mean_intensity, thresholds);
    (class.color(), class.elevation())
}

#[derive(Debug,Clone,PartialEq)]
pub struct ClassifiedCell<C> {
    pub cell: HexCell<C>,
    pub class: BivariateClass,
    pub color: Rgb,
    pub elevation: u32,
}

/// compute thresholds over all cells and classify each of them. Returns `None` if there are no cells
pub fn classify_cells<C> (cells: Vec<HexCell<C>>)->Option<(Thresholds,Vec<ClassifiedCell<C>>)> {
    let thresholds = Thresholds::compute( &cells)?;

    let classified = cells.into_iter().map( |cell| {
        let class = BivariateClass::of( cell.count, cell.mean_intensity, &thresholds);
        ClassifiedCell { cell, class, color: class.color(), elevation: class.elevation() }
    }).collect();

    Some( (thresholds, classified) )
}

/* #region legend *************************************************************************************************/

#[derive(Debug,Clone,Serialize)]
pub struct LegendEntry {
    pub frequency: Level,
    pub intensity: Level,
    pub color: String, // CSS hex color
    pub label: &'static str,
}

pub fn css_color (rgb: &Rgb)->String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// legend entries in (frequency,intensity) order low/low, low/high, high/low, high/high
pub fn legend ()->Vec<LegendEntry> {
    [
        (Level::Low, Level::Low, "rare, low intensity"),
        (Level::Low, Level::High, "rare, intense"),
        (Level::High, Level::Low, "frequent, moderate intensity"),
        (Level::High, Level::High, "frequent, intense fires (high risk)"),
    ].into_iter().map( |(frequency,intensity,label)| {
        let class = BivariateClass { frequency, intensity };
        LegendEntry { frequency, intensity, color: css_color( &class.color()), label }
    }).collect()
}

/* #endregion legend */
