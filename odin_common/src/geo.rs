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

/// this module provides thin new type wrappers around [geo](https://docs.rs/geo/latest/geo/index.html) types that
/// carry geodetic semantics (longitude/latitude degrees) so that we can use the geo algorithms (containment,
/// intersection) on data we get from external sources such as bounding box specs in query strings or
/// polygon rings from spatial index libraries.

use std::{fmt, str::FromStr};
use geo::{Contains, Coord, Intersects, LineString, Point, Polygon, Rect};
use thiserror::Error;

pub type GeoCoord = Coord<f64>;

#[derive(Error,Debug,Clone,PartialEq)]
pub enum GeoParseError {
    #[error("expected 4 comma separated values (W,S,E,N), got {0}")]
    WrongArity(usize),

    #[error("not a number: '{0}'")]
    NotANumber(String),

    #[error("coordinate out of range: {0}")]
    OutOfRange(String),

    #[error("degenerate bounds: {0}")]
    Degenerate(String),
}

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64 (x = longitude, y = latitude)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( lon, lat))
    }

    #[inline] pub fn longitude_degrees(&self) -> f64 { self.0.x() }
    #[inline] pub fn latitude_degrees(&self) -> f64 { self.0.y() }

    pub fn point<'a> (&'a self) -> &'a Point { &self.0 }
    pub fn coord (&self)->GeoCoord { self.0.0 }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

/* #endregion GeoPoint */

/* #region GeoRect ***********************************************************************************************/

/// a geodetic bounding box that does not cross the antimeridian.
/// The textual representation is the "W,S,E,N" degree list that is used by many web APIs (e.g. NASA FIRMS)
#[derive(Debug,Clone,PartialEq)]
pub struct GeoRect(Rect);

impl GeoRect {
    pub fn from_wsen_degrees (west: f64, south: f64, east: f64, north: f64) -> Result<Self,GeoParseError> {
        if !(-180.0..=180.0).contains(&west) || !(-180.0..=180.0).contains(&east) {
            return Err( GeoParseError::OutOfRange( format!("longitude {west},{east}")))
        }
        if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
            return Err( GeoParseError::OutOfRange( format!("latitude {south},{north}")))
        }
        if west >= east || south >= north {
            return Err( GeoParseError::Degenerate( format!("{west},{south},{east},{north}")))
        }

        Ok( GeoRect( Rect::new( Coord{ x: west, y: south}, Coord{ x: east, y: north})) )
    }

    #[inline] pub fn west(&self)->f64 { self.0.min().x }
    #[inline] pub fn east(&self)->f64 { self.0.max().x }
    #[inline] pub fn south(&self)->f64 { self.0.min().y }
    #[inline] pub fn north(&self)->f64 { self.0.max().y }

    pub fn center (&self) -> GeoPoint {
        let c = self.0.center();
        GeoPoint::from_lon_lat_degrees( c.x, c.y)
    }

    /// boundary inclusive
    pub fn contains (&self, p: &GeoPoint)->bool {
        let (x,y) = (p.longitude_degrees(), p.latitude_degrees());
        x >= self.west() && x <= self.east() && y >= self.south() && y <= self.north()
    }
}

impl FromStr for GeoRect {
    type Err = GeoParseError;

    fn from_str (s: &str) -> Result<Self,Self::Err> {
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 4 {
            return Err( GeoParseError::WrongArity(parts.len()))
        }

        let mut wsen = [0.0f64; 4];
        for (i,p) in parts.iter().enumerate() {
            wsen[i] = p.parse::<f64>().map_err(|_| GeoParseError::NotANumber(p.to_string()))?;
            if !wsen[i].is_finite() { return Err( GeoParseError::NotANumber(p.to_string())) }
        }

        GeoRect::from_wsen_degrees( wsen[0], wsen[1], wsen[2], wsen[3])
    }
}

impl fmt::Display for GeoRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.west(), self.south(), self.east(), self.north())
    }
}

/* #endregion GeoRect */

/* #region GeoPolygon **********************************************************************************************/

#[derive(Debug,Clone)]
pub struct GeoPolygon(Polygon);

impl GeoPolygon {
    /// create polygon from exterior ring of (lon,lat) degree tuples. The ring is closed automatically
    pub fn from_exterior_lon_lat (ring: &[(f64,f64)]) -> Self {
        let coords: Vec<GeoCoord> = ring.iter().map( |(lon,lat)| Coord{ x: *lon, y: *lat }).collect();
        GeoPolygon( Polygon::new( LineString::new(coords), Vec::with_capacity(0)))
    }

    pub fn exterior_coords_count(&self)->usize { self.0.exterior().0.len() }

    /// strict interior containment
    pub fn contains (&self, p: &GeoPoint)->bool { self.0.contains( p.point()) }

    /// interior or on boundary
    pub fn covers (&self, p: &GeoPoint)->bool { self.0.intersects( &p.coord()) }

    pub fn polygon (&self)->&Polygon { &self.0 }
}

/* #endregion GeoPolygon */
