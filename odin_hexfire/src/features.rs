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

//! conversion of classified cells into GeoJSON polygon features. The property names are what the client side
//! layer styling and tooltip refer to, i.e. they must not change:
//!
//!   - `frequency`       : number of hotspots in the cell (int)
//!   - `mean_brightness` : mean intensity of these hotspots (float, null if none of them has one)
//!   - `color`           : [r,g,b] fill color
//!   - `elevation`       : extrusion height (int)

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;
use crate::{classify::ClassifiedCell, hexbin::HexIndex};

pub const FREQUENCY: &str = "frequency";
pub const MEAN_BRIGHTNESS: &str = "mean_brightness";
pub const COLOR: &str = "color";
pub const ELEVATION: &str = "elevation";

/// closed exterior ring in GeoJSON (lon,lat) position order. We do not reorder or simplify vertices
pub fn boundary_ring (boundary: &[(f64,f64)])->Vec<Vec<f64>> {
    let mut ring: Vec<Vec<f64>> = boundary.iter().map( |(lat,lon)| vec![*lon, *lat]).collect();
    if ring.len() > 1 && ring.first() != ring.last() {
        ring.push( ring[0].clone());
    }
    ring
}

pub fn cell_feature<I: HexIndex> (index: &I, cc: &ClassifiedCell<I::Cell>)->Feature {
    let ring = boundary_ring( &index.cell_boundary( cc.cell.cell));
    let geometry = Geometry::new( Value::Polygon( vec![ring]));

    let mut properties = JsonObject::new();
    properties.insert( FREQUENCY.to_string(), json!(cc.cell.count));
    properties.insert( MEAN_BRIGHTNESS.to_string(), json!(cc.cell.mean_intensity));
    properties.insert( COLOR.to_string(), json!(cc.color));
    properties.insert( ELEVATION.to_string(), json!(cc.elevation));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None
    }
}

pub fn build_feature_collection<I: HexIndex> (index: &I, cells: &[ClassifiedCell<I::Cell>])->FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: cells.iter().map( |cc| cell_feature( index, cc)).collect(),
        foreign_members: None
    }
}
