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

use odin_hexfire::firms::FirmsTable;
use odin_hexfire::hexbin::{H3Index, HexCell, aggregate};
use odin_hexfire::classify::*;

const MODIS_CSV: &str = include_str!("data/modis_nrt.csv");

fn cell (id: u32, count: usize, mean_intensity: f64)->HexCell<u32> {
    HexCell { cell: id, count, mean_intensity, mean_lat: 0.0, mean_lon: 0.0 }
}

#[test]
fn test_quantiles() {
    assert_eq!( quantile( &[], 0.5), None);
    assert_eq!( quantile( &[4.0], 0.9), Some(4.0));
    assert_eq!( quantile( &[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));

    // (n-1)*q = 3.6 -> 4 + 0.6*(5-4)
    let q = quantile( &[1.0, 2.0, 3.0, 4.0, 5.0], 0.9).unwrap();
    assert!( (q - 4.6).abs() < 1e-9);

    let qp = QuantilePair::from_values( vec![5.0, 1.0, 3.0]).unwrap();
    assert_eq!( qp.p50, 3.0);
    assert!( (qp.p90 - 4.6).abs() < 1e-9);
}

#[test]
fn test_uniform_cells() {
    let cells: Vec<HexCell<u32>> = (0..10).map( |i| cell( i, 5, 300.0)).collect();
    let (thresholds, classified) = classify_cells( cells).unwrap();

    assert_eq!( thresholds.frequency, QuantilePair { p50: 5.0, p90: 5.0 });
    assert_eq!( thresholds.intensity, QuantilePair { p50: 300.0, p90: 300.0 });

    // values equal to the p90 threshold count as high
    for cc in &classified {
        assert_eq!( cc.class, BivariateClass { frequency: Level::High, intensity: Level::High });
        assert_eq!( cc.color, [50, 0, 70]);
        assert_eq!( cc.elevation, 2000);
    }
}

#[test]
fn test_bivariate_colors() {
    let thresholds = Thresholds {
        frequency: QuantilePair { p50: 2.0, p90: 10.0 },
        intensity: QuantilePair { p50: 310.0, p90: 340.0 },
    };

    assert_eq!( classify( 12, 350.0, &thresholds), ([50, 0, 70], 2000));
    assert_eq!( classify( 10, 320.0, &thresholds), ([120, 0, 180], 2000));
    assert_eq!( classify( 3, 340.0, &thresholds), ([0, 70, 255], 400));
    assert_eq!( classify( 1, 300.0, &thresholds), ([200, 200, 220], 400));
}

#[test]
fn test_elevation_follows_frequency() {
    let table = FirmsTable::from_csv_str( MODIS_CSV).unwrap();

    for resolution in [3u8, 5, 7] {
        let cells = aggregate( &H3Index, &table, resolution).unwrap();
        let (thresholds, classified) = classify_cells( cells).unwrap();
        println!("resolution {}: {:?}", resolution, thresholds);

        for cc in &classified {
            let is_tall = cc.elevation == TALL_ELEVATION;
            assert_eq!( is_tall, cc.cell.count as f64 >= thresholds.frequency.p90);
            assert_eq!( cc.color, cc.class.color());
        }
        // there always is a cell at or above the p90 value
        assert!( classified.iter().any( |cc| cc.elevation == TALL_ELEVATION));
    }
}

#[test]
fn test_no_cells() {
    assert!( classify_cells::<u32>( Vec::new()).is_none());
}

#[test]
fn test_legend() {
    let entries = legend();
    let colors: Vec<&str> = entries.iter().map( |e| e.color.as_str()).collect();
    assert_eq!( colors, vec!["#c8c8dc", "#0046ff", "#7800b4", "#320046"]);
    assert_eq!( entries[3].frequency, Level::High);
    assert_eq!( entries[3].intensity, Level::High);
}

#[test]
fn test_cells_without_intensity() {
    let cells = vec![ cell( 1, 2, 300.0), cell( 2, 1, f64::NAN), cell( 3, 4, 320.0), cell( 4, 1, 340.0)];
    let (thresholds, classified) = classify_cells( cells).unwrap();
    println!("{:?}", thresholds);

    // the NaN mean does not take part in the intensity quantiles
    assert_eq!( thresholds.intensity.p50, 320.0);
    assert!( (thresholds.intensity.p90 - 336.0).abs() < 1e-9);

    let no_intensity = classified.iter().find( |cc| cc.cell.cell == 2).unwrap();
    assert_eq!( no_intensity.class.intensity, Level::Low);
    assert_eq!( no_intensity.color, [200, 200, 220]);

    // only cells without any intensity still yield thresholds
    let (thresholds, classified) = classify_cells( vec![ cell( 1, 3, f64::NAN)]).unwrap();
    assert!( thresholds.intensity.p90.is_nan());
    assert_eq!( thresholds.frequency.p90, 3.0);
    assert_eq!( classified[0].class, BivariateClass { frequency: Level::High, intensity: Level::Low });
}
