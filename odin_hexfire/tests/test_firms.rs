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

use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
use std::time::Duration;
use async_trait::async_trait;
use chrono::NaiveDate;
use odin_hexfire::{OdinHexfireError, Result};
use odin_hexfire::firms::*;

const MODIS_CSV: &str = include_str!("data/modis_nrt.csv");
const VIIRS_CSV: &str = include_str!("data/viirs_snpp_nrt.csv");

const MAP_KEY: &str = "0123456789abcdef";

#[test]
fn test_parse_modis() {
    let table = FirmsTable::from_csv_str( MODIS_CSV).unwrap();
    println!("parsed {} MODIS hotspots", table.len());

    assert_eq!( table.len(), 16);
    assert_eq!( table.headers.len(), 14);
    assert!( table.has_confidence_column());

    let hs = &table.hotspots[0];
    assert_eq!( hs.latitude(), 21.501);
    assert_eq!( hs.longitude(), 80.502);
    assert_eq!( hs.intensity, Some(330.1));
    assert_eq!( hs.acq_date, NaiveDate::from_ymd_opt( 2025, 3, 1));
    assert_eq!( hs.confidence, Some( HotspotConfidence::Percent(100)));

    // unparseable dates and missing confidence values are kept
    let no_date = table.hotspots.iter().find( |hs| hs.latitude() == 30.3).unwrap();
    assert!( no_date.acq_date.is_none());
    let no_conf = table.hotspots.iter().find( |hs| hs.latitude() == 9.95).unwrap();
    assert!( no_conf.confidence.is_none());

    // so are rows without brightness
    let no_brightness = table.hotspots.iter().find( |hs| hs.latitude() == 24.5).unwrap();
    assert!( no_brightness.intensity.is_none());
    assert_eq!( no_brightness.confidence, Some( HotspotConfidence::Percent(80)));
}

#[test]
fn test_rows_without_position_are_dropped() {
    let csv = "latitude,longitude,brightness,acq_date,confidence\n\
               21.5,80.5,320.0,2025-03-01,90\n\
               ,80.6,330.0,2025-03-01,90\n\
               21.6,200.0,330.0,2025-03-01,90\n\
               21.7,80.7,,2025-03-01,90\n";
    let table = FirmsTable::from_csv_str( csv).unwrap();
    assert_eq!( table.len(), 2);
    assert_eq!( table.hotspots[1].intensity, None);
}

#[test]
fn test_parse_viirs() {
    let table = FirmsTable::from_csv_str( VIIRS_CSV).unwrap();

    assert_eq!( table.len(), 6);
    assert_eq!( table.hotspots[0].intensity, Some(331.2)); // from bright_ti4
    assert_eq!( table.hotspots[0].confidence, Some( HotspotConfidence::High));
    assert_eq!( table.hotspots[2].confidence, Some( HotspotConfidence::Low));
}

#[test]
fn test_missing_columns() {
    match FirmsTable::from_csv_str( "latitude,longitude,acq_date\n21.5,80.5,2025-03-01\n") {
        Err( OdinHexfireError::MissingColumn(col)) => assert_eq!( col, "brightness"),
        other => panic!("unexpected result: {other:?}")
    }

    // a header-only response is an empty table, not an error
    let table = FirmsTable::from_csv_str( "latitude,longitude,brightness,acq_date,confidence\n").unwrap();
    assert!( table.is_empty());
}

#[test]
fn test_confidence() {
    assert_eq!( HotspotConfidence::parse(" 85 "), Some( HotspotConfidence::Percent(85)));
    assert_eq!( HotspotConfidence::parse("n"), Some( HotspotConfidence::Nominal));
    assert_eq!( HotspotConfidence::parse("101"), None);
    assert_eq!( HotspotConfidence::parse(""), None);

    assert_eq!( HotspotConfidence::High.percent(), 80);
    assert_eq!( HotspotConfidence::Nominal.percent(), 30);
    assert_eq!( HotspotConfidence::Low.percent(), 0);
}

#[test]
fn test_query() {
    let q = FirmsQuery::new( " 68,8,98,37 ", 3, FirmsSensor::ModisNrt).unwrap();
    assert_eq!( q.bbox, "68,8,98,37");

    assert!( matches!( FirmsQuery::new( "68,8,98", 3, FirmsSensor::ModisNrt), Err( OdinHexfireError::BboxError(_))));
    assert!( matches!( FirmsQuery::new( "98,8,68,37", 3, FirmsSensor::ModisNrt), Err( OdinHexfireError::BboxError(_))));
    assert!( matches!( FirmsQuery::new( "68,8,98,37", 0, FirmsSensor::ModisNrt), Err( OdinHexfireError::InvalidControl(_))));
    assert!( matches!( FirmsQuery::new( "68,8,98,37", 11, FirmsSensor::ModisNrt), Err( OdinHexfireError::InvalidControl(_))));
}

#[test]
fn test_sensor_names() {
    assert_eq!( "VIIRS_NOAA20_NRT".parse::<FirmsSensor>().unwrap(), FirmsSensor::ViirsNoaa20Nrt);
    assert_eq!( FirmsSensor::ModisNrt.to_string(), "MODIS_NRT");
    assert_eq!( FirmsSensor::ViirsSnppNrt.label(), "VIIRS SNPP");
}

//--- fetcher tests with recorded data

struct RecordedSource {
    body: std::result::Result<&'static str,&'static str>,
    n_requests: AtomicUsize,
}

impl RecordedSource {
    fn new (body: std::result::Result<&'static str,&'static str>)->Arc<Self> {
        Arc::new( RecordedSource { body, n_requests: AtomicUsize::new(0) })
    }
    fn n_requests (&self)->usize { self.n_requests.load( Ordering::Relaxed) }
}

#[async_trait]
impl FirmsSource for RecordedSource {
    async fn get_csv (&self, url: &str)->Result<String> {
        self.n_requests.fetch_add( 1, Ordering::Relaxed);
        match self.body {
            Ok(body) => Ok( body.to_string()),
            Err(msg) => Err( OdinHexfireError::OpFailedError( format!("{msg} for {url}")))
        }
    }
}

fn test_config (cache_ttl: Duration)->FirmsConfig {
    FirmsConfig {
        base_url: "https://firms.example.org/api/area/csv/".to_string(),
        map_key: MAP_KEY.to_string(),
        cache_ttl,
        request_timeout: Duration::from_secs(5)
    }
}

#[test]
fn test_request_url() {
    let fetcher = HotspotFetcher::new( test_config( Duration::from_secs(900)), RecordedSource::new( Ok("")));
    let q = FirmsQuery::new( "68,8,98,37", 3, FirmsSensor::ViirsSnppNrt).unwrap();
    assert_eq!( fetcher.request_url( &q), format!("https://firms.example.org/api/area/csv/{MAP_KEY}/VIIRS_SNPP_NRT/68,8,98,37/3"));
}

#[tokio::test]
async fn test_fetch_is_memoized() {
    let source = RecordedSource::new( Ok(MODIS_CSV));
    let mut fetcher = HotspotFetcher::new( test_config( Duration::from_secs(900)), source.clone());

    let q = FirmsQuery::new( "68,8,98,37", 3, FirmsSensor::ModisNrt).unwrap();
    let res = fetcher.fetch( &q).await;
    assert!( res.error.is_none());
    assert_eq!( res.table.len(), 16);

    let res = fetcher.fetch( &q).await;
    assert_eq!( res.table.len(), 16);
    assert_eq!( source.n_requests(), 1);

    // different parameters are different entries
    let q4 = FirmsQuery::new( "68,8,98,37", 4, FirmsSensor::ModisNrt).unwrap();
    fetcher.fetch( &q4).await;
    assert_eq!( source.n_requests(), 2);
    assert_eq!( fetcher.cache_len(), 2);
}

#[tokio::test]
async fn test_failed_fetch() {
    let source = RecordedSource::new( Err("503 Service Unavailable"));
    let mut fetcher = HotspotFetcher::new( test_config( Duration::from_secs(900)), source.clone());

    let q = FirmsQuery::new( "68,8,98,37", 3, FirmsSensor::ModisNrt).unwrap();
    let res = fetcher.fetch( &q).await;
    println!("fetch error: {:?}", res.error);

    assert!( res.table.is_empty());
    let msg = res.error.unwrap();
    assert!( msg.starts_with("Error fetching data from FIRMS API: "));
    assert!( msg.contains("503"));
    assert!( !msg.contains(MAP_KEY));

    // failures are cached too
    let res = fetcher.fetch( &q).await;
    assert!( res.error.is_some());
    assert_eq!( source.n_requests(), 1);
}

#[tokio::test]
async fn test_expired_entries_are_refetched() {
    let source = RecordedSource::new( Ok(VIIRS_CSV));
    let mut fetcher = HotspotFetcher::new( test_config( Duration::ZERO), source.clone());

    let q = FirmsQuery::new( "68,8,98,37", 3, FirmsSensor::ViirsSnppNrt).unwrap();
    fetcher.fetch( &q).await;
    fetcher.fetch( &q).await;
    assert_eq!( source.n_requests(), 2);
}

#[tokio::test]
#[ignore] // needs FIRMS_MAP_KEY and network access
async fn test_live_modis() {
    let mut config = FirmsConfig::default();
    config.map_key = std::env::var("FIRMS_MAP_KEY").unwrap();

    let source = Arc::new( HttpFirmsSource::new( config.request_timeout).unwrap());
    let mut fetcher = HotspotFetcher::new( config, source);

    let q = FirmsQuery::new( "68,8,98,37", 3, FirmsSensor::ModisNrt).unwrap();
    let res = fetcher.fetch( &q).await;
    assert!( res.error.is_none(), "{:?}", res.error);
    println!("got {} live MODIS hotspots", res.table.len());

    let all = odin_hexfire::filter::HotspotFilter::default().apply( &res.table);
    let filtered = odin_hexfire::filter::HotspotFilter { min_confidence: 100, ..Default::default() }.apply( &res.table);
    assert!( filtered.len() <= all.len());
    assert!( filtered.hotspots.iter().all( |hs| hs.confidence.map( |c| c.percent()) == Some(100)));
}
