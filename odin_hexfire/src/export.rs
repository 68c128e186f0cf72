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

//! CSV export of (filtered) hotspot tables. Rows are written verbatim as they were received from FIRMS

use std::io;
use csv::WriterBuilder;
use crate::{firms::FirmsTable, errors::Result};

pub const EXPORT_FILENAME: &str = "filtered_firms.csv";

pub fn write_csv<W: io::Write> (table: &FirmsTable, writer: W)->Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer( writer);

    if !table.headers.is_empty() {
        csv_writer.write_record( &table.headers)?;
    }
    for hs in &table.hotspots {
        csv_writer.write_record( &hs.record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes (table: &FirmsTable)->Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::with_capacity( 128 * (table.len() + 1));
    write_csv( table, &mut buf)?;
    Ok(buf)
}
