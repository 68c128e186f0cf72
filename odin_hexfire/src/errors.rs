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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdinHexfireError>;

#[derive(Error,Debug)]
pub enum OdinHexfireError {

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("network error {0}")]
    NetError( #[from] odin_common::net::OdinNetError),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("RON deserialization error {0}")]
    RonDeError( #[from] ron::de::SpannedError),

    #[error("invalid bounding box {0}")]
    BboxError( #[from] odin_common::geo::GeoParseError),

    #[error("invalid coordinates {0}")]
    CoordinateError( #[from] h3o::error::InvalidLatLng),

    #[error("invalid hex resolution {0}")]
    ResolutionError( #[from] h3o::error::InvalidResolution),

    #[error("missing column {0}")]
    MissingColumn(String),

    #[error("invalid control value {0}")]
    InvalidControl(String),

    #[error("operation failed {0}")]
    OpFailedError(String),
}

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinHexfireError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;

macro_rules! invalid_control {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinHexfireError::InvalidControl( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_control;
