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

//! common utilities shared between ODIN crates: geodetic wrappers, network retrieval, date/time helpers
//! and in-memory caching

pub mod strings;
pub mod datetime;
pub mod geo;
pub mod net;
pub mod ttl_cache;

/// a simple incremental mean accumulator that does not need to store observations
#[derive(Debug,Clone,Copy)]
pub struct MeanAccumulator {
    pub n: usize,
    pub mean: f64
}

impl MeanAccumulator {
    pub fn new()->Self { MeanAccumulator { n: 0, mean: f64::NAN } }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;

        if self.n > 1 {
            self.mean = self.mean + (x - self.mean) / self.n as f64;
        } else {
            self.mean = x;
        }
    }
}
