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

use std::time::{Duration,Instant};
use odin_common::ttl_cache::TtlCache;
use odin_common::datetime::minutes;

#[test]
fn test_expiry() {
    let t0 = Instant::now();
    let mut cache: TtlCache<(String,u32),usize> = TtlCache::new( minutes(15));

    let key = ("68,8,98,37".to_string(), 3);
    cache.insert_at( key.clone(), 42, t0);

    assert_eq!( cache.get_at( &key, t0), Some(&42));
    assert_eq!( cache.get_at( &key, t0 + minutes(14)), Some(&42));
    assert_eq!( cache.remaining_at( &key, t0 + minutes(10)), Some(minutes(5)));

    // entries are valid for less than ttl
    assert_eq!( cache.get_at( &key, t0 + minutes(15)), None);
    assert!( cache.is_empty()); // expired entry was evicted on lookup
}

#[test]
fn test_keys_are_exact() {
    let t0 = Instant::now();
    let mut cache: TtlCache<(String,u32),&'static str> = TtlCache::new( Duration::from_secs(900));

    cache.insert_at( ("68,8,98,37".to_string(), 3), "a", t0);
    cache.insert_at( ("68,8,98,37".to_string(), 4), "b", t0);

    assert_eq!( cache.get_at( &("68,8,98,37".to_string(), 3), t0), Some(&"a"));
    assert_eq!( cache.get_at( &("68,8,98,37".to_string(), 4), t0), Some(&"b"));
    assert_eq!( cache.get_at( &("68,8,98,38".to_string(), 3), t0), None);
    assert_eq!( cache.len(), 2);
}

#[test]
fn test_reinsert_restarts_ttl() {
    let t0 = Instant::now();
    let mut cache: TtlCache<u32,u32> = TtlCache::new( minutes(15));

    cache.insert_at( 1, 1, t0);
    cache.insert_at( 1, 2, t0 + minutes(10));
    assert_eq!( cache.get_at( &1, t0 + minutes(20)), Some(&2));
}

#[test]
fn test_purge() {
    let t0 = Instant::now();
    let mut cache: TtlCache<u32,u32> = TtlCache::new( minutes(15));

    cache.insert_at( 1, 1, t0);
    cache.insert_at( 2, 2, t0 + minutes(5));
    cache.insert_at( 3, 3, t0 + minutes(10));

    let n = cache.purge_expired_at( t0 + minutes(21));
    println!("purged {n} entries");
    assert_eq!( n, 2);
    assert_eq!( cache.len(), 1);
    assert_eq!( cache.get_at( &3, t0 + minutes(21)), Some(&3));
}
