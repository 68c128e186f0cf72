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

///! a memoization table for values that become stale after a fixed time-to-live (e.g. results of web requests)

use std::{collections::HashMap, hash::Hash, time::{Duration, Instant}};

#[derive(Debug)]
struct TtlEntry<V> {
    created: Instant,
    value: V
}

/// a key/value map whose entries expire a fixed duration after they were inserted.
/// There is no explicit invalidation - entries are only replaced or dropped once they are expired.
/// Expired entries are evicted lazily on lookup, or in bulk with [`TtlCache::purge_expired`].
///
/// The `*_at` variants take the reference instant explicitly, which is what the time-less variants use with `Instant::now()`
#[derive(Debug)]
pub struct TtlCache<K,V> {
    ttl: Duration,
    entries: HashMap<K,TtlEntry<V>>
}

impl<K,V> TtlCache<K,V> where K: Eq + Hash {
    pub fn new (ttl: Duration)->Self {
        TtlCache { ttl, entries: HashMap::new() }
    }

    pub fn ttl (&self)->Duration { self.ttl }

    /// number of entries, including expired ones that have not been evicted yet
    pub fn len (&self)->usize { self.entries.len() }

    pub fn is_empty (&self)->bool { self.entries.is_empty() }

    pub fn get (&mut self, key: &K)->Option<&V> {
        self.get_at( key, Instant::now())
    }

    pub fn get_at (&mut self, key: &K, now: Instant)->Option<&V> {
        let is_expired = match self.entries.get(key) {
            Some(e) => self.is_expired_at( e, now),
            None => return None
        };

        if is_expired {
            self.entries.remove(key);
            None
        } else {
            self.entries.get(key).map( |e| &e.value)
        }
    }

    pub fn insert (&mut self, key: K, value: V) {
        self.insert_at( key, value, Instant::now())
    }

    pub fn insert_at (&mut self, key: K, value: V, now: Instant) {
        self.entries.insert( key, TtlEntry { created: now, value });
    }

    /// remaining lifetime of the entry for `key`, `None` if there is no live entry
    pub fn remaining_at (&self, key: &K, now: Instant)->Option<Duration> {
        self.entries.get(key).and_then( |e| self.ttl.checked_sub( now.saturating_duration_since(e.created)))
            .filter( |d| !d.is_zero())
    }

    /// drop all entries that are expired at `now` and return how many were removed
    pub fn purge_expired_at (&mut self, now: Instant)->usize {
        let ttl = self.ttl;
        let n = self.entries.len();
        self.entries.retain( |_,e| now.saturating_duration_since(e.created) < ttl);
        n - self.entries.len()
    }

    pub fn purge_expired (&mut self)->usize {
        self.purge_expired_at( Instant::now())
    }

    #[inline]
    fn is_expired_at (&self, e: &TtlEntry<V>, now: Instant)->bool {
        now.saturating_duration_since(e.created) >= self.ttl
    }
}
