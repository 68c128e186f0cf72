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

///! string utilities

use std::env;

/// expand a leading `$NAME` or `${NAME}` reference from the environment. If the variable is not set
/// the input is returned verbatim. Strings not starting with `$` are returned unchanged
pub fn env_expand (s: &str) -> String {
    if let Some(name) = s.strip_prefix('$') {
        let name = name.strip_prefix('{').and_then(|n| n.strip_suffix('}')).unwrap_or(name);
        env::var(name).unwrap_or_else(|_| s.to_string())
    } else {
        s.to_string()
    }
}

/// mask all but the last `n_visible` chars of a (secret) string
pub fn mask (s: &str, n_visible: usize) -> String {
    let n = s.chars().count();
    if n <= n_visible {
        "*".repeat(n)
    } else {
        let visible: String = s.chars().skip(n - n_visible).collect();
        format!("{}{}", "*".repeat(n - n_visible), visible)
    }
}
