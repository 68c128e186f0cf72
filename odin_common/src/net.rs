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

///! common utility functions for network operations

use std::time::Duration;
use reqwest::{header::HeaderMap, Client, StatusCode};
use thiserror::Error;

#[derive(Error,Debug)]
pub enum OdinNetError {
    #[error("not found: {0}")]
    NotFoundError(String),

    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("operation failed: {0}")]
    OpFailed(String),
}

pub type Result<T> = std::result::Result<T, OdinNetError>;

/// create a reqwest Client with the given overall request timeout
pub fn client_with_timeout (timeout: Duration) -> Result<Client> {
    Ok( Client::builder().timeout(timeout).build()? )
}

/// retrieve the body of a (text) resource with HTTP GET.
/// Non-OK responses are turned into errors that carry the status but not the URL, which might
/// contain credentials
pub async fn get_text (client: &Client, url: &str, opt_headers: &Option<HeaderMap>) -> Result<String> {
    let mut req = client.get(url);
    if let Some(headermap) = &opt_headers {
        req = req.headers(headermap.clone())
    }

    let response = req.send().await?;

    match response.status() {
        StatusCode::OK => {
            Ok( response.text().await? )
        }
        StatusCode::NOT_FOUND => {
            Err( OdinNetError::NotFoundError( response.status().to_string()))
        }
        other => {
            Err( OdinNetError::OpFailed(format!("response status {other:?}")))
        }
    }
}

/// replace all occurrences of `secret` in `url` so that the result can be logged
pub fn redacted_url (url: &str, secret: &str) -> String {
    if secret.is_empty() { url.to_string() } else { url.replace( secret, "<redacted>") }
}

/// Note - we assume lower case extensions without '.'
pub fn mime_type_for_extension (ext: &str) -> Option<&'static str> {
    match ext {
        "js" | "mjs" => Some("text/javascript"),
        "json" => Some("application/json"),
        "geojson" => Some("application/geo+json"),
        "csv" => Some("text/csv"),
        "txt" => Some("text/plain"),
        "htm" | "html" => Some("text/html"),
        "css" => Some("text/css"),
        _ => None
    }
}
