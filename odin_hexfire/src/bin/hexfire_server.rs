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

//! the hexfire dashboard server. Serves the page at http://<addr>/hexfire

use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use odin_common::strings::mask;
use odin_hexfire::{
    HexfireConfig, load_config,
    firms::{HotspotFetcher, HttpFirmsSource},
    hexbin::H3Index,
    hexfire_service::{HexfireState, router},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "serve a bivariate hexagon map of live NASA FIRMS fire detections")]
pub struct Args {
    /// RON config file
    #[arg(short,long, default_value = "configs/hexfire.ron")]
    pub config: PathBuf,

    /// FIRMS map key, overrides the configured one
    #[arg(short,long, env = "FIRMS_MAP_KEY")]
    pub map_key: Option<String>,

    /// socket address to serve on, overrides the configured one
    #[arg(short,long)]
    pub addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))  // RUST_LOG overrides
        .init();

    let args = Args::parse();

    let mut config: HexfireConfig = if args.config.is_file() {
        load_config( &args.config)?
    } else {
        warn!("config file {:?} not found, using defaults", args.config);
        HexfireConfig::default()
    };

    if let Some(map_key) = args.map_key { config.firms.map_key = map_key }
    if let Some(addr) = args.addr { config.sock_addr = addr }

    if config.firms.map_key.is_empty() || config.firms.map_key.starts_with('$') {
        warn!("no FIRMS map key configured, upstream requests will fail");
    } else {
        info!("using FIRMS map key {}", mask( &config.firms.map_key, 4));
    }

    let source = Arc::new( HttpFirmsSource::new( config.firms.request_timeout)?);
    let fetcher = HotspotFetcher::new( config.firms.clone(), source);
    let sock_addr = config.sock_addr;

    let state = Arc::new( HexfireState::new( config, fetcher, H3Index));
    let app = router( state).layer( TraceLayer::new_for_http());

    let listener = TcpListener::bind( sock_addr).await?;
    info!("serving http://{}/hexfire", sock_addr);
    axum::serve( listener, app).await?;

    Ok(())
}
