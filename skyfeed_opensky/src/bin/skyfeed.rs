/*
 * Copyright © 2026, the SkyFeed project authors. All rights reserved.
 *
 * The “SkyFeed” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

#![allow(unused)]

use anyhow::Result;
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use skyfeed_opensky::{load_config, OpenSkyClient, Reconciler};
use skyfeed_traffic::{ConsoleHost, TrafficList, TrafficStore};

#[derive(StructOpt)]
#[structopt(about="feed live OpenSky traffic into a simulated population")]
struct CliOpts {
    #[structopt(help="pathname of feed config", long, default_value="skyfeed_opensky/configs/opensky.ron")]
    config: String,

    #[structopt(help="number of update cycles to run (0 = until interrupted)", long, default_value="0")]
    cycles: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info")))
        .init();

    let opts = CliOpts::from_args();
    let config = load_config( &opts.config)?;
    let update_interval = config.update_interval;

    let client = OpenSkyClient::new( config)?;
    let mut reconciler = Reconciler::new( client, TrafficList::new(), ConsoleHost::new());
    info!( "{}", reconciler.set_connected( true));

    let mut ticker = tokio::time::interval( update_interval);
    let mut n_cycles = 0;

    loop {
        ticker.tick().await;
        reconciler.update().await;
        info!( "tracking {} aircraft", reconciler.store().len());

        n_cycles += 1;
        if opts.cycles > 0 && n_cycles >= opts.cycles { break }
    }

    info!( "{}", reconciler.set_connected( false));
    Ok(())
}
