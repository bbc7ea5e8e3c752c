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

use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{parse_states, OpenSkyConfig, StateSnapshot, StateSource};
use crate::errors::{op_failed, Result};

/// StateSource implementation for the OpenSky Network REST API
pub struct OpenSkyClient {
    config: Arc<OpenSkyConfig>,
    client: reqwest::Client,
}

impl OpenSkyClient {
    pub fn new (config: OpenSkyConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout( config.request_timeout)
            .build()?;
        Ok( OpenSkyClient { config: Arc::new(config), client } )
    }

    pub fn config (&self) -> &OpenSkyConfig {
        self.config.as_ref()
    }

    async fn get_json (&self, url_post: &str) -> Result<String> {
        let mut request = self.client.get( format!( "{}{}", self.config.api_url, url_post));
        if let (Some(username),Some(password)) = (&self.config.username, &self.config.password) {
            request = request.basic_auth( username, Some(password));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err( op_failed!( "response not OK: {}", response.status()))
        }
        Ok( response.text().await? )
    }

    pub async fn get_states (&self, own_only: bool) -> Result<StateSnapshot> {
        let url_post = if own_only { "/states/own" } else { "/states/all" };
        let json = self.get_json( url_post).await?;
        parse_states( json.as_str())
    }
}

#[async_trait]
impl StateSource for OpenSkyClient {
    async fn fetch_states (&self, own_only: bool) -> Option<StateSnapshot> {
        match self.get_states( own_only).await {
            Ok(snapshot) => {
                debug!("got {} state vectors ({})", snapshot.len(), if own_only {"own"} else {"all"});
                Some(snapshot)
            }
            Err(e) => {
                warn!("state request failed ({}): {e}", if own_only {"own"} else {"all"});
                None
            }
        }
    }

    fn authenticated (&self) -> bool {
        self.config.username.is_some() && self.config.password.is_some()
    }
}
