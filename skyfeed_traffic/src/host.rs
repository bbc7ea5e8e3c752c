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

use tracing::info;

/// the host simulator collaborator surface a live feed can affect: the simulation
/// clock and the user notification channel (console, message area or similar)
pub trait SimHost {
    /// resume the simulation clock - a feed that starts receiving live traffic
    /// has to make sure the simulation is actually running
    fn resume_clock (&mut self);

    /// show informational text to the user
    fn notify (&mut self, msg: &str);
}

/// SimHost for headless/demo use, reporting through the log
#[derive(Debug, Default)]
pub struct ConsoleHost {
    clock_running: bool,
}

impl ConsoleHost {
    pub fn new () -> Self {
        ConsoleHost { clock_running: false }
    }

    pub fn is_clock_running (&self) -> bool {
        self.clock_running
    }
}

impl SimHost for ConsoleHost {
    fn resume_clock (&mut self) {
        if !self.clock_running {
            self.clock_running = true;
            info!("simulation clock resumed");
        }
    }

    fn notify (&mut self, msg: &str) {
        info!("{msg}");
    }
}
