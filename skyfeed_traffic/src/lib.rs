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

use std::{fmt, sync::Arc};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod store;
pub use store::TrafficList;

pub mod host;
pub use host::{ConsoleHost, SimHost};

/// the kinematic state of a simulated aircraft
/// units follow what the live feeds report: degrees for angles, meters for altitude, m/s for speeds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub latitude: f64,      // [deg]
    pub longitude: f64,     // [deg]
    pub altitude: f64,      // barometric [m]
    pub heading: f64,       // true track [deg]
    pub ground_speed: f64,  // [m/s]
    pub vertical_rate: f64, // [m/s]
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "(lat: {:.4}, lon: {:.4}, alt: {:.0}, hdg: {:.0}, spd: {:.1}, vr: {:.1})",
                self.latitude, self.longitude, self.altitude, self.heading, self.ground_speed, self.vertical_rate)
    }
}

/// who spawned a SimEntity - entities we did not create from live data are never deleted by the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityOrigin {
    LiveFeed,
    Local,
}

/// the data model for one aircraft of the simulated traffic population
#[derive(Debug, Clone)]
pub struct SimEntity {
    pub id: Arc<String>, // opaque stable identity token (callsign or transponder address)
    pub actype: String,  // aircraft type hint used at creation
    pub state: EntityState,
    pub origin: EntityOrigin,
    pub last_seen: DateTime<Utc>, // wall clock time of the most recent confirmed live update
}

impl SimEntity {
    pub fn is_feed_created (&self) -> bool {
        self.origin == EntityOrigin::LiveFeed
    }
}

impl fmt::Display for SimEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "SimEntity( id: {}, type: {}, state: {}, last_seen: {})", self.id, self.actype, self.state, self.last_seen)
    }
}

/// creation request for one entity, passed to TrafficStore::batch_create
#[derive(Debug, Clone)]
pub struct NewEntity {
    pub id: String,
    pub state: EntityState,
}

impl NewEntity {
    pub fn new (id: impl ToString, state: EntityState) -> Self {
        NewEntity { id: id.to_string(), state }
    }
}

/// position/kinematics update for one already resolved entity
#[derive(Debug, Clone, Copy)]
pub struct EntityMove {
    pub idx: usize, // store index as resolved at call time
    pub state: EntityState,
}

/// the simulated traffic population as seen by a live data feed.
///
/// Index lookups are authoritative at call time only - other sources may create or
/// remove entities between ticks, so indices must not be cached across calls.
/// All mutations are batched: one call per category per tick.
pub trait TrafficStore {
    fn len (&self) -> usize;

    fn is_empty (&self) -> bool { self.len() == 0 }

    /// resolve an identity token to the current store index
    fn resolve_identity (&self, id: &str) -> Option<usize>;

    /// the current population, in store index order
    fn entities (&self) -> &[SimEntity];

    /// append new entities, all with the same type hint, origin and last_seen timestamp
    fn batch_create (&mut self, new_entities: Vec<NewEntity>, actype: &str, origin: EntityOrigin, seen: DateTime<Utc>);

    /// update kinematic state of already resolved entities and refresh their last_seen timestamps
    fn batch_move (&mut self, moves: &[EntityMove], seen: DateTime<Utc>);

    /// remove all entities for which the mask is set, answering the number of removed entities.
    /// Mask indices correspond to the current `entities()` order
    fn batch_delete (&mut self, mask: &[bool]) -> usize;
}
