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

//! live traffic feed from the OpenSky Network REST API.
//!
//! The OpenSky API allows a limited number of unauthenticated requests. If `username`
//! and `password` are set in the config and a full state request fails, we fall back
//! to the states reported by the caller's own sensors (`/states/own`).

use std::{fmt, path::Path, time::Duration};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use skyfeed_traffic::EntityState;

use crate::errors::{OpenSkyError, Result};

pub mod client;
pub use client::OpenSkyClient;

pub mod reconciler;
pub use reconciler::{Reconciler, DROP_AFTER, LIVE_ACTYPE};

pub mod errors;

/// the field indices within one raw OpenSky state vector (a 17 element heterogeneous array)
mod field {
    pub const ICAO24: usize        = 0;
    pub const CALLSIGN: usize      = 1;
    pub const LAST_CONTACT: usize  = 4;
    pub const LONGITUDE: usize     = 5;
    pub const LATITUDE: usize      = 6;
    pub const GROUND_SPEED: usize  = 9;
    pub const HEADING: usize       = 10;
    pub const VERTICAL_RATE: usize = 11;
    pub const BARO_ALTITUDE: usize = 13;

    pub const MIN_LEN: usize = 14; // we don't touch anything past baro altitude
}

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct OpenSkyConfig {
    pub api_url: String, // base URL of the OpenSky REST API
    pub username: Option<String>, // unset selects unauthenticated mode and disables the own-data fallback
    pub password: Option<String>,
    pub update_interval: Duration, // period in which the host scheduler calls Reconciler::update
    pub request_timeout: Duration, // upper bound for one state request - a hung fetch must not stall the host tick
}

/// read an OpenSkyConfig from a RON file
pub fn load_config (path: impl AsRef<Path>) -> Result<OpenSkyConfig> {
    let data = std::fs::read_to_string( path.as_ref())?;
    Ok( ron::de::from_str( data.as_str())? )
}

/// abstraction of the live state vector source - what the Reconciler polls each tick.
/// Transport and decode failures are absorbed here; callers only see "no data this tick"
#[async_trait]
pub trait StateSource {
    async fn fetch_states (&self, own_only: bool) -> Option<StateSnapshot>;

    /// do we have credentials, i.e. is the own-data fallback available
    fn authenticated (&self) -> bool;
}

/// one externally reported aircraft state for a single poll cycle.
/// All numeric fields may be absent or non-finite for a given record
#[derive(Debug,Clone,Copy)]
pub struct LiveRecord<'a> {
    pub identity: &'a str,
    pub latitude: Option<f64>,      // [deg]
    pub longitude: Option<f64>,     // [deg]
    pub altitude: Option<f64>,      // barometric [m]
    pub heading: Option<f64>,       // [deg]
    pub ground_speed: Option<f64>,  // [m/s]
    pub vertical_rate: Option<f64>, // [m/s]
    pub last_contact: Option<f64>,  // [epoch secs]
}

impl<'a> LiveRecord<'a> {
    /// the kinematic state of this record, or None if any required field is missing or non-finite.
    /// Such records are never used to create or update an entity
    pub fn entity_state (&self) -> Option<EntityState> {
        Some( EntityState {
            latitude: finite( self.latitude)?,
            longitude: finite( self.longitude)?,
            altitude: finite( self.altitude)?,
            heading: finite( self.heading)?,
            ground_speed: finite( self.ground_speed)?,
            vertical_rate: finite( self.vertical_rate)?,
        })
    }
}

impl<'a> fmt::Display for LiveRecord<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "LiveRecord( id: {}", self.identity);
        if let Some(lat) = self.latitude { write!( f, ", lat: {lat:.4}"); }
        if let Some(lon) = self.longitude { write!( f, ", lon: {lon:.4}"); }
        if let Some(alt) = self.altitude { write!( f, ", alt: {alt:.0}"); }
        if let Some(hdg) = self.heading { write!( f, ", hdg: {hdg:.0}"); }
        if let Some(spd) = self.ground_speed { write!( f, ", spd: {spd:.1}"); }
        if let Some(vr) = self.vertical_rate { write!( f, ", vr: {vr:.1}"); }
        write!( f, ")")
    }
}

fn finite (v: Option<f64>) -> Option<f64> {
    v.filter( |x| x.is_finite())
}

/// the full set of LiveRecords returned by one StateSource fetch, stored as named
/// parallel columns of equal length - index i across all columns describes one aircraft
#[derive(Debug,Default,Clone)]
pub struct StateSnapshot {
    pub time: i64, // server reported snapshot time [epoch secs]

    pub identity: Vec<String>,
    pub latitude: Vec<Option<f64>>,
    pub longitude: Vec<Option<f64>>,
    pub altitude: Vec<Option<f64>>,
    pub heading: Vec<Option<f64>>,
    pub ground_speed: Vec<Option<f64>>,
    pub vertical_rate: Vec<Option<f64>>,
    pub last_contact: Vec<Option<f64>>,
}

impl StateSnapshot {
    pub fn new (time: i64) -> Self {
        StateSnapshot { time, ..Default::default() }
    }

    pub fn len (&self) -> usize { self.identity.len() }

    pub fn is_empty (&self) -> bool { self.identity.is_empty() }

    pub fn record (&self, i: usize) -> LiveRecord<'_> {
        LiveRecord {
            identity: self.identity[i].as_str(),
            latitude: self.latitude[i],
            longitude: self.longitude[i],
            altitude: self.altitude[i],
            heading: self.heading[i],
            ground_speed: self.ground_speed[i],
            vertical_rate: self.vertical_rate[i],
            last_contact: self.last_contact[i],
        }
    }

    pub fn records (&self) -> impl Iterator<Item=LiveRecord<'_>> {
        (0..self.len()).map( |i| self.record(i))
    }

    fn push_row (&mut self, id: String, row: &[JsonValue]) {
        self.identity.push( id);
        self.latitude.push( json_f64( row, field::LATITUDE));
        self.longitude.push( json_f64( row, field::LONGITUDE));
        self.altitude.push( json_f64( row, field::BARO_ALTITUDE));
        self.heading.push( json_f64( row, field::HEADING));
        self.ground_speed.push( json_f64( row, field::GROUND_SPEED));
        self.vertical_rate.push( json_f64( row, field::VERTICAL_RATE));
        self.last_contact.push( json_f64( row, field::LAST_CONTACT));
    }
}

/// the OpenSky response envelope: `{ "time": <epoch secs>, "states": [[..],..] | null }`
#[derive(Deserialize,Debug)]
struct RawStates {
    time: i64,
    states: Option<Vec<Vec<JsonValue>>>,
}

/// decode an OpenSky states response into a StateSnapshot.
/// A null `states` array is a valid (empty) snapshot. Rows without a usable identity
/// are dropped here; numeric field validation is left to the consumer (per record)
pub fn parse_states (json: &str) -> Result<StateSnapshot> {
    let raw: RawStates = serde_json::from_str( json)?;
    let rows = raw.states.unwrap_or_default();

    let mut snapshot = StateSnapshot::new( raw.time);
    for row in &rows {
        if row.len() < field::MIN_LEN { continue }
        if let Some(id) = row_identity( row) {
            snapshot.push_row( id, row);
        }
    }
    Ok(snapshot)
}

/// the identity token for one raw state vector: the trimmed callsign if there is one,
/// otherwise the icao24 transponder address
fn row_identity (row: &[JsonValue]) -> Option<String> {
    if let Some(cs) = json_str( row, field::CALLSIGN) {
        let cs = cs.trim();
        if !cs.is_empty() { return Some(cs.to_string()) }
    }
    if let Some(icao24) = json_str( row, field::ICAO24) {
        let icao24 = icao24.trim();
        if !icao24.is_empty() { return Some(icao24.to_string()) }
    }
    None
}

fn json_f64 (row: &[JsonValue], i: usize) -> Option<f64> {
    row.get(i).and_then( |v| v.as_f64())
}

fn json_str (row: &[JsonValue], i: usize) -> Option<&str> {
    row.get(i).and_then( |v| v.as_str())
}
