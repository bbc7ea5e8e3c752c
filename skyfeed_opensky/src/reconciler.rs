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

use std::{collections::HashSet, time::Duration};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use skyfeed_traffic::{EntityMove, EntityOrigin, NewEntity, SimHost, TrafficStore};
use crate::{StateSnapshot, StateSource};

/// duration after which un-updated feed-created entities are dropped.
/// OpenSky already filters aircraft that stop reporting for under a minute, so anything
/// older than this is genuinely stale and not just a transient single-tick gap
pub const DROP_AFTER: Duration = Duration::from_secs(60);

/// the aircraft type hint for entities created from live records
pub const LIVE_ACTYPE: &str = "B744";

/// merges live state vector snapshots into the simulated traffic population.
///
/// On each tick this pulls a snapshot from its StateSource, partitions the valid records
/// into previously-unseen and already-known identities, creates/moves the corresponding
/// entities with one TrafficStore call per category, and drops feed-created entities
/// that have not been seen for more than DROP_AFTER.
///
/// No failure mode of the source propagates out of `update` - a tick without usable
/// data leaves the population untouched and the next tick starts over.
pub struct Reconciler<S,T,H>
    where S: StateSource,  T: TrafficStore,  H: SimHost
{
    source: S,    // where we get the live state vectors from
    store: T,     // the simulated population we reconcile against
    host: H,      // simulation clock + user notification
    connected: bool,
}

impl<S,T,H> Reconciler<S,T,H>
    where S: StateSource,  T: TrafficStore,  H: SimHost
{
    pub fn new (source: S, store: T, host: H) -> Self {
        Reconciler { source, store, host, connected: false }
    }

    pub fn is_connected (&self) -> bool { self.connected }

    pub fn source (&self) -> &S { &self.source }

    pub fn store (&self) -> &T { &self.store }

    pub fn store_mut (&mut self) -> &mut T { &mut self.store }

    pub fn host (&self) -> &H { &self.host }

    /// turn polling on or off, answering a user-readable status line.
    /// Enabling also resumes the host simulation clock - a paused simulation
    /// should not be requesting live traffic
    pub fn set_connected (&mut self, flag: bool) -> &'static str {
        if flag {
            self.connected = true;
            self.host.resume_clock();
            "connecting to OpenSky"
        } else {
            self.connected = false;
            "stopping the requests"
        }
    }

    /// one reconciliation tick, called by the host scheduler at a fixed period.
    /// A no-op while disconnected and whenever no snapshot can be fetched
    pub async fn update (&mut self) {
        self.update_at( Utc::now()).await
    }

    /// like `update` but with an explicit merge time - for hosts that own the clock
    pub async fn update_at (&mut self, t: DateTime<Utc>) {
        if !self.connected { return }

        let Some(snapshot) = self.fetch().await else { return };
        self.merge( &snapshot, t);
    }

    /// get the full snapshot, or the own-sensor one if that fails and we have credentials
    async fn fetch (&self) -> Option<StateSnapshot> {
        match self.source.fetch_states( false).await {
            Some(snapshot) => Some(snapshot),
            None if self.source.authenticated() => self.source.fetch_states( true).await,
            None => None
        }
    }

    fn merge (&mut self, snapshot: &StateSnapshot, t: DateTime<Utc>) {
        let mut new_entities: Vec<NewEntity> = Vec::new();
        let mut queued_ids: HashSet<&str> = HashSet::new(); // identities already queued for creation this tick
        let mut moves: Vec<EntityMove> = Vec::new();

        for rec in snapshot.records() {
            let Some(state) = rec.entity_state() else { continue }; // drop records with missing/non-finite fields

            match self.store.resolve_identity( rec.identity) {
                Some(idx) => moves.push( EntityMove { idx, state }),
                None => {
                    if queued_ids.insert( rec.identity) {
                        new_entities.push( NewEntity::new( rec.identity, state));
                    }
                }
            }
        }

        debug!("merging snapshot: {} records, {} new, {} known", snapshot.len(), new_entities.len(), moves.len());

        if !new_entities.is_empty() {
            self.store.batch_create( new_entities, LIVE_ACTYPE, EntityOrigin::LiveFeed, t);
        }
        if !moves.is_empty() {
            self.store.batch_move( moves.as_slice(), t);
        }

        self.drop_stale( t);
    }

    /// remove feed-created entities with no confirmed update for more than DROP_AFTER
    fn drop_stale (&mut self, t: DateTime<Utc>) {
        let max_age = TimeDelta::seconds( DROP_AFTER.as_secs() as i64);

        let mask: Vec<bool> = self.store.entities().iter()
            .map( |e| e.is_feed_created() && (t - e.last_seen) > max_age)
            .collect();

        if mask.contains( &true) {
            let n_deleted = self.store.batch_delete( mask.as_slice());
            self.host.notify( &format!( "deleting {} aircraft", n_deleted));
        }
    }
}
