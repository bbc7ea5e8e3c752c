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

use std::{collections::HashMap, sync::Arc};
use chrono::{DateTime, Utc};

use crate::{EntityMove, EntityOrigin, EntityState, NewEntity, SimEntity, TrafficStore};

/// in-memory TrafficStore reference implementation: a dense entity vector plus an
/// identity index. This is what the demo binary and the tests run against - a full
/// host simulator would put its own population structure behind the TrafficStore trait
#[derive(Debug)]
pub struct TrafficList {
    entities: Vec<SimEntity>,
    index: HashMap<String, usize>, // identity -> entity vector position
}

impl TrafficList {
    pub fn new () -> Self {
        TrafficList { entities: Vec::new(), index: HashMap::new() }
    }

    /// create a single entity from a non-feed source (scenario setup, host commands)
    pub fn create_local (&mut self, id: impl ToString, state: EntityState, actype: &str, seen: DateTime<Utc>) {
        self.batch_create( vec![NewEntity::new( id, state)], actype, EntityOrigin::Local, seen);
    }

    /// rewind or advance the last_seen timestamp of one entity - the host owns the clock
    pub fn set_last_seen (&mut self, idx: usize, seen: DateTime<Utc>) {
        if let Some(e) = self.entities.get_mut(idx) {
            e.last_seen = seen;
        }
    }

    fn rebuild_index (&mut self) {
        self.index.clear();
        for (i, e) in self.entities.iter().enumerate() {
            self.index.insert( e.id.as_ref().clone(), i);
        }
    }
}

impl Default for TrafficList {
    fn default () -> Self { Self::new() }
}

impl TrafficStore for TrafficList {
    fn len (&self) -> usize {
        self.entities.len()
    }

    fn resolve_identity (&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn entities (&self) -> &[SimEntity] {
        self.entities.as_slice()
    }

    fn batch_create (&mut self, new_entities: Vec<NewEntity>, actype: &str, origin: EntityOrigin, seen: DateTime<Utc>) {
        for ne in new_entities {
            if self.index.contains_key( ne.id.as_str()) { continue } // identity maps to at most one entity
            let idx = self.entities.len();
            self.index.insert( ne.id.clone(), idx);
            self.entities.push( SimEntity {
                id: Arc::new(ne.id),
                actype: actype.to_string(),
                state: ne.state,
                origin,
                last_seen: seen,
            });
        }
    }

    fn batch_move (&mut self, moves: &[EntityMove], seen: DateTime<Utc>) {
        for mv in moves {
            if let Some(e) = self.entities.get_mut(mv.idx) {
                e.state = mv.state;
                e.last_seen = seen;
            }
        }
    }

    fn batch_delete (&mut self, mask: &[bool]) -> usize {
        let n_before = self.entities.len();

        let mut i = 0;
        self.entities.retain( |_| {
            let keep = !mask.get(i).copied().unwrap_or(false);
            i += 1;
            keep
        });

        let n_deleted = n_before - self.entities.len();
        if n_deleted > 0 {
            self.rebuild_index();
        }
        n_deleted
    }
}
