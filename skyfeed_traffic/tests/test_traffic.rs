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

use chrono::Utc;
use skyfeed_traffic::{EntityMove, EntityOrigin, EntityState, NewEntity, TrafficList, TrafficStore};

fn state (lat: f64, lon: f64) -> EntityState {
    EntityState { latitude: lat, longitude: lon, altitude: 10000.0, heading: 90.0, ground_speed: 120.0, vertical_rate: 0.0 }
}

#[test]
fn test_batch_create_and_resolve () {
    let mut store = TrafficList::new();
    let t = Utc::now();

    store.batch_create( vec![
        NewEntity::new( "A1", state( 40.0, -70.0)),
        NewEntity::new( "B2", state( 41.0, -71.0)),
    ], "B744", EntityOrigin::LiveFeed, t);

    assert_eq!( store.len(), 2);
    assert_eq!( store.resolve_identity("A1"), Some(0));
    assert_eq!( store.resolve_identity("B2"), Some(1));
    assert_eq!( store.resolve_identity("C3"), None);

    let e = &store.entities()[0];
    assert_eq!( e.id.as_str(), "A1");
    assert_eq!( e.actype, "B744");
    assert!( e.is_feed_created());
    assert_eq!( e.last_seen, t);
}

#[test]
fn test_duplicate_identity_is_skipped () {
    let mut store = TrafficList::new();
    let t = Utc::now();

    store.batch_create( vec![NewEntity::new( "A1", state( 40.0, -70.0))], "B744", EntityOrigin::LiveFeed, t);
    store.batch_create( vec![NewEntity::new( "A1", state( 50.0, -60.0))], "B744", EntityOrigin::LiveFeed, t);

    assert_eq!( store.len(), 1); // an identity maps to at most one entity
    assert_eq!( store.entities()[0].state.latitude, 40.0);
}

#[test]
fn test_batch_move_updates_state_and_last_seen () {
    let mut store = TrafficList::new();
    let t0 = Utc::now();
    store.batch_create( vec![NewEntity::new( "A1", state( 40.0, -70.0))], "B744", EntityOrigin::LiveFeed, t0);

    let t1 = t0 + chrono::Duration::seconds(3);
    let idx = store.resolve_identity("A1").unwrap();
    store.batch_move( &[EntityMove { idx, state: state( 40.1, -70.1) }], t1);

    assert_eq!( store.len(), 1);
    let e = &store.entities()[0];
    assert_eq!( e.state.latitude, 40.1);
    assert_eq!( e.last_seen, t1);
}

#[test]
fn test_batch_delete_rebuilds_index () {
    let mut store = TrafficList::new();
    let t = Utc::now();
    store.batch_create( vec![
        NewEntity::new( "A1", state( 40.0, -70.0)),
        NewEntity::new( "B2", state( 41.0, -71.0)),
        NewEntity::new( "C3", state( 42.0, -72.0)),
    ], "B744", EntityOrigin::LiveFeed, t);

    let n = store.batch_delete( &[false, true, false]);
    assert_eq!( n, 1);
    assert_eq!( store.len(), 2);
    assert_eq!( store.resolve_identity("B2"), None);
    assert_eq!( store.resolve_identity("A1"), Some(0));
    assert_eq!( store.resolve_identity("C3"), Some(1)); // shifted down after removal
}

#[test]
fn test_short_delete_mask_keeps_tail () {
    let mut store = TrafficList::new();
    let t = Utc::now();
    store.batch_create( vec![
        NewEntity::new( "A1", state( 40.0, -70.0)),
        NewEntity::new( "B2", state( 41.0, -71.0)),
    ], "B744", EntityOrigin::LiveFeed, t);

    let n = store.batch_delete( &[true]); // entities past the mask end are kept
    assert_eq!( n, 1);
    assert_eq!( store.resolve_identity("B2"), Some(0));
}

#[test]
fn test_local_entities_keep_origin () {
    let mut store = TrafficList::new();
    let t = Utc::now();
    store.create_local( "SIM1", state( 40.0, -70.0), "A320", t);

    let e = &store.entities()[0];
    assert_eq!( e.origin, EntityOrigin::Local);
    assert!( !e.is_feed_created());
}
