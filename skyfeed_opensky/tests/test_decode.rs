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

use skyfeed_opensky::parse_states;

//--- test data (OpenSky /states responses, 17 element state vectors)

const TWO_AIRCRAFT: &'static str = r#"{"time":1517230800,"states":[
    ["4b1806","SWR193V ","Switzerland",1517230797,1517230798,8.5594,47.4542,9144.0,false,251.2,45.5,-3.2,null,9448.8,"1021",false,0],
    ["3c6444","DLH9LF  ","Germany",1517230795,1517230796,6.1546,50.1964,10972.5,false,232.8,290.1,0.0,null,11277.6,"1000",false,0]
]}"#;

const NULL_FIELDS: &'static str = r#"{"time":1517230800,"states":[
    ["a1b2c3","UAL123  ","United States",null,1517230790,null,40.2,null,false,null,90.0,null,null,null,null,false,0]
]}"#;

const BLANK_CALLSIGN: &'static str = r#"{"time":1517230800,"states":[
    ["4b1806","        ","Switzerland",1517230797,1517230798,8.5594,47.4542,9144.0,false,251.2,45.5,-3.2,null,9448.8,"1021",false,0],
    ["","",null,null,null,null,null,null,false,null,null,null,null,null,null,false,0]
]}"#;

const NO_STATES: &'static str = r#"{"time":1517230800,"states":null}"#;

const SHORT_ROW: &'static str = r#"{"time":1517230800,"states":[["4b1806","SWR193V "]]}"#;


#[test]
fn test_parse_two_aircraft () {
    let snapshot = parse_states( TWO_AIRCRAFT).unwrap();
    assert_eq!( snapshot.time, 1517230800);
    assert_eq!( snapshot.len(), 2);

    let rec = snapshot.record(0);
    assert_eq!( rec.identity, "SWR193V"); // trimmed callsign
    assert_eq!( rec.latitude, Some(47.4542));
    assert_eq!( rec.longitude, Some(8.5594));
    assert_eq!( rec.altitude, Some(9448.8)); // barometric, not geometric
    assert_eq!( rec.heading, Some(45.5));
    assert_eq!( rec.ground_speed, Some(251.2));
    assert_eq!( rec.vertical_rate, Some(-3.2));
    assert_eq!( rec.last_contact, Some(1517230798.0));

    let state = rec.entity_state().unwrap();
    assert_eq!( state.latitude, 47.4542);
    assert_eq!( state.altitude, 9448.8);

    assert_eq!( snapshot.record(1).identity, "DLH9LF");
}

#[test]
fn test_null_fields_invalidate_record () {
    let snapshot = parse_states( NULL_FIELDS).unwrap();
    assert_eq!( snapshot.len(), 1);

    let rec = snapshot.record(0);
    assert_eq!( rec.identity, "UAL123");
    assert_eq!( rec.longitude, None);
    assert_eq!( rec.latitude, Some(40.2));
    assert!( rec.entity_state().is_none()); // any missing numeric field invalidates the record
}

#[test]
fn test_nan_invalidates_record () {
    let mut snapshot = parse_states( TWO_AIRCRAFT).unwrap();
    snapshot.heading[0] = Some(f64::NAN);
    assert!( snapshot.record(0).entity_state().is_none());
    assert!( snapshot.record(1).entity_state().is_some());
}

#[test]
fn test_identity_fallback_to_icao24 () {
    let snapshot = parse_states( BLANK_CALLSIGN).unwrap();
    assert_eq!( snapshot.len(), 1); // the row without callsign and address is dropped
    assert_eq!( snapshot.record(0).identity, "4b1806");
}

#[test]
fn test_null_states_is_empty_snapshot () {
    let snapshot = parse_states( NO_STATES).unwrap();
    assert!( snapshot.is_empty());
}

#[test]
fn test_short_row_is_dropped () {
    let snapshot = parse_states( SHORT_ROW).unwrap();
    assert!( snapshot.is_empty());
}

#[test]
fn test_malformed_json_is_error () {
    assert!( parse_states( "{\"time\": 42").is_err());
}
