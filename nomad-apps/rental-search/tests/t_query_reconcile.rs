//!  Nomad Rental Search
//!
//!  Copyright (C) 2026  Nomad Camper Hire
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Query reconciliation and the preload mapping: campaign tags survive
//! merges, stale keys are dropped, output is sorted and byte-stable so
//! address-bar updates never churn browser history.
//!
//! Run with:
//!     cargo test --test t_query_reconcile

use std::collections::BTreeMap;

use nomad_rental_search::{merge_search_query, preload_params};

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[test]
fn merge_keeps_utm_tags_and_drops_strangers() {
    let merged = merge_search_query(
        &params(&[("pickup", "berat"), ("checkin", "2024-09-01")]),
        "utm_source=google&utm_campaign=brand&foo=bar",
    );
    assert!(merged.contains("pickup=berat"));
    assert!(merged.contains("checkin=2024-09-01"));
    assert!(merged.contains("utm_source=google"));
    assert!(merged.contains("utm_campaign=brand"));
    assert!(!merged.contains("foo"));
}

#[test]
fn merge_output_is_sorted_and_idempotent() {
    let applied = params(&[("pickup", "berat"), ("dropoff", "saranda"), ("guests", "2")]);
    let once = merge_search_query(&applied, "zzz=1&utm_medium=cpc&guests=9");
    let twice = merge_search_query(&applied, &once);

    assert_eq!(once, "dropoff=saranda&guests=2&pickup=berat&utm_medium=cpc");
    assert_eq!(once, twice);
}

#[test]
fn merge_ignores_input_order() {
    let forward = params(&[("a", "1"), ("b", "2"), ("c", "3")]);
    let merged_a = merge_search_query(&forward, "c=9&b=9&a=9");
    let merged_b = merge_search_query(&forward, "a=9&b=9&c=9");
    assert_eq!(merged_a, merged_b);
    assert_eq!(merged_a, "a=1&b=2&c=3");
}

#[test]
fn empty_values_remove_their_keys() {
    let merged = merge_search_query(
        &params(&[("email", ""), ("pickup", "berat")]),
        "email=old%40example.com&utm_source=google",
    );
    assert_eq!(merged, "pickup=berat&utm_source=google");
}

#[test]
fn utm_tags_survive_without_being_resupplied() {
    let merged = merge_search_query(&params(&[("pickup", "berat")]), "utm_term=camper+van");
    assert!(merged.contains("utm_term=camper%20van"));
}

#[test]
fn preload_recognizes_both_spellings() {
    let mapped = preload_params(
        "pickup-location=durres&checkin=2026-09-01&dropoff-date=2026-09-05&pickup_time=09%3A30",
    );
    assert_eq!(mapped["pickup"], "durres");
    assert_eq!(mapped["checkin"], "2026-09-01");
    assert_eq!(mapped["checkout"], "2026-09-05");
    assert_eq!(mapped["pickup_time"], "09:30");
}

#[test]
fn preload_keeps_utm_and_ignores_the_rest() {
    let mapped = preload_params("utm_source=google&session=abc&guests=4&email=g%40example.com");
    assert_eq!(mapped["utm_source"], "google");
    assert_eq!(mapped["guests"], "4");
    assert_eq!(mapped["email"], "g@example.com");
    assert!(!mapped.contains_key("session"));
}

#[test]
fn preload_of_a_merged_query_recovers_the_params() {
    let applied = params(&[
        ("pickup", "berat"),
        ("dropoff", "saranda"),
        ("checkin", "2026-09-01"),
        ("checkout", "2026-09-05"),
        ("pickup_time", "10:00"),
        ("dropoff_time", "10:00"),
        ("guests", "2"),
    ]);
    let merged = merge_search_query(&applied, "utm_source=google");
    let mut recovered = preload_params(&merged);
    recovered.remove("utm_source");
    assert_eq!(recovered, applied);
}
