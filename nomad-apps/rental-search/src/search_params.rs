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

//! # Search Parameters
//!
//! The complete intended query as the customer entered it, the full-field
//! validation sweep over it, and the canonical query-parameter mapping used
//! for address-bar synchronization and field preloading.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{parse_date, today_utc};
use crate::locations::Location;
use crate::times;
use crate::validation::{Field, RangePolicy, ValidationResult, validate_range_at};

/// Query keys with this prefix carry campaign attribution and survive every
/// merge whether or not they are re-supplied.
pub const TRACKING_PREFIX: &str = "utm_";

/// One search submission, exactly as entered. Dates stay `YYYY-MM-DD` text
/// and times `HH:MM` text; `validate` interprets them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RentalSearchParams {
    pub pickup_location: String,
    /// Only meaningful while `different_dropoff` is set; empty means the
    /// customer never picked one.
    pub dropoff_location: String,
    pub different_dropoff: bool,
    pub checkin_date: String,
    pub checkout_date: String,
    pub pickup_time: String,
    pub dropoff_time: String,
    pub guests: u32,
    /// Optional; empty string means not provided.
    pub email: String,
}

impl RentalSearchParams {
    /// Effective drop-off code: the pick-up site unless a different drop-off
    /// was requested and actually chosen.
    pub fn effective_dropoff(&self) -> &str {
        if self.different_dropoff && !self.dropoff_location.is_empty() {
            &self.dropoff_location
        } else {
            &self.pickup_location
        }
    }

    /// Full field sweep against today's UTC date.
    pub fn validate(&self, policy: &RangePolicy) -> ValidationResult {
        self.validate_at(policy, today_utc())
    }

    /// Clock-injected variant of [`RentalSearchParams::validate`]. The
    /// date-range rules are shared with [`validate_range_at`]; location,
    /// time-slot, guest and email checks are layered on top.
    pub fn validate_at(&self, policy: &RangePolicy, today: NaiveDate) -> ValidationResult {
        let range = validate_range_at(
            self.checkin_date.as_str(),
            self.checkout_date.as_str(),
            policy,
            today,
        );
        let mut errors = range.errors;

        if Location::from_code(&self.pickup_location).is_none() {
            errors.insert(Field::Pickup, "invalid pick-up location".to_string());
        }
        if self.different_dropoff
            && !self.dropoff_location.is_empty()
            && Location::from_code(&self.dropoff_location).is_none()
        {
            errors.insert(Field::Dropoff, "invalid drop-off location".to_string());
        }
        if !times::is_valid_slot(&self.pickup_time) {
            errors.insert(Field::PickupTime, "invalid pick-up time".to_string());
        }
        if !times::is_valid_slot(&self.dropoff_time) {
            errors.insert(Field::DropoffTime, "invalid drop-off time".to_string());
        }
        if self.guests < 1 || self.guests > 8 {
            errors.insert(Field::Guests, "invalid guest count".to_string());
        }
        if !self.email.is_empty() && !is_plausible_email(&self.email) {
            errors.insert(Field::Email, "enter a valid email address".to_string());
        }

        ValidationResult::new(errors, range.checkin, range.checkout)
    }

    /// Canonical parameter map for this submission — the "params to apply"
    /// input for the address-bar reconciler. Dates are re-emitted
    /// normalized; empty optionals are omitted.
    pub fn canonical_params(&self, item_id: Option<&str>) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("pickup".to_string(), self.pickup_location.clone());
        params.insert("dropoff".to_string(), self.effective_dropoff().to_string());
        params.insert("checkin".to_string(), normalized_or_raw(&self.checkin_date));
        params.insert(
            "checkout".to_string(),
            normalized_or_raw(&self.checkout_date),
        );
        params.insert("pickup_time".to_string(), self.pickup_time.clone());
        params.insert("dropoff_time".to_string(), self.dropoff_time.clone());
        params.insert("guests".to_string(), self.guests.to_string());
        if !self.email.is_empty() {
            params.insert("email".to_string(), self.email.clone());
        }
        if let Some(id) = item_id {
            if !id.is_empty() {
                params.insert("Itemid".to_string(), id.to_string());
            }
        }
        params
    }
}

/// Guest-count coercion the form applies before validation: unparseable
/// input counts as one guest, never zero.
pub fn coerce_guests(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(1).max(1)
}

/// Merge canonical parameters into an existing query string, dropping stale
/// keys and keeping campaign tracking tags. Output keys are sorted, so
/// repeated merges are byte-identical and never churn browser history.
pub fn merge_search_query(params: &BTreeMap<String, String>, existing: &str) -> String {
    nomad_query_strings::merge_query(params, existing, &[TRACKING_PREFIX])
}

/// Read recognized parameters from a page query string, keyed canonically —
/// the preload contract. Both spellings of each field are accepted
/// (`pickup` and `pickup-location`, `checkin` and `pickup-date`, …) along
/// with any `utm_*` tag; everything else is ignored.
pub fn preload_params(query: &str) -> BTreeMap<String, String> {
    let mut mapped = BTreeMap::new();
    for (key, value) in nomad_query_strings::parse_query(query) {
        let canonical = match key.as_str() {
            "pickup" | "pickup-location" => "pickup",
            "dropoff" | "dropoff-location" => "dropoff",
            "checkin" | "pickup-date" => "checkin",
            "checkout" | "dropoff-date" => "checkout",
            "pickup_time" | "pickup-time" => "pickup_time",
            "dropoff_time" | "dropoff-time" => "dropoff_time",
            "guests" => "guests",
            "email" => "email",
            _ => {
                if key.starts_with(TRACKING_PREFIX) {
                    mapped.insert(key, value);
                }
                continue;
            }
        };
        mapped.insert(canonical.to_string(), value);
    }
    mapped
}

fn normalized_or_raw(text: &str) -> String {
    match parse_date(text) {
        Some(day) => day.format("%Y-%m-%d").to_string(),
        None => text.to_string(),
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}
