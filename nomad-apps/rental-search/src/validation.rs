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

//! # Range Validation
//!
//! Business rules for the check-in/check-out pair. Invalid input is never an
//! error here: every outcome is returned as data, one human-readable message
//! per field, for inline rendering next to the offending control.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{DateInput, normalize, today_utc};

/// The fixed set of form fields a validation message can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Checkin,
    Checkout,
    Pickup,
    Dropoff,
    PickupTime,
    DropoffTime,
    Guests,
    Email,
}

impl Field {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Field::Checkin => "checkin",
            Field::Checkout => "checkout",
            Field::Pickup => "pickup",
            Field::Dropoff => "dropoff",
            Field::PickupTime => "pickup_time",
            Field::DropoffTime => "dropoff_time",
            Field::Guests => "guests",
            Field::Email => "email",
        }
    }
}

/// Stay-length policy. A `max_nights` of zero or less disables the cap.
#[derive(Debug, Clone, Copy)]
pub struct RangePolicy {
    pub max_nights: i64,
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self { max_nights: 120 }
    }
}

/// Outcome of a validation pass: `ok` holds exactly when `errors` is empty,
/// and the normalized dates are carried along for the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub errors: BTreeMap<Field, String>,
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

impl ValidationResult {
    pub(crate) fn new(
        errors: BTreeMap<Field, String>,
        checkin: Option<NaiveDate>,
        checkout: Option<NaiveDate>,
    ) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            checkin,
            checkout,
        }
    }
}

/// Validate a check-in/check-out pair against today's UTC date.
pub fn validate_range<'a, 'b>(
    checkin: impl Into<DateInput<'a>>,
    checkout: impl Into<DateInput<'b>>,
    policy: &RangePolicy,
) -> ValidationResult {
    validate_range_at(checkin, checkout, policy, today_utc())
}

/// Clock-injected variant of [`validate_range`].
///
/// Rules, in order:
/// 1. check-in must normalize and must not precede `today` (today itself is
///    a valid pick-up day);
/// 2. check-out must normalize;
/// 3. only when both fields are still clean, check-out must be strictly
///    after check-in — an already-broken date is not reported twice;
/// 4. only when check-out is still clean and the policy carries a positive
///    cap, the whole-day span must not exceed `max_nights`.
pub fn validate_range_at<'a, 'b>(
    checkin: impl Into<DateInput<'a>>,
    checkout: impl Into<DateInput<'b>>,
    policy: &RangePolicy,
    today: NaiveDate,
) -> ValidationResult {
    let mut errors = BTreeMap::new();
    let checkin = normalize(checkin);
    let checkout = normalize(checkout);

    match checkin {
        None => {
            errors.insert(Field::Checkin, "invalid date".to_string());
        }
        Some(day) if day < today => {
            errors.insert(
                Field::Checkin,
                "pickup date cannot be in the past".to_string(),
            );
        }
        Some(_) => {}
    }

    if checkout.is_none() {
        errors.insert(Field::Checkout, "invalid date".to_string());
    }

    if !errors.contains_key(&Field::Checkin) && !errors.contains_key(&Field::Checkout) {
        if let (Some(start), Some(end)) = (checkin, checkout) {
            if end <= start {
                errors.insert(Field::Checkout, "return must be after pickup".to_string());
            }
        }
    }

    if !errors.contains_key(&Field::Checkout) && policy.max_nights > 0 {
        if let (Some(start), Some(end)) = (checkin, checkout) {
            if (end - start).num_days() > policy.max_nights {
                errors.insert(
                    Field::Checkout,
                    format!("maximum stay is {} nights", policy.max_nights),
                );
            }
        }
    }

    ValidationResult::new(errors, checkin, checkout)
}
