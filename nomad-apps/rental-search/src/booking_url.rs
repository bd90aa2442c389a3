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

//! # Booking Engine Redirect Codec
//!
//! Side-effect free encoding of a validated search into the booking
//! engine's fixed twelve-parameter URL contract, and the decoding half used
//! to verify round-trips. The parameter set and naming are a bit-exact
//! compatibility requirement with the engine and must not change.

use chrono::NaiveDate;

use crate::dates::parse_date;
use crate::locations::Location;
use crate::search_params::RentalSearchParams;
use crate::times::TimeOfDay;

/// Decoded redirect parameters, the counterpart of [`build_booking_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRedirect {
    pub place: String,
    pub return_place: String,
    pub pickup_date: NaiveDate,
    pub pickup_time: TimeOfDay,
    pub release_date: NaiveDate,
    pub release_time: TimeOfDay,
    pub item_id: String,
}

fn format_dmy(day: NaiveDate) -> String {
    day.format("%d/%m/%Y").to_string()
}

fn parse_dmy(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The engine's parameter sequence for one search, or `None` while the
/// submission is still incomplete. A missing date or time is a "not ready
/// yet" signal — the customer is mid-form — never an error to surface.
pub fn booking_query_pairs(
    item_id: &str,
    params: &RentalSearchParams,
) -> Option<Vec<(String, String)>> {
    let pickup_day = parse_date(&params.checkin_date)?;
    let release_day = parse_date(&params.checkout_date)?;
    let pickup_time = TimeOfDay::parse(&params.pickup_time)?;
    let release_time = TimeOfDay::parse(&params.dropoff_time)?;

    let place = Location::resolve_engine_id(&params.pickup_location);
    let return_place = if params.different_dropoff {
        match Location::from_code(&params.dropoff_location) {
            Some(location) => location.engine_id().to_string(),
            None if !params.dropoff_location.is_empty() => params.dropoff_location.clone(),
            None => params.pickup_location.clone(),
        }
    } else {
        place.clone()
    };

    Some(vec![
        ("option".to_string(), "com_vikrentcar".to_string()),
        ("task".to_string(), "search".to_string()),
        ("place".to_string(), place),
        ("returnplace".to_string(), return_place),
        ("pickupdate".to_string(), format_dmy(pickup_day)),
        ("pickuph".to_string(), pickup_time.hour.to_string()),
        ("pickupm".to_string(), pickup_time.minute.to_string()),
        ("releasedate".to_string(), format_dmy(release_day)),
        ("releaseh".to_string(), release_time.hour.to_string()),
        ("releasem".to_string(), release_time.minute.to_string()),
        ("search".to_string(), "Search".to_string()),
        ("Itemid".to_string(), item_id.to_string()),
    ])
}

/// Build the full redirect URL, preserving the contract's parameter order.
/// `None` until the base URL, both dates, and both times are present.
pub fn build_booking_url(
    base_url: &str,
    item_id: &str,
    params: &RentalSearchParams,
) -> Option<String> {
    if base_url.is_empty() {
        return None;
    }
    let pairs = booking_query_pairs(item_id, params)?;
    let query = pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    let separator = if base_url.contains('?') { '&' } else { '?' };
    Some(format!("{base_url}{separator}{query}"))
}

/// Decode a redirect URL back into its search parameters. `None` when any
/// of the twelve parameters is missing or malformed.
pub fn parse_booking_url(url: &str) -> Option<BookingRedirect> {
    let (_, query) = url.split_once('?')?;
    let pairs = nomad_query_strings::parse_query(query);
    let get = |name: &str| {
        pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };

    if get("option")? != "com_vikrentcar" || get("task")? != "search" || get("search").is_none() {
        return None;
    }

    Some(BookingRedirect {
        place: get("place")?.to_string(),
        return_place: get("returnplace")?.to_string(),
        pickup_date: parse_dmy(get("pickupdate")?)?,
        pickup_time: TimeOfDay::from_parts(
            get("pickuph")?.parse().ok()?,
            get("pickupm")?.parse().ok()?,
        )?,
        release_date: parse_dmy(get("releasedate")?)?,
        release_time: TimeOfDay::from_parts(
            get("releaseh")?.parse().ok()?,
            get("releasem")?.parse().ok()?,
        )?,
        item_id: get("Itemid")?.to_string(),
    })
}
