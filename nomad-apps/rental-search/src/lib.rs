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

// Shared search-form core for the Nomad camper rental widget: date and range
// validation, query-string reconciliation, and the booking-engine redirect
// codec. One implementation serves every surface (HTTP endpoint, CLI), so
// the validation rules cannot diverge between them.

mod booking_url;
mod dates;
mod locations;
mod search_params;
mod times;
mod validation;

#[cfg(feature = "server")]
pub mod server;
#[cfg(feature = "server")]
pub mod token;

pub use booking_url::{BookingRedirect, booking_query_pairs, build_booking_url, parse_booking_url};
pub use dates::{DateInput, normalize, parse_date, today_utc};
pub use locations::Location;
pub use search_params::{
    RentalSearchParams, TRACKING_PREFIX, coerce_guests, merge_search_query, preload_params,
};
pub use times::{DEFAULT_TIME, TIME_SLOTS, TimeOfDay, is_valid_slot};
pub use validation::{Field, RangePolicy, ValidationResult, validate_range, validate_range_at};
