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

//! # Time-of-Day Slots
//!
//! Pick-up and drop-off happen on a fixed half-hour grid between 07:00 and
//! 22:00; submissions outside the grid fail validation.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A `HH:MM` time selection, day granularity handled elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn from_parts(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Parse a `HH:MM` form value.
    pub fn parse(text: &str) -> Option<Self> {
        let (hour, minute) = text.split_once(':')?;
        Self::from_parts(hour.parse().ok()?, minute.parse().ok()?)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Default selection shown in both time selects.
pub const DEFAULT_TIME: TimeOfDay = TimeOfDay {
    hour: 10,
    minute: 0,
};

/// Bookable slots: 07:00 through 22:00 every 30 minutes.
pub static TIME_SLOTS: Lazy<Vec<TimeOfDay>> = Lazy::new(|| {
    let mut slots = Vec::new();
    let mut minutes = 7 * 60;
    while minutes <= 22 * 60 {
        slots.push(TimeOfDay {
            hour: minutes / 60,
            minute: minutes % 60,
        });
        minutes += 30;
    }
    slots
});

/// Slot membership, the check submission validation applies to both time
/// fields.
pub fn is_valid_slot(value: &str) -> bool {
    match TimeOfDay::parse(value) {
        Some(time) => TIME_SLOTS.contains(&time),
        None => false,
    }
}
