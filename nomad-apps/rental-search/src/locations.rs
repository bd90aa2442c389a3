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

//! # Pick-up and Drop-off Locations
//!
//! The closed set of rental sites, each with its form code, the fee-bearing
//! label shown to the customer, and the numeric identifier the booking
//! engine expects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Berat,
    Shuttle,
    Aeroporto,
    Teg,
    Durres,
    Saranda,
}

impl Location {
    pub const ALL: [Location; 6] = [
        Location::Berat,
        Location::Shuttle,
        Location::Aeroporto,
        Location::Teg,
        Location::Durres,
        Location::Saranda,
    ];

    /// Case-insensitive lookup by form code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "berat" => Some(Location::Berat),
            "shuttle" => Some(Location::Shuttle),
            "aeroporto" => Some(Location::Aeroporto),
            "teg" => Some(Location::Teg),
            "durres" => Some(Location::Durres),
            "saranda" => Some(Location::Saranda),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Location::Berat => "berat",
            Location::Shuttle => "shuttle",
            Location::Aeroporto => "aeroporto",
            Location::Teg => "teg",
            Location::Durres => "durres",
            Location::Saranda => "saranda",
        }
    }

    /// Identifier the booking engine expects in `place`/`returnplace`.
    pub fn engine_id(&self) -> &'static str {
        match self {
            Location::Aeroporto => "1",
            Location::Shuttle => "2",
            Location::Berat => "3",
            Location::Teg => "4",
            Location::Durres => "5",
            Location::Saranda => "6",
        }
    }

    /// Label shown in the location selects, delivery fee included.
    pub fn label(&self) -> &'static str {
        match self {
            Location::Berat => "Berat City",
            Location::Shuttle => "Airport Shuttle +€70",
            Location::Aeroporto => "Tirana Airport +€150",
            Location::Teg => "Tirana City TEG +€150",
            Location::Durres => "Durrës +€140",
            Location::Saranda => "Saranda +€220",
        }
    }

    /// Resolve a raw code for the redirect URL: the engine id when the code
    /// is known, the code itself passed through unchanged when it is not.
    pub fn resolve_engine_id(code: &str) -> String {
        match Location::from_code(code) {
            Some(location) => location.engine_id().to_string(),
            None => code.to_string(),
        }
    }
}
