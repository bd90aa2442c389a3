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

//! # Anti-Forgery Tokens
//!
//! One token per rendered form, verified before any business validation
//! runs. The check is an opaque boolean gate: a submission either carries a
//! live token or it is rejected outright with a "session expired" message.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rand::Rng;

pub struct TokenStore {
    ttl: Duration,
    issued: Mutex<HashMap<String, Instant>>,
}

impl TokenStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            issued: Mutex::new(HashMap::new()),
        }
    }

    /// Mint a fresh token. Expired entries are pruned here, so the map stays
    /// bounded by the issue rate within one lifetime window.
    pub fn issue(&self) -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill(&mut bytes[..]);
        let token: String = bytes.iter().map(|b| format!("{b:02x}")).collect();

        let mut issued = self.issued.lock().expect("token store poisoned");
        let now = Instant::now();
        issued.retain(|_, at| now.duration_since(*at) < self.ttl);
        issued.insert(token.clone(), now);
        token
    }

    /// A token passes while it is known and within its lifetime. Tokens stay
    /// reusable until they expire.
    pub fn verify(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let issued = self.issued.lock().expect("token store poisoned");
        issued.get(token).is_some_and(|at| at.elapsed() < self.ttl)
    }
}
