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
//!
//! # Examples
//!
//! ## Basic search
//!
//! ```bash
//! nomad-search -i 2026-09-01 -o 2026-09-05
//! ```
//!
//! ## Airport pick-up, drop-off in Saranda
//!
//! ```bash
//! nomad-search -p aeroporto -d saranda -i 2026-09-01 -o 2026-09-10 --pickup-time 12:00
//! ```

use anyhow::Result;
use clap::Parser;
use nomad_rental_search::{RangePolicy, RentalSearchParams, build_booking_url};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "nomad-search")]
#[command(author, version, about = "Build a booking-engine search URL from rental criteria")]
struct Args {
    /// Pick-up location code (berat, shuttle, aeroporto, teg, durres, saranda)
    #[arg(short = 'p', long, default_value = "berat")]
    pickup: String,

    /// Drop-off location code, when returning the van elsewhere
    #[arg(short = 'd', long)]
    dropoff: Option<String>,

    /// Pick-up date (YYYY-MM-DD)
    #[arg(short = 'i', long)]
    checkin: String,

    /// Drop-off date (YYYY-MM-DD)
    #[arg(short = 'o', long)]
    checkout: String,

    /// Pick-up time (HH:MM, half-hour grid 07:00-22:00)
    #[arg(long, default_value = "10:00")]
    pickup_time: String,

    /// Drop-off time (HH:MM, half-hour grid 07:00-22:00)
    #[arg(long, default_value = "10:00")]
    dropoff_time: String,

    #[arg(short = 'g', long, default_value = "2")]
    guests: u32,

    #[arg(long)]
    email: Option<String>,

    /// Booking-engine search page
    #[arg(
        long,
        default_value = "https://nomadcamperhire.com/search-your-van/index.php"
    )]
    base_url: String,

    /// Menu item identifier forwarded to the booking engine
    #[arg(long, default_value = "613")]
    itemid: String,

    /// Longest bookable stay in nights; zero disables the cap
    #[arg(long, default_value = "120")]
    max_nights: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let params = RentalSearchParams {
        pickup_location: args.pickup.clone(),
        dropoff_location: args.dropoff.clone().unwrap_or_default(),
        different_dropoff: args.dropoff.is_some(),
        checkin_date: args.checkin.clone(),
        checkout_date: args.checkout.clone(),
        pickup_time: args.pickup_time.clone(),
        dropoff_time: args.dropoff_time.clone(),
        guests: args.guests,
        email: args.email.clone().unwrap_or_default(),
    };

    println!("\n🚐 Nomad Rental Search");
    println!("======================");
    println!("Pick-up: {}", args.pickup);
    if let Some(dropoff) = &args.dropoff {
        println!("Drop-off: {}", dropoff);
    }
    println!("Dates: {} to {}", args.checkin, args.checkout);
    println!("Times: {} / {}", args.pickup_time, args.dropoff_time);
    println!("Guests: {}", args.guests);
    println!("======================");

    let policy = RangePolicy {
        max_nights: args.max_nights,
    };
    let result = params.validate(&policy);
    if !result.ok {
        eprintln!("\nValidation failed:");
        for (field, message) in &result.errors {
            eprintln!("  {}: {}", field.as_str_name(), message);
        }
        std::process::exit(1);
    }

    match build_booking_url(&args.base_url, &args.itemid, &params) {
        Some(url) => println!("\n🔗 Search URL:\n{}", url),
        None => {
            eprintln!("Search URL could not be built from the given criteria");
            std::process::exit(1);
        }
    }

    Ok(())
}
