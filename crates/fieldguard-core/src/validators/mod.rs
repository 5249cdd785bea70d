//! Pure input validators for onboarding and funding forms
//!
//! Every validator is total: unparseable or out-of-range input yields
//! `false`, never an error. User-facing messages belong to the caller.

mod age;
mod card;

pub use age::{
    age_in_years, is_at_least, is_at_least_18, parse_date, Clock, FixedClock, SystemClock,
    MINIMUM_AGE,
};
pub use card::{is_valid_card_number, luhn_checksum, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
