//! # said-id
//!
//! Parsing and validation for South African national identity numbers.
//!
//! ## Design Principles
//!
//! - Validation is a pure function of the candidate string and the current
//!   year; only the `*_now` conveniences read the clock
//! - All-or-nothing: structured fields are only ever produced for inputs
//!   that pass every validation stage
//! - Strict parsing with typed errors naming the first failing stage
//! - IDs support roundtrip serialization (parse → format → parse)
//!
//! ## ID Format
//!
//! An ID number is exactly 13 decimal digits: `{YYMMDD}{SSSS}{C}{A}{Z}`
//!
//! - `YYMMDD`: birth date; the century of the two-digit year is resolved
//!   against the current year (a birth year cannot lie in the future)
//! - `SSSS`: sequence number; values below 5000 are female, 5000 and up male
//! - `C`: citizenship (0 = citizen, 1 = permanent resident)
//! - `A`: historical digit, no longer interpreted
//! - `Z`: Luhn-style check digit over the preceding 12 digits
//!
//! Example: `2001014800086` encodes a female citizen born 2020-01-01 (when
//! the current year is 2020 or later in the same century).

mod error;
mod parse;
mod types;

pub use error::ValidationError;
pub use parse::{check_digit, current_year, is_valid, is_valid_at, parse};
pub use types::{Citizenship, Gender, IdNumber, ParsedId};
