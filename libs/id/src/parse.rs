//! The validation pipeline.
//!
//! Stages run in a fixed order and stop at the first failure: length and
//! charset, embedded birth date, gender field, citizenship digit, check
//! digit. A [`ParsedId`] is only ever built after every stage has passed.

use chrono::{Datelike, NaiveDate, Utc};

use crate::error::ValidationError;
use crate::types::{Citizenship, Gender, ParsedId};

/// Number of digits in an ID number.
const ID_LEN: usize = 13;

/// Validates `candidate` and extracts its structured fields.
///
/// `current_year` drives century resolution for the two-digit birth year:
/// a year that would lie in the future resolves to the 1900s instead of the
/// 2000s. Passing the year explicitly keeps the function pure; use
/// [`current_year`] to supply the wall-clock year.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first stage the candidate fails.
pub fn parse(candidate: &str, current_year: i32) -> Result<ParsedId, ValidationError> {
    let digits = digits_of(candidate)?;
    let birth_date = birth_date_of(&digits, current_year)?;
    let gender = gender_of(&digits);
    let citizenship = citizenship_of(&digits)?;
    let checksum_digit = verify_check_digit(&digits)?;

    Ok(ParsedId {
        birth_date,
        gender,
        citizenship,
        checksum_digit,
    })
}

/// Returns true if `candidate` passes every validation stage, resolving the
/// century against `current_year`.
pub fn is_valid_at(candidate: &str, current_year: i32) -> bool {
    parse(candidate, current_year).is_ok()
}

/// Returns true if `candidate` passes every validation stage, resolving the
/// century against the current wall-clock year.
pub fn is_valid(candidate: &str) -> bool {
    is_valid_at(candidate, current_year())
}

/// The current wall-clock year.
///
/// The only place this crate reads the clock.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Computes the expected check digit for a 12-digit prefix.
///
/// Digits at odd 1-based positions are summed directly. Digits at even
/// positions are concatenated into a single number, doubled, and reduced to
/// the sum of their decimal digits before joining the total. The check
/// digit brings the total up to the next multiple of ten.
pub fn check_digit(prefix: [u8; 12]) -> u8 {
    let odd_sum: u32 = prefix.iter().step_by(2).map(|&d| u32::from(d)).sum();

    let even_concat: u32 = prefix
        .iter()
        .skip(1)
        .step_by(2)
        .fold(0, |acc, &d| acc * 10 + u32::from(d));

    let mut doubled = even_concat * 2;
    let mut even_sum = 0;
    while doubled > 0 {
        even_sum += doubled % 10;
        doubled /= 10;
    }

    let total = odd_sum + even_sum;
    ((10 - total % 10) % 10) as u8
}

/// Checks length and charset once up front, yielding a fixed-width digit
/// array for the field extractors below.
fn digits_of(candidate: &str) -> Result<[u8; ID_LEN], ValidationError> {
    let length = candidate.chars().count();
    if length != ID_LEN {
        return Err(ValidationError::BadLength { actual: length });
    }

    let mut digits = [0u8; ID_LEN];
    for (position, c) in candidate.chars().enumerate() {
        match c.to_digit(10) {
            Some(d) => digits[position] = d as u8,
            None => return Err(ValidationError::NonDigitCharacter { position, found: c }),
        }
    }

    Ok(digits)
}

fn birth_date_of(digits: &[u8; ID_LEN], current_year: i32) -> Result<NaiveDate, ValidationError> {
    let yy = i32::from(digits[0] * 10 + digits[1]);
    let month = u32::from(digits[2] * 10 + digits[3]);
    let day = u32::from(digits[4] * 10 + digits[5]);

    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth { month });
    }

    // A two-digit year past the current year's last two digits would be a
    // future birth year, so it resolves to the previous century.
    let century = if yy > current_year.rem_euclid(100) {
        1900
    } else {
        2000
    };
    let year = century + yy;

    // Gregorian rules, including leap years, are delegated to chrono.
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(ValidationError::InvalidDay { year, month, day })
}

fn gender_of(digits: &[u8; ID_LEN]) -> Gender {
    let sequence = digits[6..10]
        .iter()
        .fold(0u16, |acc, &d| acc * 10 + u16::from(d));
    Gender::from_sequence(sequence)
}

fn citizenship_of(digits: &[u8; ID_LEN]) -> Result<Citizenship, ValidationError> {
    let digit = digits[10];
    Citizenship::from_digit(digit).ok_or(ValidationError::InvalidCitizenshipDigit { digit })
}

fn verify_check_digit(digits: &[u8; ID_LEN]) -> Result<u8, ValidationError> {
    let mut prefix = [0u8; 12];
    prefix.copy_from_slice(&digits[..12]);

    let expected = check_digit(prefix);
    let actual = digits[12];
    if actual != expected {
        return Err(ValidationError::ChecksumMismatch { expected, actual });
    }

    Ok(actual)
}
