//! Structured field types and the validated ID newtype.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Gender encoded by the four-digit sequence field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Sequence values from this value upward are male.
    pub const MALE_FROM: u16 = 5000;

    /// Classifies a four-digit sequence value.
    pub fn from_sequence(sequence: u16) -> Self {
        if sequence < Self::MALE_FROM {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    /// Single-letter tag used in storage.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Gender::Female => 'F',
            Gender::Male => 'M',
        }
    }

    /// Parses the single-letter storage tag.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'F' => Some(Gender::Female),
            'M' => Some(Gender::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "Female"),
            Gender::Male => write!(f, "Male"),
        }
    }
}

/// Citizenship status encoded by the eleventh digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Citizenship {
    Citizen,
    PermanentResident,
}

impl Citizenship {
    /// Decodes the citizenship digit; only `0` and `1` are assigned.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(Citizenship::Citizen),
            1 => Some(Citizenship::PermanentResident),
            _ => None,
        }
    }

    /// The digit this status encodes to.
    #[must_use]
    pub const fn digit(&self) -> u8 {
        match self {
            Citizenship::Citizen => 0,
            Citizenship::PermanentResident => 1,
        }
    }

    /// Single-character tag used in storage.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Citizenship::Citizen => '0',
            Citizenship::PermanentResident => '1',
        }
    }

    /// Parses the single-character storage tag.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Citizenship::Citizen),
            '1' => Some(Citizenship::PermanentResident),
            _ => None,
        }
    }
}

impl fmt::Display for Citizenship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Citizenship::Citizen => write!(f, "Citizen"),
            Citizenship::PermanentResident => write!(f, "Permanent Resident"),
        }
    }
}

/// The structured fields embedded in a fully validated ID number.
///
/// A value of this type exists only for candidates that passed every
/// validation stage; it is derived on demand and holds no reference back to
/// the input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedId {
    /// Birth date with the century resolved against the current year.
    pub birth_date: NaiveDate,

    /// Gender derived from the sequence field.
    pub gender: Gender,

    /// Citizenship status derived from the eleventh digit.
    pub citizenship: Citizenship,

    /// The final digit, already verified against the computed checksum.
    pub checksum_digit: u8,
}

/// A validated South African ID number.
///
/// Construction goes through [`IdNumber::parse`], so a value of this type
/// always satisfies every validation rule at the year it was parsed. The
/// canonical representation is the 13-digit string itself.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdNumber(String);

impl IdNumber {
    /// Number of digits in an ID number.
    pub const LEN: usize = 13;

    /// Parses and validates a candidate, resolving the century against
    /// `current_year`.
    pub fn parse(candidate: &str, current_year: i32) -> Result<Self, ValidationError> {
        crate::parse(candidate, current_year)?;
        Ok(Self(candidate.to_string()))
    }

    /// Parses and validates a candidate against the current wall-clock year.
    pub fn parse_now(candidate: &str) -> Result<Self, ValidationError> {
        Self::parse(candidate, crate::current_year())
    }

    /// Derives the structured fields embedded in the number.
    ///
    /// Century resolution depends on `current_year`, so a number parsed in
    /// one year can decode differently, or fail, in a later one.
    pub fn decode(&self, current_year: i32) -> Result<ParsedId, ValidationError> {
        crate::parse(&self.0, current_year)
    }

    /// The canonical 13-digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for IdNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_now(s)
    }
}

impl AsRef<str> for IdNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for IdNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for IdNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_now(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_gender_threshold() {
        assert_eq!(Gender::from_sequence(0), Gender::Female);
        assert_eq!(Gender::from_sequence(4999), Gender::Female);
        assert_eq!(Gender::from_sequence(5000), Gender::Male);
        assert_eq!(Gender::from_sequence(9999), Gender::Male);
    }

    #[test]
    fn test_gender_tag_roundtrip() {
        for gender in [Gender::Female, Gender::Male] {
            assert_eq!(Gender::from_char(gender.as_char()), Some(gender));
        }
        assert_eq!(Gender::from_char('x'), None);
    }

    #[test]
    fn test_citizenship_digits() {
        assert_eq!(Citizenship::from_digit(0), Some(Citizenship::Citizen));
        assert_eq!(
            Citizenship::from_digit(1),
            Some(Citizenship::PermanentResident)
        );
        assert_eq!(Citizenship::from_digit(2), None);
        assert_eq!(Citizenship::Citizen.digit(), 0);
        assert_eq!(Citizenship::PermanentResident.digit(), 1);
    }

    #[test]
    fn test_citizenship_tag_roundtrip() {
        for status in [Citizenship::Citizen, Citizenship::PermanentResident] {
            assert_eq!(Citizenship::from_char(status.as_char()), Some(status));
        }
        assert_eq!(Citizenship::from_char('9'), None);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Gender::Male.to_string(), "Male");
        assert_eq!(
            Citizenship::PermanentResident.to_string(),
            "Permanent Resident"
        );
    }

    #[test]
    fn test_id_number_roundtrip() {
        let id = IdNumber::parse("2001014800086", 2024).unwrap();
        assert_eq!(id.as_str(), "2001014800086");

        let reparsed = IdNumber::parse(&id.to_string(), 2024).unwrap();
        assert_eq!(id, reparsed);
    }

    #[test]
    fn test_id_number_rejects_invalid() {
        assert!(IdNumber::parse("2001014800087", 2024).is_err());
        assert!(IdNumber::parse("not-an-id", 2024).is_err());
    }

    #[test]
    fn test_id_number_decode() {
        let id = IdNumber::parse("2001014800086", 2024).unwrap();
        let parsed = id.decode(2024).unwrap();
        assert_eq!(parsed.birth_date.year(), 2020);
        assert_eq!(parsed.gender, Gender::Female);

        // The same digits decode to the previous century before 2020.
        assert_eq!(id.decode(2019).unwrap().birth_date.year(), 1920);
    }

    #[test]
    fn test_id_number_json_roundtrip() {
        let id = IdNumber::parse_now("2909035800085").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"2909035800085\"");

        let parsed: IdNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parsed_id_json_roundtrip() {
        let parsed = crate::parse("2002294800085", 2024).unwrap();
        let json = serde_json::to_string(&parsed).unwrap();
        let back: ParsedId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, back);
    }
}
