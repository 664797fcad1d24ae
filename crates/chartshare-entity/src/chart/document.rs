//! The decoded chart value.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::{ChartError, DAYS_LEN, RAW_LEN, YEAR_LEN, codec};

/// Number of days in `year` under the proleptic Gregorian calendar.
pub fn days_in_year(year: u16) -> u16 {
    NaiveDate::from_ymd_opt(i32::from(year), 12, 31).map_or(365, |d| d.ordinal() as u16)
}

/// A year plus a bitmap of active days.
///
/// Bit `i` of the bitmap (most significant bit first within each byte)
/// marks day `i + 1` of the year as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartDocument {
    year: u16,
    days: [u8; DAYS_LEN],
}

impl ChartDocument {
    /// Creates a chart from a year and a raw day bitmap.
    pub fn new(year: u16, days: [u8; DAYS_LEN]) -> Self {
        Self { year, days }
    }

    /// Creates a chart with no active days.
    pub fn empty(year: u16) -> Self {
        Self::new(year, [0; DAYS_LEN])
    }

    /// Parses the 48-byte raw layout (big-endian year followed by the bitmap).
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ChartError> {
        if raw.len() != RAW_LEN {
            return Err(ChartError::InvalidDocument);
        }
        let year = u16::from_be_bytes([raw[0], raw[1]]);
        let mut days = [0u8; DAYS_LEN];
        days.copy_from_slice(&raw[YEAR_LEN..]);
        Ok(Self { year, days })
    }

    /// Returns the 48-byte raw layout.
    pub fn to_bytes(&self) -> [u8; RAW_LEN] {
        let mut raw = [0u8; RAW_LEN];
        raw[..YEAR_LEN].copy_from_slice(&self.year.to_be_bytes());
        raw[YEAR_LEN..].copy_from_slice(&self.days);
        raw
    }

    /// The chart year.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The raw day bitmap.
    pub fn days(&self) -> &[u8; DAYS_LEN] {
        &self.days
    }

    /// Number of meaningful days for this chart's year.
    pub fn days_in_year(&self) -> u16 {
        days_in_year(self.year)
    }

    /// Whether `day` (1-based) is marked active. Out-of-range days are inactive.
    pub fn is_active(&self, day: u16) -> bool {
        if day == 0 || day > self.days_in_year() {
            return false;
        }
        let (byte, mask) = bit_position(day);
        self.days[byte] & mask != 0
    }

    /// Marks `day` (1-based) as active or inactive.
    pub fn set_active(&mut self, day: u16, active: bool) -> Result<(), ChartError> {
        if day == 0 || day > self.days_in_year() {
            return Err(ChartError::DayOutOfRange(day));
        }
        let (byte, mask) = bit_position(day);
        if active {
            self.days[byte] |= mask;
        } else {
            self.days[byte] &= !mask;
        }
        Ok(())
    }

    /// Iterates over the active day numbers in ascending order.
    pub fn active_days(&self) -> impl Iterator<Item = u16> + '_ {
        (1..=self.days_in_year()).filter(|&day| self.is_active(day))
    }

    /// Whether no day is marked active.
    pub fn is_blank(&self) -> bool {
        self.days.iter().all(|&b| b == 0)
    }
}

fn bit_position(day: u16) -> (usize, u8) {
    let bit = usize::from(day - 1);
    (bit / 8, 0x80 >> (bit % 8))
}

impl fmt::Display for ChartDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode(self))
    }
}

impl Serialize for ChartDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&codec::encode(self))
    }
}

impl<'de> Deserialize<'de> for ChartDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TokenVisitor;

        impl Visitor<'_> for TokenVisitor {
            type Value = ChartDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a canonical chart token")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                codec::decode(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TokenVisitor)
    }
}
