//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a user account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a bookable event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

/// Identifier of a reservation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(UserId, "UserId");
impl_int_newtype!(EventId, "EventId");
impl_int_newtype!(ReservationId, "ReservationId");

/// Lookup key derived from an `id` path parameter.
///
/// Parsing never fails: text that does not denote an integral number becomes
/// [`LookupId::NotANumber`], which compares unequal to everything (itself
/// included) and therefore never resolves to a stored record.
#[derive(Debug, Copy, Clone)]
pub enum LookupId {
    Number(i64),
    NotANumber,
}

impl LookupId {
    /// Numeric interpretation of a raw path segment.
    ///
    /// Surrounding whitespace is ignored and exponent/decimal notation is
    /// accepted as long as the value is integral (`"1e3"` is `1000`, `"4.0"`
    /// is `4`).
    pub fn parse(raw: &str) -> Self {
        let Ok(value) = raw.trim().parse::<f64>() else {
            return Self::NotANumber;
        };
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value < i64::MAX as f64
        {
            Self::Number(value as i64)
        } else {
            Self::NotANumber
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::NotANumber => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Self::NotANumber)
    }
}

impl PartialEq for LookupId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for LookupId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl core::fmt::Display for LookupId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(n) => core::fmt::Display::fmt(n, f),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}
