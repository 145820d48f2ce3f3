//! Semantic unit types for impact-effect quantities
//!
//! Newtype wrappers keep energies and distances from being mixed up as bare
//! `f64`s (joules passed where megatons are expected is the classic mistake
//! in this domain, the two differ by fifteen orders of magnitude).
//!
//! # Design Philosophy
//! - All quantities use f64: energies span 1e10..1e25 J
//! - Deref to the inner value for arithmetic-heavy model code
//! - Total ordering via `total_cmp` so results can be sorted and compared
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use impact_effects_core::core_types::units::{Joules, Megatons};
//!
//! let energy = Joules::new(4.184e15);
//! let mt: Megatons = energy.to_megatons();
//! assert!((*mt - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Div, Mul};

/// Joules per megaton of TNT equivalent
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Yield of the Hiroshima bomb in megatons (15 kt), used as a familiar unit
pub const HIROSHIMA_YIELD_MT: f64 = 0.015;

/// Shared trait impls for an f64 newtype
macro_rules! scalar_unit {
    ($name:ident, $suffix:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl $name {
            /// Zero quantity
            pub const ZERO: $name = $name(0.0);

            /// Wrap a raw value
            #[inline]
            #[must_use]
            pub const fn new(value: f64) -> Self {
                $name(value)
            }

            /// Get the raw f64 value
            #[inline]
            #[must_use]
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;
            fn add(self, rhs: $name) -> $name {
                $name(self.0 + rhs.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;
            fn mul(self, rhs: f64) -> $name {
                $name(self.0 * rhs)
            }
        }

        impl Div<f64> for $name {
            type Output = $name;
            fn div(self, rhs: f64) -> $name {
                $name(self.0 / rhs)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:.2} {}", self.0, $suffix)
            }
        }
    };
}

// ============================================================================
// ENERGY
// ============================================================================

/// Energy in joules
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Joules(f64);

scalar_unit!(Joules, "J");

impl Joules {
    /// Convert to megatons of TNT
    #[inline]
    #[must_use]
    pub fn to_megatons(self) -> Megatons {
        Megatons(self.0 / JOULES_PER_MEGATON)
    }
}

impl From<Joules> for Megatons {
    fn from(j: Joules) -> Megatons {
        j.to_megatons()
    }
}

/// Energy in megatons of TNT equivalent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Megatons(f64);

scalar_unit!(Megatons, "MT");

impl Megatons {
    /// Convert to joules
    #[inline]
    #[must_use]
    pub fn to_joules(self) -> Joules {
        Joules(self.0 * JOULES_PER_MEGATON)
    }

    /// Equivalent number of Hiroshima-sized (15 kt) explosions
    #[inline]
    #[must_use]
    pub fn hiroshima_equivalents(self) -> f64 {
        self.0 / HIROSHIMA_YIELD_MT
    }

    /// True when there is no explosive energy to model
    #[inline]
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.0 <= 0.0
    }
}

// ============================================================================
// DISTANCE
// ============================================================================

/// Distance in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

scalar_unit!(Meters, "m");

impl Meters {
    /// Convert to kilometers
    #[inline]
    #[must_use]
    pub fn to_kilometers(self) -> Kilometers {
        Kilometers(self.0 / 1000.0)
    }
}

/// Distance in kilometers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Kilometers(f64);

scalar_unit!(Kilometers, "km");

impl Kilometers {
    /// Convert to meters
    #[inline]
    #[must_use]
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * 1000.0)
    }
}
