//! Facility zone bitmask
//!
//! A zone is one bit position in a 32-bit mask. Zone-scoped sequences fan
//! out over the set bits in ascending order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bitmask over the 32 facility zone slots
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneMask(u32);

impl ZoneMask {
    /// Number of addressable zone slots
    pub const SLOTS: u8 = 32;

    /// No zones
    pub const NONE: ZoneMask = ZoneMask(0);

    /// Every zone in the facility
    pub const ALL: ZoneMask = ZoneMask(u32::MAX);

    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// Build a mask from zone indices; indices outside 0..32 are ignored
    pub fn from_zones(zones: &[u8]) -> Self {
        let bits = zones
            .iter()
            .filter(|zone| **zone < Self::SLOTS)
            .fold(0u32, |acc, zone| acc | (1u32 << zone));
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, zone: u8) -> bool {
        zone < Self::SLOTS && self.0 & (1u32 << zone) != 0
    }

    /// Number of zones set
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate set zones in ascending order
    pub fn iter(self) -> Zones {
        Zones { remaining: self.0 }
    }
}

impl From<u32> for ZoneMask {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for ZoneMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl IntoIterator for ZoneMask {
    type Item = u8;
    type IntoIter = Zones;

    fn into_iter(self) -> Zones {
        self.iter()
    }
}

/// Iterator over the set zones of a [`ZoneMask`]
#[derive(Clone, Debug)]
pub struct Zones {
    remaining: u32,
}

impl Iterator for Zones {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let zone = self.remaining.trailing_zeros() as u8;
        // Clear lowest set bit
        self.remaining &= self.remaining - 1;
        Some(zone)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Zones {}
