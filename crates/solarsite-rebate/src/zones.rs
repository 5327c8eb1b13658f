//! Postcode to STC zone lookup and per-zone rating factors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Regulator zone; zone 1 has the highest solar yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Zone {
    One,
    Two,
    Three,
    Four,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::One, Zone::Two, Zone::Three, Zone::Four];

    pub fn number(self) -> u8 {
        match self {
            Zone::One => 1,
            Zone::Two => 2,
            Zone::Three => 3,
            Zone::Four => 4,
        }
    }

    fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl From<Zone> for u8 {
    fn from(zone: Zone) -> u8 {
        zone.number()
    }
}

impl TryFrom<u8> for Zone {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Zone::One),
            2 => Ok(Zone::Two),
            3 => Ok(Zone::Three),
            4 => Ok(Zone::Four),
            other => Err(format!("no STC zone {other}")),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}", self.number())
    }
}

/// Certificates per kW of capacity per deeming year, indexed by zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneFactors([f64; 4]);

impl ZoneFactors {
    pub const fn new(factors: [f64; 4]) -> Self {
        Self(factors)
    }

    pub fn factor(&self, zone: Zone) -> f64 {
        self.0[zone.index()]
    }
}

impl Default for ZoneFactors {
    fn default() -> Self {
        Self([1.622, 1.536, 1.382, 1.185])
    }
}

/// Inclusive postcode ranges. Later rows override earlier ones.
const DEFAULT_RANGES: &[(u16, u16, Zone)] = &[
    // NT
    (800, 899, Zone::Two),
    (870, 879, Zone::One),
    // NSW and ACT
    (1000, 2999, Zone::Three),
    // VIC
    (3000, 3999, Zone::Four),
    (8000, 8999, Zone::Four),
    // QLD
    (4000, 4999, Zone::Three),
    (9000, 9799, Zone::Three),
    // SA
    (5000, 5799, Zone::Three),
    (5700, 5734, Zone::Two),
    // WA
    (6000, 6797, Zone::Three),
    (6700, 6770, Zone::Two),
    // TAS
    (7000, 7999, Zone::Four),
];

/// Immutable lookup from a 4-digit postcode to its zone.
#[derive(Debug, Clone)]
pub struct PostcodeZoneMap {
    zones: HashMap<String, Zone>,
}

impl PostcodeZoneMap {
    /// An empty map; every lookup misses.
    pub fn new() -> Self {
        Self { zones: HashMap::new() }
    }

    pub fn from_ranges(ranges: &[(u16, u16, Zone)]) -> Self {
        let mut map = Self::new();
        for &(start, end, zone) in ranges {
            for postcode in start..=end {
                map.zones.insert(format!("{postcode:04}"), zone);
            }
        }
        map
    }

    /// Add or replace a single postcode. Non 4-digit input is ignored.
    pub fn insert(&mut self, postcode: &str, zone: Zone) -> bool {
        match normalize(postcode) {
            Some(code) => {
                self.zones.insert(code.to_string(), zone);
                true
            }
            None => false,
        }
    }

    pub fn zone(&self, postcode: &str) -> Option<Zone> {
        normalize(postcode).and_then(|code| self.zones.get(code).copied())
    }
}

impl Default for PostcodeZoneMap {
    fn default() -> Self {
        Self::from_ranges(DEFAULT_RANGES)
    }
}

/// Trimmed postcode if it is exactly four ASCII digits.
pub fn normalize(postcode: &str) -> Option<&str> {
    let code = postcode.trim();
    (code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())).then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_covers_capitals() {
        let map = PostcodeZoneMap::default();
        assert_eq!(map.zone("3000"), Some(Zone::Four));
        assert_eq!(map.zone("2000"), Some(Zone::Three));
        assert_eq!(map.zone("0800"), Some(Zone::Two));
        assert_eq!(map.zone("0870"), Some(Zone::One));
        assert_eq!(map.zone("7000"), Some(Zone::Four));
    }

    #[test]
    fn unknown_and_malformed_postcodes_have_no_zone() {
        let map = PostcodeZoneMap::default();
        assert_eq!(map.zone("9999"), None);
        assert_eq!(map.zone("300"), None);
        assert_eq!(map.zone("30000"), None);
        assert_eq!(map.zone("30a0"), None);
        assert_eq!(map.zone(""), None);
    }

    #[test]
    fn lookup_trims_whitespace() {
        assert_eq!(PostcodeZoneMap::default().zone(" 3156 "), Some(Zone::Four));
    }

    #[test]
    fn insert_overrides_range_entry() {
        let mut map = PostcodeZoneMap::default();
        assert!(map.insert("3000", Zone::One));
        assert!(!map.insert("abcd", Zone::One));
        assert_eq!(map.zone("3000"), Some(Zone::One));
    }

    #[test]
    fn zone_round_trips_through_number() {
        for zone in Zone::ALL {
            assert_eq!(Zone::try_from(zone.number()), Ok(zone));
        }
        assert!(Zone::try_from(5).is_err());
    }
}
