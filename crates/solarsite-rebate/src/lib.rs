//! solarsite-rebate
//!
//! Small-scale technology certificate (STC) and state rebate arithmetic for
//! solar and battery quotes. Everything here is a pure function over an
//! explicit `RebateTables` value built once at startup.

pub mod engine;
pub mod zones;

pub use engine::{calculate, EligibilityChecklist, RebateInput, RebateResult, RebateTables};
pub use zones::{PostcodeZoneMap, Zone, ZoneFactors};
