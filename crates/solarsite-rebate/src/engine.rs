use serde::{Deserialize, Serialize};
use tracing::debug;

use solarsite_core::config::RebateSettings;
use solarsite_core::error::{Error, Result};
use solarsite_core::money::Money;

use crate::zones::{self, PostcodeZoneMap, Zone, ZoneFactors};

/// Lookup tables and prices a calculation runs against.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct RebateTables {
    zones: PostcodeZoneMap,
    factors: ZoneFactors,
    deeming_years: u32,
    stc_price: Money,
    state_rebate: Money,
}

impl RebateTables {
    pub fn new(zones: PostcodeZoneMap, factors: ZoneFactors, deeming_years: u32, stc_price: Money, state_rebate: Money) -> Self {
        Self { zones, factors, deeming_years, stc_price, state_rebate }
    }

    /// Default postcode map with prices and factors taken from settings.
    pub fn from_settings(settings: &RebateSettings) -> Self {
        Self::new(
            PostcodeZoneMap::default(),
            ZoneFactors::new(settings.zone_factors),
            settings.deeming_years,
            Money::from_cents(settings.stc_price_cents),
            Money::from_cents(settings.state_rebate_cents),
        )
    }
}

impl Default for RebateTables {
    fn default() -> Self {
        Self::from_settings(&RebateSettings::default())
    }
}

/// The four state rebate conditions. All must hold for the rebate to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityChecklist {
    pub owner_occupier: bool,
    pub property_under_value_cap: bool,
    pub income_under_cap: bool,
    pub no_previous_rebate: bool,
}

impl EligibilityChecklist {
    pub fn from_flags(flags: [bool; 4]) -> Self {
        let [owner_occupier, property_under_value_cap, income_under_cap, no_previous_rebate] = flags;
        Self { owner_occupier, property_under_value_cap, income_under_cap, no_previous_rebate }
    }

    pub fn all_met() -> Self {
        Self::from_flags([true; 4])
    }

    pub fn flags(&self) -> [bool; 4] {
        [self.owner_occupier, self.property_under_value_cap, self.income_under_cap, self.no_previous_rebate]
    }

    pub fn met_count(&self) -> usize {
        self.flags().iter().filter(|f| **f).count()
    }

    pub fn is_eligible(&self) -> bool {
        self.flags().iter().all(|f| *f)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebateInput {
    pub postcode: String,
    pub panel_count: u32,
    /// Watts per panel.
    pub module_wattage: f64,
    pub include_battery: bool,
    /// Ignored unless `include_battery` is set.
    #[serde(default)]
    pub battery_size_kw: f64,
    #[serde(default)]
    pub eligibility: EligibilityChecklist,
}

impl RebateInput {
    pub fn solar(postcode: impl Into<String>, panel_count: u32, module_wattage: f64) -> Self {
        Self {
            postcode: postcode.into(),
            panel_count,
            module_wattage,
            include_battery: false,
            battery_size_kw: 0.0,
            eligibility: EligibilityChecklist::default(),
        }
    }

    pub fn with_battery(mut self, battery_size_kw: f64) -> Self {
        self.include_battery = true;
        self.battery_size_kw = battery_size_kw;
        self
    }

    pub fn with_eligibility(mut self, eligibility: EligibilityChecklist) -> Self {
        self.eligibility = eligibility;
        self
    }

    /// Form-level checks run before `calculate`.
    ///
    /// An unknown postcode is not an error here: it is a well-formed input
    /// for which no estimate exists.
    pub fn validate(&self) -> Result<()> {
        if zones::normalize(&self.postcode).is_none() {
            return Err(Error::InvalidInput(format!("postcode '{}' must be 4 digits", self.postcode)));
        }
        if self.panel_count == 0 {
            return Err(Error::InvalidInput("panel count must be at least 1".to_string()));
        }
        if !self.module_wattage.is_finite() || self.module_wattage <= 0.0 {
            return Err(Error::InvalidInput(format!("module wattage must be positive, got {}", self.module_wattage)));
        }
        if self.include_battery && (!self.battery_size_kw.is_finite() || self.battery_size_kw <= 0.0) {
            return Err(Error::InvalidInput(format!("battery size must be positive, got {}", self.battery_size_kw)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebateResult {
    pub zone: Zone,
    pub system_size_kw: f64,
    pub solar_certificates: u64,
    pub solar_value: Money,
    pub battery_certificates: u64,
    pub battery_value: Money,
    pub state_rebate: Money,
    pub total: Money,
}

/// Estimate certificates and rebates for a proposed system.
///
/// Returns `None` when the postcode has no zone. Certificate counts are
/// floored before pricing so dollar values are whole multiples of the STC
/// price.
pub fn calculate(tables: &RebateTables, input: &RebateInput) -> Option<RebateResult> {
    let Some(zone) = tables.zones.zone(&input.postcode) else {
        debug!(postcode = %input.postcode, "no zone for postcode");
        return None;
    };
    let factor = tables.factors.factor(zone);
    let years = f64::from(tables.deeming_years);

    let system_size_kw = f64::from(input.panel_count) * input.module_wattage / 1000.0;
    let solar_certificates = whole_certificates(system_size_kw * factor * years);
    let solar_value = tables.stc_price * solar_certificates;

    let battery_certificates = if input.include_battery {
        whole_certificates(input.battery_size_kw * factor * years)
    } else {
        0
    };
    let battery_value = tables.stc_price * battery_certificates;

    let state_rebate = if input.eligibility.is_eligible() { tables.state_rebate } else { Money::ZERO };
    let total = solar_value + battery_value + state_rebate;

    debug!(%zone, system_size_kw, solar_certificates, battery_certificates, total = %total, "rebate calculated");
    Some(RebateResult {
        zone,
        system_size_kw,
        solar_certificates,
        solar_value,
        battery_certificates,
        battery_value,
        state_rebate,
        total,
    })
}

/// Drop the fractional certificate; never round up.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_certificates(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 { raw.floor() as u64 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_certificates_are_dropped() {
        assert_eq!(whole_certificates(0.8118), 0);
        assert_eq!(whole_certificates(46.999), 46);
        assert_eq!(whole_certificates(47.0), 47);
    }

    #[test]
    fn nonsense_raw_values_give_zero() {
        assert_eq!(whole_certificates(-3.2), 0);
        assert_eq!(whole_certificates(f64::NAN), 0);
        assert_eq!(whole_certificates(f64::INFINITY), 0);
    }

    #[test]
    fn checklist_counts_flags() {
        let checklist = EligibilityChecklist::from_flags([true, false, true, true]);
        assert_eq!(checklist.met_count(), 3);
        assert!(!checklist.is_eligible());
        assert!(EligibilityChecklist::all_met().is_eligible());
    }

    #[test]
    fn validate_rejects_bad_form_values() {
        assert!(RebateInput::solar("3000", 0, 440.0).validate().is_err());
        assert!(RebateInput::solar("3000", 10, 0.0).validate().is_err());
        assert!(RebateInput::solar("30", 10, 440.0).validate().is_err());
        assert!(RebateInput::solar("3000", 10, 440.0).with_battery(0.0).validate().is_err());
        assert!(RebateInput::solar("9999", 10, 440.0).validate().is_ok());
    }
}
