//! Best-effort extraction of customer details from free-text chat messages.
//!
//! Each field has an ordered list of patterns and the first one that matches
//! wins. When a pattern has a capture group, group 1 is the value; otherwise
//! the whole match is. Fields already known are never overwritten. This is a
//! heuristic: it will miss some details and occasionally pick up wrong ones.

use regex::Regex;
use tracing::debug;

use solarsite_core::error::{Error, Result};
use solarsite_core::types::{CustomerInfo, ServiceInterest};

const NAME_PATTERNS: &[&str] = &[
    r"(?i:\bmy name is)\s+([A-Za-z][a-z'-]+(?:\s+[A-Z][a-z'-]+)?)",
    r"(?i:\bi am|\bi'm|\bim)\s+([A-Z][a-z'-]+(?:\s+[A-Z][a-z'-]+)?)",
    r"(?i:\bthis is|\bcall me|\bname's)\s+([A-Z][a-z'-]+)",
];

const EMAIL_PATTERNS: &[&str] = &[r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"];

const PHONE_PATTERNS: &[&str] = &[
    // mobile
    r"(?:\+61\s?|\b0)4\d{2}[\s-]?\d{3}[\s-]?\d{3}\b",
    // landline with area code
    r"(?:\+61\s?|\b0)[2378][\s-]?\d{4}[\s-]?\d{4}\b",
];

const ADDRESS_PATTERNS: &[&str] = &[
    r"(?i)\b\d{1,5}[a-z]?\s+(?:[a-z]+\s+){1,3}(?:street|st|road|rd|avenue|ave|drive|dr|court|ct|crescent|cres|place|pl|lane|ln|boulevard|blvd|parade|pde|highway|hwy|close|terrace|tce|way)\b(?:,\s*[a-z]+(?:\s[a-z]+)?)?(?:\s+(?:vic|nsw|qld|sa|wa|tas|nt|act))?(?:\s+\d{4})?",
    r"(?i)\b(?:i live (?:in|at)|my address is|address is|located (?:in|at))\s+([^.!?\n]{3,60})",
];

const SERVICE_PATTERNS: &[(&str, ServiceInterest)] = &[
    (r"(?i)\bsolar\b.*\bbatter(?:y|ies)\b|\bbatter(?:y|ies)\b.*\bsolar\b", ServiceInterest::SolarAndBattery),
    (r"(?i)\bev\b|\belectric (?:car|vehicle)|\bcar charg|\bwallbox\b", ServiceInterest::EvCharger),
    (r"(?i)\bbatter(?:y|ies)\b|\bpowerwall\b|\benergy storage\b", ServiceInterest::Battery),
    (r"(?i)\bsolar\b|\bpanels?\b|\binverter\b|\bpv\b", ServiceInterest::Solar),
];

#[derive(Debug, Clone)]
pub struct CustomerInfoExtractor {
    name: Vec<Regex>,
    email: Vec<Regex>,
    phone: Vec<Regex>,
    address: Vec<Regex>,
    service: Vec<(Regex, ServiceInterest)>,
}

impl CustomerInfoExtractor {
    pub fn new() -> Result<Self> {
        let service = SERVICE_PATTERNS
            .iter()
            .map(|(pattern, interest)| -> Result<(Regex, ServiceInterest)> { Ok((compile(pattern)?, *interest)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: compile_all(NAME_PATTERNS)?,
            email: compile_all(EMAIL_PATTERNS)?,
            phone: compile_all(PHONE_PATTERNS)?,
            address: compile_all(ADDRESS_PATTERNS)?,
            service,
        })
    }

    /// Fill in whatever `existing` is missing from `message`.
    pub fn extract(&self, message: &str, existing: &CustomerInfo) -> CustomerInfo {
        let mut info = existing.clone();
        if info.name.is_none() {
            info.name = first_match(&self.name, message);
        }
        if info.email.is_none() {
            info.email = first_match(&self.email, message).map(|e| e.to_lowercase());
        }
        if info.phone.is_none() {
            info.phone = first_match(&self.phone, message)
                .map(|p| p.chars().filter(|c| !c.is_whitespace() && *c != '-').collect());
        }
        if info.address.is_none() {
            info.address = first_match(&self.address, message);
        }
        if info.service.is_none() {
            info.service = self.service.iter().find(|(re, _)| re.is_match(message)).map(|(_, interest)| *interest);
        }
        if info != *existing {
            debug!(
                name = info.name.is_some(),
                email = info.email.is_some(),
                phone = info.phone.is_some(),
                address = info.address.is_some(),
                service = ?info.service,
                "customer info updated"
            );
        }
        info
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Operation(format!("failed to compile pattern {pattern:?}: {e}")))
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns.iter().map(|p| compile(p)).collect()
}

fn first_match(patterns: &[Regex], message: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        let caps = re.captures(message)?;
        let value = caps.get(1).or_else(|| caps.get(0))?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> CustomerInfoExtractor {
        CustomerInfoExtractor::new().expect("patterns compile")
    }

    #[test]
    fn name_from_introduction() {
        let info = extractor().extract("Hi, my name is Sarah Nguyen and I want a quote", &CustomerInfo::default());
        assert_eq!(info.name.as_deref(), Some("Sarah Nguyen"));
    }

    #[test]
    fn name_needs_capital_after_i_am() {
        let e = extractor();
        assert_eq!(e.extract("I'm interested in solar", &CustomerInfo::default()).name, None);
        assert_eq!(e.extract("I'm Tom", &CustomerInfo::default()).name.as_deref(), Some("Tom"));
    }

    #[test]
    fn email_is_lowercased() {
        let info = extractor().extract("reach me at Sarah.N@Example.com.au please", &CustomerInfo::default());
        assert_eq!(info.email.as_deref(), Some("sarah.n@example.com.au"));
    }

    #[test]
    fn phone_separators_are_removed() {
        let e = extractor();
        let mobile = e.extract("call 0412 345 678 after 5", &CustomerInfo::default());
        assert_eq!(mobile.phone.as_deref(), Some("0412345678"));
        let landline = e.extract("home is 03-9876-5432", &CustomerInfo::default());
        assert_eq!(landline.phone.as_deref(), Some("0398765432"));
    }

    #[test]
    fn street_address_with_suburb_and_postcode() {
        let info = extractor().extract("We're at 12 Smith Street, Richmond VIC 3121.", &CustomerInfo::default());
        assert_eq!(info.address.as_deref(), Some("12 Smith Street, Richmond VIC 3121"));
    }

    #[test]
    fn address_from_phrase() {
        let info = extractor().extract("I live in Geelong West. Can you help?", &CustomerInfo::default());
        assert_eq!(info.address.as_deref(), Some("Geelong West"));
    }

    #[test]
    fn service_patterns_are_ordered() {
        let e = extractor();
        let none = CustomerInfo::default();
        assert_eq!(e.extract("solar with a battery", &none).service, Some(ServiceInterest::SolarAndBattery));
        assert_eq!(e.extract("a charger for my electric car", &none).service, Some(ServiceInterest::EvCharger));
        assert_eq!(e.extract("how big are batteries?", &none).service, Some(ServiceInterest::Battery));
        assert_eq!(e.extract("need new panels", &none).service, Some(ServiceInterest::Solar));
        assert_eq!(e.extract("hello there", &none).service, None);
    }

    #[test]
    fn known_fields_are_never_overwritten() {
        let existing = CustomerInfo {
            name: Some("Alex".to_string()),
            email: Some("alex@example.com".to_string()),
            ..CustomerInfo::default()
        };
        let info = extractor().extract("my name is Sam, sam@example.com, 0400 111 222", &existing);
        assert_eq!(info.name.as_deref(), Some("Alex"));
        assert_eq!(info.email.as_deref(), Some("alex@example.com"));
        assert_eq!(info.phone.as_deref(), Some("0400111222"));
    }
}
