use solarsite_core::config::ChatSettings;
use solarsite_core::traits::Prompt;
use solarsite_core::types::{ChatMessage, CustomerInfo};

/// Older turns are dropped so the prompt stays bounded.
pub const MAX_HISTORY: usize = 10;

pub fn build_prompt(
    settings: &ChatSettings,
    context: &str,
    customer: &CustomerInfo,
    history: &[ChatMessage],
    message: &str,
) -> Prompt {
    let mut system = format!(
        "You are the customer support assistant for {}. Answer briefly and only from the business information below. \
         If it does not cover the question, say so and offer a free consultation.\n\nBusiness information:\n",
        settings.business_name
    );
    if context.is_empty() {
        system.push_str(&settings.fallback_message);
    } else {
        system.push_str(context);
    }
    if !customer.is_empty() {
        system.push_str("\n\nKnown customer details:");
        push_detail(&mut system, "name", customer.name.as_deref());
        push_detail(&mut system, "email", customer.email.as_deref());
        push_detail(&mut system, "phone", customer.phone.as_deref());
        push_detail(&mut system, "address", customer.address.as_deref());
        if let Some(service) = customer.service {
            system.push_str(&format!("\n- interested in: {service}"));
        }
    }
    if !customer.is_contactable() {
        system.push_str("\n\nIf the customer wants a quote, ask for their name and a phone number or email.");
    }

    let skip = history.len().saturating_sub(MAX_HISTORY);
    Prompt { system, history: history[skip..].to_vec(), user: message.trim().to_string() }
}

fn push_detail(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!("\n- {label}: {value}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_fallback_when_no_context() {
        let settings = ChatSettings::default();
        let prompt = build_prompt(&settings, "", &CustomerInfo::default(), &[], " hi ");
        assert!(prompt.system.contains(&settings.fallback_message));
        assert!(prompt.system.contains("ask for their name"));
        assert_eq!(prompt.user, "hi");
    }

    #[test]
    fn lists_known_customer_details() {
        let customer = CustomerInfo {
            name: Some("Sam".to_string()),
            phone: Some("0400111222".to_string()),
            ..CustomerInfo::default()
        };
        let prompt = build_prompt(&ChatSettings::default(), "## Batteries\nStore it.", &customer, &[], "ok");
        assert!(prompt.system.contains("## Batteries\nStore it."));
        assert!(prompt.system.contains("- name: Sam"));
        assert!(prompt.system.contains("- phone: 0400111222"));
        assert!(!prompt.system.contains("- email"));
        assert!(!prompt.system.contains("ask for their name"));
    }

    #[test]
    fn keeps_only_recent_history() {
        let history: Vec<ChatMessage> = (0..14).map(|i| ChatMessage::user(format!("m{i}"))).collect();
        let prompt = build_prompt(&ChatSettings::default(), "", &CustomerInfo::default(), &history, "next");
        assert_eq!(prompt.history.len(), MAX_HISTORY);
        assert_eq!(prompt.history[0].content, "m4");
    }
}
