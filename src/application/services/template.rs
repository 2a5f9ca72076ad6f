//! Placeholder substitution for campaign templates.
//!
//! A placeholder is `{name}` where `name` is made of lowercase ASCII letters
//! and underscores. Anything else between braces is left untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::{
    errors::DomainError,
    models::{CUSTOMER_ATTRIBUTES, Customer},
};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

/// Renders `template` for `customer`.
///
/// Missing attributes and unknown placeholders both render as an empty
/// string; partial customer data never blocks a send.
pub fn render(template: &str, customer: &Customer) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            customer.attribute(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

pub fn extract_placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|name| name.as_str()))
        .collect()
}

pub fn validate_template(template: &str) -> Result<(), DomainError> {
    if template.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "template cannot be empty".to_string(),
        ));
    }

    let invalid: Vec<&str> = extract_placeholders(template)
        .into_iter()
        .filter(|name| !CUSTOMER_ATTRIBUTES.contains(name))
        .collect();

    if !invalid.is_empty() {
        return Err(DomainError::InvalidInput(format!(
            "invalid placeholders: {}. Valid placeholders are: {}",
            invalid.join(", "),
            CUSTOMER_ATTRIBUTES.join(", ")
        )));
    }

    Ok(())
}
