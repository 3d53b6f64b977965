//! Signup form validation.
//!
//! Pure rules over [`SignupForm`]: every field must be non-empty after
//! trimming, and the email must be an institutional address. Same input
//! always yields the same [`FieldErrors`], no side effects, no failure
//! paths.
//!
//! # Example
//!
//! ```
//! use rostersync::{validate_signup, SignupForm};
//!
//! let form = SignupForm {
//!     name: "Ada Lovelace".into(),
//!     email: "al1815@rit.edu".into(),
//!     major: "Software Engineering".into(),
//!     year: "2nd".into(),
//! };
//! assert!(validate_signup(&form).is_empty());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FieldErrors, SignupForm};

/// Institutional email domain accepted by default.
pub const DEFAULT_EMAIL_DOMAIN: &str = "rit.edu";

/// Allowed characters for the local part of an email address.
static LOCAL_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+$").expect("local-part pattern is valid"));

/// Validate a signup form against the default institutional domain.
pub fn validate_signup(form: &SignupForm) -> FieldErrors {
    validate_signup_with_domain(form, DEFAULT_EMAIL_DOMAIN)
}

/// Validate a signup form against an explicit institutional domain.
///
/// Returns a [`FieldErrors`] with exactly one entry per invalid field.
pub fn validate_signup_with_domain(form: &SignupForm, domain: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.name.trim().is_empty() {
        errors.name = Some("Name is required".into());
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.email = Some("Email is required".into());
    } else if !is_institutional_email(email, domain) {
        errors.email = Some(format!("Email must be a valid @{} address", domain));
    }

    if form.major.trim().is_empty() {
        errors.major = Some("Major is required".into());
    }

    if form.year.trim().is_empty() {
        errors.year = Some("Year is required".into());
    }

    errors
}

/// Whether `value` is `local@domain` with a well-formed local part.
///
/// The domain comparison is case-insensitive; subdomains do not match.
pub fn is_institutional_email(value: &str, domain: &str) -> bool {
    match value.rsplit_once('@') {
        Some((local, dom)) => dom.eq_ignore_ascii_case(domain) && LOCAL_PART.is_match(local),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            name: "Ada Lovelace".into(),
            email: "abc1234@rit.edu".into(),
            major: "Software Engineering".into(),
            year: "2nd".into(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate_signup(&valid_form()).is_empty());
    }

    #[test]
    fn test_empty_name_yields_only_name_error() {
        let mut form = valid_form();
        form.name = "".into();

        let errors = validate_signup(&form);
        assert!(errors.name.is_some());
        assert!(errors.email.is_none());
        assert!(errors.major.is_none());
        assert!(errors.year.is_none());
    }

    #[test]
    fn test_whitespace_only_field_is_invalid() {
        let mut form = valid_form();
        form.major = "   ".into();
        assert!(validate_signup(&form).major.is_some());
    }

    #[test]
    fn test_institutional_email_accepted() {
        let mut form = valid_form();
        form.email = "abc1234@rit.edu".into();
        assert!(validate_signup(&form).email.is_none());
    }

    #[test]
    fn test_external_domain_rejected() {
        let mut form = valid_form();
        form.email = "abc1234@gmail.com".into();

        let errors = validate_signup(&form);
        assert!(errors.email.is_some());
        assert!(errors.email.unwrap().contains("rit.edu"));
    }

    #[test]
    fn test_domain_comparison_case_insensitive() {
        assert!(is_institutional_email("abc1234@RIT.EDU", "rit.edu"));
    }

    #[test]
    fn test_subdomain_does_not_match() {
        assert!(!is_institutional_email("abc1234@mail.rit.edu", "rit.edu"));
    }

    #[test]
    fn test_missing_at_sign_rejected() {
        assert!(!is_institutional_email("abc1234.rit.edu", "rit.edu"));
    }

    #[test]
    fn test_empty_local_part_rejected() {
        assert!(!is_institutional_email("@rit.edu", "rit.edu"));
    }

    #[test]
    fn test_custom_domain() {
        let mut form = valid_form();
        form.email = "mentor@example.org".into();
        assert!(validate_signup_with_domain(&form, "example.org").is_empty());
        assert!(validate_signup_with_domain(&form, "rit.edu").email.is_some());
    }

    #[test]
    fn test_all_fields_empty_yields_all_errors() {
        let errors = validate_signup(&SignupForm::default());
        assert_eq!(errors.entries().len(), 4);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mut form = valid_form();
        form.email = "abc1234@gmail.com".into();
        assert_eq!(validate_signup(&form), validate_signup(&form));
    }
}
