//! # Validator Property Tests
//!
//! Property-based checks of the per-kind validators: well-formed payloads
//! are always accepted with their fields intact, and payloads missing any
//! required field or carrying a malformed email are always rejected with an
//! issue naming that field.

use darktrader_core::{
    ContactForm, IssueKind, MentorshipApplicationForm, PlanFormat, RegistrationForm, Submission,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z .'-]{1,40}"
}

fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z0-9]{1,12}", "[a-z0-9]{1,12}", "[a-z]{2,6}")
        .prop_map(|(local, domain, tld)| format!("{local}@{domain}.{tld}"))
}

fn plan_strategy() -> impl Strategy<Value = PlanFormat> {
    prop::sample::select(PlanFormat::ALL.to_vec())
}

proptest! {
    #[test]
    fn valid_registrations_are_accepted(
        name in name_strategy(),
        email in email_strategy(),
        plan in plan_strategy(),
    ) {
        let payload = json!({"name": name, "email": email, "format": plan.as_str()});
        let form = RegistrationForm::validate(&payload).unwrap();
        prop_assert_eq!(form.name(), name.as_str());
        prop_assert_eq!(form.email(), email.as_str());
        prop_assert_eq!(form.format(), plan);
    }

    #[test]
    fn registration_missing_any_field_is_rejected(
        name in name_strategy(),
        email in email_strategy(),
        plan in plan_strategy(),
        drop in prop::sample::select(vec!["name", "email", "format"]),
    ) {
        let mut payload = json!({"name": name, "email": email, "format": plan.as_str()});
        payload.as_object_mut().unwrap().remove(drop);
        let err = RegistrationForm::validate(&payload).unwrap_err();
        prop_assert!(err.has_issue_for(drop));
        prop_assert_eq!(err.issues().len(), 1);
        prop_assert_eq!(err.issues()[0].kind, IssueKind::Required);
    }

    #[test]
    fn emails_without_at_sign_are_rejected(
        name in name_strategy(),
        local in "[a-z0-9.\\-]{1,20}",
        message in ".{10,80}",
    ) {
        let payload = json!({"name": name, "email": local, "message": message});
        let err = ContactForm::validate(&payload).unwrap_err();
        prop_assert!(err.has_issue_for("email"));
    }

    #[test]
    fn unknown_plans_are_rejected(
        name in name_strategy(),
        email in email_strategy(),
        plan in "[A-Za-z ]{1,20}",
    ) {
        prop_assume!(plan.parse::<PlanFormat>().is_err());
        let payload = json!({"name": name, "email": email, "format": plan});
        let err = RegistrationForm::validate(&payload).unwrap_err();
        prop_assert!(err.has_issue_for("format"));
        prop_assert_eq!(err.issues()[0].kind, IssueKind::InvalidEnumValue);
    }

    #[test]
    fn contact_message_minimum_is_ten_characters(
        name in name_strategy(),
        email in email_strategy(),
        len in 0usize..30,
    ) {
        let message: String = "x".repeat(len);
        let payload = json!({"name": name, "email": email, "message": message});
        let result = ContactForm::validate(&payload);
        prop_assert_eq!(result.is_ok(), len >= 10);
    }

    #[test]
    fn application_message_minimum_is_twenty_characters(
        name in name_strategy(),
        email in email_strategy(),
        len in 0usize..40,
    ) {
        let payload = json!({
            "name": name,
            "email": email,
            "experience": "Three years of swing trading",
            "message": "y".repeat(len),
        });
        let result = MentorshipApplicationForm::validate(&payload);
        prop_assert_eq!(result.is_ok(), len >= 20);
    }

    #[test]
    fn non_string_fields_are_type_errors(
        email in email_strategy(),
        n in any::<i64>(),
    ) {
        let payload = json!({"name": n, "email": email, "message": "long enough message"});
        let err = ContactForm::validate(&payload).unwrap_err();
        prop_assert_eq!(err.issues()[0].kind, IssueKind::InvalidType);
        prop_assert_eq!(err.issues()[0].path.as_str(), "name");
    }
}

#[test]
fn scalar_payloads_are_rejected_as_a_whole() {
    for payload in [Value::Null, json!(1), json!(true), json!("x"), json!([])] {
        let err = RegistrationForm::validate(&payload).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].path, "");
    }
}
