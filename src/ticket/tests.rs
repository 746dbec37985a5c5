use super::*;

fn registration(name: &str, email: &str) -> Registration {
    Registration {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[test]
fn test_validate_trims_fields() {
    let valid = registration("  Test User ", " test@example.com\n")
        .validate()
        .expect("should be valid");
    assert_eq!(valid.name, "Test User");
    assert_eq!(valid.email, "test@example.com");
}

#[test]
fn test_validate_missing_fields() {
    assert_eq!(
        registration("", "test@example.com").validate(),
        Err(RegistrationError::MissingFields)
    );
    assert_eq!(
        registration("Test User", "").validate(),
        Err(RegistrationError::MissingFields)
    );
    assert_eq!(
        registration("   ", "   ").validate(),
        Err(RegistrationError::MissingFields)
    );
    assert_eq!(
        Registration::default().validate(),
        Err(RegistrationError::MissingFields)
    );
}

#[test]
fn test_validate_rejects_malformed_email() {
    for email in [
        "invalid-email",
        "a@b",
        "a b@example.com",
        "@example.com",
        "a@@b.com",
        "foo(bar)@example.com",
        "a,b@example.com",
        "a@b..com",
    ] {
        assert_eq!(
            registration("Test User", email).validate(),
            Err(RegistrationError::InvalidEmail),
            "{email} should be rejected"
        );
    }
}

#[test]
fn test_validate_accepts_common_emails() {
    for email in ["a@b.co", "first.last+fest@mail.example.org", "x_y@sub.domain.in"] {
        assert!(
            registration("Test User", email).validate().is_ok(),
            "{email} should be accepted"
        );
    }
}

#[test]
fn test_validate_length_limits() {
    let long_name = "n".repeat(MAX_NAME_LENGTH + 1);
    assert_eq!(
        registration(&long_name, "a@b.co").validate(),
        Err(RegistrationError::NameTooLong)
    );

    let long_email = format!("{}@example.com", "e".repeat(MAX_EMAIL_LENGTH));
    assert_eq!(
        registration("Test User", &long_email).validate(),
        Err(RegistrationError::EmailTooLong)
    );
}

#[test]
fn test_registration_deserializes_missing_fields() {
    let parsed: Registration = serde_json::from_str("{}").expect("should parse");
    assert!(parsed.name.is_empty());
    assert!(parsed.email.is_empty());

    let parsed: Registration =
        serde_json::from_str(r#"{"name":"A","extra":1}"#).expect("should parse");
    assert_eq!(parsed.name, "A");
}

#[test]
fn test_issue_creates_unscanned_ticket() {
    let now = Utc::now();
    let valid = registration("Test User", "test@example.com")
        .validate()
        .expect("valid");
    let ticket = Ticket::issue(valid, now);

    assert!(!ticket.scanned);
    assert!(ticket.scanned_at.is_none());
    assert_eq!(ticket.created_at, now);
    assert_eq!(ticket.ticket_id.len(), 36);
    assert!(Uuid::parse_str(&ticket.ticket_id).is_ok());
}

#[test]
fn test_issue_ids_are_unique() {
    let valid = registration("Test User", "test@example.com")
        .validate()
        .expect("valid");
    let a = Ticket::issue(valid.clone(), Utc::now());
    let b = Ticket::issue(valid, Utc::now());
    assert_ne!(a.ticket_id, b.ticket_id);
}

#[test]
fn test_short_id() {
    assert_eq!(short_id("0123456789abcdef"), "01234567");
    assert_eq!(short_id("abc"), "abc");
    assert_eq!(short_id(""), "");
}
