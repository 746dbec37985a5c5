//! HTML pages served to browsers and entrance scanners.

use chrono::{DateTime, Utc};

use crate::ticket::Ticket;

const INDEX_HTML: &str = include_str!("index.html");

/// Escapes text for safe inclusion in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Registration landing page.
pub fn index_page() -> &'static str {
    INDEX_HTML
}

fn message_page(color: &str, heading: &str, detail: &str) -> String {
    format!(
        r#"<div style="text-align: center; padding: 50px; font-family: Arial;">
    <h2 style="color: {color};">{heading}</h2>
    <p>{detail}</p>
</div>
"#
    )
}

/// Shown when a ticket is validated for the first time.
pub fn valid_ticket_page(ticket: &Ticket, entry_time: DateTime<Utc>) -> String {
    format!(
        r#"<div style="text-align: center; padding: 50px; font-family: Arial;">
    <h1 style="color: green;">✅ Valid Ticket!</h1>
    <h2 style="color: #333; margin-top: 30px;">Welcome to ESYA Fest!</h2>

    <div style="margin: 30px auto; padding: 30px; background: linear-gradient(135deg, #667eea, #764ba2); color: white; border-radius: 15px; max-width: 400px;">
        <h3 style="margin-bottom: 20px;">🎫 Ticket Validated</h3>
        <p><strong>Name:</strong> {name}</p>
        <p><strong>Email:</strong> {email}</p>
        <p><strong>Entry Time:</strong> {entry}</p>
    </div>

    <div style="margin-top: 40px; padding: 20px; background: #d4edda; border-radius: 10px; border: 1px solid #c3e6cb;">
        <p style="color: #155724; font-size: 18px; font-weight: bold;">🎉 Enjoy the fest! 🎉</p>
    </div>
</div>
"#,
        name = escape_html(&ticket.name),
        email = escape_html(&ticket.email),
        entry = format_time(entry_time),
    )
}

/// Shown when a ticket that was already scanned is presented again.
pub fn already_used_page(ticket: &Ticket) -> String {
    let scanned_at = ticket
        .scanned_at
        .map(format_time)
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        r#"<div style="text-align: center; padding: 50px; font-family: Arial;">
    <h2 style="color: orange;">⚠️ Already Used</h2>
    <p>This ticket has already been scanned</p>
    <div style="margin-top: 30px; padding: 20px; background: #f8f9fa; border-radius: 10px;">
        <h3>Ticket Details:</h3>
        <p><strong>Name:</strong> {name}</p>
        <p><strong>Email:</strong> {email}</p>
        <p><strong>Originally scanned:</strong> {scanned_at}</p>
    </div>
</div>
"#,
        name = escape_html(&ticket.name),
        email = escape_html(&ticket.email),
    )
}

pub fn invalid_ticket_page() -> String {
    message_page("red", "❌ Invalid Ticket", "This ticket does not exist")
}

pub fn database_error_page() -> String {
    message_page("red", "❌ Database Error", "Unable to connect to database")
}

pub fn validation_error_page() -> String {
    message_page("red", "❌ Validation Error", "Unable to validate ticket")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ticket(scanned_at: Option<DateTime<Utc>>) -> Ticket {
        Ticket {
            ticket_id: "3f2b8c1e-9a4d-4b7e-8f10-2c3d4e5f6a7b".to_string(),
            name: "Test <User>".to_string(),
            email: "test@example.com".to_string(),
            scanned: scanned_at.is_some(),
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
            scanned_at,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_index_page() {
        let page = index_page();
        assert!(page.contains("ESYA"));
        assert!(page.contains("fetch('/register'"));
    }

    #[test]
    fn test_valid_ticket_page() {
        let entry = Utc.with_ymd_and_hms(2025, 2, 14, 18, 30, 5).unwrap();
        let page = valid_ticket_page(&ticket(Some(entry)), entry);
        assert!(page.contains("Valid Ticket"));
        assert!(page.contains("Test &lt;User&gt;"));
        assert!(page.contains("2025-02-14 18:30:05 UTC"));
    }

    #[test]
    fn test_already_used_page_shows_original_scan() {
        let scanned = Utc.with_ymd_and_hms(2025, 2, 14, 18, 0, 0).unwrap();
        let page = already_used_page(&ticket(Some(scanned)));
        assert!(page.contains("Already Used"));
        assert!(page.contains("2025-02-14 18:00:00 UTC"));
        assert!(!page.contains("<User>"));
    }

    #[test]
    fn test_error_pages() {
        assert!(invalid_ticket_page().contains("Invalid Ticket"));
        assert!(database_error_page().contains("Database Error"));
        assert!(validation_error_page().contains("Validation Error"));
    }
}
