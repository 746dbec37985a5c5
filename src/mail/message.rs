//! Ticket email composition.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::{Address, Message};

use super::TicketEmail;
use crate::config::SENDER_DISPLAY_NAME;
use crate::error_handling::MailError;
use crate::pages::escape_html;
use crate::ticket::short_id;

pub fn subject_line(ticket_id: &str) -> String {
    format!("🎉 Your ESYA Fest Ticket - {}", short_id(ticket_id))
}

pub fn attachment_filename(ticket_id: &str) -> String {
    format!("ESYA_Ticket_{}.png", short_id(ticket_id))
}

/// Assembles the full MIME message: HTML body plus the QR code as a PNG attachment.
pub fn build_ticket_message(sender: &str, ticket: &TicketEmail) -> Result<Message, MailError> {
    let from = Mailbox::new(
        Some(SENDER_DISPLAY_NAME.to_string()),
        sender.parse::<Address>()?,
    );
    let to = Mailbox::new(None, ticket.email.parse::<Address>()?);
    let png: ContentType = "image/png".parse()?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(subject_line(&ticket.ticket_id))
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::html(render_ticket_html(
                    &ticket.name,
                    &ticket.email,
                    &ticket.ticket_id,
                )))
                .singlepart(
                    Attachment::new(attachment_filename(&ticket.ticket_id))
                        .body(ticket.qr_png.clone(), png),
                ),
        )?;
    Ok(message)
}

/// Renders the HTML body of a ticket email. All values are escaped.
pub fn render_ticket_html(name: &str, email: &str, ticket_id: &str) -> String {
    let name = escape_html(name);
    let email = escape_html(email);
    let ticket_id = escape_html(ticket_id);
    format!(
        r#"<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center;">
        <h1 style="margin: 0; font-size: 28px;">🎊 ESYA FEST 2025 🎊</h1>
        <p style="margin: 10px 0 0 0; font-size: 16px;">Your Digital Ticket</p>
    </div>

    <div style="padding: 30px; background: #f8f9fa;">
        <h2 style="color: #333; margin-bottom: 20px;">Hello {name}! 👋</h2>
        <p style="color: #555; font-size: 16px; line-height: 1.6;">
            Your registration for ESYA Fest is confirmed.
            Your ticket is attached as a QR code.
        </p>

        <div style="background: white; padding: 20px; border-radius: 10px; margin: 20px 0; border-left: 4px solid #667eea;">
            <h3 style="color: #333; margin-top: 0;">📋 Ticket Details</h3>
            <p><strong>Name:</strong> {name}</p>
            <p><strong>Email:</strong> {email}</p>
            <p><strong>Ticket ID:</strong> {ticket_id}</p>
            <p><strong>Status:</strong> ✅ Active</p>
        </div>

        <div style="background: #e3f2fd; padding: 20px; border-radius: 10px; margin: 20px 0;">
            <h3 style="color: #1976d2; margin-top: 0;">📱 How to Use Your Ticket</h3>
            <ol style="color: #555; line-height: 1.8;">
                <li>Save the QR code image to your phone</li>
                <li>Present the QR code at the fest entrance</li>
                <li>Our scanner will validate your entry</li>
                <li>Enjoy the fest! 🎉</li>
            </ol>
        </div>

        <div style="background: #fff3e0; padding: 15px; border-radius: 8px; margin: 20px 0;">
            <p style="color: #f57c00; margin: 0; font-weight: bold;">
                ⚠️ Important: This ticket can only be used once. Keep it safe!
            </p>
        </div>

        <p style="color: #555; font-size: 14px; margin-top: 30px;">
            See you at ESYA Fest! 🚀<br>
            - The ESYA Team
        </p>
    </div>

    <div style="background: #333; color: white; padding: 20px; text-align: center; font-size: 12px;">
        <p>ESYA Fest 2025 | Powered by QR Ticketing System</p>
    </div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET_ID: &str = "0123abcd-9a4d-4b7e-8f10-2c3d4e5f6a7b";

    fn ticket() -> TicketEmail {
        TicketEmail {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            ticket_id: TICKET_ID.to_string(),
            qr_png: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn test_subject_and_filename_use_short_id() {
        assert_eq!(subject_line(TICKET_ID), "🎉 Your ESYA Fest Ticket - 0123abcd");
        assert_eq!(attachment_filename(TICKET_ID), "ESYA_Ticket_0123abcd.png");
    }

    #[test]
    fn test_render_ticket_html_contains_details() {
        let html = render_ticket_html("Test User", "test@example.com", TICKET_ID);
        assert!(html.contains("Hello Test User!"));
        assert!(html.contains("<strong>Email:</strong> test@example.com"));
        assert!(html.contains(TICKET_ID));
        assert!(html.contains("can only be used once"));
    }

    #[test]
    fn test_render_ticket_html_escapes_name() {
        let html = render_ticket_html("<script>alert(1)</script>", "a@b.co", TICKET_ID);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_build_ticket_message() {
        let message = build_ticket_message("sender@example.com", &ticket()).expect("should build");
        let formatted = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(formatted.contains("sender@example.com"));
        assert!(formatted.contains("test@example.com"));
        assert!(formatted.contains("ESYA_Ticket_0123abcd.png"));
        assert!(formatted.contains("image/png"));
        assert!(formatted.contains("multipart/mixed"));
    }

    #[test]
    fn test_build_ticket_message_rejects_bad_recipient() {
        let mut bad = ticket();
        bad.email = "not-an-address".to_string();
        let result = build_ticket_message("sender@example.com", &bad);
        assert!(matches!(result, Err(MailError::Address(_))));
    }

    #[test]
    fn test_build_ticket_message_rejects_bad_sender() {
        let result = build_ticket_message("nobody", &ticket());
        assert!(matches!(result, Err(MailError::Address(_))));
    }
}
