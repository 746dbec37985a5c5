//! Ticket email delivery.
//!
//! `TicketMailer` is the seam between the HTTP handlers and the outside
//! world: the server talks to an `SmtpMailer` in production and tests plug in
//! their own implementation.

mod message;
mod smtp;

use async_trait::async_trait;

use crate::error_handling::MailError;

pub use message::{attachment_filename, build_ticket_message, render_ticket_html, subject_line};
pub use smtp::SmtpMailer;

/// Everything needed to send one ticket.
#[derive(Debug, Clone)]
pub struct TicketEmail {
    pub name: String,
    pub email: String,
    pub ticket_id: String,
    /// QR code PNG, attached to the message
    pub qr_png: Vec<u8>,
}

/// Delivers ticket emails.
#[async_trait]
pub trait TicketMailer: Send + Sync {
    async fn send_ticket(&self, email: &TicketEmail) -> Result<(), MailError>;
}
