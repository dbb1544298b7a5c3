//! Email status report over an unauthenticated SMTP relay.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;

use super::text::render_text;
use crate::bulletin::BulletinStatus;
use crate::error::{ReportError, Result};
use crate::inventory::Inventory;

/// Subject line of every status report.
pub const SUBJECT: &str = "IPS Status Report";

/// Banner prepended when the bulletin has not been mailed before.
pub const NEW_BULLETIN_ALERT: &str = "*** NEW CISCO IPS BULLETIN RELEASED ***\n";

/// Sender, recipient and relay for the status report.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub from: String,
    pub to: String,
    pub smtp_server: String,
    pub smtp_port: u16,
}

impl EmailConfig {
    /// Relay on the standard SMTP port.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        smtp_server: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            smtp_server: smtp_server.into(),
            smtp_port: 25,
        }
    }

    /// Set the relay port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.smtp_port = port;
        self
    }
}

/// Plain-text body: optional alert, bulletin, then the inventory.
pub fn compose_body(inventory: &Inventory, bulletin: &BulletinStatus) -> String {
    let mut body = String::new();
    if bulletin.is_new() {
        body.push_str(NEW_BULLETIN_ALERT);
    }
    body.push_str(&bulletin.text);
    body.push('\n');
    body.push_str(&render_text(inventory));
    body.push('\n');
    body
}

fn mailbox(address: &str) -> Result<Mailbox> {
    address.parse().map_err(|source| {
        ReportError::Address {
            address: address.to_string(),
            source,
        }
        .into()
    })
}

/// Assemble the report message.
pub fn build_message(
    config: &EmailConfig,
    inventory: &Inventory,
    bulletin: &BulletinStatus,
) -> Result<Message> {
    let message = Message::builder()
        .from(mailbox(&config.from)?)
        .to(mailbox(&config.to)?)
        .subject(SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(compose_body(inventory, bulletin))
        .map_err(ReportError::Message)?;
    Ok(message)
}

/// Build and send the report through the configured relay.
pub async fn send_report(
    config: &EmailConfig,
    inventory: &Inventory,
    bulletin: &BulletinStatus,
) -> Result<()> {
    let message = build_message(config, inventory, bulletin)?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_server)
        .port(config.smtp_port)
        .build();

    mailer.send(message).await.map_err(ReportError::Smtp)?;

    info!(
        "status report sent to {} via {}:{}",
        config.to, config.smtp_server, config.smtp_port
    );
    Ok(())
}
