//! Email delivery of the rendered digest.
//!
//! [`SmtpMailer`] submits over implicit TLS (port 465) with login
//! credentials. The message is `multipart/alternative` with the plain-text
//! fallback first and the HTML body second.

use super::html::{DIGEST_NAME, RenderedDigest};
use crate::scrapers::REQUEST_TIMEOUT;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use thiserror::Error;
use tracing::{error, info, instrument};

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Message build failed: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("No recipients configured")]
    NoRecipients,
}

/// Delivers a rendered digest.
pub trait Transport {
    async fn send(&self, digest: &RenderedDigest, recipients: &[String]) -> Result<(), MailError>;
}

/// Send the digest through `transport`. A failure is logged and returned,
/// so the run exits non-zero.
pub async fn deliver<T: Transport>(
    transport: &T,
    digest: &RenderedDigest,
    recipients: &[String],
) -> Result<(), MailError> {
    transport
        .send(digest, recipients)
        .await
        .inspect_err(|e| error!(error = %e, "Digest delivery failed"))
}

/// Authenticated SMTP submission.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    pub fn new(host: &str, sender: &str, password: &str) -> Result<Self, MailError> {
        let address: Address = sender.parse()?;
        let from = Mailbox::new(Some(DIGEST_NAME.to_string()), address);
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(sender.to_string(), password.to_string()))
            .timeout(Some(REQUEST_TIMEOUT))
            .build();
        Ok(Self { transport, from })
    }
}

impl Transport for SmtpMailer {
    #[instrument(level = "info", skip_all, fields(recipients = recipients.len()))]
    async fn send(&self, digest: &RenderedDigest, recipients: &[String]) -> Result<(), MailError> {
        let message = build_message(&self.from, recipients, digest)?;
        let response = self.transport.send(message).await?;
        info!(code = %response.code(), "Digest delivered");
        Ok(())
    }
}

/// Assemble the digest email addressed to every recipient.
pub fn build_message(
    from: &Mailbox,
    recipients: &[String],
    digest: &RenderedDigest,
) -> Result<Message, MailError> {
    if recipients.is_empty() {
        return Err(MailError::NoRecipients);
    }

    let mut builder = Message::builder()
        .from(from.clone())
        .subject(digest.subject.clone());
    for recipient in recipients {
        let mailbox: Mailbox = recipient.trim().parse()?;
        builder = builder.to(mailbox);
    }

    let body = MultiPart::alternative_plain_html(digest.text.clone(), digest.html.clone());
    Ok(builder.multipart(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn digest() -> RenderedDigest {
        RenderedDigest {
            subject: "Daily Myanmar News Digest (2025-08-02)".to_string(),
            html: "<html><body><h2>Myanmar News Digest</h2></body></html>".to_string(),
            text: "plain fallback".to_string(),
        }
    }

    fn from() -> Mailbox {
        Mailbox::new(
            Some(DIGEST_NAME.to_string()),
            "digest@example.com".parse().unwrap(),
        )
    }

    #[test]
    fn test_build_message_headers_and_parts() {
        let recipients = vec!["a@example.com".to_string(), " b@example.com ".to_string()];
        let message = build_message(&from(), &recipients, &digest()).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(raw.contains("Daily Myanmar News Digest"));
        assert!(raw.contains("a@example.com"));
        assert!(raw.contains("b@example.com"));
        assert!(raw.contains("digest@example.com"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_build_message_requires_recipients() {
        assert!(matches!(
            build_message(&from(), &[], &digest()),
            Err(MailError::NoRecipients)
        ));
    }

    #[test]
    fn test_build_message_rejects_bad_address() {
        let recipients = vec!["not an address".to_string()];
        assert!(matches!(
            build_message(&from(), &recipients, &digest()),
            Err(MailError::Address(_))
        ));
    }

    /// Records deliveries in memory, or refuses every one.
    struct FakeTransport {
        sent: RefCell<Vec<(String, Vec<String>)>>,
        fail: bool,
    }

    impl FakeTransport {
        fn new(fail: bool) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl Transport for FakeTransport {
        async fn send(
            &self,
            digest: &RenderedDigest,
            recipients: &[String],
        ) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::NoRecipients);
            }
            self.sent
                .borrow_mut()
                .push((digest.subject.clone(), recipients.to_vec()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_deliver_hands_digest_to_transport() {
        let transport = FakeTransport::new(false);
        let recipients = vec!["a@example.com".to_string()];
        deliver(&transport, &digest(), &recipients).await.unwrap();

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Daily Myanmar News Digest (2025-08-02)");
        assert_eq!(sent[0].1, recipients);
    }

    #[tokio::test]
    async fn test_deliver_failure_reaches_caller() {
        let transport = FakeTransport::new(true);
        let result = deliver(&transport, &digest(), &["a@example.com".to_string()]).await;
        assert!(matches!(result, Err(MailError::NoRecipients)));
        assert!(transport.sent.borrow().is_empty());
    }

    #[test]
    fn test_smtp_mailer_rejects_bad_sender() {
        assert!(matches!(
            SmtpMailer::new("smtp.gmail.com", "nobody", "secret"),
            Err(MailError::Address(_))
        ));
    }
}
