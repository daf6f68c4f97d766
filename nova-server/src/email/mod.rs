//! SMTP mailer for receipt delivery

use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use shared::models::MailInfo;
use uuid::Uuid;

use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SMTP mailer with a pooled async transport
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    company_name: String,
    company_slogan: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Result<Self, BoxError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if !config.smtp_user.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_pass.clone(),
            ));
        }

        let from: Mailbox = format!("{} <{}>", config.company.name, config.mail_from).parse()?;

        Ok(Self {
            transport: builder.build(),
            from,
            company_name: config.company.name.clone(),
            company_slogan: config.company.slogan.clone(),
        })
    }

    /// Send the purchase note to a customer with the rendered PDF attached
    ///
    /// One external network call, no internal retry. The caller decides what
    /// a dispatch failure means for the order.
    pub async fn send_order_receipt(
        &self,
        to_email: &str,
        customer_name: &str,
        order_id: i64,
        pdf: Vec<u8>,
    ) -> Result<MailInfo, BoxError> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.from.email.domain());
        let filename = format!("nota_compra_{order_id}.pdf");

        let html = receipt_html(customer_name, &self.company_name, &self.company_slogan);
        let attachment = Attachment::new(filename).body(pdf, "application/pdf".parse()?);

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_email.parse()?)
            .subject(receipt_subject(&self.company_name))
            .message_id(Some(message_id.clone()))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(html))
                    .singlepart(attachment),
            )?;

        self.transport.send(message).await?;

        tracing::info!(to = to_email, order_id, "Purchase receipt sent");

        Ok(MailInfo {
            message_id,
            accepted: vec![to_email.to_string()],
            rejected: Vec::new(),
        })
    }
}

fn receipt_subject(company_name: &str) -> String {
    format!("{company_name} - Nota de compra")
}

fn receipt_html(customer_name: &str, company_name: &str, slogan: &str) -> String {
    format!(
        "<p>Hola {customer_name},</p>\
         <p>Adjuntamos la nota de compra.</p>\
         <p>Gracias por tu compra.</p>\
         <p><strong>{company_name}</strong><br/>{slogan}</p>"
    )
}
