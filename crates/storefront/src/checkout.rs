//! Checkout hand-off.
//!
//! There is no order processing: the customer sends the cart contents to
//! the shop through one of its contact channels. This module renders the
//! order as plain text and builds the deep link that opens the channel with
//! the text pre-filled.

use std::fmt;
use std::str::FromStr;

use dariy_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::config::ContactConfig;
use crate::totals::CartSummary;

const TELEGRAM_SHARE_URL: &str = "https://t.me/share/url";

/// Errors raised while preparing a checkout link.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("unknown contact channel: {0}")]
    UnknownChannel(String),
    #[error("invalid contact link: {0}")]
    InvalidLink(#[from] url::ParseError),
}

/// Contact channels that accept an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Telegram,
    WhatsApp,
    Phone,
    Email,
}

impl Channel {
    /// All channels in display order.
    pub const ALL: [Self; 4] = [Self::Telegram, Self::WhatsApp, Self::Phone, Self::Email];

    /// Lower-case name used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::WhatsApp => "whatsapp",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }
}

impl FromStr for Channel {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| CheckoutError::UnknownChannel(s.to_string()))
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain-text order listing sent to the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderMessage {
    text: String,
}

impl OrderMessage {
    /// Render the resolved cart lines and the total.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if no line resolved against the
    /// catalog.
    pub fn from_summary(summary: &CartSummary<'_>) -> Result<Self, CheckoutError> {
        if summary.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let currency = CurrencyCode::default();
        let mut text = String::from("Здравствуйте! Хочу оформить заказ:\n");
        for (n, line) in summary.lines.iter().enumerate() {
            let title = match line.variant_caption() {
                Some(caption) => format!("{} ({caption})", line.product.title),
                None => line.product.title.clone(),
            };
            let price = if line.product.is_price_on_request() {
                "цена по запросу".to_string()
            } else {
                format!(
                    "{} × {} = {}",
                    line.qty,
                    line.product.price.display(currency),
                    line.line_total.display(currency)
                )
            };
            text.push_str(&format!("{}. {title} [{}] — {price}\n", n + 1, line.product.id));
        }
        text.push_str(&summary.heading());

        Ok(Self { text })
    }

    /// The message text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for OrderMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Build the link that opens `channel` with `message` pre-filled.
///
/// Phone links cannot carry text; the customer reads the order out.
///
/// # Errors
///
/// Returns an error if the configured contact does not form a valid URL.
pub fn checkout_link(
    channel: Channel,
    contact: &ContactConfig,
    message: &OrderMessage,
) -> Result<Url, CheckoutError> {
    let text = urlencoding::encode(message.as_str());
    let url = match channel {
        Channel::WhatsApp => {
            let mut url = contact.whatsapp.clone();
            url.set_query(Some(&format!("text={text}")));
            url
        }
        Channel::Telegram => {
            let mut url = Url::parse(TELEGRAM_SHARE_URL)?;
            let profile = urlencoding::encode(contact.telegram.as_str());
            url.set_query(Some(&format!("url={profile}&text={text}")));
            url
        }
        Channel::Phone => Url::parse(&contact.phone.tel_uri())?,
        Channel::Email => {
            let subject = urlencoding::encode("Заказ");
            Url::parse(&format!(
                "mailto:{}?subject={subject}&body={text}",
                contact.email
            ))?
        }
    };
    tracing::info!(%channel, "Checkout link prepared");
    Ok(url)
}
