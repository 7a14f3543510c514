//! Ticket data
//!
//! A [`TicketRecord`] is an immutable value: every field is fixed at
//! construction and the identifier is generated then, never supplied.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Asset name used when a ticket does not name its own image
pub const DEFAULT_IMAGE: &str = "painting";

/// The content printed on a ticket
#[derive(Clone, Debug, PartialEq)]
pub struct TicketRecord {
    id: Uuid,
    title: String,
    description: String,
    name: String,
    phone_number: String,
    image: String,
    date: DateTime<Utc>,
    price: String,
}

impl TicketRecord {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        name: impl Into<String>,
        phone_number: impl Into<String>,
        date: DateTime<Utc>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            name: name.into(),
            phone_number: phone_number.into(),
            image: DEFAULT_IMAGE.to_string(),
            date,
            price: price.into(),
        }
    }

    /// Same ticket printed with another image asset
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Museum pass used by previews
    pub fn sample() -> Self {
        Self::new(
            "Full Museum Access",
            "Explore all the exhibitions of the museum as long as you want",
            "Alex Morgan",
            "(555) 010 4477",
            Utc::now(),
            "9.99",
        )
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    /// First group of the identifier, upper-case, as printed along the edge
    pub fn short_id(&self) -> String {
        let id = self.id.to_string();
        id.split('-')
            .next()
            .unwrap_or(id.as_str())
            .to_ascii_uppercase()
    }

    /// Abbreviated date and short time on two lines, e.g. `"Jun 17, 2024\n 3:45 PM"`
    pub fn formatted_date(&self) -> String {
        self.date.format("%b %-d, %Y\n %-I:%M %p").to_string()
    }

    pub fn formatted_price(&self) -> String {
        format!("${}", self.price)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Fields {
        title: String,
        description: String,
        name: String,
        phone_number: String,
        #[serde(default)]
        image: Option<String>,
        #[serde(default)]
        date: Option<DateTime<Utc>>,
        price: String,
    }

    /// The identifier is always generated; a missing date means now
    impl<'de> Deserialize<'de> for TicketRecord {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let fields = Fields::deserialize(deserializer)?;
            let record = TicketRecord::new(
                fields.title,
                fields.description,
                fields.name,
                fields.phone_number,
                fields.date.unwrap_or_else(Utc::now),
                fields.price,
            );
            Ok(match fields.image {
                Some(image) => record.with_image(image),
                None => record,
            })
        }
    }
}
