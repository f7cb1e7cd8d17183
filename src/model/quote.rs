use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

use super::filter::SearchField;
use crate::util::date;

/// Server-assigned quote identifier. Opaque to the client.
pub type QuoteId = String;

/// A customer-submitted request-for-service record, as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: QuoteId,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub service: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub message: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub created_at: String,
    /// Reviewed by staff
    #[serde(default, deserialize_with = "nullable_bool")]
    pub marked: bool,
}

impl Quote {
    /// Text the search term is matched against for `field`.
    /// `created_at` is compared in its short display form, not the raw timestamp.
    pub fn field_text(&self, field: SearchField) -> Cow<'_, str> {
        match field {
            SearchField::Name => Cow::Borrowed(&self.name),
            SearchField::Phone => Cow::Borrowed(&self.phone),
            SearchField::Email => Cow::Borrowed(&self.email),
            SearchField::Service => Cow::Borrowed(&self.service),
            SearchField::Message => Cow::Borrowed(&self.message),
            SearchField::CreatedAt => Cow::Owned(date::format_date(&self.created_at)),
        }
    }

    /// The editable fields of this record, as sent on save
    pub fn to_update(&self) -> QuoteUpdate {
        QuoteUpdate {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            service: self.service.clone(),
            message: self.message.clone(),
        }
    }

    /// Short badge shown in the list
    pub fn badge(&self) -> &'static str {
        if self.marked { "Seen" } else { "New" }
    }

    /// Long status shown in the detail panel
    pub fn status_label(&self) -> &'static str {
        if self.marked {
            "Marked as Seen"
        } else {
            "Not Marked"
        }
    }
}

/// Body of `PUT /quotes/{id}`. Never carries id, created_at or marked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteUpdate {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub message: String,
}

/// Body of `PATCH /quotes/{id}/marked`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkedBody {
    pub marked: bool,
}

/// Response wrapper: every payload lives under `data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// One of the five user-editable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableField {
    Name,
    Phone,
    Email,
    Service,
    Message,
}

impl EditableField {
    pub const ALL: [EditableField; 5] = [
        EditableField::Name,
        EditableField::Phone,
        EditableField::Email,
        EditableField::Service,
        EditableField::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditableField::Name => "Name",
            EditableField::Phone => "Phone",
            EditableField::Email => "Email",
            EditableField::Service => "Service",
            EditableField::Message => "Message",
        }
    }

    pub fn get(self, quote: &Quote) -> &str {
        match self {
            EditableField::Name => &quote.name,
            EditableField::Phone => &quote.phone,
            EditableField::Email => &quote.email,
            EditableField::Service => &quote.service,
            EditableField::Message => &quote.message,
        }
    }

    pub fn get_mut(self, quote: &mut Quote) -> &mut String {
        match self {
            EditableField::Name => &mut quote.name,
            EditableField::Phone => &mut quote.phone,
            EditableField::Email => &mut quote.email,
            EditableField::Service => &mut quote.service,
            EditableField::Message => &mut quote.message,
        }
    }

    /// Only the message accepts newlines
    pub fn is_multiline(self) -> bool {
        self == EditableField::Message
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Accept either a JSON string or number for the id.
fn deserialize_id<'de, D>(deserializer: D) -> Result<QuoteId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}
