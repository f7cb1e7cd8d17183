use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which records pass the status stage, applied before search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    Marked,
    #[default]
    NotMarked,
    All,
}

impl StatusFilter {
    /// Cycle order matches the status picker: not marked, marked, all
    pub const ALL: [StatusFilter; 3] = [
        StatusFilter::NotMarked,
        StatusFilter::Marked,
        StatusFilter::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::Marked => "marked",
            StatusFilter::NotMarked => "not_marked",
            StatusFilter::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::Marked => "Marked as Seen",
            StatusFilter::NotMarked => "Not Marked",
            StatusFilter::All => "All",
        }
    }

    /// Exact equality on `marked`, or pass-through for `All`
    pub fn admits(self, marked: bool) -> bool {
        match self {
            StatusFilter::Marked => marked,
            StatusFilter::NotMarked => !marked,
            StatusFilter::All => true,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marked" => Ok(StatusFilter::Marked),
            "not_marked" | "not-marked" | "unmarked" => Ok(StatusFilter::NotMarked),
            "all" => Ok(StatusFilter::All),
            _ => Err(FilterParseError::Status(s.to_string())),
        }
    }
}

/// The single attribute a free-text search is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    #[default]
    Name,
    Phone,
    Email,
    Service,
    Message,
    CreatedAt,
}

impl SearchField {
    pub const ALL: [SearchField; 6] = [
        SearchField::Name,
        SearchField::Phone,
        SearchField::Email,
        SearchField::Service,
        SearchField::Message,
        SearchField::CreatedAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Phone => "phone",
            SearchField::Email => "email",
            SearchField::Service => "service",
            SearchField::Message => "message",
            SearchField::CreatedAt => "created_at",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::Name => "Name",
            SearchField::Phone => "Phone",
            SearchField::Email => "Email",
            SearchField::Service => "Service",
            SearchField::Message => "Message",
            SearchField::CreatedAt => "Date",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SearchField::Name),
            "phone" => Ok(SearchField::Phone),
            "email" => Ok(SearchField::Email),
            "service" => Ok(SearchField::Service),
            "message" => Ok(SearchField::Message),
            "created_at" | "date" => Ok(SearchField::CreatedAt),
            _ => Err(FilterParseError::Field(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterParseError {
    #[error("unknown status filter '{0}' (expected marked, not_marked or all)")]
    Status(String),
    #[error(
        "unknown search field '{0}' (expected name, phone, email, service, message or created_at)"
    )]
    Field(String),
}

/// The inputs of the view derivation besides the collection itself
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFilter {
    pub status: StatusFilter,
    pub field: SearchField,
    /// Free-text term; empty means no text filtering
    pub term: String,
}

impl ViewFilter {
    pub fn new(status: StatusFilter, field: SearchField, term: impl Into<String>) -> Self {
        ViewFilter {
            status,
            field,
            term: term.into(),
        }
    }
}
