use super::client::{ApiError, QuoteClient};
use crate::model::{Quote, QuoteId, QuoteUpdate};

/// A network call the dashboard wants made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    LoadAll,
    SetMarked { id: QuoteId, marked: bool },
    Update { id: QuoteId, update: QuoteUpdate },
    Delete { id: QuoteId },
}

/// The outcome of a `Request`, carrying the id it was issued for
#[derive(Debug)]
pub enum Completion {
    Loaded(Result<Vec<Quote>, ApiError>),
    Marked {
        id: QuoteId,
        result: Result<Quote, ApiError>,
    },
    Updated {
        id: QuoteId,
        result: Result<Quote, ApiError>,
    },
    Deleted {
        id: QuoteId,
        result: Result<(), ApiError>,
    },
}

impl Request {
    /// Short name used in log lines
    pub fn describe(&self) -> String {
        match self {
            Request::LoadAll => "load all quotes".to_string(),
            Request::SetMarked { id, marked } => format!("set marked={} on {}", marked, id),
            Request::Update { id, .. } => format!("update {}", id),
            Request::Delete { id } => format!("delete {}", id),
        }
    }
}

impl QuoteClient {
    /// Run one request to completion. Never fails: errors travel in the `Completion`.
    pub async fn execute(&self, request: Request) -> Completion {
        match request {
            Request::LoadAll => Completion::Loaded(self.list().await),
            Request::SetMarked { id, marked } => {
                let result = self.set_marked(&id, marked).await;
                Completion::Marked { id, result }
            }
            Request::Update { id, update } => {
                let result = self.update(&id, &update).await;
                Completion::Updated { id, result }
            }
            Request::Delete { id } => {
                let result = self.delete(&id).await;
                Completion::Deleted { id, result }
            }
        }
    }
}
