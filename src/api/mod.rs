pub mod client;
pub mod request;

pub use client::{ApiError, QuoteClient};
pub use request::{Completion, Request};
