pub mod quote;
pub mod filter;
pub mod config;

pub use quote::*;
pub use filter::*;
pub use config::*;
