pub mod dashboard;
pub mod view;

pub use dashboard::{Dashboard, Notice, Panel};
