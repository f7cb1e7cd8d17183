use clap::{Args, Parser, Subcommand};

use crate::model::{SearchField, StatusFilter};

#[derive(Parser)]
#[command(
    name = "qd",
    about = concat!("quotedesk v", env!("CARGO_PKG_VERSION"), " - review incoming quote requests"),
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// API root, overriding the config file
    #[arg(long = "api-url", env = "QD_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ./quotedesk.toml if present)
    #[arg(short = 'c', long, env = "QD_CONFIG", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List quotes, filtered and searched like the dashboard
    List(ListArgs),
    /// Show one quote in full
    Show(IdArgs),
    /// Flip a quote's "marked as seen" flag
    Toggle(IdArgs),
    /// Change a quote's contact details or message
    Edit(EditArgs),
    /// Permanently delete a quote
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Status filter (marked, not_marked, all) [default: config or not_marked]
    #[arg(long)]
    pub status: Option<StatusFilter>,
    /// Field the search term applies to (name, phone, email, service, message, date)
    #[arg(long)]
    pub field: Option<SearchField>,
    /// Case-insensitive substring to search for
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Quote ID
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Quote ID
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub service: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
}

impl EditArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.service.is_none()
            && self.message.is_none()
    }
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Quote ID
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}
