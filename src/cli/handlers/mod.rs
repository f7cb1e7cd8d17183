use std::io::{BufRead, Write};

use tokio::runtime::{Builder, Runtime};

use crate::api::{Completion, QuoteClient, Request};
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::{Config, EditableField, Quote, ViewFilter};
use crate::ops::Dashboard;
use crate::ops::dashboard::FETCH_ERROR;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// One-shot commands share a single-threaded runtime and the same
/// reconciliation rules as the dashboard.
struct Session {
    runtime: Runtime,
    client: QuoteClient,
    dashboard: Dashboard,
}

impl Session {
    fn new(config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let client = QuoteClient::from_config(&config.api)?;
        Ok(Session {
            runtime,
            client,
            dashboard: Dashboard::new(config.ui.view_filter()),
        })
    }

    fn load(&mut self) -> CmdResult {
        let request = self
            .dashboard
            .begin_refresh()
            .ok_or("a reload is already running")?;
        match self.runtime.block_on(self.client.execute(request)) {
            Completion::Loaded(Err(e)) => Err(format!("{}: {}", FETCH_ERROR, e).into()),
            completion => {
                self.dashboard.apply(completion);
                Ok(())
            }
        }
    }

    fn find(&self, id: &str) -> Result<&Quote, Box<dyn std::error::Error>> {
        self.dashboard
            .find(id)
            .ok_or_else(|| format!("quote not found: {}", id).into())
    }

    /// Send a mutation and fold the response in. A raised notice becomes
    /// the command's error, with the cause appended.
    fn run(&mut self, request: Request) -> CmdResult {
        log::debug!("running: {}", request.describe());
        let completion = self.runtime.block_on(self.client.execute(request));
        self.dashboard.apply(completion);
        match self.dashboard.notice.take() {
            Some(notice) => Err(format!("{} ({})", notice.message, notice.cause).into()),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: &Config) -> CmdResult {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Err("no command given (run `qd` without arguments for the dashboard)".into());
    };

    match command {
        Commands::List(args) => cmd_list(args, config, json),
        Commands::Show(args) => cmd_show(args, config, json),
        Commands::Toggle(args) => cmd_toggle(args, config, json),
        Commands::Edit(args) => cmd_edit(args, config, json),
        Commands::Delete(args) => {
            let stdin = std::io::stdin();
            let mut stderr = std::io::stderr();
            cmd_delete(args, config, json, &mut stdin.lock(), &mut stderr)
        }
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, config: &Config, json: bool) -> CmdResult {
    let mut session = Session::new(config)?;
    let defaults = config.ui.view_filter();
    session.dashboard.filter = ViewFilter::new(
        args.status.unwrap_or(defaults.status),
        args.field.unwrap_or(defaults.field),
        args.search.unwrap_or_default(),
    );
    session.load()?;

    let visible = session.dashboard.visible();
    let total = session.dashboard.quotes.len();
    if json {
        let out = ListJson {
            showing: visible.len(),
            total,
            quotes: visible,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if visible.is_empty() {
            println!("No quotes found matching your criteria");
        }
        for quote in &visible {
            println!("{}", format_quote_line(quote));
        }
        println!("{}", format_count(visible.len(), total));
    }
    Ok(())
}

fn cmd_show(args: IdArgs, config: &Config, json: bool) -> CmdResult {
    let mut session = Session::new(config)?;
    session.load()?;
    print_quote(session.find(&args.id)?, json)
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_toggle(args: IdArgs, config: &Config, json: bool) -> CmdResult {
    let mut session = Session::new(config)?;
    session.load()?;
    session.find(&args.id)?;
    let request = session
        .dashboard
        .toggle_marked(&args.id)
        .ok_or_else(|| format!("quote not found: {}", args.id))?;
    session.run(request)?;
    print_quote(session.find(&args.id)?, json)
}

fn cmd_edit(args: EditArgs, config: &Config, json: bool) -> CmdResult {
    if args.is_empty() {
        return Err(
            "nothing to change: give at least one of --name, --phone, --email, --service, --message"
                .into(),
        );
    }
    let mut session = Session::new(config)?;
    session.load()?;
    session.find(&args.id)?;
    session.dashboard.select(&args.id);
    session.dashboard.start_edit();

    let changes = [
        (EditableField::Name, args.name),
        (EditableField::Phone, args.phone),
        (EditableField::Email, args.email),
        (EditableField::Service, args.service),
        (EditableField::Message, args.message),
    ];
    for (field, value) in changes {
        if let Some(value) = value
            && let Some(slot) = session.dashboard.draft_field_mut(field)
        {
            *slot = value;
        }
    }

    let request = session.dashboard.save_edit().ok_or("no edit in progress")?;
    session.run(request)?;
    print_quote(session.find(&args.id)?, json)
}

fn cmd_delete<R: BufRead, W: Write>(
    args: DeleteArgs,
    config: &Config,
    json: bool,
    input: &mut R,
    prompt: &mut W,
) -> CmdResult {
    let mut session = Session::new(config)?;
    session.load()?;
    let name = session.find(&args.id)?.name.clone();
    session.dashboard.request_delete(&args.id);

    if !args.yes {
        let question = format!(
            "Are you sure you want to delete this quote? ({}, {})",
            args.id, name
        );
        if !confirmed(&question, input, prompt)? {
            session.dashboard.cancel_delete();
            println!("cancelled");
            return Ok(());
        }
    }

    let request = session
        .dashboard
        .confirm_delete()
        .ok_or("no delete pending")?;
    session.run(request)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&DeletedJson { deleted: &args.id })?
        );
    } else {
        println!("deleted {}", args.id);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_quote(quote: &Quote, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(quote)?);
    } else {
        for line in format_quote_detail(quote) {
            println!("{}", line);
        }
    }
    Ok(())
}

/// Ask a yes/no question. Anything but "y"/"yes" is a no, including EOF.
fn confirmed<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    prompt: &mut W,
) -> std::io::Result<bool> {
    write!(prompt, "{} [y/n] ", question)?;
    prompt.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
