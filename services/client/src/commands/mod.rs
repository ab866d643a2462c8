//! services/client/src/commands/mod.rs
//!
//! The command-line front end. Each command plays the part of one screen: it
//! passes the route guard, drives a view-model and prints the result.

pub mod projects;
pub mod session;

use protech_core::domain::Session;
use protech_core::routes::Route;
use protech_core::validation::FieldErrors;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::ClientError;
use crate::state::AppState;

pub const USAGE: &str = "\
Usage: protech <command> [options]

Session:
  login --name <name> --role <Manager|Employee> --token <token>
  logout [--yes]
  whoami
  open <path>

Projects:
  list [--search <term>]
  show <id>
  create --title <t> --description <d> --start <YYYY-MM-DD> --end <YYYY-MM-DD>
         --frontend <f> --backend <b> --database <db> --status <s> --cover <file>
  edit <id> [any of the create options]
  delete <id> [--yes]";

/// Flags that never take a value.
const SWITCHES: [&str; 1] = ["--yes"];

/// How a command finished, for the binary to turn into output and an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The screen asked to move somewhere else.
    Navigate(Route),
    /// The form was rejected before anything was sent.
    Invalid(FieldErrors),
}

//=========================================================================================
// Argument Handling
//=========================================================================================

#[derive(Debug, Clone)]
pub struct Args {
    items: Vec<String>,
}

impl Args {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn command(&self) -> Option<&str> {
        self.items.first().map(String::as_str)
    }

    /// The value following `flag`, if present.
    pub fn value(&self, flag: &str) -> Option<&str> {
        self.items
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.items.get(i + 1))
            .map(String::as_str)
    }

    pub fn has(&self, flag: &str) -> bool {
        self.items.iter().any(|a| a == flag)
    }

    /// The `n`th argument after the command that is neither a flag nor a
    /// flag's value.
    pub fn positional(&self, n: usize) -> Option<&str> {
        let mut found = Vec::new();
        let mut rest = self.items.iter().skip(1);
        while let Some(item) = rest.next() {
            if item.starts_with("--") {
                if !SWITCHES.contains(&item.as_str()) {
                    rest.next();
                }
            } else {
                found.push(item.as_str());
            }
        }
        found.get(n).copied()
    }

    pub fn require(&self, flag: &str) -> Result<&str, ClientError> {
        self.value(flag)
            .ok_or_else(|| ClientError::Usage(format!("missing {} <value>\n\n{}", flag, USAGE)))
    }

    pub fn require_positional(&self, n: usize, name: &str) -> Result<&str, ClientError> {
        self.positional(n)
            .ok_or_else(|| ClientError::Usage(format!("missing <{}>\n\n{}", name, USAGE)))
    }
}

//=========================================================================================
// Dispatch
//=========================================================================================

pub async fn dispatch(state: &AppState, args: &Args) -> Result<Outcome, ClientError> {
    match args.command() {
        Some("login") => session::login(state, args).await,
        Some("logout") => session::logout(state, args).await,
        Some("whoami") => session::whoami(state).await,
        Some("open") => session::open(state, args).await,
        Some("list") => projects::list(state, args).await,
        Some("show") => projects::show(state, args).await,
        Some("create") => projects::create(state, args).await,
        Some("edit") => projects::edit(state, args).await,
        Some("delete") => projects::delete(state, args).await,
        Some(other) => Err(ClientError::Usage(format!(
            "unknown command '{}'\n\n{}",
            other, USAGE
        ))),
        None => Err(ClientError::Usage(USAGE.to_string())),
    }
}

/// Passes the route guard for `route` and returns the signed-in session.
/// `None` means the user was bounced to the login page.
pub(crate) async fn enter(state: &AppState, route: &Route) -> Result<Option<Session>, ClientError> {
    let resolved = state.guard.resolve(route.clone()).await?;
    if &resolved != route {
        return Ok(None);
    }
    Ok(state.session.current().await?)
}

/// Asks a yes/no question on the terminal. Anything but `y`/`yes` is a no.
pub(crate) async fn confirm(question: &str) -> Result<bool, ClientError> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(format!("{} [y/N] ", question).as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
