use chrono::NaiveDate;
use thiserror::Error;

use appointment_cell::models::{AppointmentId, AppointmentTab, FetchOutcome, StatusAction, ViewError};
use appointment_cell::services::AppointmentView;

pub const HELP: &str = "\
Commands:
  tab <upcoming|today|past>   switch the active tab
  date <YYYY-MM-DD>           filter by date and reload
  clear                       remove the date filter and reload
  confirm <id>                mark an appointment Confirmed
  cancel <id>                 mark an appointment Cancelled
  refresh                     reload with the current date filter
  help                        show this text
  quit                        exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Tab(AppointmentTab),
    Date(NaiveDate),
    Clear,
    Status(AppointmentId, StatusAction),
    Refresh,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    MissingArgument { command: String, expected: &'static str },

    #[error("Invalid argument '{argument}' for '{command}'")]
    InvalidArgument { command: String, argument: String },
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let argument = parts.next();

    let require = |expected: &'static str| {
        argument.ok_or_else(|| CommandError::MissingArgument {
            command: name.clone(),
            expected,
        })
    };
    let invalid = |arg: &str| CommandError::InvalidArgument {
        command: name.clone(),
        argument: arg.to_string(),
    };

    match name.as_str() {
        "tab" => {
            let arg = require("a tab name")?;
            arg.parse().map(Command::Tab).map_err(|_| invalid(arg))
        }
        "date" => {
            let arg = require("a date")?;
            NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map(Command::Date)
                .map_err(|_| invalid(arg))
        }
        "confirm" | "cancel" => {
            let arg = require("an appointment id")?;
            let id = arg.parse().map_err(|_| invalid(arg))?;
            let action = if name == "confirm" { StatusAction::Confirm } else { StatusAction::Cancel };
            Ok(Command::Status(id, action))
        }
        "clear" => Ok(Command::Clear),
        "refresh" => Ok(Command::Refresh),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(name.clone())),
    }
}

/// Runs a view-changing command. `Help` and `Quit` are handled by the caller.
pub async fn apply(view: &AppointmentView, command: Command) -> Result<(), ViewError> {
    match command {
        Command::Tab(tab) => view.change_tab(tab),
        Command::Date(date) => report(view.change_date_filter(Some(date)).await?),
        Command::Clear => report(view.clear_date_filter().await?),
        Command::Refresh => {
            let date = view.state().selected_date;
            report(view.change_date_filter(date).await?)
        }
        Command::Status(id, action) => {
            view.change_status(id, action.target_status()).await?;
        }
        Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn report(outcome: FetchOutcome) {
    if let FetchOutcome::Applied { count } = outcome {
        tracing::debug!("Loaded {} appointments", count);
    }
}
