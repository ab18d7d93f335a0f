//! Interactive session over the three panels.

use std::io::{self, Write};

use csnotes_core::editor::{LoadOutcome, SubmitOutcome};
use csnotes_core::{
    ActionOutcome, EditorForm, FieldErrors, NoteDraft, NoteId, RowActionKind, SubmitLabel,
};

use crate::commands::auth_cmd::sign_in;
use crate::commands::common::{connect, normalize_note_identifier, Session};
use crate::error::CliError;
use crate::terminal::format_row;

const HELP: &str = "\
Commands:
  list            refresh and show the note list
  show ID         open a note in the viewer
  edit ID         edit a note
  delete ID       delete a note
  new             write a new note
  back            return to the list
  login NAME      sign in again without leaving the shell
  logout          forget the session token and exit
  help            show this help
  quit            exit";

const CANCEL_INPUT: &str = ":back";
const CLEAR_INPUT: &str = ":clear";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Row(RowActionKind, NoteId),
    New,
    Back,
    Login(String),
    Logout,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line.
pub fn parse_shell_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let argument = words.next();
    if words.next().is_some() {
        return Err(format!("Too many arguments for `{verb}`"));
    }

    let row_action = |kind: RowActionKind| -> Result<Option<ShellCommand>, String> {
        let id = argument.ok_or_else(|| format!("Usage: {verb} ID"))?;
        let id = normalize_note_identifier(id).map_err(|error| error.to_string())?;
        Ok(Some(ShellCommand::Row(kind, id)))
    };

    match verb.to_ascii_lowercase().as_str() {
        "show" | "view" => row_action(RowActionKind::Show),
        "edit" => row_action(RowActionKind::Edit),
        "delete" | "rm" => row_action(RowActionKind::Delete),
        "login" => argument
            .map(|name| Some(ShellCommand::Login(name.to_string())))
            .ok_or_else(|| "Usage: login NAME".to_string()),
        _ if argument.is_some() => Err(format!("`{verb}` takes no arguments")),
        "list" | "ls" | "refresh" => Ok(Some(ShellCommand::List)),
        "new" | "add" => Ok(Some(ShellCommand::New)),
        "back" => Ok(Some(ShellCommand::Back)),
        "logout" => Ok(Some(ShellCommand::Logout)),
        "help" | "?" => Ok(Some(ShellCommand::Help)),
        "quit" | "exit" | "q" => Ok(Some(ShellCommand::Quit)),
        _ => Err(format!("Unknown command `{verb}`; type `help`")),
    }
}

pub async fn run_shell(api_url: Option<String>) -> Result<(), CliError> {
    let session = connect(api_url, false)?;
    println!("{HELP}");
    session.app.start().await;

    loop {
        let Some(line) = prompt(&format!("{}> ", session.app.current_view()))? else {
            break;
        };
        let command = match parse_shell_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::List => {
                session.app.back_to_list();
                session.app.refresh().await;
            }
            ShellCommand::Row(kind, id) => run_row_action(&session, kind, &id).await?,
            ShellCommand::New => {
                session.app.new_note();
                run_editor(&session).await?;
            }
            ShellCommand::Back => {
                session.app.back_to_list();
                for row in session.surface.rows() {
                    println!("{}", format_row(&row));
                }
            }
            ShellCommand::Login(username) => relogin(&session, &username).await?,
            ShellCommand::Logout => {
                session.app.logout();
                break;
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
        }
    }

    Ok(())
}

/// Swap a fresh token into the running session.
async fn relogin(session: &Session, username: &str) -> Result<(), CliError> {
    let Some(password) = prompt("password: ")? else {
        return Ok(());
    };
    match sign_in(&session.config, &session.store, username, &password).await {
        Ok(token) => {
            session.auth.set_token(token);
            println!("Signed in as {username}");
            session.app.back_to_list();
            session.app.refresh().await;
        }
        Err(error) => eprintln!("{error}"),
    }
    Ok(())
}

async fn run_row_action(
    session: &Session,
    kind: RowActionKind,
    id: &NoteId,
) -> Result<(), CliError> {
    let Some(row) = session.surface.row(id) else {
        eprintln!("No note {id} in the current list; run `list` to refresh.");
        return Ok(());
    };

    match session.app.dispatch(row.action(kind)).await {
        ActionOutcome::Editing(LoadOutcome::Loaded(_)) => run_editor(session).await,
        ActionOutcome::Stale => {
            eprintln!("The list changed; run `list` and try again.");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Prompt for title and content until the note is saved or the user backs out.
async fn run_editor(session: &Session) -> Result<(), CliError> {
    let mut form = session
        .surface
        .editor_form()
        .unwrap_or_else(|| EditorForm::blank(SubmitLabel::Create));
    println!(
        "-- {} note (enter {CANCEL_INPUT} to cancel, {CLEAR_INPUT} to empty a field, blank keeps the shown value) --",
        form.submit_label.as_str()
    );

    while session.app.editor().mode().is_some() {
        let Some(title) = prompt_with_default("title", &form.title)? else {
            session.app.back_to_list();
            break;
        };
        if title == CANCEL_INPUT {
            session.app.back_to_list();
            break;
        }
        let Some(content) = prompt_with_default("content", &form.content)? else {
            session.app.back_to_list();
            break;
        };
        if content == CANCEL_INPUT {
            session.app.back_to_list();
            break;
        }

        form.title.clone_from(&title);
        form.content.clone_from(&content);
        match session.app.submit(NoteDraft::new(title, content)).await {
            SubmitOutcome::Saved(_) | SubmitOutcome::Ignored => break,
            SubmitOutcome::Rejected(fields) => {
                if let Some(notice) = rejection_notice(&fields) {
                    eprintln!("{notice}");
                }
            }
            SubmitOutcome::Failed | SubmitOutcome::Unreachable => {}
        }
    }

    Ok(())
}

/// Line to print when a rejection names no field the editor can show.
pub fn rejection_notice(fields: &FieldErrors) -> Option<&'static str> {
    fields
        .first_displayed()
        .is_none()
        .then_some("Note was not saved")
}

/// `Ok(None)` on end of input.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt_with_default(field: &str, current: &str) -> io::Result<Option<String>> {
    let label = if current.is_empty() {
        format!("{field}: ")
    } else {
        format!("{field} [{current}]: ")
    };
    Ok(prompt(&label)?.map(|input| apply_default(input, current)))
}

/// Blank input keeps `current`; `:clear` empties the field.
pub fn apply_default(input: String, current: &str) -> String {
    if input.trim() == CLEAR_INPUT {
        String::new()
    } else if input.trim().is_empty() {
        current.to_string()
    } else {
        input
    }
}
