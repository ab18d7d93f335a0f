use csnotes_core::{ApiResponse, NoteApi};

use crate::commands::common::{connect, refresh_result};
use crate::error::CliError;

pub async fn run_list(api_url: Option<String>, as_json: bool) -> Result<(), CliError> {
    let session = connect(api_url, false)?;

    if !as_json {
        return refresh_result(session.app.start().await);
    }

    match session.api.list().await? {
        ApiResponse::Models(notes) => {
            println!("{}", serde_json::to_string_pretty(&notes)?);
            Ok(())
        }
        ApiResponse::Errors(errors) => {
            for error in &errors {
                tracing::error!("Failed to list notes: {}", error);
            }
            Err(CliError::RequestFailed)
        }
        ApiResponse::Fields(_) => Err(CliError::RequestFailed),
    }
}
