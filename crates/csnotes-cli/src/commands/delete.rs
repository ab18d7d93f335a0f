use crate::commands::common::{connect, delete_result, normalize_note_identifier};
use crate::error::CliError;

pub async fn run_delete(api_url: Option<String>, id: &str, assume_yes: bool) -> Result<(), CliError> {
    let id = normalize_note_identifier(id)?;
    let session = connect(api_url, assume_yes)?;
    let outcome = session.app.deletion().delete_note(&id).await;
    delete_result(outcome)
}
