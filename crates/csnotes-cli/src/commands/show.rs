use crate::commands::common::{connect, detail_result, normalize_note_identifier};
use crate::error::CliError;

pub async fn run_show(api_url: Option<String>, id: &str) -> Result<(), CliError> {
    let id = normalize_note_identifier(id)?;
    let session = connect(api_url, false)?;
    let outcome = session.app.detail().open(&id).await;
    detail_result(&id, outcome)
}
