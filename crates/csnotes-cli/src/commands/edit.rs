use csnotes_core::NoteDraft;

use crate::commands::common::{connect, load_result, normalize_note_identifier, submit_result};
use crate::error::CliError;

pub async fn run_edit(
    api_url: Option<String>,
    id: &str,
    title: &str,
    content: Option<&str>,
) -> Result<(), CliError> {
    let id = normalize_note_identifier(id)?;
    let session = connect(api_url, false)?;

    let current = load_result(&id, session.app.editor().begin_update(&id).await)?;
    let mut draft = NoteDraft::from(&current);
    draft.title = title.to_string();
    if let Some(content) = content {
        draft.content = content.to_string();
    }

    let outcome = session.app.submit(draft).await;
    submit_result(&outcome)
}
