use csnotes_core::NoteDraft;

use crate::commands::common::{connect, submit_result};
use crate::error::CliError;

pub async fn run_add(api_url: Option<String>, title: &str, content: &str) -> Result<(), CliError> {
    let session = connect(api_url, false)?;
    session.app.new_note();
    let outcome = session.app.submit(NoteDraft::new(title, content)).await;
    submit_result(&outcome)
}
