use csnotes_core::{AuthContext, AuthProvider, ClientConfig, LoginClient};

use crate::auth::{KeychainLoginNavigator, TokenStore};
use crate::config::load_client_config;
use crate::error::CliError;

fn account_client(config: &ClientConfig) -> Result<LoginClient, CliError> {
    Ok(LoginClient::new(
        config.resolved_base_url()?,
        config.request_timeout(),
    )?)
}

/// Log in and persist the token. Returns it for callers holding a live session.
pub async fn sign_in(
    config: &ClientConfig,
    store: &TokenStore,
    username: &str,
    password: &str,
) -> Result<String, CliError> {
    let token = account_client(config)?.login(username, password).await?;
    store.save(&token)?;
    Ok(token)
}

pub async fn run_login(
    api_url: Option<String>,
    username: &str,
    password: &str,
) -> Result<(), CliError> {
    let config = load_client_config(api_url)?;
    sign_in(&config, &TokenStore::open()?, username, password).await?;
    println!("Signed in as {}", username.trim());
    Ok(())
}

pub async fn run_register(
    api_url: Option<String>,
    username: &str,
    password: &str,
) -> Result<(), CliError> {
    let config = load_client_config(api_url)?;
    account_client(&config)?.register(username, password).await?;
    println!(
        "Registered {}. Run `csnotes login --username {} --password ...` to sign in.",
        username, username
    );
    Ok(())
}

pub fn run_logout() -> Result<(), CliError> {
    let store = TokenStore::open()?;
    let token = store.load()?.unwrap_or_default();
    AuthContext::with_token(token, KeychainLoginNavigator::new(store)).clear();
    Ok(())
}
