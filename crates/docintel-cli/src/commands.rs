//! Subcommand handlers. Each one talks to the backend once and prints the
//! page, or the page's failure message followed by the underlying error.
//! Handlers return whether the command succeeded.

use std::path::Path;
use std::sync::Arc;

use docintel_client::{ApiClient, ServerFetcher, TokenStore};
use docintel_core::{validate_question, ClientConfig, Error, UploadFile};
use tracing::info;

use crate::views::{self, dashboard, detail, qa, upload};

fn api_client(config: &ClientConfig) -> anyhow::Result<ApiClient> {
    let store = TokenStore::new(&config.data_paths.token_store);
    Ok(ApiClient::new(config, Arc::new(store))?)
}

fn fail(message: &str, err: &Error) -> bool {
    eprintln!("{}", message);
    eprintln!("  {}", err);
    false
}

pub async fn documents(config: &ClientConfig, uncached: bool) -> anyhow::Result<bool> {
    let result = if uncached {
        ServerFetcher::new(config)?.fetch_documents().await
    } else {
        api_client(config)?.fetch_documents().await
    };

    match result {
        Ok(list) => {
            print!("{}", dashboard::render_dashboard(&list));
            Ok(true)
        }
        Err(e) => Ok(fail(views::LOAD_FAILED, &e)),
    }
}

pub async fn upload(config: &ClientConfig, path: &Path) -> anyhow::Result<bool> {
    let file = match UploadFile::from_path(path) {
        Ok(file) => file,
        Err(e @ Error::UnsupportedFileType(_)) => return Ok(fail(views::UNSUPPORTED_FILE, &e)),
        Err(e) => return Ok(fail(views::UPLOAD_FAILED, &e)),
    };
    print!("{}", upload::render_selection(&file));

    match api_client(config)?.upload_document(&file).await {
        Ok(response) => {
            print!("{}", upload::render_uploaded(&response));
            Ok(true)
        }
        Err(e) => Ok(fail(views::UPLOAD_FAILED, &e)),
    }
}

pub async fn ask(
    config: &ClientConfig,
    document_id: &str,
    question: &str,
    num_chunks: u32,
) -> anyhow::Result<bool> {
    let question = match validate_question(question) {
        Ok(q) => q,
        Err(e) => return Ok(fail(views::EMPTY_QUESTION, &e)),
    };

    match api_client(config)?
        .ask_question_with(document_id, question, num_chunks)
        .await
    {
        Ok(response) => {
            print!("{}", qa::render_answer(&response));
            Ok(true)
        }
        Err(e) => Ok(fail(views::ANSWER_FAILED, &e)),
    }
}

pub async fn show(config: &ClientConfig, document_id: &str) -> anyhow::Result<bool> {
    match api_client(config)?.get_document_details(document_id).await {
        Ok(details) => {
            print!("{}", detail::render_details(&details));
            Ok(true)
        }
        Err(e) => Ok(fail(views::DETAILS_FAILED, &e)),
    }
}

pub fn login(config: &ClientConfig, token: &str) -> anyhow::Result<bool> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }
    TokenStore::new(&config.data_paths.token_store).set_token(token)?;
    println!("Token saved.");
    Ok(true)
}

pub fn logout(config: &ClientConfig) -> anyhow::Result<bool> {
    let store = TokenStore::new(&config.data_paths.token_store);
    if store.clear_token()? {
        info!("Removed auth token from {}", store.path().display());
        println!("Logged out.");
    } else {
        println!("No token stored.");
    }
    Ok(true)
}
