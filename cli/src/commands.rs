//! Command execution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each subcommand maps onto one or two typed API calls. Authorized commands
//! first settle the session against the backend (the same startup check the
//! web app runs), so a stale token on disk is cleared before anything else
//! happens. Commands return the text to print; `main` owns stdout.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use questify::documents::DocumentList;
use questify::types::{Document, QaEntry, UploadFile};
use questify::validate::validate_upload;
use questify::{ApiClient, ApiError, Operation, Transport};

use crate::error::CliError;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account and log in.
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted.
        #[arg(long, env = "QUESTIFY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log in and store the token.
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted.
        #[arg(long, env = "QUESTIFY_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    /// Verify the stored token against the backend.
    Status,
    /// Manage uploaded documents.
    Docs(DocsCommand),
    /// Generate a summary for a document.
    Summarize { id: String },
    /// Show a document's existing summary.
    Summary { id: String },
    /// Ask a question about a document.
    Ask { id: String, question: String },
    /// Show previous questions and answers for a document.
    History { id: String },
}

#[derive(Args, Debug)]
pub struct DocsCommand {
    #[command(subcommand)]
    pub command: DocsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DocsSubcommand {
    List {
        /// Case-insensitive filename filter.
        #[arg(long)]
        search: Option<String>,
    },
    Show { id: String },
    Upload { path: PathBuf },
    Delete { id: String },
}

pub async fn run<T: Transport>(api: &ApiClient<T>, command: Command) -> Result<String, CliError> {
    match command {
        Command::Signup { username, email, password } => {
            let password = password_or_prompt(password)?;
            let token = api
                .signup(&username, &email, &password)
                .await
                .map_err(CliError::api(Operation::Signup))?;
            api.session().login(&token)?;
            Ok(format!("Account created. Logged in as {email}."))
        }
        Command::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let token = api.login(&email, &password).await.map_err(CliError::api(Operation::Login))?;
            api.session().login(&token)?;
            Ok(format!("Logged in as {email}."))
        }
        Command::Logout => {
            api.session().logout();
            Ok("Logged out.".to_owned())
        }
        Command::Status => {
            let snapshot = api.initialize_session().await;
            Ok(if snapshot.is_authenticated() { "Logged in." } else { "Not logged in." }.to_owned())
        }
        Command::Docs(docs) => {
            require_session(api).await?;
            run_docs(api, docs.command).await
        }
        Command::Summarize { id } => {
            require_session(api).await?;
            api.summarize(&id).await.map_err(CliError::api(Operation::Summarize))
        }
        Command::Summary { id } => {
            require_session(api).await?;
            let summary = api.get_summary(&id).await.map_err(CliError::api(Operation::LoadSummary))?;
            Ok(summary.unwrap_or_else(|| "No summary available.".to_owned()))
        }
        Command::Ask { id, question } => {
            require_session(api).await?;
            api.ask(&id, &question).await.map_err(CliError::api(Operation::Ask))
        }
        Command::History { id } => {
            require_session(api).await?;
            let history = api.qa_history(&id).await.map_err(CliError::api(Operation::LoadHistory))?;
            Ok(format_history(&history))
        }
    }
}

async fn run_docs<T: Transport>(api: &ApiClient<T>, command: DocsSubcommand) -> Result<String, CliError> {
    match command {
        DocsSubcommand::List { search } => {
            let items = api.list_documents().await.map_err(CliError::api(Operation::ListDocuments))?;
            let mut list = DocumentList::new(items);
            if let Some(query) = search {
                list.set_query(&query);
            }
            Ok(format_document_list(&list))
        }
        DocsSubcommand::Show { id } => {
            let document = api.get_document(&id).await.map_err(CliError::api(Operation::LoadDocument))?;
            let summary = match api.get_summary(&id).await {
                Ok(summary) => summary,
                Err(err) => {
                    tracing::debug!(%id, error = %err, "summary lookup failed");
                    None
                }
            };
            let history = api.qa_history(&id).await.map_err(CliError::api(Operation::LoadHistory))?;
            Ok(format_document_detail(&document, summary.as_deref(), &history))
        }
        DocsSubcommand::Upload { path } => {
            let file = read_upload(&path)?;
            let document = api.upload(file).await.map_err(CliError::api(Operation::Upload))?;
            Ok(format!("File uploaded successfully! {}", document.id))
        }
        DocsSubcommand::Delete { id } => {
            api.delete_document(&id).await.map_err(CliError::api(Operation::Delete))?;
            Ok("Document deleted.".to_owned())
        }
    }
}

async fn require_session<T: Transport>(api: &ApiClient<T>) -> Result<(), CliError> {
    if api.initialize_session().await.is_authenticated() {
        Ok(())
    } else {
        Err(CliError::NotLoggedIn)
    }
}

/// Check name and size from metadata before reading the file into memory.
fn read_upload(path: &Path) -> Result<UploadFile, CliError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let read_error = |source| CliError::ReadFile { path: path.to_owned(), source };

    let size = std::fs::metadata(path).map_err(read_error)?.len();
    validate_upload(Some((&file_name, size))).map_err(|err| CliError::Api {
        op: Operation::Upload,
        source: ApiError::Validation(err),
    })?;
    let bytes = std::fs::read(path).map_err(read_error)?;
    Ok(UploadFile::new(file_name, bytes))
}

fn password_or_prompt(password: Option<String>) -> Result<String, CliError> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

pub fn format_document_list(list: &DocumentList) -> String {
    let visible = list.visible();
    if visible.is_empty() {
        let notice = if list.is_empty() { "No documents uploaded yet." } else { "No documents match your search." };
        return notice.to_owned();
    }
    let mut out = String::new();
    for doc in visible {
        let _ = writeln!(out, "{}  {}  {}", doc.id, short_date(&doc.upload_date), doc.filename);
    }
    out.trim_end().to_owned()
}

pub fn format_document_detail(document: &Document, summary: Option<&str>, history: &[QaEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", document.filename);
    let _ = writeln!(out, "id:       {}", document.id);
    let _ = writeln!(out, "uploaded: {}", short_date(&document.upload_date));
    let _ = writeln!(out, "summary:  {}", if summary.is_some() { "Generated" } else { "Not Generated" });
    let _ = writeln!(out, "q&a:      {} questions asked", history.len());
    if let Some(summary) = summary {
        let _ = write!(out, "\n{summary}");
    }
    out.trim_end().to_owned()
}

pub fn format_history(history: &[QaEntry]) -> String {
    if history.is_empty() {
        return "No questions asked yet.".to_owned();
    }
    history
        .iter()
        .map(|entry| format!("Q: {}\nA: {}", entry.question, entry.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `2024-05-01T12:34:56.000Z` -> `2024-05-01 12:34`.
fn short_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "Unknown date".to_owned();
    }
    raw.chars().take(16).map(|c| if c == 'T' { ' ' } else { c }).collect()
}
