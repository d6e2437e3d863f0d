use crate::error::invalid_input;
use crate::notify::{send_quietly, Notifier};
use anyhow::{Context as _, Result};
use frontdesk_config::AppConfig;
use frontdesk_core::{FillOutcome, IdentityField, Visitor, VisitorForm, VisitorId};
use frontdesk_lookup::http::{HttpDirectory, HttpDirectoryOptions};
use frontdesk_lookup::{
    CheckerSettings, ExistenceChecker, ExistenceSnapshot, LocalDirectory, VisitorDirectory,
};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

pub mod check;
pub mod completions;
pub mod watch;

pub struct Context<'a> {
    pub config: &'a AppConfig,
    pub directory: Arc<dyn VisitorDirectory>,
    pub json: bool,
    pub notifier: Option<&'a dyn Notifier>,
}

impl Context<'_> {
    pub fn checker(&self, editing: Option<VisitorId>) -> ExistenceChecker {
        let settings = CheckerSettings {
            email_debounce: self.config.lookup.email_debounce(),
            phone_debounce: self.config.lookup.phone_debounce(),
        };
        ExistenceChecker::new(Arc::clone(&self.directory), settings).editing(editing)
    }

    pub fn notify_autofill(&self, visitor: &Visitor, outcome: &FillOutcome) {
        let Some(notifier) = self.notifier else {
            return;
        };
        if !outcome.should_notify() {
            return;
        }
        send_quietly(
            notifier,
            "Visitor details auto-filled",
            &format!(
                "filled {} from {}",
                filled_list(&outcome.filled),
                visitor_label(visitor)
            ),
        );
    }
}

pub fn open_directory(
    config: &AppConfig,
    local_path: Option<&Path>,
) -> Result<Arc<dyn VisitorDirectory>> {
    if let Some(path) = local_path {
        let directory = LocalDirectory::load(path)
            .with_context(|| format!("load visitor directory {}", path.display()))?;
        debug!(
            path = %path.display(),
            visitors = directory.visitors().len(),
            "local directory loaded"
        );
        return Ok(Arc::new(directory));
    }

    let base_url = config.api.base_url.clone().ok_or_else(|| {
        invalid_input("no visitor directory configured: set api.base_url or pass --directory")
    })?;
    let token = match config.api.token_env.as_deref() {
        Some(name) => {
            let value = env::var(name)
                .map_err(|_| invalid_input(format!("missing env var {name}")))?;
            let value = value.trim();
            if value.is_empty() {
                return Err(invalid_input(format!("env var {name} is empty")));
            }
            Some(value.to_string())
        }
        None => None,
    };
    let directory = HttpDirectory::new(HttpDirectoryOptions {
        base_url,
        token,
        timeout: Duration::from_secs(config.api.timeout_seconds),
    })?;
    Ok(Arc::new(directory))
}

pub fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .with_context(|| "start async runtime")
}

pub fn parse_visitor_id(raw: &str) -> Result<VisitorId> {
    VisitorId::from_str(raw).map_err(|_| invalid_input("visitor id cannot be empty"))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub fn print_json_line<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

pub fn print_form(form: &VisitorForm) {
    for (label, value) in [
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("company", &form.company),
        ("purpose", &form.purpose),
        ("host", &form.host),
    ] {
        if !value.is_empty() {
            println!("{label}: {value}");
        }
    }
}

pub fn visitor_label(visitor: &Visitor) -> String {
    if visitor.name.trim().is_empty() {
        format!("visitor {}", visitor.id)
    } else {
        format!("{} ({})", visitor.name.trim(), visitor.id)
    }
}

pub fn filled_list(fields: &[IdentityField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn status_line(snapshot: &ExistenceSnapshot) -> String {
    if snapshot.is_checking() {
        return "checking visitor profile...".to_string();
    }
    let flag = |exists: bool| if exists { "exists" } else { "new" };
    let mut line = format!(
        "email: {}, phone: {}",
        flag(snapshot.email_exists),
        flag(snapshot.phone_exists)
    );
    if snapshot.match_kind().is_match() {
        if let Some(visitor) = snapshot.found_visitor.as_ref() {
            line.push_str(&format!(", visitor: {}", visitor_label(visitor)));
        }
    }
    line
}
