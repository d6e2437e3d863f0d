use crate::commands::{
    filled_list, parse_visitor_id, print_form, print_json_line, runtime, status_line,
    visitor_label, Context,
};
use anyhow::Result;
use clap::Args;
use frontdesk_core::{AutoFill, IdentityField, MatchKind, VisitorForm, VisitorId};
use frontdesk_lookup::{ExistenceChecker, ExistenceSnapshot};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Id of the visitor being edited; it is never reported as a duplicate
    #[arg(long)]
    pub visitor_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Name,
    Email,
    Phone,
    Company,
    Purpose,
    Host,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    Set(FormField, String),
    Clear,
    Show,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum WatchEvent<'a> {
    Existence {
        match_kind: MatchKind,
        #[serde(flatten)]
        snapshot: &'a ExistenceSnapshot,
    },
    Autofill {
        visitor_id: &'a VisitorId,
        fields: &'a [IdentityField],
    },
    Form {
        form: &'a VisitorForm,
    },
}

fn parse_line(line: &str) -> std::result::Result<Option<Edit>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (key, value) = match trimmed.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => (trimmed, ""),
    };

    let field = match key.to_ascii_lowercase().as_str() {
        "clear" => return Ok(Some(Edit::Clear)),
        "show" => return Ok(Some(Edit::Show)),
        "name" => FormField::Name,
        "email" => FormField::Email,
        "phone" => FormField::Phone,
        "company" => FormField::Company,
        "purpose" => FormField::Purpose,
        "host" => FormField::Host,
        other => {
            return Err(format!(
                "unknown field {other:?}: expected name|email|phone|company|purpose|host|clear|show"
            ))
        }
    };
    Ok(Some(Edit::Set(field, value.to_string())))
}

struct Session {
    checker: ExistenceChecker,
    form: VisitorForm,
    autofill: AutoFill,
}

impl Session {
    fn apply(&mut self, ctx: &Context<'_>, edit: Edit) -> Result<()> {
        match edit {
            Edit::Set(field, value) => match field {
                FormField::Name => self.form.name = value,
                FormField::Company => self.form.company = value,
                FormField::Purpose => self.form.purpose = value,
                FormField::Host => self.form.host = value,
                FormField::Email => {
                    self.checker.set_email(&value);
                    self.form.email = value;
                }
                FormField::Phone => {
                    self.checker.set_phone(&value);
                    self.form.phone = value;
                }
            },
            Edit::Clear => {
                self.form = VisitorForm::default();
                self.autofill.reset();
                self.checker.set_email("");
                self.checker.set_phone("");
            }
            Edit::Show => self.emit_form(ctx)?,
        }
        Ok(())
    }

    fn on_snapshot(&mut self, ctx: &Context<'_>, snapshot: &ExistenceSnapshot) -> Result<()> {
        if ctx.json {
            print_json_line(&WatchEvent::Existence {
                match_kind: snapshot.match_kind(),
                snapshot,
            })?;
        } else {
            println!("{}", status_line(snapshot));
        }

        if !snapshot.match_kind().is_match() {
            self.autofill.reset();
            return Ok(());
        }
        let Some(visitor) = snapshot.found_visitor.as_ref() else {
            return Ok(());
        };
        let Some(outcome) = self.autofill.apply(&mut self.form, visitor) else {
            return Ok(());
        };
        if !outcome.should_notify() {
            return Ok(());
        }

        ctx.notify_autofill(visitor, &outcome);
        if ctx.json {
            print_json_line(&WatchEvent::Autofill {
                visitor_id: &outcome.visitor_id,
                fields: &outcome.filled,
            })?;
        } else {
            println!(
                "auto-filled {} from {}",
                filled_list(&outcome.filled),
                visitor_label(visitor)
            );
        }

        for field in &outcome.filled {
            match field {
                IdentityField::Email => self.checker.set_email(&self.form.email),
                IdentityField::Phone => self.checker.set_phone(&self.form.phone),
                IdentityField::Name => {}
            }
        }
        Ok(())
    }

    fn emit_form(&self, ctx: &Context<'_>) -> Result<()> {
        if ctx.json {
            return print_json_line(&WatchEvent::Form { form: &self.form });
        }
        print_form(&self.form);
        Ok(())
    }
}

pub fn watch(ctx: &Context<'_>, args: WatchArgs) -> Result<()> {
    let editing = args
        .visitor_id
        .as_deref()
        .map(parse_visitor_id)
        .transpose()?;
    runtime()?.block_on(run(ctx, editing))
}

async fn run(ctx: &Context<'_>, editing: Option<VisitorId>) -> Result<()> {
    let mut session = Session {
        checker: ctx.checker(editing),
        form: VisitorForm::default(),
        autofill: AutoFill::new(),
    };
    let mut updates = session.checker.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Some(edit)) => session.apply(ctx, edit)?,
                    Ok(None) => {}
                    Err(message) => warn!(line = %line, "{message}"),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                session.on_snapshot(ctx, &snapshot)?;
            }
        }
    }

    // Input is closed; let pending searches land before the final report.
    loop {
        session.checker.settle().await;
        if !updates.has_changed().unwrap_or(false) {
            break;
        }
        let snapshot = updates.borrow_and_update().clone();
        session.on_snapshot(ctx, &snapshot)?;
    }
    session.emit_form(ctx)
}
