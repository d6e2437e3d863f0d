use crate::commands::{
    filled_list, parse_visitor_id, print_form, print_json, runtime, visitor_label, Context,
};
use crate::error::invalid_input;
use anyhow::Result;
use clap::Args;
use frontdesk_core::{AutoFill, IdentityField, MatchKind, Visitor, VisitorForm};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub purpose: Option<String>,
    #[arg(long)]
    pub host: Option<String>,
    /// Id of the visitor being edited; it is never reported as a duplicate
    #[arg(long)]
    pub visitor_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    match_kind: MatchKind,
    email_exists: bool,
    phone_exists: bool,
    found_visitor: Option<Visitor>,
    autofilled: Vec<IdentityField>,
    form: VisitorForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    form_error: Option<String>,
}

pub fn check(ctx: &Context<'_>, args: CheckArgs) -> Result<()> {
    let editing = args
        .visitor_id
        .as_deref()
        .map(parse_visitor_id)
        .transpose()?;
    let mut form = VisitorForm {
        name: args.name.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        phone: args.phone.unwrap_or_default(),
        company: args.company.unwrap_or_default(),
        purpose: args.purpose.unwrap_or_default(),
        host: args.host.unwrap_or_default(),
    };
    if form.email.trim().is_empty() && form.phone.trim().is_empty() {
        return Err(invalid_input("provide --email or --phone to check"));
    }

    let snapshot = runtime()?.block_on(async {
        let checker = ctx.checker(editing);
        checker.set_email(&form.email);
        checker.set_phone(&form.phone);
        checker.settle().await;
        checker.snapshot()
    });

    let mut autofilled = Vec::new();
    if snapshot.match_kind().is_match() {
        if let Some(visitor) = snapshot.found_visitor.as_ref() {
            if let Some(outcome) = AutoFill::new().apply(&mut form, visitor) {
                ctx.notify_autofill(visitor, &outcome);
                autofilled = outcome.filled;
            }
        }
    }

    let form_error = form.validate().err().map(|err| err.to_string());
    let report = CheckReport {
        match_kind: snapshot.match_kind(),
        email_exists: snapshot.email_exists,
        phone_exists: snapshot.phone_exists,
        found_visitor: snapshot.found_visitor,
        autofilled,
        form,
        form_error,
    };

    if ctx.json {
        return print_json(&report);
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &CheckReport) {
    match (report.match_kind, report.found_visitor.as_ref()) {
        (MatchKind::None, _) | (_, None) => println!("no existing visitor"),
        (kind, Some(visitor)) => {
            println!(
                "existing visitor: {} (matched by {})",
                visitor_label(visitor),
                kind.as_str()
            );
        }
    }
    if !report.autofilled.is_empty() {
        println!("auto-filled: {}", filled_list(&report.autofilled));
    }
    print_form(&report.form);
    if let Some(message) = report.form_error.as_deref() {
        println!("form incomplete: {message}");
    }
}
