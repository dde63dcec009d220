//! Handler for `kubefan list`: one merged table across contexts.

use chrono::{DateTime, Utc};
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::command::ListArgs;
use super::output;
use crate::domain::{ContextObject, RowId};
use crate::error::Result;
use crate::infrastructure::Session;

#[derive(Tabled)]
pub(crate) struct ObjectRow {
    #[tabled(rename = "CONTEXT")]
    context: String,
    #[tabled(rename = "NAMESPACE")]
    namespace: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "AGE")]
    age: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Row ID for `object`; composite only when several contexts are merged.
pub(crate) fn row_id(object: &ContextObject, multi: bool) -> RowId {
    if multi {
        RowId::join(&object.context, &object.path())
    } else {
        RowId::new(object.path())
    }
}

/// Compact age (`45s`, `12m`, `3h`, `9d`) from an RFC 3339 timestamp.
pub(crate) fn age(created: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(created) = created.and_then(|ts| DateTime::parse_from_rfc3339(ts).ok()) else {
        return "<unknown>".to_string();
    };
    let secs = (now - created.with_timezone(&Utc)).num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{s}s"),
        s if s < 3600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3600),
        s => format!("{}d", s / 86_400),
    }
}

pub(crate) fn rows(objects: &[ContextObject], multi: bool, now: DateTime<Utc>) -> Vec<ObjectRow> {
    objects
        .iter()
        .map(|object| ObjectRow {
            context: object.context.clone(),
            namespace: object.namespace().unwrap_or("-").to_string(),
            name: object.name().to_string(),
            age: age(object.creation_timestamp(), now),
            id: row_id(object, multi).to_string(),
        })
        .collect()
}

/// Render the merged table as text.
pub(crate) fn render(objects: &[ContextObject], multi: bool) -> String {
    let mut table = Table::new(rows(objects, multi, Utc::now()));
    table.with(Style::blank());
    table.to_string()
}

pub(crate) fn items_json(objects: &[ContextObject], multi: bool) -> serde_json::Value {
    objects
        .iter()
        .map(|object| {
            json!({
                "context": object.context,
                "id": row_id(object, multi).to_string(),
                "object": object.object,
            })
        })
        .collect()
}

/// Execute the list command.
pub async fn execute(session: &Session, args: ListArgs) -> Result<()> {
    let contexts = session.batch_contexts(&args.target.contexts)?;
    if contexts.is_empty() {
        output::warning("No contexts selected and no active context");
        output::hint("select contexts with `kubefan contexts select <name>...`");
        return Ok(());
    }
    let multi = contexts.len() > 1;

    let pb = output::spinner(&format!(
        "Listing {} across {} context(s)",
        args.resource,
        contexts.len()
    ));
    let objects = session
        .multi
        .list_across_contexts(
            &contexts,
            &args.resource,
            args.namespace.as_deref(),
            args.selector.as_deref(),
        )
        .await;
    output::spinner_clear(&pb);

    if output::is_json() {
        output::json_output(json!({
            "command": "list",
            "resource": args.resource.to_string(),
            "contexts": contexts,
            "items": items_json(&objects, multi),
        }));
        return Ok(());
    }

    if objects.is_empty() {
        output::note(&format!("No {} found", args.resource.resource));
        return Ok(());
    }
    output::raw(&format!("{}\n", render(&objects, multi)));
    Ok(())
}
