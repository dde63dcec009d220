//! Handler for `kubefan contexts`: the persisted selection.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::command::ContextsCommand;
use super::output;
use crate::error::Result;
use crate::infrastructure::Session;

#[derive(Tabled)]
struct ContextRow {
    #[tabled(rename = "CURRENT")]
    current: &'static str,
    #[tabled(rename = "SELECTED")]
    selected: &'static str,
    #[tabled(rename = "NAME")]
    name: String,
}

/// Execute a contexts subcommand.
pub fn execute(session: &Session, command: ContextsCommand) -> Result<()> {
    let known = session.contexts.context_names();
    match command {
        ContextsCommand::List => return list(session, &known),
        ContextsCommand::Select(args) => {
            let mut selected = session.selection.load()?;
            for name in args.names {
                if !known.contains(&name) {
                    output::warning(&format!("Unknown context {name:?}, skipped"));
                } else if !selected.contains(&name) {
                    selected.push(name);
                }
            }
            session.selection.save(&selected)?;
        }
        ContextsCommand::Deselect(args) => {
            let mut selected = session.selection.load()?;
            selected.retain(|name| !args.names.contains(name));
            session.selection.save(&selected)?;
        }
        ContextsCommand::Toggle(arg) => {
            if !known.contains(&arg.name) {
                output::warning(&format!("Unknown context {:?}", arg.name));
                return Ok(());
            }
            let now = session.selection.toggle(&arg.name)?;
            let state = if now { "selected" } else { "deselected" };
            output::success(&format!("{} {state}", arg.name));
        }
        ContextsCommand::All => session.selection.select_all(&known)?,
        ContextsCommand::Clear => session.selection.clear()?,
    }
    summary(session)
}

fn list(session: &Session, known: &[String]) -> Result<()> {
    let selected = session.selection.load()?;
    let active = session.active_context();

    if output::is_json() {
        output::json_output(json!({
            "command": "contexts.list",
            "current": active,
            "contexts": known,
            "selected": selected,
            "effective": session.batch_contexts(&[])?,
        }));
        return Ok(());
    }

    if known.is_empty() {
        output::warning("No contexts found in kubeconfig");
        return Ok(());
    }
    let rows: Vec<ContextRow> = known
        .iter()
        .map(|name| ContextRow {
            current: if active.as_deref() == Some(name.as_str()) {
                "*"
            } else {
                ""
            },
            selected: if selected.contains(name) { "✓" } else { "" },
            name: name.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::blank());
    output::raw(&format!("{table}\n"));
    summary(session)
}

fn summary(session: &Session) -> Result<()> {
    let effective = session.batch_contexts(&[])?;
    if output::is_json() {
        output::json_output(json!({ "command": "contexts", "effective": effective }));
        return Ok(());
    }
    if effective.is_empty() {
        output::note("Batch commands have no target context");
    } else {
        output::field("Targets", effective.join(", "));
    }
    Ok(())
}
