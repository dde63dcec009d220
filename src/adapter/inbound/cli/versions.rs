//! Handler for `kubefan versions`.

use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::command::ContextArgs;
use super::output;
use crate::domain::NA;
use crate::error::Result;
use crate::infrastructure::Session;

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "CONTEXT")]
    context: String,
    #[tabled(rename = "VERSION")]
    version: String,
}

/// Execute the versions command.
pub async fn execute(session: &Session, args: ContextArgs) -> Result<()> {
    let contexts = session.batch_contexts(&args.contexts)?;
    if contexts.is_empty() {
        output::warning("No contexts selected and no active context");
        return Ok(());
    }

    let pb = output::spinner(&format!("Probing {} context(s)", contexts.len()));
    let versions = session.multi.server_versions(&contexts).await;
    output::spinner_clear(&pb);

    if output::is_json() {
        output::json_output(json!({
            "command": "versions",
            "versions": versions,
        }));
        return Ok(());
    }

    let unreachable = versions.values().filter(|v| v.as_str() == NA).count();
    // Keep the caller's context order.
    let rows: Vec<VersionRow> = contexts
        .iter()
        .map(|context| {
            let version = versions.get(context).map_or(NA, String::as_str);
            VersionRow {
                context: context.clone(),
                version: if version == NA {
                    output::muted(version)
                } else {
                    version.to_string()
                },
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::blank());
    output::raw(&format!("{table}\n"));
    if unreachable > 0 {
        output::warning(&format!("{unreachable} context(s) did not answer"));
    }
    Ok(())
}
