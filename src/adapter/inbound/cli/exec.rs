//! Handler for `kubefan exec`: kubectl across contexts, positional report.

use serde_json::json;

use super::command::ExecArgs;
use super::output;
use crate::application::command::format_results;
use crate::error::Result;
use crate::infrastructure::Session;

/// Execute the exec command.
///
/// Per-context failures are part of the report, not an error.
pub async fn execute(session: &Session, args: ExecArgs) -> Result<()> {
    let contexts = session.batch_contexts(&args.target.contexts)?;
    if contexts.is_empty() {
        output::warning("No contexts selected and no active context");
        return Ok(());
    }
    let max_parallel = args
        .max_parallel
        .unwrap_or(session.config.fanout.command_max_parallel);

    let results = session
        .multi
        .run_command_across_contexts(&contexts, &args.args, max_parallel)
        .await;

    if output::is_json() {
        let slots: Vec<_> = results
            .iter()
            .map(|r| {
                json!({
                    "context": r.context,
                    "output": r.output,
                    "error": r.error.as_ref().map(ToString::to_string),
                })
            })
            .collect();
        output::json_output(json!({ "command": "exec", "results": slots }));
        return Ok(());
    }

    output::raw(&format_results(&results));
    let failed = results.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        output::warning(&format!("{failed}/{} context(s) failed", results.len()));
    }
    Ok(())
}
