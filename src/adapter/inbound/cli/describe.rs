//! Handler for `kubefan describe`: route a row ID back to its context.

use serde_json::json;

use super::command::DescribeArgs;
use super::output;
use crate::domain::RowId;
use crate::error::Result;
use crate::infrastructure::Session;

/// Execute the describe command.
pub async fn execute(session: &Session, args: DescribeArgs) -> Result<()> {
    let row = RowId::new(args.id);
    let active = session.active_context();
    let found = session
        .multi
        .get_by_row(&args.resource, &row, active.as_deref())
        .await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "describe",
            "context": found.context,
            "id": row.to_string(),
            "object": found.object,
        }));
        return Ok(());
    }

    output::field("Context", output::highlight(&found.context));
    output::field("Path", found.path());
    output::raw(&format!("\n{}", serde_yaml::to_string(&found.object)?));
    Ok(())
}
