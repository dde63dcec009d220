//! Selection port for the persisted list of selected contexts.

use crate::error::Result;

/// Ordered list of selected context names.
pub trait SelectionStore: Send + Sync {
    /// Read the current selection; a missing store reads as empty.
    fn load(&self) -> Result<Vec<String>>;

    /// Replace the selection atomically.
    fn save(&self, contexts: &[String]) -> Result<()>;

    /// Add `context` if absent, remove it otherwise. Returns whether it is
    /// selected afterwards.
    fn toggle(&self, context: &str) -> Result<bool> {
        let mut selected = self.load()?;
        let now_selected = match selected.iter().position(|c| c == context) {
            Some(idx) => {
                selected.remove(idx);
                false
            }
            None => {
                selected.push(context.to_string());
                true
            }
        };
        self.save(&selected)?;
        Ok(now_selected)
    }

    /// Select every name in `contexts`, keeping their order.
    fn select_all(&self, contexts: &[String]) -> Result<()> {
        let mut unique: Vec<String> = Vec::with_capacity(contexts.len());
        for context in contexts {
            if !unique.contains(context) {
                unique.push(context.clone());
            }
        }
        self.save(&unique)
    }

    fn clear(&self) -> Result<()> {
        self.save(&[])
    }
}
