//! Which contexts a batch runs against.

/// Selected contexts when at least two are selected, otherwise the active
/// context alone (or nothing without one).
#[must_use]
pub fn effective_contexts(selected: &[String], active: Option<&str>) -> Vec<String> {
    if selected.len() >= 2 {
        return selected.to_vec();
    }
    active.map(|a| vec![a.to_string()]).unwrap_or_default()
}
