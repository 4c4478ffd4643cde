//! Default keybind assignment for newly assigned contributors.
//!
//! A user joining a task gets one keybind per distinct label already in use
//! on that task, taken from a fixed home-row-first table. The table order is
//! load-bearing: index 0 goes to the first label, index 1 to the second, and
//! so on.

use crate::error::CoreError;

/// Keybinds handed out to new contributors, in assignment order.
///
/// Home row first, then upper row, lower row, digits. `z`/`Z` is reserved
/// for the client-side undo shortcut and is deliberately absent.
pub const DEFAULT_KEYBINDS_IN_ORDER: &[char] = &[
    'A', 'S', 'D', 'F', 'J', 'K', 'L', ';', 'Q', 'W', 'E', 'R', 'T', 'Y', 'U', 'I', 'O', 'P', 'X',
    'C', 'V', 'N', 'M', 'B', '1', '2', '3', '4', '8', '9', '0', '5', '6', '7',
];

/// Key names and characters that may never be bound to a label.
pub const RESERVED_KEYBINDS: &[&str] = &["Shift", "Control", "Alt", "Meta", "z", "Z"];

/// Pair labels with default keybinds in table order.
///
/// Fails with [`CoreError::Internal`] when there are more labels than table
/// entries. Truncating silently would leave some labels unenterable for the
/// new contributor, so an oversized label set is treated as a fatal
/// configuration error.
pub fn default_keybinds_for_labels(labels: &[String]) -> Result<Vec<(String, char)>, CoreError> {
    if labels.len() > DEFAULT_KEYBINDS_IN_ORDER.len() {
        return Err(CoreError::Internal(format!(
            "Task has {} distinct labels but only {} default keybinds are available",
            labels.len(),
            DEFAULT_KEYBINDS_IN_ORDER.len()
        )));
    }

    Ok(labels
        .iter()
        .zip(DEFAULT_KEYBINDS_IN_ORDER)
        .map(|(label, key)| (label.clone(), *key))
        .collect())
}
