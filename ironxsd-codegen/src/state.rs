//! Per-run generator state.

use std::collections::HashMap;

/// Mutable state of one backend run.
///
/// Owned by the backend instance and reset when the run finishes.
#[derive(Debug, Clone, Default)]
pub struct GeneratorState {
    /// Declaration name to emitted field text; doubles as the dedup memo.
    pub struct_ast: HashMap<String, String>,
    /// Emitted definitions, in traversal order.
    pub field: String,
    /// Structural name to number of times it was produced.
    pub field_name_count: HashMap<String, usize>,
    /// Set once any emitted check needs `regex`.
    pub uses_regex: bool,
}

impl GeneratorState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a definition for `name` was already emitted.
    #[must_use]
    pub fn is_emitted(&self, name: &str) -> bool {
        self.struct_ast.contains_key(name)
    }

    /// Records the field text of `name`.
    pub fn remember(&mut self, name: impl Into<String>, fields: impl Into<String>) {
        self.struct_ast.insert(name.into(), fields.into());
    }

    /// Returns `base`, suffixed with its repeat count on every repeat.
    pub fn unique_name(&mut self, base: &str) -> String {
        let count = self.field_name_count.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base.to_string()
        } else {
            format!("{base}{count}")
        }
    }

    /// Appends a rendered definition.
    pub fn push_definition(&mut self, code: &str) {
        if !self.field.is_empty() {
            self.field.push('\n');
        }
        self.field.push_str(code);
    }

    /// Takes the accumulated state, leaving a fresh one.
    pub fn reset(&mut self) -> Self {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_counts_repeats() {
        let mut state = GeneratorState::new();
        assert_eq!(state.unique_name("Order"), "Order");
        assert_eq!(state.unique_name("Order"), "Order2");
        assert_eq!(state.unique_name("Line"), "Line");
        assert_eq!(state.unique_name("Order"), "Order3");
    }

    #[test]
    fn test_memo_and_reset() {
        let mut state = GeneratorState::new();
        state.remember("order", "pub id: i64,");
        state.push_definition("pub struct Order {}\n");
        state.unique_name("Order");
        assert!(state.is_emitted("order"));

        let taken = state.reset();
        assert!(taken.is_emitted("order"));
        assert!(!state.is_emitted("order"));
        assert!(state.field.is_empty());
        assert_eq!(state.unique_name("Order"), "Order");
    }
}
