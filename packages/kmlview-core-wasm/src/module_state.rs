use lazy_static::lazy_static;
use parking_lot::ReentrantMutex;
use std::cell::RefCell;

use crate::models::{Bounds, DocumentStats, Summary};

/// The analysis result for the document currently on display, kept until the
/// next upload replaces it.
pub struct LoadedDocument {
    pub summary: Summary,
    pub bounds: Bounds,
    pub loaded_at: f64,
}

/// Module state owned by the wasm instance: the current document plus
/// lifetime counters for diagnostics.
pub struct ModuleState {
    pub current: Option<LoadedDocument>,
    pub documents_loaded: usize,
    pub parse_failures: usize,
}

lazy_static! {
    static ref MODULE_STATE: ReentrantMutex<RefCell<ModuleState>> =
        ReentrantMutex::new(RefCell::new(ModuleState::new()));
}

impl ModuleState {
    pub fn new() -> Self {
        ModuleState {
            current: None,
            documents_loaded: 0,
            parse_failures: 0,
        }
    }

    pub fn with_mut<F, R>(f: F) -> R
    where
        F: FnOnce(&mut ModuleState) -> R,
    {
        let guard = MODULE_STATE.lock();
        let mut borrow = guard.borrow_mut();
        f(&mut borrow)
    }

    pub fn with<F, R>(f: F) -> R
    where
        F: FnOnce(&ModuleState) -> R,
    {
        let guard = MODULE_STATE.lock();
        let borrow = guard.borrow();
        f(&borrow)
    }

    /// Replace the displayed document. Last write wins; there is no merging
    /// of summaries across uploads.
    pub fn replace_document(&mut self, summary: Summary, bounds: Bounds, loaded_at: f64) {
        self.current = Some(LoadedDocument {
            summary,
            bounds,
            loaded_at,
        });
        self.documents_loaded += 1;
    }

    /// A failed parse leaves the current document untouched.
    pub fn record_parse_failure(&mut self) {
        self.parse_failures += 1;
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            documents_loaded: self.documents_loaded,
            parse_failures: self.parse_failures,
            has_document: self.current.is_some(),
            feature_count: self
                .current
                .as_ref()
                .map(|doc| doc.summary.geo_json.features.len())
                .unwrap_or(0),
            element_count: self
                .current
                .as_ref()
                .map(|doc| doc.summary.elements.len())
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FeatureCollection;
    use std::collections::HashMap;

    fn summary() -> Summary {
        Summary {
            element_counts: HashMap::new(),
            elements: Vec::new(),
            geo_json: FeatureCollection::new(vec![]),
        }
    }

    fn bounds() -> Bounds {
        Bounds {
            north: 1.0,
            south: 0.0,
            east: 1.0,
            west: 0.0,
        }
    }

    #[test]
    fn test_replace_is_last_write_wins() {
        let mut state = ModuleState::new();
        state.replace_document(summary(), bounds(), 1.0);
        state.replace_document(summary(), bounds(), 2.0);
        assert_eq!(state.documents_loaded, 2);
        assert_eq!(state.current.as_ref().unwrap().loaded_at, 2.0);
    }

    #[test]
    fn test_parse_failure_keeps_current_document() {
        let mut state = ModuleState::new();
        state.replace_document(summary(), bounds(), 1.0);
        state.record_parse_failure();
        assert!(state.current.is_some());
        assert_eq!(state.parse_failures, 1);
        assert_eq!(state.documents_loaded, 1);
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut state = ModuleState::new();
        state.replace_document(summary(), bounds(), 1.0);
        state.clear();
        assert!(state.current.is_none());
        let stats = state.stats();
        assert_eq!(stats.documents_loaded, 1);
        assert!(!stats.has_document);
        assert_eq!(stats.feature_count, 0);
    }
}
