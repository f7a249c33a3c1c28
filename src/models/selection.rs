// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Client-side visibility set.
//!
//! The single owned container for "which elements are included in the
//! next export". Initialized to every element id on load and mutated
//! only through the explicit actions below; persistence never rolls it
//! back.

use crate::models::element::Element;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct VisibilitySet {
    included: HashSet<String>,
}

impl VisibilitySet {
    /// Build a set including every element, the state after a fresh load.
    pub fn all(elements: &[Element]) -> Self {
        Self {
            included: elements.iter().map(|e| e.id.clone()).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.included.contains(id)
    }

    /// Toggle one element; returns true if the element is now included.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.included.remove(id) {
            false
        } else {
            self.included.insert(id.to_string());
            true
        }
    }

    pub fn select_all(&mut self, elements: &[Element]) {
        self.included = elements.iter().map(|e| e.id.clone()).collect();
    }

    pub fn deselect_all(&mut self) {
        self.included.clear();
    }

    /// Replace the set with the given ids (loading saved annotations).
    pub fn restore<I: IntoIterator<Item = String>>(&mut self, ids: I) {
        self.included = ids.into_iter().collect();
    }

    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::element::Bounds;

    fn elements(ids: &[&str]) -> Vec<Element> {
        ids.iter()
            .map(|id| Element {
                id: id.to_string(),
                bounds: Bounds::new(0, 0, 10, 10),
                class_label: String::new(),
                text: String::new(),
                resource_id: String::new(),
                content_desc: String::new(),
                clickable: false,
                enabled: true,
                visible: true,
                focused: false,
            })
            .collect()
    }

    #[test]
    fn test_initialized_to_all() {
        let els = elements(&["1", "2", "3"]);
        let set = VisibilitySet::all(&els);
        assert_eq!(set.len(), 3);
        assert!(set.contains("1") && set.contains("2") && set.contains("3"));
    }

    #[test]
    fn test_toggle() {
        let els = elements(&["1", "2"]);
        let mut set = VisibilitySet::all(&els);
        assert!(!set.toggle("1"));
        assert!(!set.contains("1"));
        assert!(set.toggle("1"));
        assert!(set.contains("1"));
    }

    #[test]
    fn test_deselect_then_select_all_roundtrip() {
        let els = elements(&["1", "2", "3"]);
        let mut set = VisibilitySet::all(&els);
        let before: Vec<bool> = els.iter().map(|e| set.contains(&e.id)).collect();

        set.deselect_all();
        assert!(set.is_empty());

        set.select_all(&els);
        let after: Vec<bool> = els.iter().map(|e| set.contains(&e.id)).collect();
        assert_eq!(before, after);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_restore() {
        let els = elements(&["1", "2", "3"]);
        let mut set = VisibilitySet::all(&els);
        set.restore(vec!["2".to_string()]);
        assert_eq!(set.len(), 1);
        assert!(!set.contains("1"));
        assert!(set.contains("2"));
    }
}
