// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Element type classification.
//!
//! Maps free-text widget class labels onto a fixed seven-type taxonomy,
//! each with a display color, a coarse legend category, and a base
//! testing-priority score.

use serde::{Deserialize, Serialize};

/// Fixed element taxonomy, in rule-priority order: the first type whose
/// keyword list matches the class label wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Button,
    EditText,
    TextView,
    ImageView,
    ViewGroup,
    FrameLayout,
    Other,
}

/// Coarse grouping used for the legend and statistics aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Interactive,
    Input,
    Content,
    Media,
    Layout,
    Other,
}

/// Keyword rules per type, evaluated in declaration order.
const RULES: [(ElementType, &[&str]); 6] = [
    (ElementType::Button, &["button", "clickable", "menu", "tab", "chip"]),
    (ElementType::EditText, &["edittext", "edit", "input", "autocomplete"]),
    (ElementType::TextView, &["textview", "text", "label"]),
    (ElementType::ImageView, &["imageview", "image", "icon"]),
    (ElementType::ViewGroup, &["viewgroup", "recycler", "listview", "scroll", "pager"]),
    (ElementType::FrameLayout, &["layout", "frame", "container"]),
];

/// Classify a class label into the fixed taxonomy.
///
/// Matching is case-insensitive substring matching; unmatched or empty
/// input falls through to `Other`.
pub fn classify(class_label: &str) -> ElementType {
    if class_label.is_empty() {
        return ElementType::Other;
    }
    let lower = class_label.to_lowercase();
    for (element_type, keywords) in RULES {
        if keywords.iter().any(|k| lower.contains(k)) {
            return element_type;
        }
    }
    ElementType::Other
}

impl ElementType {
    /// Fixed display palette, one entry per type.
    pub fn color_hex(self) -> &'static str {
        match self {
            ElementType::Button => "#FF6B6B",
            ElementType::EditText => "#4ECDC4",
            ElementType::TextView => "#45B7D1",
            ElementType::ImageView => "#F9CA24",
            ElementType::ViewGroup => "#6C5CE7",
            ElementType::FrameLayout => "#A29BFE",
            ElementType::Other => "#95A5A6",
        }
    }

    pub fn category(self) -> Category {
        match self {
            ElementType::Button => Category::Interactive,
            ElementType::EditText => Category::Input,
            ElementType::TextView => Category::Content,
            ElementType::ImageView => Category::Media,
            ElementType::ViewGroup | ElementType::FrameLayout => Category::Layout,
            ElementType::Other => Category::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementType::Button => "Button",
            ElementType::EditText => "EditText",
            ElementType::TextView => "TextView",
            ElementType::ImageView => "ImageView",
            ElementType::ViewGroup => "ViewGroup",
            ElementType::FrameLayout => "FrameLayout",
            ElementType::Other => "Other",
        }
    }
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Interactive => "Interactive",
            Category::Input => "Input",
            Category::Content => "Content",
            Category::Media => "Media",
            Category::Layout => "Layout",
            Category::Other => "Other",
        }
    }
}

/// Testing-priority score, 1-7.
///
/// Base score by type (Button=5, EditText=4, TextView=3 with text else 2,
/// ImageView=2, everything else 1), +2 if clickable, +1 for non-empty
/// text, capped at 7.
pub fn priority(element_type: ElementType, clickable: bool, text: &str) -> u8 {
    let base = match element_type {
        ElementType::Button => 5,
        ElementType::EditText => 4,
        ElementType::TextView => {
            if text.is_empty() {
                2
            } else {
                3
            }
        }
        ElementType::ImageView => 2,
        _ => 1,
    };
    let mut score = base;
    if clickable {
        score += 2;
    }
    if !text.is_empty() {
        score += 1;
    }
    score.min(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_android_widgets() {
        assert_eq!(classify("android.widget.Button"), ElementType::Button);
        assert_eq!(classify("android.widget.ImageButton"), ElementType::Button);
        assert_eq!(classify("android.widget.EditText"), ElementType::EditText);
        assert_eq!(classify("android.widget.TextView"), ElementType::TextView);
        assert_eq!(classify("android.widget.ImageView"), ElementType::ImageView);
        assert_eq!(
            classify("androidx.recyclerview.widget.RecyclerView"),
            ElementType::ViewGroup
        );
        assert_eq!(classify("android.widget.FrameLayout"), ElementType::FrameLayout);
        assert_eq!(classify("android.widget.LinearLayout"), ElementType::FrameLayout);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("ANDROID.WIDGET.BUTTON"), ElementType::Button);
        assert_eq!(classify("edittext"), ElementType::EditText);
    }

    #[test]
    fn test_classify_first_rule_wins() {
        // "button" outranks "image" even though both match.
        assert_eq!(classify("some.ImageButton"), ElementType::Button);
        // "edit" outranks "text".
        assert_eq!(classify("custom.EditTextView"), ElementType::EditText);
    }

    #[test]
    fn test_classify_unknown_falls_through() {
        assert_eq!(classify(""), ElementType::Other);
        assert_eq!(classify("some.unknown.Thing"), ElementType::Other);
        assert_eq!(classify("android.view.View"), ElementType::Other);
    }

    #[test]
    fn test_palette() {
        assert_eq!(ElementType::Button.color_hex(), "#FF6B6B");
        assert_eq!(ElementType::Other.color_hex(), "#95A5A6");
        assert_eq!(classify("android.widget.Button").color_hex(), "#FF6B6B");
        assert_eq!(classify("some.unknown.Thing").color_hex(), "#95A5A6");
    }

    #[test]
    fn test_categories() {
        assert_eq!(ElementType::Button.category(), Category::Interactive);
        assert_eq!(ElementType::EditText.category(), Category::Input);
        assert_eq!(ElementType::TextView.category(), Category::Content);
        assert_eq!(ElementType::ImageView.category(), Category::Media);
        assert_eq!(ElementType::ViewGroup.category(), Category::Layout);
        assert_eq!(ElementType::FrameLayout.category(), Category::Layout);
        assert_eq!(ElementType::Other.category(), Category::Other);
    }

    #[test]
    fn test_priority_scores() {
        // Clickable button, no text: 5 + 2 = 7.
        assert_eq!(priority(ElementType::Button, true, ""), 7);
        // Plain button: 5.
        assert_eq!(priority(ElementType::Button, false, ""), 5);
        // TextView with text: 3 + 1 = 4; without: 2.
        assert_eq!(priority(ElementType::TextView, false, "Hello"), 4);
        assert_eq!(priority(ElementType::TextView, false, ""), 2);
        // EditText: 4; clickable with text would exceed the cap.
        assert_eq!(priority(ElementType::EditText, false, ""), 4);
        assert_eq!(priority(ElementType::EditText, true, "hint"), 7);
        // Layouts and unknowns bottom out at 1.
        assert_eq!(priority(ElementType::FrameLayout, false, ""), 1);
        assert_eq!(priority(ElementType::Other, false, ""), 1);
    }

    #[test]
    fn test_priority_cap() {
        // Clickable button with text: 5 + 2 + 1 = 8, capped at 7.
        assert_eq!(priority(ElementType::Button, true, "OK"), 7);
    }
}
