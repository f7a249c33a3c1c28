// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation payload building and local JSON export.
//!
//! The payload is the single serialization used for both the local file
//! export and remote persistence; the two outcomes are independent and
//! either may succeed while the other fails.

use crate::models::element::Element;
use crate::models::project::Project;
use crate::models::selection::VisibilitySet;
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ANNOTATION_TOOL: &str = "drizz";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationPayload {
    pub image_info: ImageInfo,
    pub annotations: Vec<AnnotationEntry>,
    pub metadata: PayloadMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationEntry {
    pub id: String,
    pub element_class: String,
    pub text_content: String,
    pub resource_id: String,
    pub bounding_box: BoundingBox,
    pub properties: ElementProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementProperties {
    pub clickable: bool,
    pub enabled: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadMetadata {
    pub total_elements: usize,
    pub created_at: String,
    pub annotation_tool: String,
}

impl AnnotationEntry {
    fn from_element(element: &Element) -> Self {
        Self {
            id: element.id.clone(),
            element_class: element.class_label.clone(),
            text_content: element.text.clone(),
            resource_id: element.resource_id.clone(),
            bounding_box: BoundingBox {
                x1: element.bounds.x1,
                y1: element.bounds.y1,
                x2: element.bounds.x2,
                y2: element.bounds.y2,
                width: element.bounds.width(),
                height: element.bounds.height(),
            },
            properties: ElementProperties {
                clickable: element.clickable,
                enabled: element.enabled,
                visible: element.visible,
            },
        }
    }
}

/// Snapshot the current visibility set into an export payload. Elements
/// keep their array order; excluded elements are dropped entirely.
pub fn build_payload(project: &Project, visible: &VisibilitySet) -> AnnotationPayload {
    let annotations: Vec<AnnotationEntry> = project
        .elements
        .iter()
        .filter(|e| visible.contains(&e.id))
        .map(AnnotationEntry::from_element)
        .collect();

    AnnotationPayload {
        image_info: ImageInfo {
            filename: project.filename.clone(),
            width: project.width,
            height: project.height,
        },
        metadata: PayloadMetadata {
            total_elements: annotations.len(),
            created_at: Utc::now().to_rfc3339(),
            annotation_tool: ANNOTATION_TOOL.to_string(),
        },
        annotations,
    }
}

/// Export the payload to a local JSON file.
pub fn export_json(payload: &AnnotationPayload, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(payload)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dump::parse_dump;

    fn project_from_dump(raw: &str) -> Project {
        let (_, elements) = parse_dump(raw).unwrap();
        Project {
            id: "0".repeat(64),
            short_id: "DZTESTTEST".to_string(),
            filename: "shot.png".to_string(),
            image_payload: String::new(),
            width: 100,
            height: 50,
            elements,
        }
    }

    #[test]
    fn test_end_to_end_toggle_and_export() {
        // Upload shot.png (100x50), upload a one-button dump, toggle the
        // button off, export: zero annotations, total_elements 0.
        let project = project_from_dump(
            r#"{"1": {"bounds": "[0,0][50,20]", "class": "android.widget.Button", "clickable": "true"}}"#,
        );
        assert_eq!(project.elements.len(), 1);
        assert_eq!(project.elements[0].priority(), 7);

        let mut visible = VisibilitySet::all(&project.elements);
        assert!(visible.contains("1"), "included by default");

        visible.toggle("1");
        let payload = build_payload(&project, &visible);
        assert!(payload.annotations.is_empty());
        assert_eq!(payload.metadata.total_elements, 0);
        assert_eq!(payload.image_info.filename, "shot.png");
        assert_eq!(payload.image_info.width, 100);
        assert_eq!(payload.image_info.height, 50);
    }

    #[test]
    fn test_payload_contains_selected_elements() {
        let project = project_from_dump(
            r#"{
                "1": {"bounds": "[0,0][50,20]", "class": "android.widget.Button", "text": "OK",
                      "resource-id": "com.app:id/ok", "clickable": "true", "enabled": "true",
                      "visible-to-user": "true"},
                "2": {"bounds": "[0,30][50,60]", "class": "android.widget.TextView"}
            }"#,
        );
        let mut visible = VisibilitySet::all(&project.elements);
        visible.toggle("2");

        let payload = build_payload(&project, &visible);
        assert_eq!(payload.annotations.len(), 1);
        assert_eq!(payload.metadata.total_elements, 1);

        let entry = &payload.annotations[0];
        assert_eq!(entry.id, "1");
        assert_eq!(entry.element_class, "android.widget.Button");
        assert_eq!(entry.text_content, "OK");
        assert_eq!(entry.resource_id, "com.app:id/ok");
        assert_eq!(entry.bounding_box.width, 50);
        assert_eq!(entry.bounding_box.height, 20);
        assert!(entry.properties.clickable);
        assert!(entry.properties.enabled);
        assert!(entry.properties.visible);
    }

    #[test]
    fn test_payload_wire_field_names() {
        let project = project_from_dump(
            r#"{"1": {"bounds": "[0,0][50,20]", "class": "android.widget.Button"}}"#,
        );
        let visible = VisibilitySet::all(&project.elements);
        let payload = build_payload(&project, &visible);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("image_info").is_some());
        assert!(json.get("annotations").is_some());
        assert!(json.get("metadata").is_some());
        assert_eq!(json["metadata"]["annotation_tool"], "drizz");
        let entry = &json["annotations"][0];
        assert!(entry.get("element_class").is_some());
        assert!(entry.get("bounding_box").is_some());
        assert!(entry["bounding_box"].get("width").is_some());
        assert!(entry.get("properties").is_some());
    }

    #[test]
    fn test_export_json_writes_file() {
        let project = project_from_dump(
            r#"{"1": {"bounds": "[0,0][50,20]", "class": "android.widget.Button"}}"#,
        );
        let visible = VisibilitySet::all(&project.elements);
        let payload = build_payload(&project, &visible);

        let dir = std::env::temp_dir().join("drizz-export-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("annotations.json");
        export_json(&payload, &path).unwrap();

        let reread: AnnotationPayload =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reread.annotations.len(), 1);
        assert_eq!(reread.metadata.total_elements, 1);
    }
}
