// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Element dump ingestion.
//!
//! Parses the UI-automation dump format: one JSON object whose keys are
//! element ids and whose values carry a bounds literal plus string-typed
//! booleans. Booleans are compared against the literal `"true"` at this
//! boundary and never propagated as strings. Entries without parseable
//! bounds are skipped, matching the uploader's behavior for elements
//! that are not drawable.

use crate::error::DrizzError;
use crate::models::element::{Bounds, Element};
use serde::Deserialize;
use serde_json::Value;

/// Raw wire shape of one dump entry. All fields are optional strings;
/// absent booleans default to false via the empty string.
#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(default)]
    bounds: String,
    #[serde(default)]
    class: String,
    #[serde(default)]
    text: String,
    #[serde(rename = "resource-id", default)]
    resource_id: String,
    #[serde(rename = "content-desc", default)]
    content_desc: String,
    #[serde(default)]
    clickable: String,
    #[serde(default)]
    enabled: String,
    #[serde(rename = "visible-to-user", default)]
    visible: String,
    #[serde(default)]
    focused: String,
}

/// The wire format carries booleans as literal strings; only the exact
/// string "true" is truthy.
fn string_bool(s: &str) -> bool {
    s == "true"
}

/// Collapse runs of whitespace in free-text content.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a raw dump string into the original JSON value plus the
/// ingested element list, sorted by descending testing priority.
///
/// Fails with `Parse` on malformed JSON and `Validation` when the dump
/// is not an object or contains no bounds-bearing entries.
pub fn parse_dump(raw: &str) -> Result<(Value, Vec<Element>), DrizzError> {
    let value: Value = serde_json::from_str(raw)?;
    let object = value
        .as_object()
        .ok_or_else(|| DrizzError::Validation("dump must be a JSON object".to_string()))?;

    let mut elements = Vec::new();
    for (id, entry) in object {
        let raw_element: RawElement = match serde_json::from_value(entry.clone()) {
            Ok(e) => e,
            Err(_) => {
                log::warn!("Skipping non-object dump entry {:?}", id);
                continue;
            }
        };
        if raw_element.bounds.is_empty() {
            continue;
        }
        let bounds = match Bounds::parse(&raw_element.bounds) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("Skipping element {:?}: {}", id, e);
                continue;
            }
        };

        elements.push(Element {
            id: id.clone(),
            bounds,
            class_label: raw_element.class,
            text: clean_text(&raw_element.text),
            resource_id: raw_element.resource_id,
            content_desc: raw_element.content_desc,
            clickable: string_bool(&raw_element.clickable),
            enabled: string_bool(&raw_element.enabled),
            visible: string_bool(&raw_element.visible),
            focused: string_bool(&raw_element.focused),
        });
    }

    if elements.is_empty() {
        return Err(DrizzError::Validation(
            "no valid UI elements found with bounds information".to_string(),
        ));
    }

    // Most important elements first; stable, so ties keep key order.
    elements.sort_by(|a, b| b.priority().cmp(&a.priority()));

    log::info!("Ingested {} elements from dump", elements.len());
    Ok((value, elements))
}
