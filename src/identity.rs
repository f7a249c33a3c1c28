// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deterministic project identity.
//!
//! Two-stage SHA-256 scheme: the encoded screenshot (salted with a fresh
//! timestamp nonce) and the canonical JSON of the element dump are hashed
//! independently, then the pair is hashed once more into the 64-character
//! project id. The nonce makes byte-identical re-uploads produce distinct
//! ids on purpose; the combination step itself is fully deterministic.
//!
//! The short display id seeds a base-36 token generator with the first
//! 16 hex characters of the full id, yielding `DZ` + 8 characters over
//! the alphabet A-Z0-9.

use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};

const SHORT_ID_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub id: String,
    pub short_id: String,
}

/// Generate a fresh identity for an upload. Always salted; identical
/// content uploaded twice never collides.
pub fn generate(image_payload: &str, dump: &Value) -> ProjectIdentity {
    let nonce = Utc::now().timestamp_micros().to_string();
    let image_hash = salted_image_hash(image_payload, &nonce);
    let label = label_hash(dump);
    let id = combine_hashes(&image_hash, &label);
    let short_id = short_id(&id);
    ProjectIdentity { id, short_id }
}

/// Hash the image payload with a nonce appended as `payload::nonce`.
pub fn salted_image_hash(image_payload: &str, nonce: &str) -> String {
    sha256_hex(&format!("{}::{}", image_payload, nonce))
}

/// Hash the canonical serialization of the element dump: keys sorted
/// lexicographically, no incidental whitespace, so semantically identical
/// payloads hash identically regardless of source key order.
pub fn label_hash(dump: &Value) -> String {
    sha256_hex(&canonical_json(dump))
}

/// Combine the two stage-one digests into the final project id.
pub fn combine_hashes(image_hash: &str, label_hash: &str) -> String {
    sha256_hex(&format!("{}:{}", image_hash, label_hash))
}

/// Canonical JSON: objects re-serialized with sorted keys at every
/// nesting level, compact separators.
pub fn canonical_json(value: &Value) -> String {
    fn write(value: &Value, out: &mut String) {
        match value {
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                out.push('{');
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&Value::String((*key).clone()).to_string());
                    out.push(':');
                    write(&map[*key], out);
                }
                out.push('}');
            }
            Value::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    write(item, out);
                }
                out.push(']');
            }
            other => out.push_str(&other.to_string()),
        }
    }
    let mut out = String::new();
    write(value, &mut out);
    out
}

/// Short display id: first 16 hex characters of the full id seed a
/// deterministic base-36 token, truncated to 8 characters and prefixed
/// with the literal `DZ`.
pub fn short_id(full_id: &str) -> String {
    let seed = &full_id[..full_id.len().min(16)];
    let digest = Sha256::digest(seed.as_bytes());

    let mut n = u128::from_be_bytes(digest[..16].try_into().unwrap());
    let mut token = String::with_capacity(SHORT_ID_LEN + 2);
    token.push_str("DZ");
    for _ in 0..SHORT_ID_LEN {
        token.push(SHORT_ID_ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }
    token
}

fn sha256_hex(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_json_sorts_keys() {
        let a = json!({"b": 1, "a": 2});
        let b = json!({"a": 2, "b": 1});
        assert_eq!(canonical_json(&a), canonical_json(&b));
        assert_eq!(canonical_json(&a), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn test_canonical_json_sorts_nested_keys() {
        let v = json!({"z": {"b": 1, "a": [{"y": 0, "x": 1}]}, "a": "s"});
        assert_eq!(
            canonical_json(&v),
            r#"{"a":"s","z":{"a":[{"x":1,"y":0}],"b":1}}"#
        );
    }

    #[test]
    fn test_canonical_label_hashes_match() {
        let a = json!({"b": 1, "a": 2});
        let b = json!({"a": 2, "b": 1});
        assert_eq!(label_hash(&a), label_hash(&b));
    }

    #[test]
    fn test_combine_is_deterministic() {
        let image_hash = salted_image_hash("payload", "1234567890");
        let label = label_hash(&json!({"1": {"bounds": "[0,0][50,20]"}}));
        let first = combine_hashes(&image_hash, &label);
        let second = combine_hashes(&image_hash, &label);
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_nonce_changes_id() {
        let dump = json!({"1": {"bounds": "[0,0][50,20]"}});
        let label = label_hash(&dump);
        let a = combine_hashes(&salted_image_hash("payload", "1000"), &label);
        let b = combine_hashes(&salted_image_hash("payload", "1001"), &label);
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_never_collides_for_identical_content() {
        let dump = json!({"1": {"bounds": "[0,0][50,20]"}});
        let a = generate("payload", &dump);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = generate("payload", &dump);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_short_id_shape() {
        let id = "a".repeat(64);
        let short = short_id(&id);
        assert_eq!(short.len(), 10);
        assert!(short.starts_with("DZ"));
        assert!(short[2..]
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
    }

    #[test]
    fn test_short_id_deterministic_in_seed_prefix() {
        // Only the first 16 characters participate.
        let a = format!("{}{}", "0123456789abcdef", "0".repeat(48));
        let b = format!("{}{}", "0123456789abcdef", "f".repeat(48));
        assert_eq!(short_id(&a), short_id(&b));

        let c = format!("{}{}", "1123456789abcdef", "0".repeat(48));
        assert_ne!(short_id(&a), short_id(&c));
    }

}
