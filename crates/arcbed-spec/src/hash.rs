//! Canonical config hashing.
//!
//! A config hash identifies the exact arc that produced an asset:
//!
//! ```text
//! config_hash = hex(BLAKE3(canonical_json(config)))
//! ```
//!
//! Canonical JSON sorts object keys and drops all whitespace, so the hash
//! does not depend on how a config file was formatted.

use crate::config::ArcConfig;
use crate::error::SpecResult;

/// Computes the canonical BLAKE3 hash of a config.
///
/// Returns a 64-character lowercase hexadecimal string.
pub fn canonical_config_hash(config: &ArcConfig) -> SpecResult<String> {
    let value = config.to_value()?;
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Serializes a JSON value with sorted keys and no whitespace.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Keys serialize as JSON strings.
                out.push_str(&serde_json::Value::String(key.clone()).to_string());
                out.push(':');
                if let Some(v) = obj.get(key) {
                    write_canonical(v, out);
                }
            }
            out.push('}');
        }
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        serde_json::Value::Number(n) => out.push_str(&format_number(n)),
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Formats integer-valued floats without a fractional part (`1.0` -> `1`).
fn format_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{}", f),
        None => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::Preset;
    use serde_json::json;

    #[test]
    fn test_config_hash_is_hex() {
        let hash = canonical_config_hash(&Preset::Intouch.config()).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_stability() {
        let a = canonical_config_hash(&Preset::Intouch.config()).unwrap();
        let b = canonical_config_hash(&Preset::Intouch.config()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_presets_hash_differently() {
        let hashes: Vec<String> = Preset::ALL
            .iter()
            .map(|p| canonical_config_hash(&p.config()).unwrap())
            .collect();
        assert_ne!(hashes[0], hashes[1]);
        assert_ne!(hashes[0], hashes[2]);
        assert_ne!(hashes[1], hashes[2]);
    }

    #[test]
    fn test_wet_change_changes_hash() {
        let base = Preset::Intouch.config();
        let mut wetter = base.clone();
        wetter.reverb.wet = 0.5;
        assert_ne!(
            canonical_config_hash(&base).unwrap(),
            canonical_config_hash(&wetter).unwrap()
        );
    }

    #[test]
    fn test_canonicalize_sorts_keys() {
        let value = json!({"z": 1, "a": {"y": [1.0, 2.5], "b": "x"}});
        assert_eq!(
            canonicalize_json(&value),
            r#"{"a":{"b":"x","y":[1,2.5]},"z":1}"#
        );
    }

    #[test]
    fn test_canonicalize_escapes_strings() {
        let value = json!({"name": "say \"hi\"\n"});
        assert_eq!(canonicalize_json(&value), r#"{"name":"say \"hi\"\n"}"#);
    }
}
