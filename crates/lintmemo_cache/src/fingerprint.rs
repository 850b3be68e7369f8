//! Fingerprints binding file content to the configuration it was analyzed with.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Rule options passed to the analysis engine.
pub type Options = serde_json::Map<String, Value>;

/// Global identifiers the analysis engine should accept, mapped to whether they are writable.
pub type Globals = BTreeMap<String, bool>;

/// Length in hex characters of every fingerprint.
pub const FINGERPRINT_LEN: usize = 64;

/// A fixed-length lowercase hex identifier for a (content, options, globals) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Returns the hex representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

/// Computes the BLAKE3 fingerprint of `content` analyzed with `options` and `globals`.
///
/// The content is hashed first, followed by the canonical JSON of the options and
/// then of the globals. Every segment is prefixed with its byte length, so bytes
/// cannot migrate from one field to the next without changing the digest.
pub fn fingerprint(content: &str, options: &Options, globals: &Globals) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();

    update_segment(&mut hasher, content.as_bytes());
    update_segment(&mut hasher, canonical_options(options).as_bytes());
    update_segment(&mut hasher, canonical_globals(globals).as_bytes());

    Fingerprint(hasher.finalize().to_hex().to_string())
}

fn update_segment(hasher: &mut blake3::Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Serializes options as compact JSON with object keys sorted at every depth.
pub fn canonical_options(options: &Options) -> String {
    let mut out = String::new();
    write_object(options.iter(), &mut out);
    out
}

/// Serializes globals as compact JSON with sorted keys.
pub fn canonical_globals(globals: &Globals) -> String {
    let values: Vec<(&String, Value)> = globals
        .iter()
        .map(|(name, writable)| (name, Value::Bool(*writable)))
        .collect();

    let mut out = String::new();
    write_object(values.iter().map(|(name, value)| (*name, value)), &mut out);
    out
}

/// Serializes any JSON value canonically.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => write_object(map.iter(), out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(item, out);
            }
            out.push(']');
        }
        // Scalars render as compact JSON through `Display`.
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_object<'a>(entries: impl Iterator<Item = (&'a String, &'a Value)>, out: &mut String) {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    out.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&Value::String(key.clone()).to_string());
        out.push(':');
        write_value(value, out);
    }
    out.push('}');
}
