//! The persisted manifest: tracked dotfile paths plus one destination.
//!
//! Loading decodes the document into the typed [`Manifest`] record. Appending
//! deliberately does **not** round-trip through that record, nor through the
//! JSON document model: a decode/encode would drop or re-render what it does
//! not understand (unknown fields, number spellings, whitespace). Instead the
//! append path locates the `dotfiles` array in the raw text and splices the
//! new element in, leaving every other byte of the document untouched.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ManifestError;
use crate::paths::Resolver;

/// The manifest record: tracked source paths and the backup destination.
///
/// Entries keep their insertion order and may repeat — the store enforces no
/// uniqueness. Both fields default to empty so a structurally valid document
/// with none of the known keys loads as an empty manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    /// Source paths to back up, possibly `~`-prefixed, in manifest order.
    #[serde(default, rename = "dotfiles")]
    pub entries: Vec<String>,

    /// Backup directory, possibly `~`-prefixed.
    #[serde(default, rename = "destination-path")]
    pub destination: String,
}

/// Load the manifest from `location` (a raw, possibly `~`-prefixed path).
///
/// The location is resolved (home expansion + existence check) before the
/// file is read.
///
/// # Errors
///
/// Returns [`ManifestError::Path`] when the location does not resolve,
/// [`ManifestError::Read`] when the file cannot be read, and
/// [`ManifestError::Malformed`] when the content is not valid JSON.
pub fn load(resolver: &Resolver<'_>, location: &str) -> Result<Manifest, ManifestError> {
    let path = resolver.resolve(location)?;
    let raw = read(&path)?;
    serde_json::from_str(&raw).map_err(|e| ManifestError::Malformed {
        path,
        message: e.to_string(),
    })
}

/// Append `entry` as the new last element of the manifest's `dotfiles` array.
///
/// The rest of the document — unknown fields, number spellings, whitespace —
/// is preserved byte for byte; only the array itself gains one element. The
/// `dotfiles` array is created before the closing brace when the key is
/// absent. `entry` is stored exactly as supplied, with no expansion or
/// canonicalization.
///
/// # Errors
///
/// Returns [`ManifestError::Path`] / [`ManifestError::Read`] when the
/// manifest cannot be located or read, [`ManifestError::Malformed`] when the
/// document is not a JSON object or `dotfiles` is not an array, and
/// [`ManifestError::Write`] when the updated content cannot be written back.
pub fn append_entry(
    resolver: &Resolver<'_>,
    location: &str,
    entry: &str,
) -> Result<(), ManifestError> {
    let path = resolver.resolve(location)?;
    let raw = read(&path)?;
    let updated = splice_entry(&raw, entry).map_err(|message| ManifestError::Malformed {
        path: path.clone(),
        message,
    })?;
    fs::write(&path, updated).map_err(|e| ManifestError::Write { path, source: e })
}

fn read(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| ManifestError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Where the new element goes: inside an existing `dotfiles` array, or a
/// fresh array inserted before the object's closing brace.
enum SplicePoint {
    /// Byte offsets of the array's `[` and `]`.
    Array { open: usize, close: usize },
    /// Byte offset of the top-level object's `}`.
    ObjectEnd(usize),
}

fn splice_entry(raw: &str, entry: &str) -> Result<String, String> {
    // JSON-encode the element so quotes and backslashes in the entry survive.
    let element = serde_json::to_string(entry).map_err(|e| e.to_string())?;
    let mut out = String::with_capacity(raw.len() + element.len() + 16);
    match find_splice_point(raw)? {
        SplicePoint::Array { open, close } => {
            out.push_str(&raw[..close]);
            if !raw[open + 1..close].trim().is_empty() {
                out.push_str(", ");
            }
            out.push_str(&element);
            out.push_str(&raw[close..]);
        }
        SplicePoint::ObjectEnd(close) => {
            out.push_str(&raw[..close]);
            if !raw[..close].trim_end().ends_with('{') {
                out.push_str(", ");
            }
            out.push_str("\"dotfiles\": [");
            out.push_str(&element);
            out.push(']');
            out.push_str(&raw[close..]);
        }
    }
    Ok(out)
}

/// Scan the top-level object for the `dotfiles` key and return where to
/// splice. Only the outermost object is walked; nested values are skipped
/// whole, so a `dotfiles` key buried in some other field is never touched.
fn find_splice_point(raw: &str) -> Result<SplicePoint, String> {
    let bytes = raw.as_bytes();
    let mut i = skip_ws(bytes, 0);
    if bytes.get(i) != Some(&b'{') {
        return Err("top-level value is not an object".to_string());
    }
    i = skip_ws(bytes, i + 1);
    loop {
        match bytes.get(i) {
            Some(&b'}') => return Ok(SplicePoint::ObjectEnd(i)),
            Some(&b'"') => {}
            _ => return Err("expected object key".to_string()),
        }
        let (key_start, after_key) = scan_string(bytes, i)?;
        let is_dotfiles = &raw[key_start..after_key - 1] == "dotfiles";
        i = skip_ws(bytes, after_key);
        if bytes.get(i) != Some(&b':') {
            return Err("expected `:` after object key".to_string());
        }
        i = skip_ws(bytes, i + 1);
        if is_dotfiles {
            if bytes.get(i) != Some(&b'[') {
                return Err("field `dotfiles` is not an array".to_string());
            }
            let close = scan_to_matching(bytes, i)?;
            return Ok(SplicePoint::Array { open: i, close });
        }
        i = skip_value(bytes, i)?;
        i = skip_ws(bytes, i);
        match bytes.get(i) {
            Some(&b',') => i = skip_ws(bytes, i + 1),
            Some(&b'}') => return Ok(SplicePoint::ObjectEnd(i)),
            _ => return Err("expected `,` or `}` after object member".to_string()),
        }
    }
}

/// Scan a string starting at the opening quote `bytes[at]`. Returns the
/// offsets of the first content byte and of the byte after the closing quote.
fn scan_string(bytes: &[u8], at: usize) -> Result<(usize, usize), String> {
    let mut i = at + 1;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'\\' => i += 2,
            b'"' => return Ok((at + 1, i + 1)),
            _ => i += 1,
        }
    }
    Err("unterminated string".to_string())
}

/// Given an opening `[` or `{` at `bytes[at]`, return the offset of the
/// matching closing bracket.
fn scan_to_matching(bytes: &[u8], at: usize) -> Result<usize, String> {
    let mut depth = 0usize;
    let mut i = at;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'[' | b'{' => {
                depth += 1;
                i += 1;
            }
            b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
                i += 1;
            }
            b'"' => i = scan_string(bytes, i)?.1,
            _ => i += 1,
        }
    }
    Err("unbalanced brackets".to_string())
}

/// Skip a whole JSON value (string, container, or scalar) starting at
/// `bytes[at]`, returning the offset just past it.
fn skip_value(bytes: &[u8], at: usize) -> Result<usize, String> {
    match bytes.get(at) {
        Some(&b'"') => Ok(scan_string(bytes, at)?.1),
        Some(&b'[' | &b'{') => Ok(scan_to_matching(bytes, at)? + 1),
        Some(_) => {
            let mut i = at;
            while bytes
                .get(i)
                .is_some_and(|&b| !matches!(b, b',' | b'}' | b']') && !b.is_ascii_whitespace())
            {
                i += 1;
            }
            if i == at {
                return Err("expected a value".to_string());
            }
            Ok(i)
        }
        None => Err("unexpected end of document".to_string()),
    }
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}
