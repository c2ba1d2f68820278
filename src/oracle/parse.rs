//! Recovery of rename pairs from free-form service replies.
//!
//! Replies are not guaranteed to be well-formed. The bracketed region of the
//! text is tried as a JSON array first; if that fails the raw text is scanned
//! for `"original_name": "...", "new_name": "..."` pairs. Whatever is
//! recovered, the final map always covers every input file.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::types::{ParseStrategy, RenamePair};
use crate::core::errors::{NamewiseError, Result};
use crate::core::files::FileRecord;
use crate::rename::types::RenameMap;

static PAIR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""original_name":\s*"([^"]+)",\s*"new_name":\s*"([^"]+)""#)
        .expect("pair pattern is a valid regex")
});

/// Parse rename pairs out of `content`, reporting which strategy worked.
pub fn parse_rename_pairs(content: &str) -> Result<(Vec<RenamePair>, ParseStrategy)> {
    match parse_json_array(content) {
        Ok(pairs) => Ok((pairs, ParseStrategy::JsonArray)),
        Err(reason) => {
            debug!("JSON array parse failed ({reason}), scanning for pairs");
            let pairs = scan_pairs(content);
            if pairs.is_empty() {
                warn!("no rename pairs found in inference response");
                return Err(NamewiseError::unparseable(
                    format!("no rename pairs found ({reason})"),
                    content,
                ));
            }
            Ok((pairs, ParseStrategy::PatternScan))
        }
    }
}

/// Parse the text between the first `[` and the last `]` as a pair array.
pub fn parse_json_array(content: &str) -> std::result::Result<Vec<RenamePair>, String> {
    let start = content.find('[');
    let end = content.rfind(']');
    match (start, end) {
        (Some(start), Some(end)) if end > start => {
            serde_json::from_str(&content[start..=end]).map_err(|e| e.to_string())
        }
        _ => Err("no JSON array in response".to_string()),
    }
}

/// Collect every quoted `original_name`/`new_name` pair, in order.
pub fn scan_pairs(content: &str) -> Vec<RenamePair> {
    PAIR_PATTERN
        .captures_iter(content)
        .map(|caps| RenamePair {
            original_name: unescape(&caps[1]),
            new_name: unescape(&caps[2]),
        })
        .collect()
}

/// Decode JSON string escapes when they are well-formed, else keep the text.
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
}

/// Build a rename map covering exactly the names in `files`.
///
/// Files without a pair keep their own name. When a name appears in several
/// pairs the first one wins; pairs for unknown names are ignored.
pub fn complete_rename_map(files: &[FileRecord], pairs: &[RenamePair]) -> RenameMap {
    let mut proposed: HashMap<&str, &str> = HashMap::with_capacity(pairs.len());
    for pair in pairs {
        proposed
            .entry(pair.original_name.as_str())
            .or_insert(pair.new_name.as_str());
    }

    let mut missing = 0usize;
    let map: RenameMap = files
        .iter()
        .map(|file| {
            let new_name = match proposed.get(file.name.as_str()) {
                Some(new_name) => (*new_name).to_string(),
                None => {
                    missing += 1;
                    file.name.clone()
                }
            };
            (file.name.clone(), new_name)
        })
        .collect();

    if missing > 0 {
        debug!("{missing} files had no proposal and keep their names");
    }
    map
}
