use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Position of the filename inside an index value such as `samples/CAM_FRONT/<file>`.
const FILE_NAME_SEGMENT: usize = 2;

/// One key of the index. Only built by [`Index`] once the value has a file name segment.
#[derive(Debug)]
pub struct IndexEntry {
    key: String,
    value: String,
    file_name: String,
}

impl IndexEntry {
    /// Destination name, written as `dest_dir + key`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Original path-like value from the JSON document.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The segment compared against source filenames.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Read-only mapping loaded from the JSON index, in document order.
#[derive(Debug)]
pub struct Index {
    entries: Vec<IndexEntry>,
}

/// Returns the third `/`-separated segment of `value`, if there is one.
pub fn file_name_segment(value: &str) -> Option<&str> {
    value.split('/').nth(FILE_NAME_SEGMENT)
}

impl Index {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read index {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse index {}", path.display()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let object: Map<String, Value> = serde_json::from_str(content)?;

        let mut entries = Vec::with_capacity(object.len());
        for (key, value) in object {
            let value = match value {
                Value::String(s) => s,
                other => return Err(anyhow!("Value for {:?} is not a string: {}", key, other)),
            };
            let Some(file_name) = file_name_segment(&value).map(str::to_string) else {
                return Err(anyhow!(
                    "Value for {:?} has no file name segment: {:?}",
                    key,
                    value
                ));
            };
            entries.push(IndexEntry {
                key,
                value,
                file_name,
            });
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    /// Keys whose value names `file_name`. Exact, case-sensitive comparison.
    pub fn matching_keys<'a>(&'a self, file_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.file_name() == file_name)
            .map(IndexEntry::key)
    }
}
