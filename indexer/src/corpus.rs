//! Loading `(identifier, text)` pairs from disk.
//!
//! Plain files become one document each, identified by their path relative
//! to the corpus root (just the file name for a flat directory). `.json`
//! files hold one object or an array of objects, `.jsonl` files one object per
//! line, each with an `id` and a `body`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    #[serde(alias = "text")]
    body: String,
}

impl From<InputDoc> for (String, String) {
    fn from(doc: InputDoc) -> Self {
        (doc.id, doc.body)
    }
}

/// Read every document under `path`, which may be a directory or a single file.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<(String, String)>> {
    let root = path.as_ref();
    let mut docs = Vec::new();
    if root.is_dir() {
        for file in collect_files(root)? {
            let id = relative_id(root, &file);
            load_file(&file, id, &mut docs)?;
        }
    } else if root.is_file() {
        let id = root.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        load_file(root, id, &mut docs)?;
    } else {
        anyhow::bail!("corpus path {} does not exist", root.display());
    }
    tracing::info!(num_docs = docs.len(), corpus = %root.display(), "loaded corpus");
    Ok(docs)
}

fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    // hidden directories (.git and friends) are pruned with everything below them
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}

fn relative_id(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn load_file(file: &Path, id: String, docs: &mut Vec<(String, String)>) -> Result<()> {
    match file.extension().and_then(|s| s.to_str()) {
        Some("jsonl") => load_jsonl(file, docs),
        Some("json") => load_json(file, docs),
        _ => {
            let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
            docs.push((id, text));
            Ok(())
        }
    }
}

fn load_jsonl(file: &Path, docs: &mut Vec<(String, String)>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), lineno + 1))?;
        docs.push(doc.into());
    }
    Ok(())
}

fn load_json(file: &Path, docs: &mut Vec<(String, String)>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("parsing {}", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for (i, v) in arr.into_iter().enumerate() {
                let doc: InputDoc = serde_json::from_value(v)
                    .with_context(|| format!("{}[{}]: invalid document", file.display(), i))?;
                docs.push(doc.into());
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)
                .with_context(|| format!("{}: invalid document", file.display()))?;
            docs.push(doc.into());
        }
        _ => tracing::warn!(file = %file.display(), "ignoring json that is neither object nor array"),
    }
    Ok(())
}
