//! File classification for hook filtering.
//!
//! Every path is assigned a set of type tags. Hooks declare the tags they
//! apply to (e.g. `types: [rust]`), and a file matches when it carries all
//! of them. Tags are assigned by extension plus a few well-known basenames.

use std::path::Path;

/// Extension to language tag mapping. Every entry here is also `text`.
const EXTENSION_TAGS: &[(&str, &str)] = &[
    ("rs", "rust"),
    ("md", "markdown"),
    ("markdown", "markdown"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("json", "json"),
    ("py", "python"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("sh", "shell"),
    ("bash", "shell"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "c++"),
    ("go", "go"),
    ("html", "html"),
    ("css", "css"),
    ("sql", "sql"),
    ("xml", "xml"),
    ("txt", "plain-text"),
];

/// Extensions that are textual but have no dedicated language tag.
const TEXT_EXTENSIONS: &[&str] = &["cfg", "ini", "csv", "env", "lock", "svg", "rst"];

/// Well-known basenames and their tags.
const BASENAME_TAGS: &[(&str, &str)] = &[
    ("Makefile", "makefile"),
    ("Dockerfile", "dockerfile"),
    (".gitignore", "gitignore"),
];

/// Compute the type tags for a path.
///
/// Every path gets `file`; recognized textual formats additionally get
/// `text` and their language tag. Unrecognized extensions yield `file`
/// alone, which keeps binary artifacts out of text-only hooks.
pub fn tags_for_path(path: &Path) -> Vec<&'static str> {
    let mut tags = vec!["file"];

    let basename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if let Some((_, tag)) = BASENAME_TAGS.iter().find(|(name, _)| *name == basename) {
        tags.push("text");
        tags.push(tag);
        return tags;
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    if let Some(ext) = ext {
        if let Some((_, tag)) = EXTENSION_TAGS.iter().find(|(e, _)| *e == ext) {
            tags.push("text");
            tags.push(tag);
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            tags.push("text");
        }
    }

    tags
}

/// Check whether a path carries every tag a hook requires.
pub fn path_matches_types(path: &Path, types: &[String]) -> bool {
    if types.is_empty() {
        return true;
    }
    let tags = tags_for_path(path);
    types.iter().all(|t| tags.contains(&t.as_str()))
}
