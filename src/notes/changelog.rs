use crate::error::Result;
use std::fs;
use std::path::Path;

/// Prepend release notes to a changelog file, keeping a single title on top.
///
/// A missing file is created. An existing title line equal to `title` is not
/// repeated.
pub fn prepend_changelog(path: &Path, title: &str, notes: &str) -> Result<()> {
    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let title = title.trim();
    let previous = existing.trim();
    let previous = if title.is_empty() {
        previous
    } else {
        strip_title_line(previous, title)
    };

    let mut content = String::new();
    if !title.is_empty() {
        content.push_str(title);
        content.push_str("\n\n");
    }
    content.push_str(notes.trim());
    content.push('\n');
    if !previous.is_empty() {
        content.push('\n');
        content.push_str(previous);
        content.push('\n');
    }

    fs::write(path, content)?;
    Ok(())
}

/// Drop the first line when it is exactly `title`
fn strip_title_line<'a>(content: &'a str, title: &str) -> &'a str {
    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
    if first.trim_end() == title {
        rest.trim_start()
    } else {
        content
    }
}
