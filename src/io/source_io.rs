use std::fs;
use std::path::Path;

use crate::io::config_io::StoreError;
use crate::model::config::SourceFile;

/// Materialize the contents of the active task files, in list order.
///
/// A file that cannot be read contributes zero lines; the warning is
/// returned alongside so the caller can surface it without aborting the
/// pipeline.
pub fn read_sources(files: &[SourceFile]) -> (Vec<String>, Vec<String>) {
    let mut contents = Vec::new();
    let mut warnings = Vec::new();

    for file in files.iter().filter(|f| f.active) {
        match fs::read_to_string(&file.path) {
            Ok(text) => contents.push(text),
            Err(e) => {
                contents.push(String::new());
                warnings.push(format!("could not read {}: {}", file.path.display(), e));
            }
        }
    }

    (contents, warnings)
}

/// Append one task line to a file, creating it if needed.
pub fn append_line(path: &Path, line: &str) -> Result<(), StoreError> {
    let mut content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(StoreError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    content.push_str(line);
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn unreadable_file_contributes_zero_lines() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("todo.txt");
        fs::write(&good, "one task\n").unwrap();

        let files = vec![
            SourceFile { path: good, active: true },
            SourceFile { path: dir.path().join("missing.txt"), active: true },
            SourceFile { path: PathBuf::from("inactive.txt"), active: false },
        ];

        let (contents, warnings) = read_sources(&files);
        assert_eq!(contents, vec!["one task\n".to_string(), String::new()]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("missing.txt"));
    }

    #[test]
    fn append_creates_and_terminates_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");

        append_line(&path, "first").unwrap();
        fs::write(&path, "first").unwrap(); // strip trailing newline
        append_line(&path, "second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }
}
