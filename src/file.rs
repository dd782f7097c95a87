// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

/// Write `text` to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, text)
}

/// Read a file, treating "not found" as absent.
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// `-o` handling: empty -> default file name, trailing separator or an
/// existing directory -> default file name inside it, else the path itself.
pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> io::Result<PathBuf> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?; Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sheet_tabs_file_{}_{}", name, std::process::id()))
    }

    #[test]
    fn write_text_creates_parents() {
        let dir = tmp("parents");
        let path = dir.join("a").join("b.html");
        write_text(&path, "<p>x</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>x</p>");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reads_as_none() {
        assert!(read_optional(&tmp("nope").join("missing.csv")).unwrap().is_none());
    }

    #[test]
    fn out_path_resolution() {
        assert_eq!(resolve_single_out_path("", "sheet.html").unwrap(), PathBuf::from("sheet.html"));

        let dir = tmp("outdir");
        let hinted = format!("{}/", dir.display());
        let p = resolve_single_out_path(&hinted, "sheet.html").unwrap();
        assert!(p.ends_with("sheet.html"));
        assert!(dir.is_dir());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let path = tmp("blocker");
        fs::write(&path, "x").unwrap();
        assert!(ensure_directory(&path).is_err());
        let _ = fs::remove_file(&path);
    }
}
