use std::path::Path;

/// Reads a file as text. Invalid UTF-8 is replaced rather than rejected;
/// only real I/O failures are errors.
pub fn read_text(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists()
}
