use revdns_domain::DomainError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Reads a newline-separated list (IPs or resolvers).
///
/// Lines are trimmed; blank lines and lines starting with `#` are dropped.
/// Entries are not validated here.
pub async fn load_lines(path: impl AsRef<Path>) -> Result<Vec<String>, DomainError> {
    let path = path.as_ref();

    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DomainError::InputFile {
            path: path.display().to_string(),
            reason: match e.kind() {
                ErrorKind::NotFound => "file not found".to_string(),
                _ => e.to_string(),
            },
        })?;

    let lines = parse_lines(&contents);
    debug!(path = %path.display(), entries = lines.len(), "Loaded input file");
    Ok(lines)
}

pub fn parse_lines(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
