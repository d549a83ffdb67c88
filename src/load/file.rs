use crate::tables::*;
use crate::*;
use bytes::Bytes;
use std::path::Path;

/// Reads a CSV file whole. Its bytes go to COPY untouched.
pub async fn read(path: &Path) -> Result<Bytes> {
    log::debug!("reading {}", path.display());
    Ok(Bytes::from(tokio::fs::read(path).await?))
}

/// Splits a sales CSV into its parsed header and the remaining body.
///
/// The header line must be ASCII; the body is passed through in whatever
/// encoding the file uses.
pub fn split(file: Bytes) -> Result<(Header, Bytes)> {
    let end = file
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(file.len());
    let line = std::str::from_utf8(&file[..end])
        .map_err(|_| Error::Malformed("sales header is not ASCII".into()))?;
    if line.trim().is_empty() {
        return Err(Error::Malformed("sales file has no header".into()));
    }
    let header = Header::try_from(line)?;
    let body = file.slice((end + 1).min(file.len())..);
    Ok((header, body))
}
