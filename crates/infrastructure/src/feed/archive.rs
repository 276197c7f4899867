use ferrous_failover_domain::{CandidateSource, DomainError, FeedEntry};
use std::io::{Cursor, Read};
use tracing::warn;
use zip::ZipArchive;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

pub fn is_zip(body: &[u8]) -> bool {
    body.starts_with(ZIP_MAGIC)
}

/// Extracts every `.txt` file of the archive whose name parses as a
/// candidate source. Other entries are skipped.
pub fn read_entries(body: &[u8]) -> Result<Vec<FeedEntry>, DomainError> {
    let mut archive = ZipArchive::new(Cursor::new(body))
        .map_err(|e| DomainError::FeedArchive(e.to_string()))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| DomainError::FeedArchive(e.to_string()))?;

        if file.is_dir() || !file.name().ends_with(".txt") {
            continue;
        }

        let name = file.name().to_string();
        let source = match CandidateSource::from_entry_name(&name) {
            Ok(source) => source,
            Err(e) => {
                warn!(entry = %name, error = %e, "Skipping archive entry");
                continue;
            }
        };

        let mut body = Vec::new();
        if let Err(e) = file.read_to_end(&mut body) {
            warn!(entry = %name, error = %e, "Unreadable archive entry");
            continue;
        }

        let content = String::from_utf8_lossy(&body).into_owned();
        entries.push(FeedEntry::new(source, content));
    }

    Ok(entries)
}
