// Target list loader — CSV files with an IMAGE_LINK column, one URL per record.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

/// Column holding the URLs to warm.
pub const URL_COLUMN: &str = "IMAGE_LINK";

/// Read the URL targets from `path`, in file order. Any read, parse,
/// or shape problem is fatal: a run never starts on partial input.
pub fn load_targets(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open target list {}", path.display()))?;

    let headers = reader.headers().context("read csv headers")?;
    let Some(column) = headers.iter().position(|h| h == URL_COLUMN) else {
        bail!(
            "target list {} has no {} column",
            path.display(),
            URL_COLUMN
        );
    };

    let mut targets = Vec::new();
    for record in reader.records() {
        let record = record.context("read csv record")?;
        let Some(url) = record.get(column) else {
            bail!("csv record is missing the {} field", URL_COLUMN);
        };
        let url = url.trim();
        if !url.is_empty() {
            targets.push(url.to_string());
        }
    }

    info!("loaded {} targets from {}", targets.len(), path.display());
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_loads_url_column_in_order() {
        let file = write_fixture(
            "SKU,IMAGE_LINK\n\
             a,http://cdn.test/a.jpg\n\
             b,http://cdn.test/b.jpg\n",
        );

        let targets = load_targets(file.path()).unwrap();
        assert_eq!(
            targets,
            vec!["http://cdn.test/a.jpg", "http://cdn.test/b.jpg"]
        );
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = write_fixture("SKU,URL\na,http://cdn.test/a.jpg\n");
        let err = load_targets(file.path()).unwrap_err();
        assert!(err.to_string().contains(URL_COLUMN));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(load_targets(Path::new("/nonexistent/targets.csv")).is_err());
    }

    #[test]
    fn test_blank_records_are_skipped() {
        let file = write_fixture("IMAGE_LINK\nhttp://cdn.test/a.jpg\n\n");
        let targets = load_targets(file.path()).unwrap();
        assert_eq!(targets, vec!["http://cdn.test/a.jpg"]);
    }
}
