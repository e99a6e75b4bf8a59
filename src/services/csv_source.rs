use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::moderation::ReviewRecord;

/// CSV loading errors
#[derive(Debug, thiserror::Error)]
pub enum CsvSourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),
}

/// Load image URLs from the `urls` column of a CSV file
///
/// Empty cells are dropped; `limit` caps the number of rows taken.
pub fn load_urls(path: &Path, limit: Option<usize>) -> Result<Vec<String>, CsvSourceError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let headers = reader
        .headers()
        .map_err(|e| CsvSourceError::Parse(format!("Failed to read CSV headers: {e}")))?;
    let column = headers
        .iter()
        .position(|h| h == "urls")
        .ok_or_else(|| CsvSourceError::MissingColumn("urls".to_string()))?;

    let mut urls = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| CsvSourceError::Parse(format!("Failed to parse CSV row {index}: {e}")))?;

        if let Some(url) = record.get(column)
            && !url.is_empty()
        {
            urls.push(url.to_string());
        }

        if let Some(limit) = limit
            && urls.len() >= limit
        {
            break;
        }
    }

    debug!("Loaded {} URLs from {}", urls.len(), path.display());

    Ok(urls)
}

/// Load review records from a CSV file
///
/// Expects `category`, `rating`, `text` and `place_name` columns; empty
/// `rating` and `place_name` cells deserialize to `None`.
pub fn load_reviews(path: &Path) -> Result<Vec<ReviewRecord>, CsvSourceError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)?;

    let mut reviews = Vec::new();
    for (index, result) in reader.deserialize::<ReviewRecord>().enumerate() {
        let review = result
            .map_err(|e| CsvSourceError::Parse(format!("Failed to parse CSV row {index}: {e}")))?;
        reviews.push(review);
    }

    debug!("Loaded {} reviews from {}", reviews.len(), path.display());

    Ok(reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_urls_drops_empty_cells() {
        let file = write_csv(
            "name,urls\n\
             a,http://example.com/1.png\n\
             b,\n\
             c,http://example.com/2.png\n",
        );

        let urls = load_urls(file.path(), None).unwrap();

        assert_eq!(
            urls,
            vec![
                "http://example.com/1.png".to_string(),
                "http://example.com/2.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_load_urls_respects_limit() {
        let file = write_csv(
            "urls\n\
             http://example.com/1.png\n\
             http://example.com/2.png\n\
             http://example.com/3.png\n",
        );

        let urls = load_urls(file.path(), Some(2)).unwrap();

        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn test_load_urls_missing_column() {
        let file = write_csv("name,link\na,http://example.com/1.png\n");

        let result = load_urls(file.path(), None);

        assert!(matches!(result, Err(CsvSourceError::MissingColumn(_))));
    }

    #[test]
    fn test_load_reviews_parses_optional_fields() {
        let file = write_csv(
            "category,rating,text,place_name\n\
             Pizza restaurant,1,Never been here,Slicetown\n\
             Cafe,,Nice spot,\n",
        );

        let reviews = load_reviews(file.path()).unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].category, "Pizza restaurant");
        assert_eq!(reviews[0].rating, Some(1.0));
        assert_eq!(reviews[0].place_name.as_deref(), Some("Slicetown"));
        assert_eq!(reviews[1].rating, None);
        assert_eq!(reviews[1].place_name, None);
    }
}
