//! Streaming CSV row source
//!
//! Produces a lazy, pull-based stream of typed rows from a delimited text
//! file. The field separator is auto-detected from the first line only
//! (tab-separated exports vs plain CSV); headers and values are trimmed.
//! Stream-level failures are fatal for the whole import - the caller gets
//! no partial result.

use std::path::Path;
use std::pin::Pin;

use csv_async::{AsyncReaderBuilder, Trim};
use futures::Stream;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Error)]
pub enum CsvSourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv_async::Error),
}

/// Lazy stream of deserialized rows; each item is a row or a row-level
/// parse error.
pub type RowStream<T> = Pin<Box<dyn Stream<Item = Result<T, csv_async::Error>> + Send>>;

/// Detect the field separator by inspecting only the first line of the
/// file: a tab anywhere in it selects tab, otherwise comma.
pub async fn detect_delimiter(path: &Path) -> Result<u8, CsvSourceError> {
    let file = File::open(path).await?;
    let mut reader = BufReader::new(file);
    let mut first_line = Vec::new();
    reader.read_until(b'\n', &mut first_line).await?;

    Ok(if first_line.contains(&b'\t') { b'\t' } else { b',' })
}

/// Open a typed row stream over the file. The file is opened twice: once to
/// sniff the delimiter from line one, once for the actual streaming read.
pub async fn open_rows<T>(path: &Path) -> Result<RowStream<T>, CsvSourceError>
where
    T: DeserializeOwned + Send + 'static,
{
    let delimiter = detect_delimiter(path).await?;

    let file = File::open(path).await?;
    let deserializer = AsyncReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .create_deserializer(BufReader::new(file));

    Ok(Box::pin(deserializer.into_deserialize::<T>()))
}
