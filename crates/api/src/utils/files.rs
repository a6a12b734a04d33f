//! Local file access for uploads

use squarecloud_domain::{codes, ErrorKind, FileSource, Result, SquareCloudError};

/// Resolve a [`FileSource`] to its bytes.
///
/// Paths are read with `tokio::fs`; failures become `CANNOT_READ_FILE`.
pub(crate) async fn read_file_source(source: FileSource) -> Result<Vec<u8>> {
    match source {
        FileSource::Bytes(bytes) => Ok(bytes),
        FileSource::Path(path) => tokio::fs::read(&path).await.map_err(|err| {
            SquareCloudError::new(ErrorKind::InvalidInput, codes::CANNOT_READ_FILE)
                .with_detail(format!("{}: {err}", path.display()))
        }),
    }
}
