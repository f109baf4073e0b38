use futures::{Stream, StreamExt};
use shared::config::server::UploadConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::{
    fs,
    io::{AsyncWrite, AsyncWriteExt},
};
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported file '{0}'. Only .txt and .pdf are accepted.")]
    Unsupported(String),
    #[error("No files were provided.")]
    MissingFiles,
    #[error("upload stream interrupted: {0}")]
    Interrupted(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Validates and stores uploaded documents.
#[derive(Debug, Clone)]
pub struct UploadService {
    directory: PathBuf,
    allowed_extensions: Vec<String>,
    allowed_mime_types: Vec<String>,
}

/// Final path component of a client-supplied name; both separators count.
fn base_name(file_name: &str) -> &str {
    file_name.rsplit(['/', '\\']).next().unwrap_or(file_name)
}

/// Media type without parameters, lowercased.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

impl UploadService {
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            allowed_extensions: config.allowed_extensions.clone(),
            allowed_mime_types: config.allowed_mime_types.clone(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Both the extension and the declared content type must be allowed.
    pub fn validate(&self, file_name: &str, content_type: Option<&str>) -> Result<(), UploadError> {
        let extension_ok = Path::new(base_name(file_name))
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .is_some_and(|ext| self.allowed_extensions.contains(&ext));

        let mime_ok = content_type
            .map(essence)
            .is_some_and(|mime| self.allowed_mime_types.contains(&mime));

        if extension_ok && mime_ok {
            Ok(())
        } else {
            Err(UploadError::Unsupported(file_name.to_string()))
        }
    }

    /// Where `file_name` is stored: its base name inside the upload directory.
    pub fn destination(&self, file_name: &str) -> PathBuf {
        self.directory.join(base_name(file_name))
    }

    pub async fn ensure_directory(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.directory).await?;
        Ok(())
    }

    /// Streams `chunks` into the destination for `file_name`, replacing any
    /// previous file of that name. A partial file is removed when the stream
    /// or a write fails.
    pub async fn save<S, B, E>(&self, file_name: &str, chunks: S) -> Result<PathBuf, UploadError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: std::fmt::Display,
    {
        let destination = self.destination(file_name);
        let file = fs::File::create(&destination).await?;

        match Self::write_chunks(file, chunks).await {
            Ok(written) => {
                metrics::counter!("upload_bytes_total").increment(written);
                info!(file_name, path = %destination.display(), bytes = written, "stored upload");
                Ok(destination)
            }
            Err(err) => {
                if let Err(cleanup) = fs::remove_file(&destination).await {
                    warn!(path = %destination.display(), error = %cleanup, "failed to remove partial upload");
                }
                Err(err)
            }
        }
    }

    async fn write_chunks<W, S, B, E>(mut sink: W, chunks: S) -> Result<u64, UploadError>
    where
        W: AsyncWrite + Unpin,
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: std::fmt::Display,
    {
        let mut chunks = std::pin::pin!(chunks);
        let mut written: u64 = 0;

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|err| UploadError::Interrupted(err.to_string()))?;
            sink.write_all(chunk.as_ref()).await?;
            written += chunk.as_ref().len() as u64;
        }
        sink.flush().await?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> UploadService {
        UploadService::from_config(&UploadConfig {
            directory: dir.path().to_path_buf(),
            ..UploadConfig::default()
        })
    }

    #[test]
    fn accepts_allowed_pairs() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        assert!(service.validate("notes.txt", Some("text/plain")).is_ok());
        assert!(service.validate("Report.PDF", Some("application/pdf")).is_ok());
        assert!(
            service
                .validate("notes.txt", Some("text/plain; charset=utf-8"))
                .is_ok()
        );
    }

    #[test]
    fn requires_extension_and_content_type() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        assert!(service.validate("notes.md", Some("text/plain")).is_err());
        assert!(service.validate("notes.txt", Some("text/markdown")).is_err());
        assert!(service.validate("notes.txt", None).is_err());
        assert!(service.validate(".pdf", Some("application/pdf")).is_err());
        assert!(service.validate("", Some("text/plain")).is_err());
    }

    #[test]
    fn unsupported_message_names_the_file() {
        let dir = TempDir::new().unwrap();
        let err = service(&dir)
            .validate("image.png", Some("image/png"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported file 'image.png'. Only .txt and .pdf are accepted."
        );
    }

    #[test]
    fn destination_strips_directories() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        assert_eq!(
            service.destination("../../etc/notes.txt"),
            dir.path().join("notes.txt")
        );
        assert_eq!(
            service.destination("C:\\Users\\me\\report.pdf"),
            dir.path().join("report.pdf")
        );
    }

    #[tokio::test]
    async fn save_writes_all_chunks() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let chunks = stream::iter(vec![
            Ok::<_, std::io::Error>(b"hello ".to_vec()),
            Ok(b"world".to_vec()),
        ]);

        let path = service.save("notes.txt", chunks).await.unwrap();

        assert_eq!(path, dir.path().join("notes.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello world");
    }

    #[tokio::test]
    async fn failed_stream_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        let chunks = stream::iter(vec![
            Ok(b"partial".to_vec()),
            Err("connection reset"),
        ]);

        let err = service.save("notes.txt", chunks).await.unwrap_err();

        assert!(matches!(err, UploadError::Interrupted(_)));
        assert!(!dir.path().join("notes.txt").exists());
    }

    struct FailingWriter;

    impl AsyncWrite for FailingWriter {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::task::Poll::Ready(Err(std::io::Error::other("disk full")))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn write_errors_are_reported_as_io() {
        let chunks = stream::iter(vec![Ok::<_, std::io::Error>(b"data".to_vec())]);
        let err = UploadService::write_chunks(FailingWriter, chunks)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Io(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_write_leaves_no_file() {
        // /dev/full accepts the open but fails every write with ENOSPC.
        if !Path::new("/dev/full").exists() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("notes.txt");
        std::os::unix::fs::symlink("/dev/full", &link).unwrap();
        let service = service(&dir);
        let chunks = stream::iter(vec![Ok::<_, std::io::Error>(vec![0_u8; 64 * 1024])]);

        let err = service.save("notes.txt", chunks).await.unwrap_err();

        assert!(matches!(err, UploadError::Io(_)));
        assert!(!link.exists() && std::fs::symlink_metadata(&link).is_err());
    }

    #[tokio::test]
    async fn ensure_directory_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let service = UploadService::from_config(&UploadConfig {
            directory: dir.path().join("a/b"),
            ..UploadConfig::default()
        });
        service.ensure_directory().await.unwrap();
        assert!(service.directory().is_dir());
    }
}
