use std::io::{self, Write};
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::info;

/// Flat directory of CV files, one `<candidateId>-cv.pdf` per candidate.
#[derive(Debug, Clone)]
pub struct CvStorage {
    dir: PathBuf,
}

impl CvStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, candidate_id: i64) -> PathBuf {
        self.dir.join(format!("{candidate_id}-cv.pdf"))
    }

    /// Replaces the candidate's CV. The bytes land in a sibling temp file first and are
    /// renamed over the target, so readers see either the old file or the new one.
    pub async fn save(&self, candidate_id: i64, data: Bytes) -> io::Result<PathBuf> {
        let dir = self.dir.clone();
        let target = self.path_for(candidate_id);

        let written = tokio::task::spawn_blocking(move || -> io::Result<PathBuf> {
            std::fs::create_dir_all(&dir)?;
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&data)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&target).map_err(|e| e.error)?;
            Ok(target)
        })
        .await
        .map_err(io::Error::other)??;

        info!("Stored CV for candidate {candidate_id} at {}", written.display());
        Ok(written)
    }

    /// Reads the candidate's CV, `None` when nothing was uploaded.
    pub async fn load(&self, candidate_id: i64) -> io::Result<Option<Bytes>> {
        match tokio::fs::read(self.path_for(candidate_id)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_template() {
        let storage = CvStorage::new("/tmp");
        assert_eq!(storage.path_for(12), PathBuf::from("/tmp/12-cv.pdf"));
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CvStorage::new(dir.path());
        let pdf = Bytes::from_static(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

        storage.save(3, pdf.clone()).await.unwrap();
        assert_eq!(storage.load(3).await.unwrap(), Some(pdf));
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CvStorage::new(dir.path());
        assert_eq!(storage.load(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CvStorage::new(dir.path());

        storage.save(1, Bytes::from_static(b"first")).await.unwrap();
        storage.save(1, Bytes::from_static(b"second")).await.unwrap();

        assert_eq!(
            storage.load(1).await.unwrap(),
            Some(Bytes::from_static(b"second"))
        );
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = CvStorage::new(dir.path().join("nested/cv"));
        storage.save(5, Bytes::from_static(b"x")).await.unwrap();
        assert!(storage.path_for(5).exists());
    }
}
