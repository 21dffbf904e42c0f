//! LocalFileSystem - std::fs ベースの FileSystem 実装

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{ByteSource, UploadedFile};
use crate::ports::FileSystem;

/// LocalFileSystem はローカルディスクに書き込む
///
/// # 実装詳細
/// - `ensure_dir`: `create_dir_all`（既存ディレクトリは成功扱い）
/// - `save_upload`: 同じディレクトリの一時ファイルに書き、rename で置き換える
/// - spool ファイルが destination そのものなら何もしない（成功扱い）
/// - spool ファイル（`ByteSource::TempFile`）は読むだけで移動・削除しない
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn save_upload(&self, file: &UploadedFile, destination: &Path) -> io::Result<()> {
        if let ByteSource::TempFile(spool) = file.source()
            && same_file(spool, destination)
        {
            debug!(path = %destination.display(), "upload already at destination");
            return Ok(());
        }

        let directory = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut reader = file.source().open()?;
        let mut staged = NamedTempFile::new_in(directory)?;
        io::copy(&mut reader, &mut staged)?;
        staged.flush()?;
        staged.persist(destination)?;
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Both paths exist and resolve to the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        let fs = LocalFileSystem::new();

        fs.ensure_dir(&nested).unwrap();
        fs.ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn save_upload_writes_memory_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("photo.jpg");
        let file = UploadedFile::new("photo", "jpg", ByteSource::Memory(b"jpeg".to_vec()));

        LocalFileSystem.save_upload(&file, &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"jpeg");
    }

    #[test]
    fn save_upload_copies_spool_file_and_keeps_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut spool = tempfile::NamedTempFile::new().unwrap();
        spool.write_all(b"spooled bytes").unwrap();

        let destination = dir.path().join("doc.pdf");
        let file = UploadedFile::new(
            "doc",
            "pdf",
            ByteSource::TempFile(spool.path().to_path_buf()),
        );

        LocalFileSystem.save_upload(&file, &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"spooled bytes");
        assert!(spool.path().exists());
    }

    #[test]
    fn save_upload_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("a.txt");
        fs::write(&destination, b"old").unwrap();

        let file = UploadedFile::new("a", "txt", ByteSource::Memory(b"new".to_vec()));
        LocalFileSystem.save_upload(&file, &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"new");
    }

    #[test]
    fn save_upload_from_its_own_destination_keeps_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let stored = dir.path().join("photo.jpg");
        fs::write(&stored, b"jpeg bytes").unwrap();

        let file = UploadedFile::new("photo", "jpg", ByteSource::TempFile(stored.clone()));
        LocalFileSystem.save_upload(&file, &stored).unwrap();
        assert_eq!(fs::read(&stored).unwrap(), b"jpeg bytes");

        // Same file reached through a different spelling of the path.
        let indirect = dir.path().join(".").join("photo.jpg");
        let file = UploadedFile::new("photo", "jpg", ByteSource::TempFile(indirect));
        LocalFileSystem.save_upload(&file, &stored).unwrap();
        assert_eq!(fs::read(&stored).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn save_upload_leaves_no_staging_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("a.txt");
        let file = UploadedFile::new("a", "txt", ByteSource::Memory(b"x".to_vec()));

        LocalFileSystem.save_upload(&file, &destination).unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn save_upload_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("missing/a.txt");
        let file = UploadedFile::new("a", "txt", ByteSource::Memory(b"x".to_vec()));

        assert!(LocalFileSystem.save_upload(&file, &destination).is_err());
    }

    #[test]
    fn remove_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LocalFileSystem.remove_file(&dir.path().join("gone.txt")).is_err());
    }
}
