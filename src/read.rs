use std::path::{Path, PathBuf};

use nametag::{CasePolicy, TableBuilder, TagTable};
use tokio::{fs::File, io::AsyncReadExt};
use tracing::debug;

use crate::error::{Error, IoError};

/// Name-prefix table compiled into the binary, used when no table is given.
pub const BUNDLED_TABLE: &str = include_str!("../assets/name_prefix.tbl");
pub const BUNDLED_TABLE_NAME: &str = "<bundled name_prefix.tbl>";

#[derive(Debug, Default)]
pub struct FileReader {
    inner: Option<File>,
    path: PathBuf,
}

impl FileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let path_buf = path.as_ref().to_path_buf();

        match File::open(&path_buf).await {
            Ok(file) => {
                self.inner = Some(file);
                self.path = path_buf;
                Ok(())
            }
            Err(error) => Err(IoError::File(path_buf, error.kind()).into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read_into(&mut self, buffer: &mut String) -> Result<(), Error> {
        match &mut self.inner {
            Some(reader) => reader
                .read_to_string(buffer)
                .await
                .map(|_| ())
                .map_err(|error| IoError::File(self.path.clone(), error.kind()).into()),

            None => Err(IoError::Reader(std::io::ErrorKind::InvalidInput).into()),
        }
    }
}

pub async fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let mut buffer = String::new();
    let mut reader = FileReader::new();

    reader.open(path).await?;
    reader.read_into(&mut buffer).await?;

    Ok(buffer)
}

/// Reads all table files concurrently, then parses them in the given order
/// into a single table. With no paths the bundled table is loaded.
pub async fn load_tables(paths: &[PathBuf], policy: CasePolicy) -> Result<TagTable, Error> {
    if paths.is_empty() {
        debug!(source = BUNDLED_TABLE_NAME, "Loading bundled table");
        let builder =
            TableBuilder::with_policy(policy).load_str(BUNDLED_TABLE_NAME, BUNDLED_TABLE)?;
        return Ok(builder.build());
    }

    let reads = paths
        .iter()
        .cloned()
        .map(|path| tokio::spawn(async move { read_to_string(&path).await }))
        .collect::<Vec<_>>();

    let mut builder = TableBuilder::with_policy(policy);

    for (path, read) in paths.iter().zip(reads) {
        let buffer = read
            .await
            .map_err(|error| Error::Worker(error.to_string()))??;

        debug!(path = %path.display(), bytes = buffer.len(), "Read table file");
        builder = builder.load_str(&path.display().to_string(), &buffer)?;
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use nametag::{CasePolicy, Resolution};

    use crate::{
        error::{Error, IoError},
        read::{load_tables, read_to_string, FileReader, BUNDLED_TABLE_NAME},
    };

    #[tokio::test]
    async fn test_reader_file_open() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "tag=<PR>\nvan :\n").unwrap();

        let mut buffer = String::new();
        let mut reader = FileReader::new();

        reader.open(file.path()).await.unwrap();
        reader.read_into(&mut buffer).await.unwrap();

        assert_eq!(buffer, "tag=<PR>\nvan :\n");
        assert_eq!(reader.path(), file.path());
    }

    #[tokio::test]
    async fn test_reader_unopened() {
        let mut buffer = String::new();
        let error = FileReader::new().read_into(&mut buffer).await.unwrap_err();

        assert!(matches!(error, Error::Io(IoError::Reader(_))));
    }

    #[tokio::test]
    async fn test_reader_missing_file() {
        let error = read_to_string("does/not/exist.tbl").await.unwrap_err();

        assert!(matches!(
            error,
            Error::Io(IoError::File(_, std::io::ErrorKind::NotFound))
        ));
    }

    #[tokio::test]
    async fn test_reader_load_tables() {
        let mut prefixes = tempfile::NamedTempFile::new().unwrap();
        write!(prefixes, "tag=<PR>\ndella : dela, dlla\n").unwrap();

        let mut titles = tempfile::NamedTempFile::new().unwrap();
        write!(titles, "tag=<TI>\nmr : mister\n").unwrap();

        let paths = [prefixes.path(), titles.path()].map(PathBuf::from);
        let table = load_tables(&paths, CasePolicy::default()).await.unwrap();

        assert_eq!(table.lookup("dlla"), Some(Resolution::new("della", "PR")));
        assert_eq!(table.lookup("Mister"), Some(Resolution::new("mr", "TI")));
        assert_eq!(table.sources().len(), 2);
    }

    #[tokio::test]
    async fn test_reader_load_tables_defaults_to_bundled() {
        let table = load_tables(&[], CasePolicy::default()).await.unwrap();

        assert_eq!(table.lookup("dela"), Some(Resolution::new("della", "PR")));
        assert_eq!(table.lookup("MAC"), Some(Resolution::new("mc", "PR")));
        assert_eq!(table.sources(), [BUNDLED_TABLE_NAME.to_string()]);

        let sensitive = load_tables(&[], CasePolicy::Sensitive).await.unwrap();
        assert_eq!(sensitive.lookup("MAC"), None);
    }

    #[tokio::test]
    async fn test_reader_load_tables_rejects_duplicates() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        write!(first, "tag=<PR>\nmc : mac\n").unwrap();

        let mut second = tempfile::NamedTempFile::new().unwrap();
        write!(second, "tag=<PR>\nmac :\n").unwrap();

        let paths = [first.path(), second.path()].map(PathBuf::from);
        let error = load_tables(&paths, CasePolicy::default()).await.unwrap_err();

        assert!(matches!(
            error,
            Error::Table(nametag::Error::DuplicateToken { .. })
        ));
    }
}
