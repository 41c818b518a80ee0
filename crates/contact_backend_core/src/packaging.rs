use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PackagingError;

/// Code payload handed to the function provisioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionSource {
    /// Read from disk at packaging time; the archive entry takes the file name.
    File(PathBuf),
    Inline { entry_name: String, body: Vec<u8> },
}

impl FunctionSource {
    pub fn inline(entry_name: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::Inline {
            entry_name: entry_name.into(),
            body: body.into(),
        }
    }

    fn load(&self) -> Result<(String, Vec<u8>), PackagingError> {
        match self {
            Self::File(path) => {
                let entry_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_string)
                    .ok_or_else(|| PackagingError::EntryName { path: path.clone() })?;
                let body = fs::read(path).map_err(|source| PackagingError::ReadSource {
                    path: path.clone(),
                    source,
                })?;
                Ok((entry_name, body))
            }
            Self::Inline { entry_name, body } => Ok((entry_name.clone(), body.clone())),
        }
    }
}

/// Zips the source into a single-entry archive ready for upload.
pub fn package_function_source(source: &FunctionSource) -> Result<Vec<u8>, PackagingError> {
    let (entry_name, body) = source.load()?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);
    zip.start_file(entry_name, options)?;
    zip.write_all(&body)?;
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn entries(archive: Vec<u8>) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(archive)).expect("archive should open");
        (0..archive.len())
            .map(|index| {
                let mut file = archive.by_index(index).expect("entry should exist");
                let mut body = Vec::new();
                file.read_to_end(&mut body).expect("entry should read");
                (file.name().to_string(), body)
            })
            .collect()
    }

    #[test]
    fn inline_source_becomes_single_named_entry() {
        let source = FunctionSource::inline("index.js", "exports.handler = async () => ({});");
        let archive = package_function_source(&source).expect("packaging should succeed");

        assert_eq!(
            entries(archive),
            vec![(
                "index.js".to_string(),
                b"exports.handler = async () => ({});".to_vec()
            )]
        );
    }

    #[test]
    fn file_source_uses_file_name_as_entry() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("handler.mjs");
        fs::write(&path, "export const handler = () => 1;").expect("write source");

        let archive = package_function_source(&FunctionSource::File(path))
            .expect("packaging should succeed");
        let entries = entries(archive);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "handler.mjs");
        assert_eq!(entries[0].1, b"export const handler = () => 1;");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = FunctionSource::File(dir.path().join("absent.js"));

        let error = package_function_source(&source).expect_err("missing source should fail");
        assert!(matches!(error, PackagingError::ReadSource { .. }));
    }
}
