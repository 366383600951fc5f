//! # Artifact Emission
//!
//! Writes a generated document, and optionally its class mapper, to an
//! output directory.
//!
//! Every artifact is serialized before the first byte reaches disk, and
//! each file is written to a temporary file in the destination directory
//! and then renamed over the target. A failed run therefore leaves either
//! the previous artifact or nothing, never a truncated file.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::document::OpenApiDocument;
use crate::error::SchemaError;
use crate::mapper::ClassMapper;

/// File name of the flattened document.
pub const FLATTENED_FILE: &str = "model.json";
/// File name of the inheritance-layout document.
pub const INHERITANCE_FILE: &str = "model_inheritance.json";
/// File name of the class mapper.
pub const MAPPER_FILE: &str = "model_mapper.json";

/// What to write and under which names.
#[derive(Debug)]
pub struct EmitRequest<'a> {
    /// The document to write.
    pub document: &'a OpenApiDocument,
    /// File name of the document inside the output directory.
    pub document_file: &'a str,
    /// Class mapper written alongside, if any.
    pub mapper: Option<&'a ClassMapper>,
}

impl<'a> EmitRequest<'a> {
    /// Write `document` under the default name for its layout.
    pub fn new(document: &'a OpenApiDocument, inheritance: bool) -> Self {
        Self {
            document,
            document_file: if inheritance { INHERITANCE_FILE } else { FLATTENED_FILE },
            mapper: None,
        }
    }

    /// Also write a class mapper.
    pub fn with_mapper(mut self, mapper: &'a ClassMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }
}

fn to_pretty_bytes<T: Serialize>(value: &T, artifact: &str) -> Result<Vec<u8>, SchemaError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|source| SchemaError::Serialize {
        artifact: artifact.to_string(),
        source,
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// A written and flushed temporary file waiting to be renamed over `path`.
struct Staged {
    path: PathBuf,
    file: NamedTempFile,
    len: usize,
}

fn stage(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<Staged, SchemaError> {
    let path = dir.join(file_name);
    let mut file = NamedTempFile::new_in(dir).map_err(|source| SchemaError::Write {
        path: path.clone(),
        source,
    })?;
    if let Err(source) = file.write_all(bytes).and_then(|()| file.flush()) {
        return Err(SchemaError::Write { path, source });
    }
    Ok(Staged {
        path,
        file,
        len: bytes.len(),
    })
}

impl Staged {
    fn persist(self) -> Result<PathBuf, SchemaError> {
        let Staged { path, file, len } = self;
        file.persist(&path).map_err(|e| SchemaError::Write {
            path: path.clone(),
            source: e.error,
        })?;
        tracing::info!(path = %path.display(), bytes = len, "wrote schema artifact");
        Ok(path)
    }
}

/// Write the requested artifacts into `output_dir`, creating it if needed.
/// Returns the written paths, document first.
///
/// All files are staged before any is renamed into place. The mapper is
/// renamed before the document, so a failed run never leaves a fresh
/// document next to a stale mapper.
pub fn emit(output_dir: &Path, request: &EmitRequest<'_>) -> Result<Vec<PathBuf>, SchemaError> {
    let mut pending = vec![(
        request.document_file,
        to_pretty_bytes(request.document, request.document_file)?,
    )];
    if let Some(mapper) = request.mapper {
        pending.push((MAPPER_FILE, to_pretty_bytes(mapper, MAPPER_FILE)?));
    }

    std::fs::create_dir_all(output_dir).map_err(|source| SchemaError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let staged = pending
        .iter()
        .map(|(name, bytes)| stage(output_dir, name, bytes))
        .collect::<Result<Vec<_>, _>>()?;

    let mut written = staged
        .into_iter()
        .rev()
        .map(Staged::persist)
        .collect::<Result<Vec<_>, _>>()?;
    written.reverse();
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentMetadata, GeneratorOptions};
    use crate::generator::generate_document;

    fn document() -> OpenApiDocument {
        let registry = dfs_model::registry().unwrap();
        generate_document(
            &registry,
            &["Room2D"],
            &DocumentMetadata::dragonfly_model("1.2.3"),
            &GeneratorOptions::dragonfly(),
        )
        .unwrap()
    }

    #[test]
    fn writes_into_new_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("nested").join("docs");
        let doc = document();
        let written = emit(&out, &EmitRequest::new(&doc, false)).unwrap();
        assert_eq!(written, vec![out.join(FLATTENED_FILE)]);

        let text = std::fs::read_to_string(&written[0]).unwrap();
        let parsed: OpenApiDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, doc);
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn rerun_is_byte_identical_and_leaves_no_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = document();
        let registry = dfs_model::registry().unwrap();
        let mapper = ClassMapper::from_document(&registry, &doc);
        let request = EmitRequest::new(&doc, true).with_mapper(&mapper);

        emit(tmp.path(), &request).unwrap();
        let first = std::fs::read(tmp.path().join(INHERITANCE_FILE)).unwrap();
        emit(tmp.path(), &request).unwrap();
        let second = std::fs::read(tmp.path().join(INHERITANCE_FILE)).unwrap();
        assert_eq!(first, second);

        let mut names: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, [INHERITANCE_FILE, MAPPER_FILE]);
    }

    #[test]
    fn failed_mapper_keeps_previous_document() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(FLATTENED_FILE), b"previous\n").unwrap();
        // A directory in the mapper's place makes its rename fail.
        std::fs::create_dir(tmp.path().join(MAPPER_FILE)).unwrap();

        let doc = document();
        let registry = dfs_model::registry().unwrap();
        let mapper = ClassMapper::from_document(&registry, &doc);
        let err = emit(tmp.path(), &EmitRequest::new(&doc, false).with_mapper(&mapper)).unwrap_err();
        assert!(matches!(err, SchemaError::Write { ref path, .. } if path.ends_with(MAPPER_FILE)));

        assert_eq!(
            std::fs::read(tmp.path().join(FLATTENED_FILE)).unwrap(),
            b"previous\n"
        );
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[test]
    fn writes_document_and_mapper_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = document();
        let registry = dfs_model::registry().unwrap();
        let mapper = ClassMapper::from_document(&registry, &doc);
        let written = emit(tmp.path(), &EmitRequest::new(&doc, false).with_mapper(&mapper)).unwrap();
        assert_eq!(
            written,
            vec![tmp.path().join(FLATTENED_FILE), tmp.path().join(MAPPER_FILE)]
        );
    }

    #[test]
    fn unwritable_destination_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let doc = document();
        let err = emit(&blocker.join("out"), &EmitRequest::new(&doc, false)).unwrap_err();
        assert!(matches!(err, SchemaError::Write { .. }));
    }
}
