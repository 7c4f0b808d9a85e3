//! Render a `Manuscript` as a word processing document (`.docx`).
//!
//! The package is kept as small as Word will accept:
//! a document, its styles, one running header and the core properties.
#![deny(dead_code)]
#![deny(unreachable_patterns)]
#![deny(unused_extern_crates)]
#![deny(unused_imports)]
#![deny(unused_qualifications)]
#![deny(clippy::all)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

use manuscript_ast::Manuscript;
use std::io::{Cursor, Write};
use thiserror::Error;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};
mod parts;

/// An error in packaging a document
#[derive(Debug, Error)]
pub enum DocxError {
    /// the zip archive could not be written
    #[error("could not package document: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// writing to the archive failed
    #[error("could not write document: {0}")]
    Io(#[from] std::io::Error),
}

/// Bundle the given parts, in order, into a zip archive
fn bundle(files: &[(&str, &[u8])]) -> Result<Vec<u8>, DocxError> {
    let buf = Vec::new();
    let w = Cursor::new(buf);
    let mut zipper = ZipWriter::new(w);
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    for (path, contents) in files.iter() {
        zipper.start_file(*path, options)?;
        zipper.write_all(contents)?;
    }

    let result = zipper.finish().map(|cursor| cursor.into_inner())?;
    Ok(result)
}

/// Render to docx
pub trait DocxRenderer {
    /// Render as the bytes of a complete `.docx` file
    fn render_to_docx(&self) -> Result<Vec<u8>, DocxError>;
}

impl DocxRenderer for Manuscript {
    fn render_to_docx(&self) -> Result<Vec<u8>, DocxError> {
        let document = parts::document(self);
        let styles = parts::styles(&self.page_setup);
        let header = parts::header(&self.running_header);
        let core = parts::core_properties(&self.title, &self.creator);

        let files: [(&str, &[u8]); 7] = [
            (parts::CONTENT_TYPES_PATH, parts::content_types().as_bytes()),
            (parts::PACKAGE_RELS_PATH, parts::package_rels().as_bytes()),
            (parts::CORE_PATH, core.as_bytes()),
            (parts::DOCUMENT_PATH, document.as_bytes()),
            (parts::DOCUMENT_RELS_PATH, parts::document_rels().as_bytes()),
            (parts::STYLES_PATH, styles.as_bytes()),
            (parts::HEADER_PATH, header.as_bytes()),
        ];
        let docx = bundle(&files)?;
        debug!(
            "Packaged {} blocks into {} bytes of docx",
            self.blocks().len(),
            docx.len()
        );
        Ok(docx)
    }
}
