//! Compile a manuscript, in standard submission format, from markdown fragments
//! and a YAML outline.
//!
//! The outline names the author, gives the manuscript's metadata, and lists its
//! structure: parts, chapters and untitled text, each made up of one or more source files.
//! See `config` for its format.
//!
//! Output is either a word processing document (`.docx`) or rich text (`.rtf`).
//!
//! ```no_run
//! use manuscript::{compile, OutputFormat};
//! use std::path::Path;
//!
//! let written = compile(Path::new("novel.yaml"), Path::new("out"), OutputFormat::Docx)
//!     .expect("could not compile");
//! println!("{}", written.display());
//! ```
//!
//! A missing source file is not an error: it is reported and skipped,
//! so that a draft with gaps can still be compiled.
//! Only a missing or malformed configuration is fatal.
#![deny(dead_code)]
#![deny(unreachable_patterns)]
#![deny(unused_extern_crates)]
#![deny(unused_imports)]
#![deny(unused_qualifications)]
#![deny(clippy::all)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;

use config::DeserializableConfig;
pub use manuscript_ast::{assemble, FragmentLoader, Manuscript, Outline};
use manuscript_docx::{DocxError, DocxRenderer};
use manuscript_rtf::RtfRenderer;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

static RTF_FILE_NAME: &str = "manuscript.rtf";
static DEFAULT_DOCX_FILE_NAME: &str = "manuscript.docx";

/// The kinds of document which can be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
	/// a word processing document
	#[default]
	Docx,
	/// rich text
	Rtf,
}

/// A fatal error in compiling a manuscript
#[derive(Debug, Error)]
pub enum CompileError {
	/// the configuration file does not exist
	#[error("The configuration file '{}' was not found.", .0.display())]
	ConfigNotFound(PathBuf),
	/// the configuration file exists but could not be read
	#[error("Could not read the configuration file '{}': {source}", .path.display())]
	ConfigRead {
		/// the configuration file
		path: PathBuf,
		/// the underlying error
		source: io::Error,
	},
	/// the configuration is not valid yaml
	#[error("There was an error parsing the YAML file: {0}")]
	ConfigParse(#[from] serde_yaml::Error),
	/// the output directory could not be created
	#[error("Could not create output directory '{}': {source}", .path.display())]
	OutputDir {
		/// the output directory
		path: PathBuf,
		/// the underlying error
		source: io::Error,
	},
	/// the finished manuscript could not be written
	#[error("Could not write '{}': {source}", .path.display())]
	Write {
		/// the output file
		path: PathBuf,
		/// the underlying error
		source: io::Error,
	},
	/// the docx package could not be built
	#[error(transparent)]
	Docx(#[from] DocxError),
}

/// Read and parse a configuration file
pub fn load_outline(config_path: &Path) -> Result<Outline, CompileError> {
	let src = std::fs::read_to_string(config_path).map_err(|e| match e.kind() {
		io::ErrorKind::NotFound => CompileError::ConfigNotFound(config_path.to_path_buf()),
		_ => CompileError::ConfigRead {
			path: config_path.to_path_buf(),
			source: e,
		},
	})?;
	let config = DeserializableConfig::new(&src)?;
	Ok(config.into_outline())
}

/// Assemble a manuscript. Source files are read relative to the working directory,
/// or failing that relative to `config_dir`.
pub fn create_manuscript(outline: &Outline, config_dir: &Path) -> Manuscript {
	let loader = FragmentLoader::new(PathBuf::new()).with_fallback(config_dir);
	assemble(outline, &loader)
}

/// Assemble a manuscript and render it as rtf
pub fn create_rtf(outline: &Outline, config_dir: &Path) -> String {
	create_manuscript(outline, config_dir).render_to_rtf()
}

/// Assemble a manuscript and render it as docx
pub fn create_docx(outline: &Outline, config_dir: &Path) -> Result<Vec<u8>, DocxError> {
	create_manuscript(outline, config_dir).render_to_docx()
}

/// The name of the file to write for a given outline and format
pub fn output_file_name(outline: &Outline, format: OutputFormat) -> &str {
	match format {
		OutputFormat::Rtf => RTF_FILE_NAME,
		OutputFormat::Docx => outline
			.metadata
			.file_name
			.as_deref()
			.unwrap_or(DEFAULT_DOCX_FILE_NAME),
	}
}

/// Compile the manuscript described by the configuration at `config_path`,
/// writing it into `output_dir`, which is created if need be.
///
/// Source files are found relative to the working directory; a path which is not
/// found there is tried relative to the configuration file.
/// Returns the path of the file written.
pub fn compile(config_path: &Path, output_dir: &Path, format: OutputFormat) -> Result<PathBuf, CompileError> {
	info!("Starting manuscript compilation from '{}'", config_path.display());
	let outline = load_outline(config_path)?;
	let config_dir = config_path
		.parent()
		.map(Path::to_path_buf)
		.unwrap_or_default();

	if !output_dir.exists() {
		info!("Creating output directory: '{}'", output_dir.display());
		std::fs::create_dir_all(output_dir).map_err(|source| CompileError::OutputDir {
			path: output_dir.to_path_buf(),
			source,
		})?;
	}

	let output = match format {
		OutputFormat::Rtf => create_rtf(&outline, &config_dir).into_bytes(),
		OutputFormat::Docx => create_docx(&outline, &config_dir)?,
	};

	let output_path = output_dir.join(output_file_name(&outline, format));
	std::fs::write(&output_path, output).map_err(|source| CompileError::Write {
		path: output_path.clone(),
		source,
	})?;
	info!("Manuscript saved to '{}'", output_path.display());
	Ok(output_path)
}
