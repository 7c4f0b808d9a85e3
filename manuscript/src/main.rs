use clap::Parser;
use manuscript::{compile, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Compile a manuscript from a YAML outline and markdown fragments.
/// Writes docx; the optional `--format rtf` writes rich text instead.
#[derive(Debug, Parser)]
#[command(name = "compile", version)]
struct Args {
	/// The YAML configuration file
	config_file: PathBuf,
	/// The directory to write the manuscript into; created if it does not exist
	output_dir: PathBuf,
	/// The kind of document to produce
	#[arg(long, value_enum, default_value_t = OutputFormat::Docx)]
	format: OutputFormat,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.with_target(false)
		.init();

	let args = Args::parse();
	match compile(&args.config_file, &args.output_dir, args.format) {
		Ok(path) => {
			println!("Compilation complete! Manuscript saved to '{}'.", path.display());
			ExitCode::SUCCESS
		},
		Err(e) => {
			eprintln!("FATAL ERROR: {}", e);
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn arguments_are_valid() {
		Args::command().debug_assert();
	}

	#[test]
	fn two_positional_arguments_give_docx() {
		let args = Args::try_parse_from(["compile", "novel.yaml", "out"]).unwrap();
		assert_eq!(args.config_file, PathBuf::from("novel.yaml"));
		assert_eq!(args.output_dir, PathBuf::from("out"));
		assert_eq!(args.format, OutputFormat::Docx);
	}

	#[test]
	fn format_flag_selects_rtf() {
		let args = Args::try_parse_from(["compile", "novel.yaml", "out", "--format", "rtf"]).unwrap();
		assert_eq!(args.format, OutputFormat::Rtf);
		assert!(Args::try_parse_from(["compile", "novel.yaml"]).is_err());
	}

	#[test]
	fn help_mentions_format() {
		let about = Args::command().get_about().map(|a| a.to_string()).unwrap_or_default();
		assert!(about.contains("--format rtf"), "{}", about);
	}
}
