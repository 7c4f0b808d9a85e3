use manuscript::{compile, OutputFormat};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

fn specimen_config() -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/novel/novel.yaml")
}

/// Assert that each needle is found in `haystack`, in order
fn assert_in_order(haystack: &str, needles: &[&str]) {
	let mut from = 0;
	for needle in needles.iter() {
		match haystack[from..].find(needle) {
			Some(i) => from += i + needle.len(),
			None => panic!("'{}' missing or out of order", needle),
		}
	}
}

fn read_document_xml(docx: &Path) -> String {
	let bytes = std::fs::read(docx).unwrap();
	let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
	let mut document = archive.by_name("word/document.xml").unwrap();
	let mut xml = String::new();
	let _ = document.read_to_string(&mut xml).unwrap();
	xml
}

#[test]
fn create_docx() {
	let out = tempfile::tempdir().unwrap();
	let written = compile(&specimen_config(), out.path(), OutputFormat::Docx).unwrap();
	assert_eq!(written, out.path().join("test_novel.docx"));

	let xml = read_document_xml(&written);
	assert_in_order(&xml, &[
		"Test Author",
		"test_author@example.com",
		"Approx. 0 words",
		"MY TEST NOVEL",
		"<w:t xml:space=\"preserve\">by</w:t><w:br/><w:t xml:space=\"preserve\">Test Author</w:t>",
		"<w:br w:type=\"page\"/>",
		"Chapter 1: The First Chapter",
		"first part of the first chapter",
		"<w:t xml:space=\"preserve\">#</w:t>",
		"second part of the first chapter",
		"<w:br w:type=\"page\"/>",
		"#  #  #",
	]);
	assert_eq!(xml.matches("<w:t xml:space=\"preserve\">#</w:t>").count(), 1);
	assert!(!xml.contains("A heading which is dropped"));
	assert!(!xml.contains("a note to self"));
}

#[test]
fn create_rtf() {
	let out = tempfile::tempdir().unwrap();
	let written = compile(&specimen_config(), out.path(), OutputFormat::Rtf).unwrap();
	assert_eq!(written, out.path().join("manuscript.rtf"));

	let rtf = std::fs::read_to_string(&written).unwrap();
	assert!(rtf.starts_with("{\\rtf1"));
	assert!(rtf.contains("{\\header\\pard\\plain\\f0\\fs24\\qr Author | {\\i Test Novel} | \\chpgn\\par}"));
	assert_in_order(&rtf, &[
		"\\intbl Test Author\\line 1 Main St",
		"Approx. 0 words\\cell\\row",
		"{\\b MY TEST NOVEL}",
		"by\\line Test Author",
		"\\page\n",
		"{\\b Chapter 1: The First Chapter}",
		"first part of the first chapter\\par}",
		"\\qc #\\par}",
		"second part of the first chapter\\par}",
		"\\page\n",
		"\\qc #  #  #\\par}",
	]);
	assert!(rtf.ends_with('}'));
}

#[test]
fn create_output_directory() {
	let out = tempfile::tempdir().unwrap();
	let nested = out.path().join("drafts").join("latest");
	let written = compile(&specimen_config(), &nested, OutputFormat::Rtf).unwrap();
	assert!(nested.is_dir());
	assert!(written.is_file());
}

#[test]
fn create_with_missing_fragment() {
	let dir = tempfile::tempdir().unwrap();
	let config = dir.path().join("story.yaml");
	std::fs::write(&config, "
metadata:
  title: Short Work
  story_type: short_story
structure:
  - type: part
    title: The Beginning
    content:
      - type: chapter
        number: 1
        files: [missing.md]
      - type: chapter
        number: 2
        file: present.md
").unwrap();
	std::fs::write(dir.path().join("present.md"), "It was *quite* dark.\n").unwrap();

	let out = dir.path().join("out");
	let written = compile(&config, &out, OutputFormat::Rtf).unwrap();
	let rtf = std::fs::read_to_string(&written).unwrap();
	assert_in_order(&rtf, &[
		"{\\b SHORT WORK}",
		"{\\b THE BEGINNING}",
		"{\\b Chapter 1}",
		"{\\b Chapter 2}",
		"It was {\\i quite} dark.\\par}",
		"\\qc #  #  #\\par}",
	]);
	// a short story breaks the page only before the end mark
	assert_eq!(rtf.matches("\\page\n").count(), 1);
}
