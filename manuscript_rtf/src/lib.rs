//! This crate renders a `Manuscript` as a rich text (RTF) document.
//!
//! ```
//! use manuscript_ast::{Manuscript, Paragraph, RunningHeader};
//! use manuscript_rtf::RtfRenderer;
//!
//! let mut manuscript = Manuscript::new("Title", "Author", RunningHeader {
//! 	last_name: "Author".to_string(),
//! 	short_title: "Title".to_string(),
//! });
//! manuscript.add_paragraph(Paragraph::centered_bold("TITLE"));
//! let rtf = manuscript.render_to_rtf();
//! assert!(rtf.starts_with("{\\rtf1"));
//! assert!(rtf.contains("{\\b TITLE}"));
//! ```
#![deny(dead_code)]
#![deny(unreachable_patterns)]
#![deny(unused_extern_crates)]
#![deny(unused_imports)]
#![deny(unused_qualifications)]
#![deny(clippy::all)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

use manuscript_ast::{Alignment, Block, ContactTable, Manuscript, PageSetup, Paragraph, ParagraphStyle, RunningHeader, Span};
use manuscript_common::escape_to_rtf;
use tracing::debug;

/// Whether `s` ends in a control word, so that text written next
/// needs a space to delimit it
fn ends_with_control_word(s: &str) -> bool {
	let tail = s.trim_end_matches(|c: char| c.is_ascii_alphanumeric() || c == '-');
	if tail.len() == s.len() {
		return false;
	}
	// an even number of backslashes is escaped text, not a control word
	let backslashes = tail.len() - tail.trim_end_matches('\\').len();
	backslashes % 2 == 1
}

/// simple commands to write standard rtf items,
/// such as opening a group or issuing a control word.
trait RtfOps {
	fn begin_group(&mut self);
	fn end_group(&mut self);
	fn control(&mut self, word: &str);
	fn control_with_value(&mut self, word: &str, value: i64);
	fn text(&mut self, text: &str);
}

impl RtfOps for String {
	fn begin_group(&mut self) {
		self.push('{');
	}

	fn end_group(&mut self) {
		self.push('}');
	}

	fn control(&mut self, word: &str) {
		self.push('\\');
		self.push_str(word);
	}

	fn control_with_value(&mut self, word: &str, value: i64) {
		self.control(word);
		self.push_str(&value.to_string());
	}

	fn text(&mut self, text: &str) {
		if text.is_empty() {
			return;
		}
		if ends_with_control_word(self) {
			self.push(' ');
		}
		self.push_str(&escape_to_rtf(text));
	}
}

#[derive(Debug)]
struct RtfWriter<'a> {
	output: String,
	setup: &'a PageSetup,
}

impl <'a> RtfWriter<'a> {

	fn new(setup: &'a PageSetup) -> Self {
		RtfWriter {
			output: String::new(),
			setup
		}
	}

	fn text_width(&self) -> i64 {
		i64::from(self.setup.page_width) - 2 * i64::from(self.setup.margin)
	}

	fn write_preamble(&mut self, header: &RunningHeader) {
		let setup = self.setup;
		let out = &mut self.output;
		out.begin_group();
		out.control_with_value("rtf", 1);
		out.control("ansi");
		out.control_with_value("ansicpg", 1252);
		out.control_with_value("deff", 0);
		out.control("nouicompat");
		out.control_with_value("uc", 1);
		out.push('\n');

		out.begin_group();
		out.control("fonttbl");
		out.begin_group();
		out.control_with_value("f", 0);
		out.control("froman");
		out.control_with_value("fcharset", 0);
		out.text(&setup.font);
		out.push(';');
		out.end_group();
		out.end_group();
		out.push('\n');

		out.control_with_value("paperw", setup.page_width.into());
		out.control_with_value("paperh", setup.page_height.into());
		for side in ["margl", "margr", "margt", "margb"].iter() {
			out.control_with_value(side, setup.margin.into());
		}
		out.push('\n');

		// the first page takes no header
		out.control("sectd");
		out.control("titlepg");
		out.control_with_value("headery", setup.header_distance.into());
		out.push('\n');

		out.begin_group();
		out.control("header");
		self.begin_paragraph(Alignment::Right, ParagraphStyle::Plain);
		self.write_span(&Span::plain(format!("{} | ", header.last_name)));
		self.write_span(&Span::italic(header.short_title.as_str()));
		self.write_span(&Span::plain(" | "));
		self.output.control("chpgn");
		self.output.control("par");
		self.output.end_group();
		self.output.push('\n');
	}

	fn begin_paragraph(&mut self, alignment: Alignment, style: ParagraphStyle) {
		let font_size: i64 = self.setup.font_size_half_points.into();
		let out = &mut self.output;
		out.control("pard");
		out.control("plain");
		out.control_with_value("f", 0);
		out.control_with_value("fs", font_size);
		match alignment {
			Alignment::Left => out.control("ql"),
			Alignment::Center => out.control("qc"),
			Alignment::Right => out.control("qr"),
		}
		if let ParagraphStyle::Body = style {
			out.control_with_value("fi", 720);
			out.control_with_value("sl", 480);
			out.control_with_value("slmult", 1);
			out.control_with_value("sb", 0);
			out.control_with_value("sa", 0);
		}
	}

	fn write_span(&mut self, span: &Span) {
		let out = &mut self.output;
		if span.bold || span.italic {
			out.begin_group();
			if span.bold {
				out.control("b");
			}
			if span.italic {
				out.control("i");
			}
			out.text(&span.text);
			out.end_group();
		} else {
			out.text(&span.text);
		}
	}

	fn write_paragraph(&mut self, paragraph: &Paragraph) {
		self.output.begin_group();
		self.begin_paragraph(paragraph.alignment, paragraph.style);
		for span in paragraph.spans.iter() {
			self.write_span(span);
		}
		self.output.control("par");
		self.output.end_group();
		self.output.push('\n');
	}

	fn write_cell_borders(&mut self) {
		for side in ["clbrdrt", "clbrdrl", "clbrdrb", "clbrdrr"].iter() {
			self.output.control(side);
			self.output.control("brdrnil");
		}
	}

	/// a single borderless row of two equal cells
	fn write_contact_table(&mut self, table: &ContactTable) {
		let width = self.text_width();
		self.output.control("trowd");
		self.output.control_with_value("trgaph", 108);
		self.output.control_with_value("trleft", 0);
		self.write_cell_borders();
		self.output.control_with_value("cellx", width / 2);
		self.write_cell_borders();
		self.output.control_with_value("cellx", width);
		self.output.push('\n');

		self.begin_paragraph(Alignment::Left, ParagraphStyle::Plain);
		self.output.control("intbl");
		self.write_span(&Span::plain(table.contact.join("\n")));
		self.output.control("cell");
		self.output.push('\n');

		self.begin_paragraph(Alignment::Right, ParagraphStyle::Plain);
		self.output.control("intbl");
		self.write_span(&Span::plain(table.word_count_line()));
		self.output.control("cell");
		self.output.control("row");
		self.output.push('\n');
		self.output.control("pard");
		self.output.push('\n');
	}

	fn write(&mut self, blocks: &[Block]) {
		for block in blocks.iter() {
			match block {
				Block::Paragraph(p) => self.write_paragraph(p),
				Block::PageBreak => {
					self.output.control("page");
					self.output.push('\n');
				},
				Block::ContactTable(t) => self.write_contact_table(t),
			}
		}
	}

	fn finish(mut self) -> String {
		self.output.end_group();
		self.output
	}
}

/// Render to rtf
pub trait RtfRenderer {
	/// Render as a complete rtf document
	fn render_to_rtf(&self) -> String;
}

impl RtfRenderer for Manuscript {
	fn render_to_rtf(&self) -> String {
		let mut writer = RtfWriter::new(&self.page_setup);
		writer.write_preamble(&self.running_header);
		writer.write(self.blocks());
		let output = writer.finish();
		debug!("Rendered {} blocks to {} bytes of rtf", self.blocks().len(), output.len());
		output
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn manuscript() -> Manuscript {
		Manuscript::new("Title", "Anon", RunningHeader {
			last_name: "Writer".to_string(),
			short_title: "Short".to_string()
		})
	}

	#[test]
	fn control_word_delimiting() {
		assert!(ends_with_control_word("{\\b"));
		assert!(ends_with_control_word("\\fs24"));
		assert!(ends_with_control_word("\\fi-720"));
		assert!(!ends_with_control_word("text"));
		assert!(!ends_with_control_word("\\\\text"));
		assert!(!ends_with_control_word("\\{"));
		assert!(ends_with_control_word("\\\\\\par"));
	}

	#[test]
	fn preamble() {
		let rtf = manuscript().render_to_rtf();
		assert!(rtf.starts_with("{\\rtf1\\ansi\\ansicpg1252\\deff0\\nouicompat\\uc1\n"));
		assert!(rtf.contains("{\\fonttbl{\\f0\\froman\\fcharset0 Times New Roman;}}"));
		assert!(rtf.contains("\\paperw12240\\paperh15840\\margl1440\\margr1440\\margt1440\\margb1440"));
		assert!(rtf.contains("\\titlepg"));
		assert!(rtf.contains("{\\header\\pard\\plain\\f0\\fs24\\qr Writer | {\\i Short} | \\chpgn\\par}"));
		assert!(rtf.ends_with('}'));
	}

	#[test]
	fn paragraphs_and_runs() {
		let mut m = manuscript();
		let _ = m.add_paragraph(Paragraph::body(vec![
			Span::plain("She was "),
			Span::bold("very"),
			Span::plain(" "),
			Span::italic("sure"),
			Span::plain(" "),
			Span::bold_italic("then"),
		]));
		let _ = m.add_page_break();
		let _ = m.add_paragraph(Paragraph::centered("#  #  #"));
		let rtf = m.render_to_rtf();
		assert!(rtf.contains("{\\pard\\plain\\f0\\fs24\\ql\\fi720\\sl480\\slmult1\\sb0\\sa0 She was {\\b very} {\\i sure} {\\b\\i then}\\par}\n\\page\n{\\pard\\plain\\f0\\fs24\\qc #  #  #\\par}"));
	}

	#[test]
	fn text_is_escaped() {
		let mut m = manuscript();
		let _ = m.add_paragraph(Paragraph::body(vec![Span::plain("a {brace} \\ “quote”")]));
		let rtf = m.render_to_rtf();
		assert!(rtf.contains("\\sa0 a \\{brace\\} \\\\ \\u8220?quote\\u8221?\\par}"));
	}

	#[test]
	fn line_breaks_within_paragraphs() {
		let mut m = manuscript();
		let _ = m.add_paragraph(Paragraph::centered("by\nAnon"));
		let rtf = m.render_to_rtf();
		assert!(rtf.contains("\\qc by\\line Anon\\par}"));
	}

	#[test]
	fn contact_table() {
		let mut m = manuscript();
		let _ = m.add_contact_table(vec!["Jane Q. Writer".into(), "jane_q@example.com".into()], 85300);
		let rtf = m.render_to_rtf();
		assert!(rtf.contains("\\cellx4680"));
		assert!(rtf.contains("\\cellx9360"));
		assert!(rtf.contains("\\ql\\intbl Jane Q. Writer\\line jane_q@example.com\\cell"));
		assert!(rtf.contains("\\qr\\intbl Approx. 85,300 words\\cell\\row"));
	}
}
