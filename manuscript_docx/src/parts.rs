//! The xml parts of a wordprocessing package.
use manuscript_ast::{
    Alignment, Block, ContactTable, Manuscript, PageSetup, Paragraph, ParagraphStyle,
    RunningHeader, Span,
};
use manuscript_common::escape_to_xml;

pub(crate) static CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub(crate) static PACKAGE_RELS_PATH: &str = "_rels/.rels";
pub(crate) static CORE_PATH: &str = "docProps/core.xml";
pub(crate) static DOCUMENT_PATH: &str = "word/document.xml";
pub(crate) static DOCUMENT_RELS_PATH: &str = "word/_rels/document.xml.rels";
pub(crate) static STYLES_PATH: &str = "word/styles.xml";
pub(crate) static HEADER_PATH: &str = "word/header1.xml";

static XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
static W_NAMESPACE: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
static R_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
static HEADER_ID: &str = "rId2";

pub(crate) fn content_types() -> &'static str {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
        r#"<Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        "</Types>"
    )
}

pub(crate) fn package_rels() -> &'static str {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
        "</Relationships>"
    )
}

pub(crate) fn document_rels() -> &'static str {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>"#,
        "</Relationships>"
    )
}

pub(crate) fn core_properties(title: &str, creator: &str) -> String {
    let mut out = String::from(XML_DECLARATION);
    out.push('\n');
    out.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
        r#" xmlns:dc="http://purl.org/dc/elements/1.1/""#,
        r#" xmlns:dcterms="http://purl.org/dc/terms/""#,
        r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    out.push_str(&format!("<dc:title>{}</dc:title>", escape_to_xml(title)));
    out.push_str(&format!("<dc:creator>{}</dc:creator>", escape_to_xml(creator)));
    out.push_str("</cp:coreProperties>");
    out
}

/// the default font and size for the whole document
pub(crate) fn styles(setup: &PageSetup) -> String {
    let font = escape_to_xml(setup.font.as_str());
    let mut out = String::from(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!("<w:styles xmlns:w=\"{}\">", W_NAMESPACE));
    out.push_str("<w:docDefaults><w:rPrDefault><w:rPr>");
    out.push_str(&format!(
        "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\" w:eastAsia=\"{0}\" w:cs=\"{0}\"/>",
        font
    ));
    out.push_str(&format!(
        "<w:sz w:val=\"{0}\"/><w:szCs w:val=\"{0}\"/>",
        setup.font_size_half_points
    ));
    out.push_str("</w:rPr></w:rPrDefault>");
    out.push_str("<w:pPrDefault><w:pPr><w:spacing w:before=\"0\" w:after=\"0\" w:line=\"240\" w:lineRule=\"auto\"/></w:pPr></w:pPrDefault>");
    out.push_str("</w:docDefaults>");
    out.push_str("<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/><w:qFormat/></w:style>");
    out.push_str("</w:styles>");
    out
}

fn write_run(out: &mut String, span: &Span) {
    if span.text.is_empty() {
        return;
    }
    out.push_str("<w:r>");
    if span.bold || span.italic {
        out.push_str("<w:rPr>");
        if span.bold {
            out.push_str("<w:b/>");
        }
        if span.italic {
            out.push_str("<w:i/>");
        }
        out.push_str("</w:rPr>");
    }
    for (i, line) in span.text.split('\n').enumerate() {
        if i > 0 {
            out.push_str("<w:br/>");
        }
        if !line.is_empty() {
            out.push_str("<w:t xml:space=\"preserve\">");
            out.push_str(&escape_to_xml(line));
            out.push_str("</w:t>");
        }
    }
    out.push_str("</w:r>");
}

fn write_paragraph_properties(out: &mut String, alignment: Alignment, style: ParagraphStyle) {
    let justification = match alignment {
        Alignment::Left => None,
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
    };
    if style == ParagraphStyle::Plain && justification.is_none() {
        return;
    }
    out.push_str("<w:pPr>");
    if style == ParagraphStyle::Body {
        out.push_str("<w:spacing w:before=\"0\" w:after=\"0\" w:line=\"480\" w:lineRule=\"auto\"/>");
        out.push_str("<w:ind w:firstLine=\"720\"/>");
    }
    if let Some(jc) = justification {
        out.push_str(&format!("<w:jc w:val=\"{}\"/>", jc));
    }
    out.push_str("</w:pPr>");
}

fn write_paragraph(out: &mut String, paragraph: &Paragraph) {
    out.push_str("<w:p>");
    write_paragraph_properties(out, paragraph.alignment, paragraph.style);
    for span in paragraph.spans.iter() {
        write_run(out, span);
    }
    out.push_str("</w:p>");
}

/// a borderless row of two equal cells
fn write_contact_table(out: &mut String, table: &ContactTable, setup: &PageSetup) {
    let width = setup.page_width - 2 * setup.margin;
    let cell = width / 2;

    out.push_str("<w:tbl><w:tblPr>");
    out.push_str(&format!("<w:tblW w:w=\"{}\" w:type=\"dxa\"/>", width));
    out.push_str("<w:tblBorders>");
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"].iter() {
        out.push_str(&format!("<w:{} w:val=\"nil\"/>", side));
    }
    out.push_str("</w:tblBorders>");
    out.push_str("<w:tblLayout w:type=\"fixed\"/>");
    out.push_str("</w:tblPr>");
    out.push_str(&format!(
        "<w:tblGrid><w:gridCol w:w=\"{0}\"/><w:gridCol w:w=\"{0}\"/></w:tblGrid>",
        cell
    ));

    let cells = [
        Paragraph::new(
            Alignment::Left,
            ParagraphStyle::Plain,
            vec![Span::plain(table.contact.join("\n"))],
        ),
        Paragraph::new(
            Alignment::Right,
            ParagraphStyle::Plain,
            vec![Span::plain(table.word_count_line())],
        ),
    ];
    out.push_str("<w:tr>");
    for paragraph in cells.iter() {
        out.push_str(&format!(
            "<w:tc><w:tcPr><w:tcW w:w=\"{}\" w:type=\"dxa\"/></w:tcPr>",
            cell
        ));
        write_paragraph(out, paragraph);
        out.push_str("</w:tc>");
    }
    out.push_str("</w:tr></w:tbl>");
}

fn write_section_properties(out: &mut String, setup: &PageSetup) {
    out.push_str("<w:sectPr>");
    out.push_str(&format!(
        "<w:headerReference w:type=\"default\" r:id=\"{}\"/>",
        HEADER_ID
    ));
    out.push_str(&format!(
        "<w:pgSz w:w=\"{}\" w:h=\"{}\"/>",
        setup.page_width, setup.page_height
    ));
    out.push_str(&format!(
        "<w:pgMar w:top=\"{0}\" w:right=\"{0}\" w:bottom=\"{0}\" w:left=\"{0}\" w:header=\"{1}\" w:footer=\"{1}\" w:gutter=\"0\"/>",
        setup.margin, setup.header_distance
    ));
    // the first page takes no header
    out.push_str("<w:titlePg/>");
    out.push_str("</w:sectPr>");
}

pub(crate) fn document(manuscript: &Manuscript) -> String {
    let setup = &manuscript.page_setup;
    let mut out = String::from(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!(
        "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\"><w:body>",
        W_NAMESPACE, R_NAMESPACE
    ));
    for block in manuscript.blocks() {
        match block {
            Block::Paragraph(p) => write_paragraph(&mut out, p),
            Block::PageBreak => out.push_str("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>"),
            Block::ContactTable(t) => write_contact_table(&mut out, t, setup),
        }
    }
    write_section_properties(&mut out, setup);
    out.push_str("</w:body></w:document>");
    out
}

/// `Last name | Short title | page`, right aligned
pub(crate) fn header(running_header: &RunningHeader) -> String {
    let mut out = String::from(XML_DECLARATION);
    out.push('\n');
    out.push_str(&format!(
        "<w:hdr xmlns:w=\"{}\" xmlns:r=\"{}\">",
        W_NAMESPACE, R_NAMESPACE
    ));
    out.push_str("<w:p>");
    write_paragraph_properties(&mut out, Alignment::Right, ParagraphStyle::Plain);
    write_run(&mut out, &Span::plain(format!("{} | ", running_header.last_name)));
    write_run(&mut out, &Span::italic(running_header.short_title.as_str()));
    write_run(&mut out, &Span::plain(" | "));
    out.push_str(concat!(
        "<w:r><w:fldChar w:fldCharType=\"begin\"/></w:r>",
        "<w:r><w:instrText xml:space=\"preserve\"> PAGE </w:instrText></w:r>",
        "<w:r><w:fldChar w:fldCharType=\"separate\"/></w:r>",
        "<w:r><w:t>1</w:t></w:r>",
        "<w:r><w:fldChar w:fldCharType=\"end\"/></w:r>"
    ));
    out.push_str("</w:p></w:hdr>");
    out
}
