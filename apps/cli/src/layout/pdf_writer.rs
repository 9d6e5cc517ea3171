//! Serializes a composed letter into a PDF with `lopdf`.
//!
//! Every page shares one resource dictionary holding a single standard
//! Type1 font (`/F1`, `WinAnsiEncoding`). Each placed line becomes its own
//! `BT … ET` text object so positions are absolute.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, StringFormat, Stream};
use tracing::info;

use crate::layout::composer::{ComposedLetter, PlacedLine};
use crate::layout::font_metrics::{encode_win_ansi, FontMetricTable, PageConfig};
use crate::layout::LayoutError;

const FONT_RESOURCE: &str = "F1";

/// Document-level metadata written to the trailer's `/Info` dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

/// Builds the in-memory PDF for a composed letter.
pub fn build_document(
    letter: &ComposedLetter,
    config: &PageConfig,
    font: &FontMetricTable,
    meta: &DocumentInfo,
) -> Result<Document, LayoutError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(letter.pages.len());
    for page in &letter.pages {
        let operations: Vec<Operation> = page.lines.iter().flat_map(line_operations).collect();
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            config.page_width_pt.into(),
            config.page_height_pt.into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = info_dictionary(&mut doc, meta);
    doc.trailer.set("Info", info_id);

    Ok(doc)
}

/// Writes the document to `path`, replacing any existing file.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<(), LayoutError> {
    doc.save(path).map_err(|e| LayoutError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn line_operations(line: &PlacedLine) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(FONT_RESOURCE.as_bytes().to_vec()), line.font_size_pt.into()],
        ),
        Operation::new("Tw", vec![line.word_spacing_pt.into()]),
        Operation::new("Td", vec![line.x_pt.into(), line.y_pt.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

fn info_dictionary(doc: &mut Document, meta: &DocumentInfo) -> ObjectId {
    doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(&meta.title), StringFormat::Literal),
        "Author" => Object::String(encode_win_ansi(&meta.author), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("coverletter ", env!("CARGO_PKG_VERSION"))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::layout::composer::compose_letter;
    use crate::layout::font_metrics::{letter_page_config, TIMES_ROMAN};
    use crate::models::LetterHeader;

    fn header() -> LetterHeader {
        LetterHeader {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-0100".to_string(),
            date: "October 18, 2026".to_string(),
        }
    }

    fn meta() -> DocumentInfo {
        DocumentInfo {
            title: "Cover Letter - Acme Corp - Software Engineer".to_string(),
            author: "Jane Doe".to_string(),
        }
    }

    fn document_bytes(doc: &mut Document) -> Vec<u8> {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    fn render(body: &str) -> Document {
        let config = letter_page_config();
        let letter = compose_letter(body, &header(), &config, &TIMES_ROMAN);
        let mut doc = build_document(&letter, &config, &TIMES_ROMAN, &meta()).unwrap();
        let bytes = document_bytes(&mut doc);
        Document::load_mem(&bytes).unwrap()
    }

    fn shown_strings(doc: &Document, page_id: ObjectId) -> Vec<Vec<u8>> {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_page_letter_round_trips() {
        let doc = render("Dear Hiring Manager,\n\nThank you for your time.");
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = pages[&1];
        let strings = shown_strings(&doc, page_id);
        assert_eq!(strings[0], b"Jane Doe".to_vec());
        assert_eq!(strings[3], b"October 18, 2026".to_vec());
        assert_eq!(strings.last().unwrap(), &b"Thank you for your time.".to_vec());
    }

    #[test]
    fn test_font_is_standard_times_roman() {
        let doc = render("Hello.");
        let pages_id = doc.catalog().unwrap().get(b"Pages").unwrap().as_reference().unwrap();
        let pages = doc.get_dictionary(pages_id).unwrap();
        let resources_id = pages.get(b"Resources").unwrap().as_reference().unwrap();
        let fonts = doc
            .get_dictionary(resources_id)
            .unwrap()
            .get(b"Font")
            .unwrap()
            .as_dict()
            .unwrap();
        let font_id = fonts.get(b"F1").unwrap().as_reference().unwrap();
        let font = doc.get_dictionary(font_id).unwrap();
        assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Times-Roman");
        assert_eq!(
            font.get(b"Encoding").unwrap().as_name().unwrap(),
            b"WinAnsiEncoding"
        );
    }

    #[test]
    fn test_media_box_is_us_letter() {
        let doc = render("Hello.");
        let catalog = doc.catalog().unwrap();
        let pages_id = catalog.get(b"Pages").unwrap().as_reference().unwrap();
        let pages = doc.get_dictionary(pages_id).unwrap();
        let media_box = pages.get(b"MediaBox").unwrap().as_array().unwrap();
        let dims: Vec<f32> = media_box.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(dims, vec![0.0, 0.0, 612.0, 792.0]);
    }

    #[test]
    fn test_smart_quotes_written_as_win_ansi() {
        let doc = render("I\u{2019}m excited.");
        let strings = shown_strings(&doc, doc.get_pages()[&1]);
        assert_eq!(strings.last().unwrap(), &vec![b'I', 0x92, b'm', b' ', b'e', b'x', b'c', b'i', b't', b'e', b'd', b'.']);
    }

    #[test]
    fn test_info_dictionary_carries_title() {
        let doc = render("Hello.");
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert_eq!(
            info.get(b"Title").unwrap().as_str().unwrap(),
            b"Cover Letter - Acme Corp - Software Engineer"
        );
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letter.pdf");
        std::fs::write(&path, b"stale").unwrap();

        let config = letter_page_config();
        let letter = compose_letter("Hello.", &header(), &config, &TIMES_ROMAN);
        let mut doc = build_document(&letter, &config, &TIMES_ROMAN, &meta()).unwrap();
        save_document(&mut doc, &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF-1.5"));
    }
}
