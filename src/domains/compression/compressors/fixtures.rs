//! Sample documents shared by compressor and service tests

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::{Cursor, Write};
use zip::{write::FileOptions, ZipWriter};

pub const DOCX_ENTRIES: [(&str, &str); 3] = [
    ("[Content_Types].xml", "<Types><Default Extension=\"xml\" ContentType=\"application/xml\"/></Types>"),
    ("word/document.xml", "<w:p><w:r><w:t>repeated paragraph text</w:t></w:r></w:p>"),
    ("docProps/core.xml", "<cp:coreProperties><dc:title>Sample</dc:title></cp:coreProperties>"),
];

/// Times each entry body is repeated in the sample docx
pub const DOCX_REPEAT: usize = 200;

/// Unix mode given to `word/document.xml` in the sample docx
pub const DOCX_DOCUMENT_MODE: u32 = 0o640;

/// A stored (uncompressed) docx-like archive with a `word/` directory entry
pub fn sample_docx() -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = FileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .last_modified_time(zip::DateTime::from_date_and_time(2021, 6, 15, 10, 30, 20).unwrap());

    writer.add_directory("word/", stored).unwrap();
    for (name, body) in DOCX_ENTRIES {
        let options = if name == "word/document.xml" {
            stored.unix_permissions(DOCX_DOCUMENT_MODE)
        } else {
            stored
        };
        writer.start_file(name, options).unwrap();
        writer.write_all(body.repeat(DOCX_REPEAT).as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A PDF whose pages each draw `Page <n> line <m>` sixty times, uncompressed
pub fn sample_pdf(page_count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for n in 0..page_count {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
        ];
        for line in 0..60 {
            operations.push(Operation::new("Td", vec![0.into(), (-12).into()]));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(format!("Page {} line {}", n + 1, line))],
            ));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
