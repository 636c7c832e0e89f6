// Paginated document (pdf) extraction.
//
// Pages are visited in page-number order. Text fragments within a page are
// joined with a single space; pages are joined with a newline. Layout and
// original whitespace are not preserved.

use lopdf::Document;

use crate::types::{AnalystError, AnalystResult, ExtractedContent};

pub fn extract(payload: &[u8]) -> AnalystResult<ExtractedContent> {
    let doc = Document::load_mem(payload).map_err(|e| AnalystError::Extraction(e.to_string()))?;

    let mut pages: Vec<String> = Vec::new();
    // BTreeMap keys, so iteration follows ascending page numbers.
    for (&page_number, _) in doc.get_pages().iter() {
        let page_text = doc
            .extract_text(&[page_number])
            .map_err(|e| AnalystError::Extraction(e.to_string()))?;
        pages.push(page_text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    Ok(ExtractedContent::Text(pages.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, ObjectId, Stream};

    fn text_stream(doc: &mut Document, fragments: &[&str]) -> ObjectId {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 700.into()]),
        ];
        for fragment in fragments {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*fragment)]));
            operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations };
        doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
    }

    fn two_page_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let first_content = text_stream(&mut doc, &["Alpha", "beta"]);
        let second_content = text_stream(&mut doc, &["gamma"]);
        let first_page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => first_content,
        });
        let second_page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => second_content,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![first_page.into(), second_page.into()],
                "Count" => 2,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn pages_in_order_fragments_space_joined_pages_newline_joined() {
        let content = extract(&two_page_pdf()).unwrap();
        assert_eq!(
            content,
            ExtractedContent::Text("Alpha beta\ngamma".to_string())
        );
    }

    #[test]
    fn malformed_payload_propagates_parser_error() {
        let err = extract(b"%PDF-oops").unwrap_err();
        assert!(matches!(err, AnalystError::Extraction(_)));
    }
}
