//! XML renderer

use crate::error::{ConvertError, ConvertResult};
use crate::types::Record;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Element name check: a letter or `_` first, then letters, digits, `-`, `_` or `.`
pub fn is_valid_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn check_name(name: &str, what: &str) -> ConvertResult<()> {
    if is_valid_xml_name(name) {
        Ok(())
    } else {
        Err(ConvertError::Render(format!(
            "XML: {} '{}' is not a valid element name",
            what, name
        )))
    }
}

/// Characters outside the XML 1.0 `Char` production
fn is_forbidden_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

fn write_event(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> ConvertResult<()> {
    writer
        .write_event(event)
        .map_err(|e| ConvertError::Render(format!("XML: {}", e)))
}

/// Render records as an indented XML document
///
/// ```text
/// <?xml version="1.0" encoding="UTF-8"?>
/// <data>
///   <entry>
///     <first-name>Ana</first-name>
///   </entry>
/// </data>
/// ```
pub fn render_xml(records: &[Record], root: &str, row: &str) -> ConvertResult<String> {
    check_name(root, "root")?;
    check_name(row, "row")?;
    for record in records {
        for (key, value) in record.iter() {
            check_name(key, "key")?;
            if value.to_string().chars().any(is_forbidden_xml_char) {
                return Err(ConvertError::Render(format!(
                    "XML: value of '{}' contains a character not allowed in XML 1.0",
                    key
                )));
            }
        }
    }

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    if records.is_empty() {
        write_event(&mut writer, Event::Empty(BytesStart::new(root)))?;
    } else {
        write_event(&mut writer, Event::Start(BytesStart::new(root)))?;
        for record in records {
            write_event(&mut writer, Event::Start(BytesStart::new(row)))?;
            for (key, value) in record.iter() {
                if value.is_null() {
                    write_event(&mut writer, Event::Empty(BytesStart::new(key)))?;
                    continue;
                }
                let text = value.to_string();
                write_event(&mut writer, Event::Start(BytesStart::new(key)))?;
                write_event(&mut writer, Event::Text(BytesText::new(&text)))?;
                write_event(&mut writer, Event::End(BytesEnd::new(key)))?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new(row)))?;
        }
        write_event(&mut writer, Event::End(BytesEnd::new(root)))?;
    }

    let mut xml = String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| ConvertError::Render(format!("XML: {}", e)))?;
    xml.push('\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;
    use pretty_assertions::assert_eq;

    fn record(fields: Vec<(&str, CellValue)>) -> Record {
        fields.into_iter().collect()
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_xml_name("data"));
        assert!(is_valid_xml_name("first-name"));
        assert!(is_valid_xml_name("_x.y"));
        assert!(!is_valid_xml_name(""));
        assert!(!is_valid_xml_name("2024"));
        assert!(!is_valid_xml_name("-a"));
        assert!(!is_valid_xml_name("a b"));
    }

    #[test]
    fn test_render_single_record() {
        let records = vec![record(vec![
            ("first-name", CellValue::from("Ana")),
            ("age", CellValue::Int(30)),
        ])];
        let xml = render_xml(&records, "data", "entry").unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <data>\n  \
               <entry>\n    \
                 <first-name>Ana</first-name>\n    \
                 <age>30</age>\n  \
               </entry>\n\
             </data>\n"
        );
    }

    #[test]
    fn test_render_empty() {
        let xml = render_xml(&[], "data", "entry").unwrap();
        assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<data/>\n");
    }

    #[test]
    fn test_null_is_self_closing_and_text_is_escaped() {
        let records = vec![record(vec![
            ("note", CellValue::from("a < b & c")),
            ("blank", CellValue::Null),
        ])];
        let xml = render_xml(&records, "rows", "row").unwrap();
        assert!(xml.contains("<note>a &lt; b &amp; c</note>"));
        assert!(xml.contains("<blank/>"));
        assert!(xml.contains("<rows>"));
        assert!(xml.contains("<row>"));
    }

    #[test]
    fn test_invalid_key_fails() {
        let records = vec![record(vec![("2024", CellValue::Int(1))])];
        let err = render_xml(&records, "data", "entry").unwrap_err();
        assert!(err.to_string().contains("2024"));
    }

    #[test]
    fn test_control_character_in_value_fails() {
        let records = vec![record(vec![
            ("title", CellValue::from("ok")),
            ("note", CellValue::from("a\u{1}b")),
        ])];
        let err = render_xml(&records, "data", "entry").unwrap_err();
        assert!(matches!(err, ConvertError::Render(_)));
        assert!(err.to_string().contains("note"));
    }

    #[test]
    fn test_whitespace_controls_are_allowed() {
        let records = vec![record(vec![("note", CellValue::from("a\tb\nc\rd"))])];
        assert!(render_xml(&records, "data", "entry").is_ok());
    }

    #[test]
    fn test_empty_key_fails() {
        let records = vec![record(vec![("", CellValue::Int(1))])];
        assert!(matches!(
            render_xml(&records, "data", "entry"),
            Err(ConvertError::Render(_))
        ));
    }
}
