//! Active sheet lookup for Office Open XML packages
//!
//! calamine does not expose which tab was selected when the workbook was
//! saved, so read `activeTab` from the first `workbookView` in
//! `xl/workbook.xml` directly.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const WORKBOOK_PART: &str = "xl/workbook.xml";

/// Index of the active sheet, if the file is an .xlsx/.xlsm package that records one
pub(crate) fn active_sheet_index(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if ext != "xlsx" && ext != "xlsm" {
        return None;
    }

    let file = File::open(path).ok()?;
    let mut archive = zip::ZipArchive::new(file).ok()?;
    let mut part = archive.by_name(WORKBOOK_PART).ok()?;
    let mut xml = String::new();
    part.read_to_string(&mut xml).ok()?;

    parse_active_tab(&xml)
}

/// `activeTab` of the first `workbookView`; 0 when the view omits it
fn parse_active_tab(xml: &str) -> Option<usize> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"workbookView" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"activeTab" {
                        return std::str::from_utf8(&attr.value).ok()?.trim().parse().ok();
                    }
                }
                return Some(0);
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}
