//! Upload fixtures

#![allow(dead_code)]

use nbia_cart::types::{CartRequest, IdentifierList};
use rust_xlsxwriter::Workbook;

/// Real-looking series UIDs from a public collection
pub const UID_A: &str = "1.3.6.1.4.1.14519.5.2.1.6279.6001.179049373636438705059720603192";
pub const UID_B: &str = "1.3.6.1.4.1.14519.5.2.1.6279.6001.100225287222365663678666836860";
pub const UID_C: &str = "1.3.6.1.4.1.14519.5.2.1.6279.6001.105756658031515062000744821260";

/// The six connection lines that open every TCIA manifest
pub const MANIFEST_PREAMBLE: &str = "downloadServerUrl=https://nbia.cancerimagingarchive.net/nbia-download/servlet/DownloadServlet
includeAnnotation=true
noOfrRetry=4
databasketId=manifest-1700000000000.tcia
manifestVersion=3.0
ListOfSeriesToDownload=
";

/// A manifest body listing `uids`
pub fn manifest(uids: &[&str]) -> String {
    let mut text = MANIFEST_PREAMBLE.to_string();
    for uid in uids {
        text.push_str(uid);
        text.push('\n');
    }
    text
}

/// Build a single-sheet workbook from rows of strings
pub fn xlsx(rows: &[&[&str]]) -> Vec<u8> {
    xlsx_from_column(0, rows)
}

/// Build a single-sheet workbook whose cells start `first_column` columns
/// right of A, leaving the columns before it empty
pub fn xlsx_from_column(first_column: u16, rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet
                .write_string(
                    u32::try_from(r).unwrap(),
                    first_column + u16::try_from(c).unwrap(),
                    *cell,
                )
                .unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// A cart request for the given identifiers
pub fn cart_request(name: &str, ids: &[&str]) -> CartRequest {
    CartRequest {
        name: name.to_string(),
        description: Some("lung nodules".to_string()),
        description_url: Some("https://example.org/cohort".to_string()),
        identifiers: ids.iter().copied().collect::<IdentifierList>(),
    }
}
