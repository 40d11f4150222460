//! Tabular export encoder — contacts to an XLSX byte stream.
//!
//! A pure transform: given an ordered slice of contacts, produce workbook
//! bytes. Input order is preserved exactly (callers rely on the store's
//! newest-first ordering). Document properties are pinned to a fixed
//! creation date so identical input yields byte-identical output.

use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, XlsxError,
};

use crate::store::Contact;

/// Worksheet name shown in the spreadsheet tab.
const SHEET_NAME: &str = "Contacts";

/// Column header labels, in column order.
const HEADERS: [&str; 3] = ["Name", "Email", "Phone"];

/// Errors from workbook encoding.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The underlying XLSX writer failed.
    #[error("xlsx encoding error: {0}")]
    Xlsx(#[from] XlsxError),

    /// More rows than the XLSX format can address.
    #[error("too many contacts for a single worksheet")]
    TooManyRows,
}

/// Encode the contacts into an XLSX workbook, returned as raw bytes.
///
/// Layout: row 1 holds the fixed headers (bold, shaded); each following row
/// holds one contact in input order (left-aligned, thin borders). Column
/// widths are autofit to content. Zero contacts yields a header-only sheet.
///
/// # Errors
///
/// Returns an error if the workbook cannot be encoded.
pub fn write_workbook(contacts: &[Contact]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();

    // Pin the creation date so repeated exports of the same data are
    // byte-identical.
    let created = ExcelDateTime::from_ymd(2024, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xD3D3D3));
    let data_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(HEADERS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }

    for (i, contact) in contacts.iter().enumerate() {
        let row = u32::try_from(i.saturating_add(1)).map_err(|_| ExportError::TooManyRows)?;
        worksheet.write_string_with_format(row, 0, &contact.name, &data_format)?;
        worksheet.write_string_with_format(row, 1, &contact.email, &data_format)?;
        worksheet.write_string_with_format(row, 2, &contact.phone, &data_format)?;
    }

    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}
