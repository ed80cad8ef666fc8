use crate::metrics::ZoneRow;

pub const EXPORT_HEADERS: [&str; 3] = ["Risk Score", "Area (km²)", "Risk Category"];

/// Convert table rows to CSV format
///
/// Rows are written in the order given, with the same text the dashboard
/// table shows: score to one decimal or `N/A`, area to two decimals.
///
/// # Examples
/// ```
/// use flood_monitor::export::to_csv;
/// use flood_monitor::metrics::table_rows;
/// use flood_monitor::score::RiskScore;
/// use flood_monitor::zone::RiskZone;
///
/// let zones = vec![RiskZone::new(RiskScore::Numeric(6.5), None)];
/// let csv = to_csv(&table_rows(&zones));
/// assert_eq!(csv, "Risk Score,Area (km²),Risk Category\n6.5,0.00,High Risk\n");
/// ```
pub fn to_csv(rows: &[ZoneRow]) -> String {
    let mut csv_content = EXPORT_HEADERS.join(",");
    csv_content.push('\n');

    for row in rows {
        let fields = [
            row.score.clone(),
            format!("{:.2}", row.area_km2),
            row.category_label.to_string(),
        ];
        let escaped: Vec<String> = fields.iter().map(|field| csv_escape(field)).collect();
        csv_content.push_str(&escaped.join(","));
        csv_content.push('\n');
    }

    csv_content
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Convert table rows to an XLSX workbook
///
/// Numeric scores and areas are stored as number cells; scores without a
/// number are written as the text `N/A`.
#[cfg(feature = "web")]
pub fn to_xlsx(rows: &[ZoneRow]) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();
    worksheet.set_name("Risk Zones")?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        match row.sort_value {
            Some(score) => worksheet.write_number(r, 0, score)?,
            None => worksheet.write_string(r, 0, row.score.as_str())?,
        };
        worksheet.write_number(r, 1, row.area_km2)?;
        worksheet.write_string(r, 2, row.category_label)?;
    }

    workbook.push_worksheet(worksheet);
    workbook.save_to_buffer()
}
