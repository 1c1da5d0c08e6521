//! Earthquake bulletin extraction.
//!
//! The bulletin is an HTML page with one table row per event. Columns are
//! positional: date, latitude, longitude, magnitude, depth, location.
//! Header and layout rows have no usable magnitude cell and fall out of
//! the parse naturally.

use scraper::{ElementRef, Html, Selector};

use super::error::ArsoError;
use super::types::Quake;

/// Rows of the bulletin table.
const ROW_SELECTOR: &str = "#glavna td.vsebina table tr";

/// Extract earthquake records from the bulletin page, in document order.
///
/// A row is published only when its magnitude cell parses as a strictly
/// positive number. Latitude/longitude cells that fail to parse coerce
/// to 0; date and location are copied verbatim.
pub(crate) fn parse_bulletin(html: &str) -> Result<Vec<Quake>, ArsoError> {
    let rows = selector(ROW_SELECTOR)?;
    let cells = selector("td")?;
    let doc = Html::parse_document(html);

    let mut quakes = Vec::new();
    for row in doc.select(&rows) {
        let texts: Vec<String> = row.select(&cells).map(cell_text).collect();
        if texts.len() < 6 {
            continue;
        }

        let Ok(magnituda) = texts[3].parse::<f64>() else {
            continue;
        };
        if magnituda > 0.0 {
            quakes.push(Quake {
                magnituda,
                lat: texts[1].parse().unwrap_or_default(),
                lon: texts[2].parse().unwrap_or_default(),
                datum: texts[0].clone(),
                lokacija: texts[5].clone(),
            });
        }
    }

    Ok(quakes)
}

/// Concatenated, trimmed text content of a cell.
fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Compile a CSS selector, mapping the non-Send parse error into ours.
pub(crate) fn selector(css: &str) -> Result<Selector, ArsoError> {
    Selector::parse(css).map_err(|e| ArsoError::Selector {
        message: e.to_string(),
    })
}
