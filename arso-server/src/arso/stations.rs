//! Station index extraction and record assembly.
//!
//! The observation index is an HTML page whose second table column links
//! to one XML document per station. Links to media assets and to the
//! secondary-language (`_si_`) variants of the same feeds are skipped.

use scraper::Html;
use tracing::debug;

use super::error::ArsoError;
use super::quakes::selector;
use super::token::station_token;
use super::types::{ObservationDoc, Station};

/// Anchors in the second column of the index table.
const LINK_SELECTOR: &str = "td:nth-child(2) > a";

/// Marker substring in automated-station feed URLs.
const AUTOMATED_MARKER: &str = "observationAms";

/// Extract station feed hrefs from the index page, in discovery order.
///
/// A link is kept only when it points at an XML document and is neither a
/// media asset nor a secondary-language variant. Skipped links are logged
/// at debug level.
pub(crate) fn extract_feed_links(html: &str) -> Result<Vec<String>, ArsoError> {
    let anchors = selector(LINK_SELECTOR)?;
    let doc = Html::parse_document(html);

    let mut links = Vec::new();
    for anchor in doc.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        if href.contains(".xml") && !href.contains("media") && !href.contains("_si_") {
            links.push(href.to_string());
        } else {
            debug!(href, "skipping index link");
        }
    }

    Ok(links)
}

/// Convert a decoded observation document into a published record.
///
/// Returns `None` when the document carries no title, which is how both
/// genuinely empty feeds and undecodable documents (decoded as defaults)
/// are discarded. The raw upstream identifier is replaced by its token
/// before anything leaves this function.
pub(crate) fn build_station(doc: ObservationDoc, feed_url: &str) -> Option<Station> {
    let met = doc.met_data;
    if met.long_title.is_empty() {
        return None;
    }

    let id = station_token(&met.meteosi_id);
    let url = format!("/vreme/{id}");

    Some(Station {
        id,
        title: met.long_title,
        lat: met.lat,
        lon: met.lon,
        altitude: met.altitude,
        issued: met.updated_rfc822,
        temp: met.temp,
        wind: met.wind,
        wind_direction: met.wind_direction,
        rh: met.rh,
        pressure: met.pressure,
        sky: met.sky,
        valid: met.valid_utc,
        url,
        auto: feed_url.contains(AUTOMATED_MARKER),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arso::types::MetData;

    fn index(links: &[&str]) -> String {
        let rows: String = links
            .iter()
            .map(|href| format!(r#"<tr><td>x</td><td><a href="{href}">station</a></td></tr>"#))
            .collect();
        format!("<html><body><table>{rows}</table></body></html>")
    }

    #[test]
    fn keeps_only_xml_links() {
        let html = index(&[
            "/uploads/probase/www/observ/surface/text/en/observation_LJUBL-ANA_latest.xml",
            "/uploads/probase/www/observ/surface/text/en/observation_LJUBL-ANA_latest.html",
        ]);
        let links = extract_feed_links(&html).unwrap();
        assert_eq!(links.len(), 1);
        assert!(links[0].ends_with(".xml"));
    }

    #[test]
    fn excludes_media_and_language_variants() {
        let html = index(&[
            "/uploads/media/observation_KREDARICA_latest.xml",
            "/uploads/probase/www/observ/surface/text/sl/observation_si_latest.xml",
            "/uploads/probase/www/observ/surface/text/en/observation_KREDARICA_latest.xml",
        ]);
        let links = extract_feed_links(&html).unwrap();
        assert_eq!(
            links,
            vec!["/uploads/probase/www/observ/surface/text/en/observation_KREDARICA_latest.xml"]
        );
    }

    #[test]
    fn ignores_anchors_outside_second_column() {
        let html = r#"<table><tr>
            <td><a href="/first-column.xml">no</a></td>
            <td><a href="/second-column.xml">yes</a></td>
            <td><a href="/third-column.xml">no</a></td>
        </tr></table>"#;
        let links = extract_feed_links(html).unwrap();
        assert_eq!(links, vec!["/second-column.xml"]);
    }

    #[test]
    fn preserves_discovery_order() {
        let html = index(&["/a.xml", "/b.xml", "/c.xml"]);
        assert_eq!(
            extract_feed_links(&html).unwrap(),
            vec!["/a.xml", "/b.xml", "/c.xml"]
        );
    }

    fn doc_with_title(title: &str) -> ObservationDoc {
        ObservationDoc {
            met_data: MetData {
                meteosi_id: "LJUBL-ANA_BEZIGRAD_".into(),
                long_title: title.into(),
                lat: 46.0655,
                lon: 14.5124,
                altitude: 299.0,
                temp: 3.2,
                ..MetData::default()
            },
        }
    }

    #[test]
    fn empty_title_is_discarded() {
        assert!(build_station(ObservationDoc::default(), "http://example/x.xml").is_none());
        assert!(build_station(doc_with_title(""), "http://example/x.xml").is_none());
    }

    #[test]
    fn raw_identifier_is_replaced_by_token() {
        let station = build_station(doc_with_title("Ljubljana"), "http://example/x.xml").unwrap();
        assert_ne!(station.id, "LJUBL-ANA_BEZIGRAD_");
        assert_eq!(station.id, station_token("LJUBL-ANA_BEZIGRAD_"));
        assert_eq!(station.url, format!("/vreme/{}", station.id));
    }

    #[test]
    fn automation_flag_follows_feed_url() {
        let manned = build_station(
            doc_with_title("Ljubljana"),
            "http://meteo.arso.gov.si/uploads/observation_LJUBL-ANA_latest.xml",
        )
        .unwrap();
        assert!(!manned.auto);

        let automated = build_station(
            doc_with_title("Ljubljana"),
            "http://meteo.arso.gov.si/uploads/observationAms_LJUBL-ANA_latest.xml",
        )
        .unwrap();
        assert!(automated.auto);
    }

    #[test]
    fn readings_are_copied_through() {
        let station = build_station(doc_with_title("Ljubljana"), "http://example/x.xml").unwrap();
        assert_eq!(station.title, "Ljubljana");
        assert_eq!(station.lat, 46.0655);
        assert_eq!(station.lon, 14.5124);
        assert_eq!(station.altitude, 299.0);
        assert_eq!(station.temp, 3.2);
    }
}
