//! XML rendering for the `.xml` routes.
//!
//! Records serialize with the same element names as their JSON fields;
//! the list routes wrap them in a `<potresi>`/`<postaje>` document root.

use serde::Serialize;

use crate::arso::{Quake, Station};

#[derive(Serialize)]
#[serde(rename = "potresi")]
struct QuakeDocument<'a> {
    #[serde(rename = "potres")]
    quakes: &'a [Quake],
}

#[derive(Serialize)]
#[serde(rename = "postaje")]
struct StationDocument<'a> {
    #[serde(rename = "postaja")]
    stations: &'a [Station],
}

/// Render the earthquake list as an XML document.
pub(super) fn quakes(quakes: &[Quake]) -> Result<String, quick_xml::SeError> {
    quick_xml::se::to_string(&QuakeDocument { quakes })
}

/// Render the station list as an XML document.
pub(super) fn stations(stations: &[Station]) -> Result<String, quick_xml::SeError> {
    quick_xml::se::to_string(&StationDocument { stations })
}
