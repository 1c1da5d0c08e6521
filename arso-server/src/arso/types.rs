//! Published records and upstream XML DTOs.
//!
//! Field names on the published records are part of the API surface and
//! match what existing consumers already parse (`Magnituda`, `Postaja`
//! fields in PascalCase, `ID`/`RH`/`URL` fully uppercased). The upstream
//! DTOs use `Option`-free fields with defaults because ARSO omits or
//! leaves empty any element it has no reading for.

use serde::{Deserialize, Deserializer, Serialize};

/// A single reported seismic event from the ARSO earthquake bulletin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quake {
    /// Local magnitude. Only rows with a strictly positive magnitude are
    /// published.
    pub magnituda: f64,

    /// Epicenter latitude; 0 when the column fails to parse.
    pub lat: f64,

    /// Epicenter longitude; 0 when the column fails to parse.
    pub lon: f64,

    /// Event date/time as published (free text, not normalized).
    pub datum: String,

    /// Location description as published.
    pub lokacija: String,
}

/// A weather station's latest observation, as republished by this service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Station {
    /// Opaque token derived from the upstream station identifier.
    #[serde(rename = "ID")]
    pub id: String,

    /// Station display title. Stations with an empty title are discarded
    /// before publication.
    pub title: String,

    pub lat: f64,
    pub lon: f64,
    pub altitude: f64,

    /// Issue timestamp as published (RFC 822 free text).
    pub issued: String,

    /// Air temperature in °C.
    pub temp: f64,

    /// Wind speed; omitted when the station reports none.
    #[serde(skip_serializing_if = "is_zero")]
    pub wind: f64,

    /// Wind direction label; omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wind_direction: String,

    /// Relative humidity in %; omitted when zero.
    #[serde(rename = "RH", skip_serializing_if = "is_zero")]
    pub rh: f64,

    /// Pressure in hPa; omitted when zero.
    #[serde(skip_serializing_if = "is_zero")]
    pub pressure: f64,

    /// Sky condition description; omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sky: String,

    /// Validity timestamp as published (UTC free text).
    pub valid: String,

    /// Lookup path for this station, `/vreme/<ID>`.
    #[serde(rename = "URL")]
    pub url: String,

    /// Whether this is an automated station (inferred from the feed URL).
    pub auto: bool,
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

/// One station's observation document, root element `<data>`.
///
/// Decoding is deliberately lenient: a document that fails to decode at
/// all is replaced by `ObservationDoc::default()`, whose empty title gets
/// the record discarded downstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationDoc {
    #[serde(rename = "metData", default)]
    pub met_data: MetData,
}

/// The `<metData>` block of an observation document.
///
/// ARSO publishes many more elements than these; unknown elements are
/// ignored. Numeric elements may be present but empty, which coerces to 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetData {
    /// Raw upstream station identifier. Never published directly.
    #[serde(rename = "domain_meteosiId", default)]
    pub meteosi_id: String,

    #[serde(rename = "domain_longTitle", default)]
    pub long_title: String,

    #[serde(rename = "domain_lat", default, deserialize_with = "f64_or_zero")]
    pub lat: f64,

    #[serde(rename = "domain_lon", default, deserialize_with = "f64_or_zero")]
    pub lon: f64,

    #[serde(rename = "domain_altitude", default, deserialize_with = "f64_or_zero")]
    pub altitude: f64,

    #[serde(rename = "tsUpdated_RFC822", default)]
    pub updated_rfc822: String,

    #[serde(rename = "t", default, deserialize_with = "f64_or_zero")]
    pub temp: f64,

    #[serde(rename = "ff_val", default, deserialize_with = "f64_or_zero")]
    pub wind: f64,

    #[serde(rename = "dd_icon", default)]
    pub wind_direction: String,

    #[serde(rename = "rh", default, deserialize_with = "f64_or_zero")]
    pub rh: f64,

    #[serde(rename = "p", default, deserialize_with = "f64_or_zero")]
    pub pressure: f64,

    #[serde(rename = "nn_shortText", default)]
    pub sky: String,

    #[serde(rename = "tsValid_issued_UTC", default)]
    pub valid_utc: String,
}

/// Coerce an element's text into an `f64`, treating empty or malformed
/// content as 0 rather than failing the whole document.
fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or_default())
}
