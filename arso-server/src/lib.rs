//! ARSO scrape-and-serve.
//!
//! Fetches earthquake bulletins and weather-station observations published
//! by ARSO (the Slovenian Environment Agency) as HTML/XML documents and
//! republishes them as a small JSON/XML HTTP API with a short-lived
//! response cache in front.

pub mod arso;
pub mod cache;
pub mod web;
