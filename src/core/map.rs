use crate::domain::model::CountryCoordinates;
use crate::domain::ports::MapService;
use crate::services::fixtures;
use std::fmt::Write as _;
use std::sync::Arc;

pub const MAP_WIDTH: f64 = 1000.0;
pub const MAP_HEIGHT: f64 = 500.0;
const MARKER_RADIUS: f64 = 4.0;

/// Equirectangular projection onto the map canvas.
pub fn project(latitude: f64, longitude: f64) -> (f64, f64) {
    let x = (longitude + 180.0) / 360.0 * MAP_WIDTH;
    let y = (90.0 - latitude) / 180.0 * MAP_HEIGHT;
    (x, y)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub iso3: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl From<&CountryCoordinates> for MapMarker {
    fn from(country: &CountryCoordinates) -> Self {
        let (x, y) = project(country.latitude, country.longitude);
        Self {
            iso3: country.iso3_code.clone(),
            label: country.label.clone(),
            x,
            y,
        }
    }
}

pub struct MapController {
    service: Arc<dyn MapService>,
    pub countries: Vec<CountryCoordinates>,
    pub is_loading: bool,
    pub error: Option<String>,
    /// True when `countries` came from the built-in table.
    pub using_fallback: bool,
}

impl MapController {
    pub fn new(service: Arc<dyn MapService>) -> Self {
        Self {
            service,
            countries: Vec::new(),
            is_loading: false,
            error: None,
            using_fallback: false,
        }
    }

    pub async fn load(&mut self) {
        self.is_loading = true;
        self.error = None;

        match self.service.country_coordinates().await {
            Ok(countries) => {
                tracing::debug!("Loaded {} countries for the map", countries.len());
                self.countries = countries;
                self.using_fallback = false;
            }
            Err(e) => {
                tracing::warn!("API unavailable, using static data: {}", e);
                self.countries = fixtures::country_coordinates();
                self.using_fallback = true;
                // fallback data is good enough to render
                self.error = None;
            }
        }

        self.is_loading = false;
    }

    pub async fn refetch(&mut self) {
        self.load().await;
    }

    pub fn markers(&self) -> Vec<MapMarker> {
        self.countries.iter().map(MapMarker::from).collect()
    }

    pub fn marker_at(&self, iso3: &str) -> Option<MapMarker> {
        self.countries
            .iter()
            .find(|c| c.iso3_code.eq_ignore_ascii_case(iso3))
            .map(MapMarker::from)
    }

    pub fn render_svg(&self) -> String {
        render_svg(&self.markers())
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

pub fn render_svg(markers: &[MapMarker]) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = MAP_WIDTH,
        h = MAP_HEIGHT
    );
    let _ = writeln!(
        svg,
        r##"  <rect width="{}" height="{}" fill="#f0f9ff" />"##,
        MAP_WIDTH, MAP_HEIGHT
    );
    for marker in markers {
        let label = escape_xml(&marker.label);
        let _ = writeln!(
            svg,
            r##"  <g id="{iso}"><circle cx="{x:.1}" cy="{y:.1}" r="{r}" fill="#6366f1"><title>{label}</title></circle><text x="{x:.1}" y="{ty:.1}" font-size="9" text-anchor="middle" fill="#1f2937">{label}</text></g>"##,
            iso = escape_xml(&marker.iso3),
            x = marker.x,
            y = marker.y,
            ty = marker.y - MARKER_RADIUS - 2.0,
            r = MARKER_RADIUS,
            label = label
        );
    }
    svg.push_str("</svg>\n");
    svg
}
