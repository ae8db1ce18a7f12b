//! Leaflet map pages for sets of sensor units.

use argo_schemas::unit::SensorUnit;
use serde::Serialize;

/// Initial view when there is nothing to centre on.
pub const FALLBACK_CENTER: (f64, f64) = (15.0, 70.0);
pub const DEFAULT_ZOOM: u8 = 5;

const ACTIVE_COLOR: &str = "green";
const INACTIVE_COLOR: &str = "red";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub color: &'static str,
    pub tooltip: String,
    pub popup_html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub title: String,
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

/// Arithmetic mean of the unit coordinates.
pub fn map_center(units: &[SensorUnit]) -> (f64, f64) {
    if units.is_empty() {
        return FALLBACK_CENTER;
    }
    let n = units.len() as f64;
    let lat = units.iter().map(|u| u.latitude).sum::<f64>() / n;
    let lon = units.iter().map(|u| u.longitude).sum::<f64>() / n;
    (lat, lon)
}

pub fn float_map(units: &[SensorUnit], title: &str) -> MapView {
    let markers = units
        .iter()
        .map(|unit| MapMarker {
            latitude: unit.latitude,
            longitude: unit.longitude,
            color: if unit.is_active() { ACTIVE_COLOR } else { INACTIVE_COLOR },
            tooltip: format!("Float {} ({})", escape_html(&unit.unit_id), unit.status),
            popup_html: format!(
                "<b>Float ID:</b> {}<br><b>Status:</b> {}<br><b>Deployment:</b> {}<br><b>Cycles:</b> {}",
                escape_html(&unit.unit_id),
                unit.status,
                unit.deployment_date,
                unit.cycle_count
            ),
        })
        .collect();

    MapView {
        title: title.to_string(),
        center: map_center(units),
        zoom: DEFAULT_ZOOM,
        markers,
    }
}

impl MapView {
    /// A standalone HTML page. Marker data is embedded as JSON.
    pub fn to_html(&self) -> serde_json::Result<String> {
        // `<` is escaped so marker text can never close the script tag.
        let markers = serde_json::to_string(&self.markers)?.replace('<', "\\u003c");
        let title = escape_html(&self.title);
        let (lat, lon) = self.center;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body {{ height: 100%; margin: 0; }} #map {{ height: calc(100% - 40px); }} h3 {{ margin: 8px; font-family: sans-serif; }}</style>
</head>
<body>
<h3>{title}</h3>
<div id="map"></div>
<script>
const map = L.map('map').setView([{lat}, {lon}], {zoom});
L.tileLayer('https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
  attribution: '&copy; OpenStreetMap contributors'
}}).addTo(map);
const markers = {markers};
for (const m of markers) {{
  L.circleMarker([m.latitude, m.longitude], {{ color: m.color, fillColor: m.color, fillOpacity: 0.8, radius: 8 }})
    .bindPopup(m.popup_html, {{ maxWidth: 300 }})
    .bindTooltip(m.tooltip)
    .addTo(map);
}}
</script>
</body>
</html>
"#,
            zoom = self.zoom,
        ))
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use argo_core::catalog::Catalog;

    #[test]
    fn test_empty_map_uses_fallback_center() {
        let view = float_map(&[], "Nothing");
        assert_eq!(view.center, (15.0, 70.0));
        assert!(view.markers.is_empty());
    }

    #[test]
    fn test_center_is_mean_of_coordinates() {
        let units = Catalog::builtin().units()[..2].to_vec();
        let (lat, lon) = map_center(&units);
        assert!((lat - (15.2 + 12.8) / 2.0).abs() < 1e-9);
        assert!((lon - (68.5 + 75.3) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_markers_are_colored_by_status() {
        let catalog = Catalog::builtin();
        let view = float_map(catalog.units(), "ARGO Float Locations");
        assert_eq!(view.markers.len(), 7);
        let inactive: Vec<&MapMarker> =
            view.markers.iter().filter(|m| m.color == INACTIVE_COLOR).collect();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].tooltip, "Float 2902748 (Inactive)");
        assert!(inactive[0].popup_html.contains("<b>Cycles:</b> 67"));
        assert!(inactive[0].popup_html.contains("<b>Deployment:</b> 2022-11-10"));
    }

    #[test]
    fn test_tooltip_escapes_unit_id() {
        let mut unit = Catalog::builtin().units()[0].clone();
        unit.unit_id = "<img src=x>".to_string();
        let view = float_map(&[unit], "Floats");
        assert_eq!(view.markers[0].tooltip, "Float &lt;img src=x&gt; (Active)");
        assert!(!view.markers[0].popup_html.contains("<img"));
    }

    #[test]
    fn test_html_embeds_view_and_escapes_title() {
        let catalog = Catalog::builtin();
        let html = float_map(&catalog.units()[..1], "Floats <&> more").to_html().unwrap();
        assert!(html.contains("<title>Floats &lt;&amp;&gt; more</title>"));
        assert!(html.contains("setView([15.2, 68.5], 5)"));
        assert!(html.contains("Float 2902746 (Active)"));
        assert!(!html.contains("<b>Float ID"));
        assert!(html.contains("\\u003cb>Float ID"));
    }
}
