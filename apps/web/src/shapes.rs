use ratzilla::ratatui::style::Color;
use serde_json::Value;

pub const NO_DATA_COLOR: Color = Color::Rgb(90, 90, 90);

/// A country outline ready to be stroked on the map canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    pub rings: Vec<Vec<(f64, f64)>>,
    pub color: Color,
}

/// Exterior rings of a GeoJSON Polygon or MultiPolygon. Other geometry
/// types have nothing to stroke.
pub fn exterior_rings(geometry: &Value) -> Vec<Vec<(f64, f64)>> {
    let coordinates = &geometry["coordinates"];
    match geometry["type"].as_str() {
        Some("Polygon") => coordinates
            .get(0)
            .map(ring_points)
            .into_iter()
            .collect(),
        Some("MultiPolygon") => coordinates
            .as_array()
            .map(|polygons| {
                polygons
                    .iter()
                    .filter_map(|polygon| polygon.get(0))
                    .map(ring_points)
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn ring_points(ring: &Value) -> Vec<(f64, f64)> {
    ring.as_array()
        .map(|points| {
            points
                .iter()
                .filter_map(|point| Some((point.get(0)?.as_f64()?, point.get(1)?.as_f64()?)))
                .collect()
        })
        .unwrap_or_default()
}

/// Parses `#rrggbb`; anything else is drawn as "no data".
pub fn parse_hex(fill: Option<&str>) -> Color {
    let Some(hex) = fill.and_then(|f| f.strip_prefix('#')) else {
        return NO_DATA_COLOR;
    };
    if hex.len() != 6 {
        return NO_DATA_COLOR;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => NO_DATA_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn polygon_yields_its_exterior_ring_only() {
        let geometry = json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 0.0]],
                [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]]
            ]
        });

        let rings = exterior_rings(&geometry);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][2], (4.0, 4.0));
    }

    #[test]
    fn multipolygon_yields_one_ring_per_part() {
        let geometry = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                [[[5, 5], [6, 5], [6, 6], [5, 5]]]
            ]
        });

        let rings = exterior_rings(&geometry);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[1][0], (5.0, 5.0));
    }

    #[test]
    fn other_geometries_have_no_outline() {
        assert!(exterior_rings(&json!({"type": "Point", "coordinates": [1, 2]})).is_empty());
        assert!(exterior_rings(&Value::Null).is_empty());
    }

    #[test]
    fn hex_fill_parses_to_rgb() {
        assert_eq!(parse_hex(Some("#800026")), Color::Rgb(128, 0, 38));
        assert_eq!(parse_hex(Some("#ffffcc")), Color::Rgb(255, 255, 204));
    }

    #[test]
    fn missing_or_bad_fill_is_no_data() {
        assert_eq!(parse_hex(None), NO_DATA_COLOR);
        assert_eq!(parse_hex(Some("800026")), NO_DATA_COLOR);
        assert_eq!(parse_hex(Some("#zz0026")), NO_DATA_COLOR);
        assert_eq!(parse_hex(Some("#fff")), NO_DATA_COLOR);
    }
}
