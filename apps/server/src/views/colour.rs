use serde::Serialize;

/// Plotly's sequential YlOrRd palette, light to dark.
pub const YL_OR_RD: [[u8; 3]; 9] = [
    [255, 255, 204],
    [255, 237, 160],
    [254, 217, 118],
    [254, 178, 76],
    [253, 141, 60],
    [252, 78, 42],
    [227, 26, 28],
    [189, 0, 38],
    [128, 0, 38],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourScale {
    name: &'static str,
    stops: &'static [[u8; 3]],
}

impl ColourScale {
    pub const YL_OR_RD: Self = Self {
        name: "YlOrRd",
        stops: &YL_OR_RD,
    };

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Colour for `value` within `[min, max]`, linearly interpolated between
    /// neighbouring stops. Values outside the domain are clamped.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn colour_at(&self, value: f64, (min, max): (f64, f64)) -> [u8; 3] {
        let span = max - min;
        let t = if span > 0.0 {
            ((value - min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let position = t * (self.stops.len() - 1) as f64;
        let lower = (position.floor() as usize).min(self.stops.len() - 1);
        let upper = (lower + 1).min(self.stops.len() - 1);
        let fraction = position - position.floor();

        let mut rgb = [0_u8; 3];
        for (channel, out) in rgb.iter_mut().enumerate() {
            let from = f64::from(self.stops[lower][channel]);
            let to = f64::from(self.stops[upper][channel]);
            *out = (to - from).mul_add(fraction, from).round().clamp(0.0, 255.0) as u8;
        }
        rgb
    }

    pub fn hex_at(&self, value: f64, domain: (f64, f64)) -> String {
        to_hex(self.colour_at(value, domain))
    }
}

impl Serialize for ColourScale {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire {
            name: &'static str,
            stops: Vec<String>,
        }

        Wire {
            name: self.name,
            stops: self.stops.iter().copied().map(to_hex).collect(),
        }
        .serialize(serializer)
    }
}

pub fn to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_ends_map_to_first_and_last_stop() {
        let scale = ColourScale::YL_OR_RD;
        assert_eq!(scale.colour_at(0.0, (0.0, 8.0)), YL_OR_RD[0]);
        assert_eq!(scale.colour_at(8.0, (0.0, 8.0)), YL_OR_RD[8]);
        assert_eq!(scale.colour_at(4.0, (0.0, 8.0)), YL_OR_RD[4]);
    }

    #[test]
    fn values_between_stops_are_interpolated() {
        // Halfway between stop 0 (255,255,204) and stop 1 (255,237,160).
        let colour = ColourScale::YL_OR_RD.colour_at(0.5, (0.0, 8.0));
        assert_eq!(colour, [255, 246, 182]);
    }

    #[test]
    fn out_of_domain_and_flat_domain_are_clamped() {
        let scale = ColourScale::YL_OR_RD;
        assert_eq!(scale.colour_at(-10.0, (0.0, 1.0)), YL_OR_RD[0]);
        assert_eq!(scale.colour_at(10.0, (0.0, 1.0)), YL_OR_RD[8]);
        assert_eq!(scale.colour_at(3.0, (3.0, 3.0)), YL_OR_RD[0]);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex([128, 0, 38]), "#800026");
        assert_eq!(ColourScale::YL_OR_RD.hex_at(1.0, (0.0, 1.0)), "#800026");
    }
}
