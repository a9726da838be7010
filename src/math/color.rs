use serde::Deserialize;

/// RGBA8 colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_slice(px: &[u8]) -> Self {
        Self::rgba(px[0], px[1], px[2], px[3])
    }

    /// Source-over composite of `self` onto `dst`
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let sa = a as u32;
                let da = dst.a as u32 * (255 - sa) / 255;
                let out_a = sa + da;
                let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * da) / out_a) as u8;
                Color::rgba(
                    mix(self.r, dst.r),
                    mix(self.g, dst.g),
                    mix(self.b, dst.b),
                    out_a as u8,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_opaque_replaces() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.over(Color::rgb(0, 0, 255)), red);
    }

    #[test]
    fn test_over_transparent_keeps_destination() {
        let blue = Color::rgb(0, 0, 255);
        assert_eq!(Color::TRANSPARENT.over(blue), blue);
    }

    #[test]
    fn test_over_half_alpha_mixes() {
        let out = Color::rgba(255, 0, 0, 128).over(Color::rgb(0, 0, 255));
        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 136);
        assert!(out.b > 120 && out.b < 136);
    }

    #[test]
    fn test_deserialize_defaults_alpha() {
        let c: Color = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3}"#).unwrap();
        assert_eq!(c, Color::rgb(1, 2, 3));
    }
}
