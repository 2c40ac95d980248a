/// Linear RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }

    /// Component-wise product, used to tint textures.
    pub fn modulate(self, other: Color) -> Self {
        Self(
            self.0 * other.0,
            self.1 * other.1,
            self.2 * other.2,
            self.3 * other.3,
        )
    }

    /// Moves every color channel towards white (positive amount) or black
    /// (negative amount). Alpha is preserved.
    pub fn lighten(self, amount: f32) -> Self {
        let shift = |c: f32| {
            if amount >= 0.0 {
                c + (1.0 - c) * amount
            } else {
                c * (1.0 + amount)
            }
            .clamp(0.0, 1.0)
        };
        Self(shift(self.0), shift(self.1), shift(self.2), self.3)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.0),
            quantize(self.1),
            quantize(self.2),
            quantize(self.3),
        ]
    }
}
