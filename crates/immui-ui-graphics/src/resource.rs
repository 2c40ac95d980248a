//! Opaque handles for resources owned by the graphics backend.

/// Handle of an image registered with the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

/// Handle of a font baked by the font rasterizer. `FontId(0)` is the
/// renderer's default font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontId(pub u32);

impl FontId {
    pub const DEFAULT: FontId = FontId(0);
}
