use core::fmt;

/// Raw RGBA sample as decoded from the source image.
pub type Rgba8 = [u8; 4];

/// Opaque 8-bit color produced by averaging.
///
/// `Display` renders the CSS functional form, `rgb(r, g, b)`, which is also
/// the SVG fill syntax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub const fn to_rgba(self) -> Rgba8 {
        [self.r, self.g, self.b, 255]
    }
}

impl From<Rgba8> for Rgb {
    fn from(px: Rgba8) -> Self {
        Self::new(px[0], px[1], px[2])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
