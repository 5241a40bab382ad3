#![forbid(unsafe_code)]

//! Packed RGBA color.

/// RGBA color packed into a `u32` as `0xRRGGBBAA`.
///
/// Alpha is straight (non-premultiplied). `0` is fully transparent,
/// `255` fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(u32);

impl PackedRgba {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(0);

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Create a color from channels.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32)
    }

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Whether the color is fully transparent.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Scale the alpha channel by `opacity`, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_opacity(self, opacity: f32) -> Self {
        let factor = opacity.clamp(0.0, 1.0);
        let a = (f32::from(self.a()) * factor).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Source-over compositing: `self` drawn on top of `under`.
    #[must_use]
    pub fn over(self, under: PackedRgba) -> PackedRgba {
        if self.a() == 255 {
            return self;
        }
        if self.a() == 0 {
            return under;
        }

        let sa = f32::from(self.a()) / 255.0;
        let da = f32::from(under.a()) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }

        let blend = |s: u8, d: u8| -> u8 {
            let channel = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
            channel.round() as u8
        };

        Self::rgba(
            blend(self.r(), under.r()),
            blend(self.g(), under.g()),
            blend(self.b(), under.b()),
            (out_a * 255.0).round() as u8,
        )
    }
}
