#![forbid(unsafe_code)]

//! Frame = tint buffer + hit metadata for a render pass.
//!
//! The [`Frame`] is the render target overlays write to. It bundles a
//! per-cell tint layer with an optional [`HitGrid`] for mouse hit testing.
//!
//! # Hit priority
//!
//! Hit registration is last-wins per cell: content registered after a
//! backdrop shadows the backdrop wherever they overlap. Render order is
//! therefore also hit-priority order, back to front.

use crate::cell::PackedRgba;
use scrim_core::geometry::Rect;

/// Identifier for an interactive surface in the hit grid.
///
/// Overlays and content register hit regions with distinct IDs so mouse
/// dispatch can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data attached to a hit region.
pub type HitData = u64;

/// Regions within a surface for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
    /// Custom region tag.
    Custom(u8),
}

/// A single cell in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    pub surface_id: Option<HitId>,
    pub region: HitRegion,
    pub data: HitData,
}

impl HitCell {
    /// Create a populated hit cell.
    #[inline]
    pub const fn new(surface_id: HitId, region: HitRegion, data: HitData) -> Self {
        Self {
            surface_id: Some(surface_id),
            region,
            data,
        }
    }

    /// Check if the cell is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.surface_id.is_none()
    }
}

/// Anything that can answer a point-in-surface query.
///
/// The overlay's pass-through target is any `HitTestable`; both [`HitGrid`]
/// and [`Frame`] implement it.
pub trait HitTestable {
    /// Hit test at the given position.
    fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)>;
}

/// Hit testing grid for mouse interaction.
///
/// Maps screen positions to surface IDs so mouse dispatch can route events
/// to the surface under the pointer.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create a new hit grid with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![HitCell::default(); size],
        }
    }

    /// Grid width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) to linear index.
    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the hit cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&HitCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Register an interactive region with the given hit metadata.
    ///
    /// All cells within the rectangle (clipped to grid bounds) map to this
    /// hit cell, overwriting earlier registrations.
    pub fn register(&mut self, rect: Rect, surface_id: HitId, region: HitRegion, data: HitData) {
        // usize arithmetic avoids overflow for rects near u16::MAX
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize) as u16;
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize) as u16;

        let hit_cell = HitCell::new(surface_id, region, data);
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = hit_cell;
                }
            }
        }
    }

    /// Clear all hit regions.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

impl HitTestable for HitGrid {
    fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.get(x, y)
            .and_then(|cell| cell.surface_id.map(|id| (id, cell.region, cell.data)))
    }
}

/// Frame = tint buffer + hit metadata for a render pass.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u16,
    height: u16,

    /// Per-cell tint, composited back to front.
    tint: Vec<PackedRgba>,

    /// Optional hit grid for mouse hit testing.
    ///
    /// When `Some`, surfaces can register interactive regions.
    pub hit_grid: Option<HitGrid>,
}

impl Frame {
    /// Create a new frame with given dimensions and no hit grid.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            tint: vec![PackedRgba::TRANSPARENT; size],
            hit_grid: None,
        }
    }

    /// Create a frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        let mut frame = Self::new(width, height);
        frame.hit_grid = Some(HitGrid::new(width, height));
        frame
    }

    /// Enable hit testing on an existing frame.
    pub fn enable_hit_testing(&mut self) {
        if self.hit_grid.is_none() {
            self.hit_grid = Some(HitGrid::new(self.width, self.height));
        }
    }

    /// Frame width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Frame height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the bounding rectangle of the frame.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Clear frame for the next render.
    ///
    /// Resets both the tint layer and hit grid (if present).
    pub fn clear(&mut self) {
        self.tint.fill(PackedRgba::TRANSPARENT);
        if let Some(ref mut grid) = self.hit_grid {
            grid.clear();
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Composite `color` over the existing tint in every cell of `rect`
    /// (clipped to frame bounds).
    pub fn fill_tint(&mut self, rect: Rect, color: PackedRgba) {
        if color.is_transparent() {
            return;
        }
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize) as u16;
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize) as u16;

        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(i) = self.index(x, y) {
                    self.tint[i] = color.over(self.tint[i]);
                }
            }
        }
    }

    /// The composited tint at (x, y), or `None` out of bounds.
    #[inline]
    pub fn tint_at(&self, x: u16, y: u16) -> Option<PackedRgba> {
        self.index(x, y).map(|i| self.tint[i])
    }

    /// Register a hit region (if hit grid is enabled).
    ///
    /// Returns `true` if the region was registered, `false` if no hit grid.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) -> bool {
        if let Some(ref mut grid) = self.hit_grid {
            grid.register(rect, id, region, data);
            true
        } else {
            false
        }
    }

    /// Register a hit region with default metadata (`Content`, data 0).
    pub fn register_hit_region(&mut self, rect: Rect, id: HitId) -> bool {
        self.register_hit(rect, id, HitRegion::Content, 0)
    }

    /// Hit test at the given position (if hit grid is enabled).
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }
}

impl HitTestable for Frame {
    fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        Frame::hit_test(self, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn frame_creation() {
        let frame = Frame::new(80, 24);
        assert_eq!(frame.width(), 80);
        assert_eq!(frame.height(), 24);
        assert!(frame.hit_grid.is_none());
        assert_eq!(frame.tint_at(0, 0), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn frame_enable_hit_testing() {
        let mut frame = Frame::new(10, 10);
        assert!(!frame.register_hit_region(Rect::from_size(5, 5), HitId::new(1)));
        frame.enable_hit_testing();
        assert!(frame.register_hit_region(Rect::from_size(5, 5), HitId::new(1)));
    }

    #[test]
    fn hit_grid_creation() {
        let grid = HitGrid::new(80, 24);
        assert_eq!(grid.width(), 80);
        assert_eq!(grid.height(), 24);
        assert!(grid.get(0, 0).unwrap().is_empty());
        assert!(grid.get(80, 0).is_none());
    }

    #[test]
    fn hit_grid_registration_corners() {
        let mut frame = Frame::with_hit_grid(80, 24);
        let id = HitId::new(42);
        frame.register_hit(Rect::new(10, 5, 20, 3), id, HitRegion::Content, 99);

        assert_eq!(frame.hit_test(10, 5), Some((id, HitRegion::Content, 99)));
        assert_eq!(frame.hit_test(29, 7), Some((id, HitRegion::Content, 99)));
        assert!(frame.hit_test(9, 5).is_none());
        assert!(frame.hit_test(30, 6).is_none());
        assert!(frame.hit_test(15, 8).is_none());
    }

    #[test]
    fn hit_grid_overlap_last_wins() {
        let mut grid = HitGrid::new(20, 20);
        grid.register(Rect::new(0, 0, 10, 10), HitId::new(1), HitRegion::Content, 1);
        grid.register(Rect::new(5, 5, 10, 10), HitId::new(2), HitRegion::Custom(7), 2);

        assert_eq!(
            grid.hit_test(2, 2),
            Some((HitId::new(1), HitRegion::Content, 1))
        );
        assert_eq!(
            grid.hit_test(7, 7),
            Some((HitId::new(2), HitRegion::Custom(7), 2))
        );
    }

    #[test]
    fn hit_grid_clips_to_bounds() {
        let mut grid = HitGrid::new(10, 10);
        grid.register(Rect::new(8, 8, 10, 10), HitId::new(1), HitRegion::Content, 0);
        assert!(grid.hit_test(9, 9).is_some());
        assert!(grid.hit_test(10, 10).is_none());
    }

    #[test]
    fn frame_clear_resets_tint_and_hits() {
        let mut frame = Frame::with_hit_grid(10, 10);
        frame.fill_tint(Rect::from_size(10, 10), PackedRgba::rgb(1, 2, 3));
        frame.register_hit_region(Rect::from_size(5, 5), HitId::new(1));

        frame.clear();

        assert_eq!(frame.tint_at(3, 3), Some(PackedRgba::TRANSPARENT));
        assert!(frame.hit_test(2, 2).is_none());
    }

    #[test]
    fn fill_tint_composites_over() {
        let mut frame = Frame::new(4, 4);
        frame.fill_tint(Rect::from_size(4, 4), PackedRgba::rgb(255, 255, 255));
        frame.fill_tint(Rect::from_size(4, 4), PackedRgba::rgba(0, 0, 0, 128));

        let tinted = frame.tint_at(1, 1).unwrap();
        assert_eq!(tinted.a(), 255);
        assert_eq!(tinted.r(), 127);
    }

    #[test]
    fn fill_tint_skips_fully_transparent() {
        let mut frame = Frame::new(4, 4);
        let base = PackedRgba::rgba(10, 10, 10, 90);
        frame.fill_tint(Rect::from_size(4, 4), base);
        frame.fill_tint(Rect::from_size(4, 4), PackedRgba::TRANSPARENT);
        assert_eq!(frame.tint_at(0, 0), Some(base));
    }

    #[test]
    fn fill_tint_out_of_bounds_rect_is_noop() {
        let mut frame = Frame::new(4, 4);
        frame.fill_tint(Rect::new(10, 10, 4, 4), PackedRgba::BLACK);
        assert_eq!(frame.tint_at(0, 0), Some(PackedRgba::TRANSPARENT));
    }

    #[test]
    fn hit_id_properties() {
        let id = HitId::new(42);
        assert_eq!(id.id(), 42);
        assert_eq!(id, HitId(42));
    }

    proptest! {
        #[test]
        fn registered_cells_hit_and_others_miss(
            rx in 0u16..30,
            ry in 0u16..15,
            rw in 0u16..20,
            rh in 0u16..10,
            px in 0u16..30,
            py in 0u16..15,
        ) {
            let mut grid = HitGrid::new(30, 15);
            let rect = Rect::new(rx, ry, rw, rh);
            grid.register(rect, HitId::new(5), HitRegion::Content, 3);

            let hit = grid.hit_test(px, py);
            prop_assert_eq!(hit.is_some(), rect.contains(px, py));
        }
    }
}
