//! Boundary geometry: the arena walls and the scoring hole
//!
//! Top-left origin, y grows downward. The top edge (y = 0) is split into two
//! walls around the gap; the gap itself is a contact-only hole segment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::segment::Segment;
use crate::consts::GAP_MARKER_DEPTH;

/// Stable identity of a reflecting wall (survives geometry rebuilds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WallKind {
    Left,
    Right,
    Bottom,
    TopLeft,
    TopRight,
}

impl WallKind {
    pub const ALL: [WallKind; 5] = [
        WallKind::Left,
        WallKind::Right,
        WallKind::Bottom,
        WallKind::TopLeft,
        WallKind::TopRight,
    ];

    /// Normal pointing into the arena
    pub fn inward_normal(&self) -> Vec2 {
        match self {
            WallKind::Left => Vec2::X,
            WallKind::Right => Vec2::NEG_X,
            WallKind::Bottom => Vec2::NEG_Y,
            WallKind::TopLeft | WallKind::TopRight => Vec2::Y,
        }
    }
}

/// A reflecting wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub kind: WallKind,
    pub segment: Segment,
}

/// Arena size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaSize {
    pub width: f32,
    pub height: f32,
}

impl ArenaSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Complete boundary for one gap width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryGeometry {
    /// Reflecting walls, in `WallKind::ALL` order
    pub walls: [Wall; 5],
    /// Scoring trigger spanning the gap (no collision response)
    pub hole: Segment,
    /// Painted strip under the hole (cosmetic only)
    pub marker: Segment,
    pub gap_center: f32,
    pub gap_width: f32,
}

impl BoundaryGeometry {
    pub fn wall(&self, kind: WallKind) -> &Wall {
        // walls are stored in WallKind::ALL order
        &self.walls[kind as usize]
    }

    /// Left and right x of the gap
    pub fn gap_span(&self) -> (f32, f32) {
        (self.hole.start.x, self.hole.end.x)
    }
}

/// Build the boundary for an arena and gap
pub fn compute_geometry(arena: ArenaSize, gap_center: f32, gap_width: f32) -> BoundaryGeometry {
    let (w, h) = (arena.width, arena.height);
    let gap_left = gap_center - gap_width / 2.0;
    let gap_right = gap_center + gap_width / 2.0;

    let walls = [
        Wall {
            kind: WallKind::Left,
            segment: Segment::vertical(0.0, 0.0, h),
        },
        Wall {
            kind: WallKind::Right,
            segment: Segment::vertical(w, 0.0, h),
        },
        Wall {
            kind: WallKind::Bottom,
            segment: Segment::horizontal(h, 0.0, w),
        },
        Wall {
            kind: WallKind::TopLeft,
            segment: Segment::horizontal(0.0, 0.0, gap_left),
        },
        Wall {
            kind: WallKind::TopRight,
            segment: Segment::horizontal(0.0, gap_right, w),
        },
    ];

    BoundaryGeometry {
        walls,
        hole: Segment::horizontal(0.0, gap_left, gap_right),
        marker: Segment::horizontal(GAP_MARKER_DEPTH, gap_left, gap_right),
        gap_center,
        gap_width,
    }
}

/// Owns the current boundary and rebuilds it whenever the gap width changes
#[derive(Debug, Clone)]
pub struct BoundaryManager {
    arena: ArenaSize,
    gap_center: f32,
    current: BoundaryGeometry,
    rebuilds: u64,
}

impl BoundaryManager {
    /// Gap centred on the top edge
    pub fn new(arena: ArenaSize, gap_width: f32) -> Self {
        let gap_center = arena.width / 2.0;
        Self {
            arena,
            gap_center,
            current: compute_geometry(arena, gap_center, gap_width),
            rebuilds: 1,
        }
    }

    pub fn arena(&self) -> ArenaSize {
        self.arena
    }

    /// Geometry for `gap_width`, rebuilt first if the width moved
    pub fn geometry_for(&mut self, gap_width: f32) -> &BoundaryGeometry {
        if self.current.gap_width != gap_width {
            self.current = compute_geometry(self.arena, self.gap_center, gap_width);
            self.rebuilds += 1;
        }
        &self.current
    }

    /// Last built geometry; owners rebuild through `geometry_for` on every width change
    pub fn current(&self) -> &BoundaryGeometry {
        &self.current
    }

    /// Unconditional rebuild (match start)
    pub fn rebuild(&mut self, gap_width: f32) -> &BoundaryGeometry {
        self.current = compute_geometry(self.arena, self.gap_center, gap_width);
        self.rebuilds += 1;
        &self.current
    }

    /// Number of geometry builds so far
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_walls_frame_the_gap() {
        let geo = compute_geometry(ArenaSize::new(300.0, 300.0), 150.0, 25.0);
        let top_left = geo.wall(WallKind::TopLeft).segment;
        let top_right = geo.wall(WallKind::TopRight).segment;

        assert_eq!(top_left.start, Vec2::new(0.0, 0.0));
        assert_eq!(top_left.end.x, 150.0 - 12.5);
        assert_eq!(top_right.start.x, 150.0 + 12.5);
        assert_eq!(top_right.end, Vec2::new(300.0, 0.0));
        assert_eq!(geo.gap_span(), (137.5, 162.5));
        assert_eq!(geo.hole.length(), 25.0);
    }

    #[test]
    fn test_static_walls_span_arena_edges() {
        let geo = compute_geometry(ArenaSize::new(400.0, 200.0), 200.0, 40.0);
        assert_eq!(geo.wall(WallKind::Left).segment, Segment::vertical(0.0, 0.0, 200.0));
        assert_eq!(geo.wall(WallKind::Right).segment, Segment::vertical(400.0, 0.0, 200.0));
        assert_eq!(geo.wall(WallKind::Bottom).segment, Segment::horizontal(200.0, 0.0, 400.0));
        for kind in WallKind::ALL {
            assert_eq!(geo.wall(kind).kind, kind);
        }
    }

    #[test]
    fn test_marker_sits_under_hole() {
        let geo = compute_geometry(ArenaSize::new(300.0, 300.0), 150.0, 60.0);
        assert_eq!(geo.marker.start.x, geo.hole.start.x);
        assert_eq!(geo.marker.end.x, geo.hole.end.x);
        assert_eq!(geo.marker.start.y, GAP_MARKER_DEPTH);
    }

    #[test]
    fn test_manager_rebuilds_only_on_change() {
        let mut manager = BoundaryManager::new(ArenaSize::new(300.0, 300.0), 25.0);
        assert_eq!(manager.rebuilds(), 1);

        manager.geometry_for(25.0);
        assert_eq!(manager.rebuilds(), 1);

        let geo = manager.geometry_for(30.0);
        assert_eq!(geo.gap_width, 30.0);
        assert_eq!(geo.wall(WallKind::TopLeft).segment.end.x, 135.0);
        assert_eq!(manager.rebuilds(), 2);
    }
}
