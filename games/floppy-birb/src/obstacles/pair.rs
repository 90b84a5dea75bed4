use glam::Vec2;

use super::scale::ScaleSplit;

/// Position and scale of one obstacle, as mirrored onto its engine entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleHandle {
    pub position: Vec2,
    pub scale: Vec2,
}

/// A top and bottom obstacle forming one traversable gap.
/// The top sits at `+H`, the bottom at `-H`; recycling never changes that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePair {
    pub top: ObstacleHandle,
    pub bottom: ObstacleHandle,
}

impl ObstaclePair {
    pub fn spawn(x: f32, half_gap: f32, width: f32, split: ScaleSplit) -> Self {
        Self {
            top: ObstacleHandle {
                position: Vec2::new(x, half_gap),
                scale: Vec2::new(width, split.top),
            },
            bottom: ObstacleHandle {
                position: Vec2::new(x, -half_gap),
                scale: Vec2::new(width, split.bottom),
            },
        }
    }

    /// Horizontal position of the pair (both members share it).
    pub fn x(&self) -> f32 {
        self.top.position.x
    }

    pub fn split(&self) -> ScaleSplit {
        ScaleSplit {
            top: self.top.scale.y,
            bottom: self.bottom.scale.y,
        }
    }

    /// Move both members horizontally, keeping their heights.
    pub fn shift_x(&mut self, dx: f32) {
        self.top.position.x += dx;
        self.bottom.position.x += dx;
    }

    /// Place each member `step` to the right of the matching member of `anchor`.
    pub fn follow(&mut self, anchor: &ObstaclePair, step: f32) {
        self.top.position = Vec2::new(anchor.top.position.x + step, anchor.top.position.y);
        self.bottom.position = Vec2::new(anchor.bottom.position.x + step, anchor.bottom.position.y);
    }

    pub fn rescale(&mut self, width: f32, split: ScaleSplit) {
        self.top.scale = Vec2::new(width, split.top);
        self.bottom.scale = Vec2::new(width, split.bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split() -> ScaleSplit {
        ScaleSplit { top: 4.5, bottom: 4.5 }
    }

    #[test]
    fn spawn_places_members_at_half_gap() {
        let pair = ObstaclePair::spawn(10.0, 5.0, 0.2, split());
        assert_eq!(pair.top.position, Vec2::new(10.0, 5.0));
        assert_eq!(pair.bottom.position, Vec2::new(10.0, -5.0));
        assert_eq!(pair.top.scale, Vec2::new(0.2, 4.5));
        assert_eq!(pair.x(), 10.0);
    }

    #[test]
    fn shift_keeps_heights() {
        let mut pair = ObstaclePair::spawn(1.0, 5.0, 0.2, split());
        pair.shift_x(-0.5);
        assert_eq!(pair.top.position, Vec2::new(0.5, 5.0));
        assert_eq!(pair.bottom.position, Vec2::new(0.5, -5.0));
    }

    #[test]
    fn follow_copies_anchor_heights() {
        let anchor = ObstaclePair::spawn(3.0, 5.0, 0.2, split());
        let mut pair = ObstaclePair::spawn(-11.0, 5.0, 0.2, split());
        pair.follow(&anchor, 1.5);
        assert_eq!(pair.top.position, Vec2::new(4.5, 5.0));
        assert_eq!(pair.bottom.position, Vec2::new(4.5, -5.0));
    }
}
