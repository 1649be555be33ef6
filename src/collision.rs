/// Collision detection and response for the side-scroller.
///
/// This module provides AABB (Axis-Aligned Bounding Box) detection and the
/// minimum-penetration response used for the player against platforms.
///
/// # Architecture
///
/// - `Rect`: world-space rectangle in `f32` pixels (y grows downward)
/// - `Collidable` trait: implemented by anything with a hitbox (enemies, boss,
///   collectibles, projectiles)
/// - `Overlaps`: the four penetration depths between a mover and an obstacle
/// - `resolve_platform_collision()`: greedy single-pass resolution along the
///   axis of minimum overlap
///
/// The resolver is not a continuous solver. A body moving faster than the
/// obstacle's thickness in one frame can tunnel through it.
use crate::math::Vec2;

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Square of side `2 * half_extent` centred on `center`.
    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        Rect::new(
            center.x - half_extent,
            center.y - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        )
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.w + margin * 2.0,
            self.h + margin * 2.0,
        )
    }

    pub fn translate(&self, offset: Vec2) -> Rect {
        Rect::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

/// Trait for game objects that have a hitbox.
///
/// Gameplay code only needs the bounds; every hit test in the game is a plain
/// AABB overlap between two of these.
pub trait Collidable {
    /// Returns the axis-aligned bounding box for this object.
    fn get_bounds(&self) -> Rect;

    fn collides_with(&self, other: &impl Collidable) -> bool
    where
        Self: Sized,
    {
        aabb_intersect(&self.get_bounds(), &other.get_bounds())
    }
}

impl Collidable for Rect {
    fn get_bounds(&self) -> Rect {
        *self
    }
}

/// Checks if two axis-aligned bounding boxes intersect.
///
/// Touching edges do not count as an intersection.
pub fn aabb_intersect(a: &Rect, b: &Rect) -> bool {
    let x_overlap = a.left() < b.right() && a.right() > b.left();
    let y_overlap = a.top() < b.bottom() && a.bottom() > b.top();

    x_overlap && y_overlap
}

/// Which face of the obstacle the mover was pushed out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSide {
    /// Mover landed on the obstacle's top face
    Top,
    /// Mover bumped its head on the obstacle's bottom face
    Bottom,
    /// Mover was pushed back out of the obstacle's left face
    Left,
    /// Mover was pushed back out of the obstacle's right face
    Right,
}

impl ContactSide {
    pub fn is_side(self) -> bool {
        matches!(self, ContactSide::Left | ContactSide::Right)
    }
}

/// Penetration depths of a mover into an obstacle, one per obstacle face.
///
/// Only meaningful when the two rectangles intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlaps {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Overlaps {
    pub fn between(mover: &Rect, obstacle: &Rect) -> Self {
        Overlaps {
            left: mover.right() - obstacle.left(),
            right: obstacle.right() - mover.left(),
            top: mover.bottom() - obstacle.top(),
            bottom: obstacle.bottom() - mover.top(),
        }
    }

    pub fn minimum(&self) -> f32 {
        self.left.min(self.right).min(self.top).min(self.bottom)
    }
}

/// Pushes `body` out of `obstacle` along the axis of minimum overlap.
///
/// Faces are tested in the order top, bottom, left, right. The top face only
/// resolves while falling and the bottom face only while rising, so a body
/// jumping up into the lip of a platform is left alone for that frame.
/// Velocity along the resolved axis is zeroed.
///
/// Returns the face that was resolved, or `None` when nothing was moved.
pub fn resolve_platform_collision(
    body: &mut Rect,
    velocity: &mut Vec2,
    obstacle: &Rect,
) -> Option<ContactSide> {
    if !aabb_intersect(body, obstacle) {
        return None;
    }

    let overlaps = Overlaps::between(body, obstacle);
    let min_overlap = overlaps.minimum();

    if min_overlap == overlaps.top && velocity.y > 0.0 {
        body.set_bottom(obstacle.top());
        velocity.y = 0.0;
        Some(ContactSide::Top)
    } else if min_overlap == overlaps.bottom && velocity.y < 0.0 {
        body.y = obstacle.bottom();
        velocity.y = 0.0;
        Some(ContactSide::Bottom)
    } else if min_overlap == overlaps.left {
        body.set_right(obstacle.left());
        velocity.x = 0.0;
        Some(ContactSide::Left)
    } else if min_overlap == overlaps.right {
        body.x = obstacle.right();
        velocity.x = 0.0;
        Some(ContactSide::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_intersect_overlapping() {
        let rect_a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let rect_b = Rect::new(16.0, 16.0, 32.0, 32.0);

        assert!(aabb_intersect(&rect_a, &rect_b));
        assert!(aabb_intersect(&rect_b, &rect_a));
    }

    #[test]
    fn test_aabb_intersect_touching_edges() {
        let rect_a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let rect_b = Rect::new(32.0, 0.0, 32.0, 32.0);

        assert!(!aabb_intersect(&rect_a, &rect_b));
    }

    #[test]
    fn test_aabb_intersect_contained() {
        let large = Rect::new(0.0, 0.0, 100.0, 100.0);
        let small = Rect::new(25.0, 25.0, 50.0, 50.0);

        assert!(aabb_intersect(&large, &small));
        assert!(aabb_intersect(&small, &large));
    }

    #[test]
    fn test_overlaps_from_above() {
        let body = Rect::new(10.0, 0.0, 20.0, 50.0);
        let platform = Rect::new(0.0, 45.0, 100.0, 20.0);

        let overlaps = Overlaps::between(&body, &platform);
        assert_eq!(overlaps.top, 5.0);
        assert_eq!(overlaps.minimum(), 5.0);
    }

    #[test]
    fn test_landing_on_top_zeroes_vertical_velocity() {
        let mut body = Rect::new(10.0, 0.0, 20.0, 50.0);
        let mut velocity = Vec2::new(3.0, 8.0);
        let platform = Rect::new(0.0, 45.0, 100.0, 20.0);

        let side = resolve_platform_collision(&mut body, &mut velocity, &platform);

        assert_eq!(side, Some(ContactSide::Top));
        assert_eq!(body.bottom(), platform.top());
        assert_eq!(velocity.y, 0.0);
        assert_eq!(velocity.x, 3.0);
        assert!(!aabb_intersect(&body, &platform));
    }

    #[test]
    fn test_rising_into_top_face_is_not_resolved() {
        let mut body = Rect::new(10.0, 0.0, 20.0, 50.0);
        let mut velocity = Vec2::new(0.0, -10.0);
        let platform = Rect::new(0.0, 45.0, 100.0, 20.0);

        assert_eq!(resolve_platform_collision(&mut body, &mut velocity, &platform), None);
        assert_eq!(velocity.y, -10.0);
    }

    #[test]
    fn test_head_bump_on_bottom_face() {
        let mut body = Rect::new(10.0, 60.0, 20.0, 50.0);
        let mut velocity = Vec2::new(0.0, -6.0);
        let platform = Rect::new(0.0, 45.0, 100.0, 20.0);

        let side = resolve_platform_collision(&mut body, &mut velocity, &platform);

        assert_eq!(side, Some(ContactSide::Bottom));
        assert_eq!(body.top(), platform.bottom());
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_side_push_out_zeroes_horizontal_velocity() {
        // Walking right into a tall barricade
        let mut body = Rect::new(85.0, 0.0, 20.0, 100.0);
        let mut velocity = Vec2::new(6.0, 1.0);
        let wall = Rect::new(100.0, -50.0, 20.0, 200.0);

        let side = resolve_platform_collision(&mut body, &mut velocity, &wall);

        assert_eq!(side, Some(ContactSide::Left));
        assert_eq!(body.right(), wall.left());
        assert_eq!(velocity.x, 0.0);
        assert!(!aabb_intersect(&body, &wall));
    }

    #[test]
    fn test_right_face_push_out() {
        let mut body = Rect::new(115.0, 0.0, 20.0, 100.0);
        let mut velocity = Vec2::new(-6.0, 0.0);
        let wall = Rect::new(100.0, -50.0, 20.0, 200.0);

        let side = resolve_platform_collision(&mut body, &mut velocity, &wall);

        assert_eq!(side, Some(ContactSide::Right));
        assert_eq!(body.left(), wall.right());
        assert!(ContactSide::Right.is_side());
    }

    #[test]
    fn test_no_contact_leaves_body_untouched() {
        let mut body = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut velocity = Vec2::new(1.0, 1.0);
        let platform = Rect::new(50.0, 50.0, 10.0, 10.0);

        assert_eq!(resolve_platform_collision(&mut body, &mut velocity, &platform), None);
        assert_eq!(body, Rect::new(0.0, 0.0, 10.0, 10.0));
    }
}
