//! Formation flight: chase `leader + offset` with a fixed lag.

use glam::Vec2;

use super::Bounds;
use crate::config::SimConfig;
use crate::state::Transform;

/// Steers toward the slot if the leader resolved; `false` means it did not
/// and the caller should fall back to free flight.
///
/// The gap is measured the short way across the wrap seam, so a follower
/// trails a wrapped leader over the edge instead of back across the field.
pub fn follow(t: &mut Transform, leader: Option<Vec2>, offset: Vec2, bounds: &Bounds) -> bool {
    match leader {
        Some(leader) => {
            let gap = leader + offset - t.position;
            let span = Vec2::new(bounds.width, bounds.height) + Vec2::splat(2.0 * bounds.margin);
            let gap = Vec2::new(shortest(gap.x, span.x), shortest(gap.y, span.y));
            t.velocity = gap * SimConfig::FORMATION_LAG;
            true
        }
        None => false,
    }
}

fn shortest(delta: f32, span: f32) -> f32 {
    if span <= 0.0 {
        delta
    } else if delta > span * 0.5 {
        delta - span
    } else if delta < -span * 0.5 {
        delta + span
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0, 64.0)
    }

    #[test]
    fn closes_a_quarter_of_the_gap_per_tick() {
        let mut t = Transform::at(Vec2::new(0.0, 0.0));
        assert!(follow(&mut t, Some(Vec2::new(100.0, 0.0)), Vec2::new(-20.0, 0.0), &bounds()));
        assert_eq!(t.velocity, Vec2::new(20.0, 0.0));
    }

    #[test]
    fn converges_on_a_still_leader() {
        let mut t = Transform::at(Vec2::new(300.0, -50.0));
        let leader = Vec2::new(100.0, 100.0);
        let offset = Vec2::new(30.0, -20.0);
        for _ in 0..60 {
            follow(&mut t, Some(leader), offset, &bounds());
            t.position += t.velocity;
        }
        assert!(t.position.distance(leader + offset) < 0.01);
    }

    #[test]
    fn missing_leader_leaves_velocity_alone() {
        let mut t = Transform::at(Vec2::ZERO);
        t.velocity = Vec2::new(1.0, 2.0);
        assert!(!follow(&mut t, None, Vec2::ZERO, &bounds()));
        assert_eq!(t.velocity, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn gap_across_the_bottom_seam_is_short() {
        // leader just wrapped to the top; the follower is still above the bottom seam
        let mut t = Transform::at(Vec2::new(400.0, 650.0));
        follow(&mut t, Some(Vec2::new(400.0, -64.0)), Vec2::new(0.0, -20.0), &bounds());
        // slot is 644 on the unwrapped axis, just above the follower
        assert!((t.velocity.y + 1.5).abs() < 1e-4);
        assert_eq!(t.velocity.x, 0.0);
    }

    #[test]
    fn gap_across_the_side_seam_is_short() {
        let mut t = Transform::at(Vec2::new(-60.0, 300.0));
        follow(&mut t, Some(Vec2::new(860.0, 300.0)), Vec2::ZERO, &bounds());
        assert!((t.velocity.x + 2.0).abs() < 1e-4);
    }
}
