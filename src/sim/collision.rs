//! Collision resolution against platform tops
//!
//! Platforms are one-way surfaces: an entity only lands when it was above
//! the platform top on the previous tick and is moving downward now. There
//! is no side or ceiling response anywhere in the game, which is what lets
//! the player jump up through ledges and drop through them on demand.

use glam::Vec2;

use crate::sim::geometry::{Aabb, intersects};
use crate::sim::state::Platform;

/// Resolve a falling body against every platform, snapping it onto the
/// first top surface it legitimately landed on. Returns whether the body
/// ended the tick standing on a platform.
///
/// The was-above check reconstructs last tick's bottom edge from the
/// velocity that was just integrated, so it must run before anything else
/// writes to `vel.y`.
pub fn resolve_landing(body: &mut Aabb, vel: &mut Vec2, platforms: &[Platform]) -> bool {
    let mut grounded = false;
    for platform in platforms {
        if !intersects(body, &platform.body) {
            continue;
        }
        let prev_bottom = body.pos.y - vel.y + body.size.y;
        if vel.y > 0.0 && prev_bottom <= platform.body.pos.y {
            body.pos.y = platform.body.pos.y - body.size.y;
            vel.y = 0.0;
            grounded = true;
        }
    }
    grounded
}

/// Clamp a body onto the top of any platform it overlaps, unconditionally.
/// Runners use this instead of true gravity: they sink a fixed amount per
/// tick and this snaps them back onto whatever surface they crossed.
/// Returns whether any platform caught the body.
pub fn settle_on_platforms(body: &mut Aabb, platforms: &[Platform]) -> bool {
    let mut settled = false;
    for platform in platforms {
        if intersects(body, &platform.body) {
            body.pos.y = platform.body.pos.y - body.size.y;
            settled = true;
        }
    }
    settled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlatformKind;
    use proptest::prelude::*;

    fn ground() -> Vec<Platform> {
        vec![Platform::new(0.0, 400.0, 800.0, 50.0, PlatformKind::Solid)]
    }

    #[test]
    fn test_falling_body_lands_on_top() {
        let platforms = ground();
        // Bottom was at 398 last tick, integrated past the top to 410.
        let mut body = Aabb::new(100.0, 378.0, 24.0, 32.0);
        let mut vel = Vec2::new(0.0, 12.0);

        let grounded = resolve_landing(&mut body, &mut vel, &platforms);
        assert!(grounded);
        assert!((body.bottom() - 400.0).abs() < 0.001);
        assert!(vel.y.abs() < 0.001);
    }

    #[test]
    fn test_was_below_does_not_snap() {
        let platforms = ground();
        // Already embedded last tick: bottom was 405, below the top at 400.
        let mut body = Aabb::new(100.0, 375.0, 24.0, 32.0);
        let mut vel = Vec2::new(0.0, 2.0);

        let grounded = resolve_landing(&mut body, &mut vel, &platforms);
        assert!(!grounded);
        assert!((body.pos.y - 375.0).abs() < 0.001);
        assert!((vel.y - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_rising_body_passes_through() {
        let platforms = ground();
        // Jumping up through the platform band.
        let mut body = Aabb::new(100.0, 390.0, 24.0, 32.0);
        let mut vel = Vec2::new(0.0, -8.0);

        let grounded = resolve_landing(&mut body, &mut vel, &platforms);
        assert!(!grounded);
        assert!((vel.y + 8.0).abs() < 0.001);
    }

    #[test]
    fn test_no_overlap_no_landing() {
        let platforms = ground();
        let mut body = Aabb::new(100.0, 100.0, 24.0, 32.0);
        let mut vel = Vec2::new(0.0, 5.0);

        assert!(!resolve_landing(&mut body, &mut vel, &platforms));
        assert!((body.pos.y - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lands_on_first_eligible_platform() {
        // Two overlapping candidates; the snap grounds on the first and the
        // zeroed velocity keeps the second from re-snapping.
        let platforms = vec![
            Platform::new(0.0, 300.0, 200.0, 16.0, PlatformKind::PassThrough),
            Platform::new(0.0, 304.0, 200.0, 16.0, PlatformKind::PassThrough),
        ];
        let mut body = Aabb::new(50.0, 280.0, 24.0, 32.0);
        let mut vel = Vec2::new(0.0, 14.0);

        let grounded = resolve_landing(&mut body, &mut vel, &platforms);
        assert!(grounded);
        assert!((body.bottom() - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_settle_clamps_unconditionally() {
        let platforms = ground();
        // Overlapping from the side with no downward motion at all.
        let mut body = Aabb::new(100.0, 395.0, 26.0, 30.0);

        assert!(settle_on_platforms(&mut body, &platforms));
        assert!((body.bottom() - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_settle_misses_when_clear() {
        let platforms = ground();
        let mut body = Aabb::new(100.0, 200.0, 26.0, 30.0);

        assert!(!settle_on_platforms(&mut body, &platforms));
        assert!((body.pos.y - 200.0).abs() < 0.001);
    }

    proptest! {
        /// Any drop that cleared the top last tick and overlaps after
        /// integration snaps the bottom edge exactly onto the top.
        #[test]
        fn test_landing_snap_is_exact(
            x in 10.0f32..700.0,
            gap in 1.0f32..8.0,
            extra in 0.5f32..30.0,
        ) {
            let platforms = ground();
            // Last tick's bottom sat `gap` above the top; one integration
            // of vy carries it `extra` past the top.
            let vy = gap + extra;
            let mut body = Aabb::new(x, 400.0 - 32.0 - gap + vy, 24.0, 32.0);
            let mut vel = Vec2::new(0.0, vy);

            let grounded = resolve_landing(&mut body, &mut vel, &platforms);
            prop_assert!(grounded);
            prop_assert_eq!(body.bottom(), 400.0);
            prop_assert_eq!(vel.y, 0.0);
        }
    }
}
