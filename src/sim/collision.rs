//! Collision detection between circles
//!
//! Two kinds of contact matter:
//! - ball vs ball: both balls take the same fresh random color
//! - hunter vs ball: the ball dies and the live count drops by one
//!
//! Both scans are plain O(n²)/O(n) passes over the ball collection. Dead balls stay
//! in place and are skipped, so indices never shift mid-scan.

use glam::Vec2;
use rand::Rng;

use super::entity::{Ball, Entity, Hunter};
use super::rng::random_color;
use super::state::LiveCount;

/// True if two circles overlap (strictly closer than the sum of their radii)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Recolor every living ball that overlaps `balls[index]`
///
/// Each overlapping pair gets one new color shared by both balls. When several
/// partners overlap, the last one scanned decides the subject's final color. Positions
/// are read live, so balls already moved this frame are seen at their new place.
///
/// Returns the number of overlapping partners found.
pub fn detect_ball_collisions(balls: &mut [Ball], index: usize, rng: &mut impl Rng) -> u32 {
    if !balls.get(index).is_some_and(|b| b.alive) {
        return 0;
    }

    let mut hits = 0;
    for other in 0..balls.len() {
        if other == index || !balls[other].alive {
            continue;
        }
        if balls[index].overlaps(&balls[other]) {
            let color = random_color(rng);
            balls[index].color = color;
            balls[other].color = color;
            hits += 1;
        }
    }
    hits
}

/// Kill every living ball the hunter overlaps
///
/// Each kill decrements the live count exactly once; dead balls are never revisited.
/// Returns the number of balls destroyed by this call.
pub fn detect_hunter_collisions(hunter: &Hunter, balls: &mut [Ball], live: &mut LiveCount) -> u32 {
    let mut destroyed = 0;
    for ball in balls.iter_mut().filter(|b| b.alive) {
        if hunter.overlaps(&*ball) {
            ball.alive = false;
            live.record_destroyed();
            destroyed += 1;
        }
    }
    destroyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::color::Rgb;
    use crate::sim::rng::seeded;
    use proptest::prelude::*;

    fn ball(x: f32, y: f32, radius: f32, color: Rgb) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::new(1.0, -1.0), color, radius)
    }

    fn hunter_at(x: f32, y: f32) -> Hunter {
        Hunter::new(Vec2::new(x, y), &Settings::default())
    }

    #[test]
    fn test_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(19.0, 0.0), 10.0));
        // Exactly touching is not a collision
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
    }

    #[test]
    fn test_overlapping_balls_share_color() {
        let mut rng = seeded(1);
        let mut balls = vec![
            ball(100.0, 100.0, 10.0, Rgb::new(255, 0, 0)),
            ball(105.0, 100.0, 10.0, Rgb::new(0, 0, 255)),
        ];
        let hits = detect_ball_collisions(&mut balls, 0, &mut rng);
        assert_eq!(hits, 1);
        assert_eq!(balls[0].color, balls[1].color);
    }

    #[test]
    fn test_distant_balls_keep_color() {
        let mut rng = seeded(1);
        let mut balls = vec![
            ball(100.0, 100.0, 10.0, Rgb::new(255, 0, 0)),
            ball(300.0, 100.0, 10.0, Rgb::new(0, 0, 255)),
        ];
        assert_eq!(detect_ball_collisions(&mut balls, 0, &mut rng), 0);
        assert_eq!(balls[0].color, Rgb::new(255, 0, 0));
        assert_eq!(balls[1].color, Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_dead_partner_is_ignored() {
        let mut rng = seeded(1);
        let mut balls = vec![
            ball(100.0, 100.0, 10.0, Rgb::new(255, 0, 0)),
            ball(105.0, 100.0, 10.0, Rgb::new(0, 0, 255)),
        ];
        balls[1].alive = false;
        assert_eq!(detect_ball_collisions(&mut balls, 0, &mut rng), 0);
        assert_eq!(detect_ball_collisions(&mut balls, 1, &mut rng), 0);
        assert_eq!(balls[1].color, Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_last_partner_decides_color() {
        let mut rng = seeded(5);
        let mut balls = vec![
            ball(100.0, 100.0, 10.0, Rgb::BLACK),
            ball(110.0, 100.0, 10.0, Rgb::BLACK),
            ball(90.0, 100.0, 10.0, Rgb::BLACK),
        ];
        assert_eq!(detect_ball_collisions(&mut balls, 0, &mut rng), 2);
        assert_eq!(balls[0].color, balls[2].color);
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let mut rng = seeded(1);
        let mut balls = vec![ball(100.0, 100.0, 10.0, Rgb::BLACK)];
        assert_eq!(detect_ball_collisions(&mut balls, 3, &mut rng), 0);
    }

    #[test]
    fn test_hunter_destroys_overlapping_ball() {
        let hunter = hunter_at(50.0, 50.0);
        let mut balls = vec![ball(55.0, 50.0, 10.0, Rgb::BLACK)];
        let mut live = LiveCount::new(1);

        assert_eq!(detect_hunter_collisions(&hunter, &mut balls, &mut live), 1);
        assert!(!balls[0].alive);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_hunter_destroys_several_in_one_pass() {
        let hunter = hunter_at(200.0, 200.0);
        let mut balls = vec![
            ball(210.0, 200.0, 10.0, Rgb::BLACK),
            ball(500.0, 500.0, 10.0, Rgb::BLACK),
            ball(190.0, 215.0, 15.0, Rgb::BLACK),
        ];
        let mut live = LiveCount::new(3);

        assert_eq!(detect_hunter_collisions(&hunter, &mut balls, &mut live), 2);
        assert_eq!(live.get(), 1);
        assert!(balls[1].alive);
    }

    #[test]
    fn test_hunter_never_double_counts() {
        let hunter = hunter_at(50.0, 50.0);
        let mut balls = vec![ball(55.0, 50.0, 10.0, Rgb::BLACK)];
        let mut live = LiveCount::new(1);

        detect_hunter_collisions(&hunter, &mut balls, &mut live);
        assert_eq!(detect_hunter_collisions(&hunter, &mut balls, &mut live), 0);
        assert_eq!(live.get(), 0);
        assert!(!balls[0].alive);
    }

    proptest! {
        #[test]
        fn overlapping_pair_ends_with_same_color(
            seed in any::<u64>(),
            dx in -29.0f32..29.0,
            dy in -29.0f32..29.0,
            ra in 10.0f32..=20.0,
            rb in 10.0f32..=20.0,
        ) {
            prop_assume!((dx * dx + dy * dy).sqrt() < ra + rb - 0.01);
            let mut rng = seeded(seed);
            let mut balls = vec![
                ball(400.0, 300.0, ra, Rgb::new(1, 2, 3)),
                ball(400.0 + dx, 300.0 + dy, rb, Rgb::new(4, 5, 6)),
            ];
            detect_ball_collisions(&mut balls, 0, &mut rng);
            prop_assert_eq!(balls[0].color, balls[1].color);
        }
    }
}
