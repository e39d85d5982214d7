//! Scoring: closest stone to the house center wins
//!
//! Every stone on the rink counts, including any that end up outside the
//! house rings.

use serde::Serialize;

use super::state::House;
use super::stone::{PlayerId, Stone};
use crate::consts::DISTANCE_EPSILON;

/// Distance of one stone from the house center
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedStone {
    /// Index in throw order
    pub index: usize,
    pub owner: PlayerId,
    pub distance: f32,
}

/// Outcome of a finished match
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
    pub winner: PlayerId,
    /// Winner's stones closer than the opponent's best stone
    pub points: u32,
    pub closest_distance: f32,
}

/// Stones ordered by distance to the house center.
///
/// Stones within `DISTANCE_EPSILON` of the closest remaining stone count as
/// tied and keep throw order, so a near-tie never overtakes an earlier throw.
pub fn rank_stones(stones: &[Stone], house: &House) -> Vec<RankedStone> {
    let mut ranked: Vec<RankedStone> = stones
        .iter()
        .enumerate()
        .map(|(index, stone)| RankedStone {
            index,
            owner: stone.owner,
            distance: house.distance_to(stone.position()),
        })
        .collect();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    // Ties are measured from each group's closest stone, never chained
    let mut start = 0;
    while start < ranked.len() {
        let anchor = ranked[start].distance;
        let end = ranked[start..]
            .iter()
            .position(|r| r.distance - anchor > DISTANCE_EPSILON)
            .map_or(ranked.len(), |offset| start + offset);
        ranked[start..end].sort_by_key(|r| r.index);
        start = end;
    }
    ranked
}

/// Owner of the stone closest to the house center, with ties going to the
/// earlier throw. Returns `None` when no stones were thrown.
pub fn determine_winner(stones: &[Stone], house: &House) -> Option<PlayerId> {
    rank_stones(stones, house).first().map(|r| r.owner)
}

/// Winner plus curling-style points for the scoreboard
pub fn judge_match(stones: &[Stone], house: &House) -> Option<MatchResult> {
    let ranked = rank_stones(stones, house);
    let best = ranked.first()?;
    let points = ranked.iter().take_while(|r| r.owner == best.owner).count() as u32;

    Some(MatchResult {
        winner: best.owner,
        points,
        closest_distance: best.distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::stone::StoneKind;
    use glam::Vec2;

    fn at(owner: PlayerId, x: f32, y: f32) -> Stone {
        Stone::new(StoneKind::Normal, owner, Vec2::new(x, y), Vec2::ZERO)
    }

    #[test]
    fn test_no_stones_no_winner() {
        let house = House::default();
        assert_eq!(determine_winner(&[], &house), None);
        assert!(judge_match(&[], &house).is_none());
    }

    #[test]
    fn test_closest_stone_wins() {
        let house = House::default();
        let stones = [
            at(PlayerId::One, 80.0, 15.0), // 5.0
            at(PlayerId::Two, 85.0, 18.0), // 3.0
            at(PlayerId::One, 60.0, 15.0), // 25.0
        ];
        assert_eq!(determine_winner(&stones, &house), Some(PlayerId::Two));
    }

    #[test]
    fn test_tie_goes_to_earlier_throw() {
        let house = House::default();
        let stones = [
            at(PlayerId::Two, 81.0, 15.0),
            at(PlayerId::One, 89.0, 15.0),
        ];
        assert_eq!(determine_winner(&stones, &house), Some(PlayerId::Two));

        let ranked = rank_stones(&stones, &house);
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
    }

    #[test]
    fn test_points_count_stones_inside_opponent_best() {
        let house = House::default();
        let stones = [
            at(PlayerId::One, 85.0, 16.0), // 1.0
            at(PlayerId::Two, 85.0, 19.0), // 4.0
            at(PlayerId::One, 83.0, 15.0), // 2.0
            at(PlayerId::One, 85.0, 8.0),  // 7.0
        ];
        let result = judge_match(&stones, &house).unwrap();
        assert_eq!(result.winner, PlayerId::One);
        assert_eq!(result.points, 2);
        assert!((result.closest_distance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rank_stones_sorted() {
        let house = House::default();
        let stones = [
            at(PlayerId::One, 60.0, 15.0),
            at(PlayerId::Two, 84.0, 15.0),
            at(PlayerId::One, 75.0, 15.0),
        ];
        let order: Vec<usize> = rank_stones(&stones, &house).iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_near_tie_chain_keeps_winner_and_points_consistent() {
        let house = House::default();
        // Distances 10.0, 9.999992 and 9.999984: neighbours tie, the ends don't
        let stones = [
            at(PlayerId::Two, 85.0, 5.0),
            at(PlayerId::One, 85.0, 5.000008),
            at(PlayerId::One, 85.0, 5.000016),
        ];

        let order: Vec<usize> = rank_stones(&stones, &house).iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 2, 0]);

        let result = judge_match(&stones, &house).unwrap();
        assert_eq!(determine_winner(&stones, &house), Some(result.winner));
        assert_eq!(result.winner, PlayerId::One);
        assert_eq!(result.points, 2);
        assert!((result.closest_distance - 9.999992).abs() < 3e-6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn winner_always_scores(
                spots in proptest::collection::vec((0.0f32..100.0, 0.0f32..30.0, any::<bool>()), 1..16)
            ) {
                let house = House::default();
                let stones: Vec<Stone> = spots
                    .iter()
                    .map(|&(x, y, first)| {
                        let owner = if first { PlayerId::One } else { PlayerId::Two };
                        at(owner, x, y)
                    })
                    .collect();

                let result = judge_match(&stones, &house).unwrap();
                prop_assert_eq!(determine_winner(&stones, &house), Some(result.winner));
                prop_assert!(result.points >= 1);

                let ranked = rank_stones(&stones, &house);
                let nearest = ranked.iter().map(|r| r.distance).fold(f32::INFINITY, f32::min);
                prop_assert!(result.closest_distance - nearest <= DISTANCE_EPSILON);
            }
        }
    }
}
