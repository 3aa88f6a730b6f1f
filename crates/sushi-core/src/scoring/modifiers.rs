/// Pool shared by the players with the most maki rolls in a round.
pub const MAKI_FIRST: f64 = 6.0;
/// Pool shared by the runners-up in maki rolls.
pub const MAKI_SECOND: f64 = 3.0;
/// Pudding reward for the most puddings and penalty for the fewest.
pub const PUDDING_SWING: f64 = 6.0;

fn distinct_sorted(values: &[u32]) -> Vec<u32> {
    let mut distinct = values.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    distinct
}

/// Splits `pool` evenly between every position holding `value`.
fn share(scores: &mut [f64], values: &[u32], value: u32, pool: f64) {
    let holders = values.iter().filter(|&&v| v == value).count();
    if holders == 0 {
        return;
    }
    let portion = pool / holders as f64;
    for (score, _) in scores
        .iter_mut()
        .zip(values)
        .filter(|(_, v)| **v == value)
    {
        *score += portion;
    }
}

/// Maki majority bonus for one round, given each seat's maki roll total.
pub fn maki_bonuses(maki_points: &[u32]) -> Vec<f64> {
    let mut scores = vec![0.0; maki_points.len()];
    let tiers = distinct_sorted(maki_points);
    match tiers.as_slice() {
        [] => {}
        [_] => scores.fill(MAKI_FIRST / maki_points.len() as f64),
        [.., second, first] => {
            share(&mut scores, maki_points, *first, MAKI_FIRST);
            share(&mut scores, maki_points, *second, MAKI_SECOND);
        }
    }
    scores
}

/// End-of-game pudding adjustment, given each seat's pudding count.
pub fn pudding_bonuses(puddings: &[u32]) -> Vec<f64> {
    let mut scores = vec![0.0; puddings.len()];
    let tiers = distinct_sorted(puddings);
    match tiers.as_slice() {
        [] => {}
        [_] => scores.fill(PUDDING_SWING / puddings.len() as f64),
        [fewest, .., most] => {
            share(&mut scores, puddings, *most, PUDDING_SWING);
            share(&mut scores, puddings, *fewest, -PUDDING_SWING);
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_maki_tie_splits_first_pool() {
        assert_eq!(maki_bonuses(&[4, 4, 4]), vec![2.0, 2.0, 2.0]);
        assert_eq!(maki_bonuses(&[0, 0]), vec![3.0, 3.0]);
    }

    #[test]
    fn maki_first_and_second_tiers() {
        assert_eq!(maki_bonuses(&[5, 2, 3, 0]), vec![6.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn maki_ties_split_each_pool() {
        assert_eq!(maki_bonuses(&[5, 5, 3, 3]), vec![3.0, 3.0, 1.5, 1.5]);
        let bonuses = maki_bonuses(&[1, 7, 7, 7, 4]);
        assert_eq!(bonuses[0], 0.0);
        assert!((bonuses[1] - 2.0).abs() < 1e-12);
        assert_eq!(bonuses[4], 3.0);
    }

    #[test]
    fn maki_pool_is_nine_unless_fully_tied() {
        for points in [vec![3, 1], vec![6, 6, 2, 2, 0], vec![9, 8, 8]] {
            let total: f64 = maki_bonuses(&points).iter().sum();
            assert!((total - 9.0).abs() < 1e-9, "{points:?}");
        }
        let total: f64 = maki_bonuses(&[2, 2, 2, 2, 2]).iter().sum();
        assert!((total - 6.0).abs() < 1e-9);
    }

    #[test]
    fn pudding_max_tie_and_sole_minimum() {
        assert_eq!(pudding_bonuses(&[3, 3, 1, 0]), vec![3.0, 3.0, 0.0, -6.0]);
    }

    #[test]
    fn pudding_full_tie_rewards_everyone() {
        assert_eq!(pudding_bonuses(&[2, 2, 2]), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn pudding_two_players_take_both_sides() {
        assert_eq!(pudding_bonuses(&[1, 4]), vec![-6.0, 6.0]);
    }

    #[test]
    fn empty_tables_score_nothing() {
        assert!(maki_bonuses(&[]).is_empty());
        assert!(pudding_bonuses(&[]).is_empty());
    }
}
