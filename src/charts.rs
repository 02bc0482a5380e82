use crate::prng::{SeededRng, seed_for_id};
use crate::state::Match;

pub const MOMENTUM_POINTS: usize = 15;
pub const MOMENTUM_STEP_MINUTES: u16 = 6;
pub const MOMENTUM_MIN: f64 = -40.0;
pub const MOMENTUM_MAX: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumPoint {
    pub minute: u16,
    pub strength: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatComparison {
    pub metric: &'static str,
    pub home: f64,
    pub away: f64,
    pub max_scale: f64,
}

impl StatComparison {
    /// Bar fill for each side, clamped to `[0, 1]`.
    pub fn fractions(&self) -> (f64, f64) {
        if self.max_scale <= 0.0 {
            return (0.0, 0.0);
        }
        (
            (self.home / self.max_scale).clamp(0.0, 1.0),
            (self.away / self.max_scale).clamp(0.0, 1.0),
        )
    }
}

/// Momentum strip: one point every six minutes, strength in `[-40, 80)`.
pub fn momentum_series(seed: u64) -> Vec<MomentumPoint> {
    let mut rng = SeededRng::new(seed);
    (0..MOMENTUM_POINTS as u16)
        .map(|i| MomentumPoint {
            minute: i * MOMENTUM_STEP_MINUTES,
            strength: rng.uniform(MOMENTUM_MIN, MOMENTUM_MAX),
        })
        .collect()
}

/// xG, possession and passes for both sides. Possession always sums to 100.
pub fn stat_comparison(seed: u64) -> Vec<StatComparison> {
    // Offset so the stats stream doesn't mirror the momentum stream.
    let mut rng = SeededRng::new(seed ^ 0x5354_4154_5321_0000);

    let xg_home = round_to(rng.uniform(0.2, 2.8), 1);
    let xg_away = round_to(rng.uniform(0.2, 2.8), 1);
    let possession_home = rng.uniform(35.0, 66.0).floor();
    let passes_home = rng.uniform(250.0, 500.0).floor();
    let passes_away = rng.uniform(200.0, 480.0).floor();

    vec![
        StatComparison {
            metric: "Expected goals (xG)",
            home: xg_home,
            away: xg_away,
            max_scale: 3.0,
        },
        StatComparison {
            metric: "Possession %",
            home: possession_home,
            away: 100.0 - possession_home,
            max_scale: 100.0,
        },
        StatComparison {
            metric: "Passes",
            home: passes_home,
            away: passes_away,
            max_scale: 500.0,
        },
    ]
}

pub fn momentum_for(m: &Match) -> Vec<MomentumPoint> {
    momentum_series(seed_for_id(&m.id))
}

pub fn stats_for(m: &Match) -> Vec<StatComparison> {
    stat_comparison(seed_for_id(&m.id))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn momentum_shape_and_bounds() {
        let series = momentum_series(42);
        assert_eq!(series.len(), MOMENTUM_POINTS);
        assert_eq!(series[0].minute, 0);
        assert_eq!(series[14].minute, 84);
        assert!(
            series
                .iter()
                .all(|p| p.strength >= MOMENTUM_MIN && p.strength < MOMENTUM_MAX)
        );
    }

    #[test]
    fn momentum_is_stable_per_seed() {
        assert_eq!(momentum_series(7), momentum_series(7));
        assert_ne!(momentum_series(7), momentum_series(8));
    }

    #[test]
    fn stats_are_bounded_and_possession_sums_to_100() {
        for seed in 0..100 {
            let rows = stat_comparison(seed);
            assert_eq!(rows.len(), 3);
            assert!((rows[1].home + rows[1].away - 100.0).abs() < 1e-9);
            for row in &rows {
                assert!(row.home >= 0.0 && row.home <= row.max_scale, "{row:?}");
                assert!(row.away >= 0.0 && row.away <= row.max_scale, "{row:?}");
                let (h, a) = row.fractions();
                assert!((0.0..=1.0).contains(&h) && (0.0..=1.0).contains(&a));
            }
        }
    }
}
