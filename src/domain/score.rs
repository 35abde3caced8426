//! Checklist scoring: observations to composite score and verdict.
//!
//! Each category is an independent additive heuristic with fixed
//! thresholds. The composite is the clamped sum of the categories.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::observation::{MicroConfirmation, Observation, OiTrend, Trend};

pub const GO_THRESHOLD: u8 = 70;
pub const CONDITIONAL_THRESHOLD: u8 = 60;

const FUNDING_CEILING: f64 = 0.05;
const RANGE_TOP_DECILE: f64 = 0.9;
const RSI_OVERBOUGHT: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Structure,
    SupplyDemand,
    Positioning,
    Rsi,
    Micro,
    ExtremePenalty,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Structure => "Structure",
            Category::SupplyDemand => "SupplyDemand",
            Category::Positioning => "Positioning",
            Category::Rsi => "RSI",
            Category::Micro => "Micro",
            Category::ExtremePenalty => "ExtremePenalty",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "GO", alias = "🟢 GO")]
    Go,
    #[serde(rename = "Conditional", alias = "🟡 Conditional")]
    Conditional,
    #[serde(rename = "NO-GO", alias = "🔴 NO-GO")]
    NoGo,
}

impl Verdict {
    pub fn from_score(score: u8) -> Self {
        if score >= GO_THRESHOLD {
            Verdict::Go
        } else if score >= CONDITIONAL_THRESHOLD {
            Verdict::Conditional
        } else {
            Verdict::NoGo
        }
    }

    /// Display label, optionally prefixed with a traffic-light marker.
    pub fn label(&self, emoji: bool) -> String {
        if !emoji {
            return self.to_string();
        }
        let marker = match self {
            Verdict::Go => "🟢",
            Verdict::Conditional => "🟡",
            Verdict::NoGo => "🔴",
        };
        format!("{marker} {self}")
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Go => "GO",
            Verdict::Conditional => "Conditional",
            Verdict::NoGo => "NO-GO",
        };
        f.pad(label)
    }
}

/// Per-category point contributions, before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    pub structure: i32,
    pub supply_demand: i32,
    pub positioning: i32,
    pub rsi: i32,
    pub micro: i32,
    pub extreme_penalty: i32,
}

impl ScoreBreakdown {
    pub fn get(&self, category: Category) -> i32 {
        match category {
            Category::Structure => self.structure,
            Category::SupplyDemand => self.supply_demand,
            Category::Positioning => self.positioning,
            Category::Rsi => self.rsi,
            Category::Micro => self.micro,
            Category::ExtremePenalty => self.extreme_penalty,
        }
    }

    /// Categories in display order with their contributions.
    pub fn entries(&self) -> [(Category, i32); 6] {
        [
            Category::Structure,
            Category::SupplyDemand,
            Category::Positioning,
            Category::Rsi,
            Category::Micro,
            Category::ExtremePenalty,
        ]
        .map(|c| (c, self.get(c)))
    }

    pub fn raw_total(&self) -> i32 {
        self.entries().iter().map(|(_, pts)| pts).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResult {
    pub score: u8,
    pub verdict: Verdict,
    pub breakdown: ScoreBreakdown,
}

pub fn score(obs: &Observation) -> ScoreResult {
    let breakdown = ScoreBreakdown {
        structure: structure_points(obs),
        supply_demand: supply_demand_points(obs),
        positioning: positioning_points(obs),
        rsi: rsi_points(obs),
        micro: micro_points(obs),
        extreme_penalty: extreme_penalty_points(obs),
    };

    let score = breakdown.raw_total().clamp(0, 100) as u8;

    ScoreResult {
        score,
        verdict: Verdict::from_score(score),
        breakdown,
    }
}

fn structure_points(obs: &Observation) -> i32 {
    let mut pts = 10;
    let with_trend = match obs.trend {
        Trend::Uptrend => obs.price > obs.last_hl,
        Trend::Downtrend => obs.price < obs.last_hl,
    };
    if with_trend {
        pts += 5;
    }
    if obs.break_confirmed {
        pts += 5;
    }
    pts
}

fn supply_demand_points(obs: &Observation) -> i32 {
    let mut pts = 0;
    if let Some(proximity) = obs.swing_proximity() {
        if proximity < 0.25 {
            pts += 10;
        } else if proximity < 0.75 {
            pts += 5;
        }
    }
    if let Some(range_pos) = obs.range_position() {
        if range_pos < RANGE_TOP_DECILE {
            pts += 5;
        } else {
            pts -= 5;
        }
    }
    pts
}

fn positioning_points(obs: &Observation) -> i32 {
    let mut pts = 0;
    if obs.oi_trend == OiTrend::Rising {
        pts += 7;
    }
    if obs.funding_rate < FUNDING_CEILING {
        pts += 5;
    } else {
        pts -= 5;
    }
    if obs.long_short_ratio < 1.0 {
        pts += 3;
    }
    pts
}

fn rsi_points(obs: &Observation) -> i32 {
    let mut pts = 0;
    if (40.0..=65.0).contains(&obs.rsi) {
        pts += 5;
    }
    if obs.rsi < RSI_OVERBOUGHT {
        pts += 5;
    }
    pts
}

fn micro_points(obs: &Observation) -> i32 {
    match obs.micro {
        MicroConfirmation::Strong => 10,
        MicroConfirmation::Weak => 5,
        MicroConfirmation::None => 0,
    }
}

fn extreme_penalty_points(obs: &Observation) -> i32 {
    match obs.range_position() {
        Some(range_pos) if range_pos > RANGE_TOP_DECILE && obs.rsi > RSI_OVERBOUGHT => -10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Every category at its maximum.
    fn best_case() -> Observation {
        Observation {
            pair: "BTCUSDT".into(),
            price: 101.0,
            trend: Trend::Uptrend,
            last_hl: 100.0,
            last_hh: 120.0,
            break_confirmed: true,
            funding_rate: 0.01,
            oi_trend: OiTrend::Rising,
            long_short_ratio: 0.8,
            rsi: 55.0,
            high_24h: 130.0,
            low_24h: 90.0,
            change_24h: 2.5,
            volume_24h: 1_000_000.0,
            micro: MicroConfirmation::Strong,
        }
    }

    #[test]
    fn best_case_breakdown() {
        let result = score(&best_case());
        assert_eq!(result.breakdown.structure, 20);
        assert_eq!(result.breakdown.supply_demand, 15);
        assert_eq!(result.breakdown.positioning, 15);
        assert_eq!(result.breakdown.rsi, 10);
        assert_eq!(result.breakdown.micro, 10);
        assert_eq!(result.breakdown.extreme_penalty, 0);
        assert_eq!(result.score, 70);
        assert_eq!(result.verdict, Verdict::Go);
    }

    #[test]
    fn downtrend_structure_needs_price_below_swing() {
        let obs = Observation {
            trend: Trend::Downtrend,
            price: 99.0,
            last_hl: 100.0,
            break_confirmed: false,
            ..best_case()
        };
        assert_eq!(score(&obs).breakdown.structure, 15);

        let above = Observation { price: 101.0, ..obs };
        assert_eq!(score(&above).breakdown.structure, 10);
    }

    #[test]
    fn supply_demand_mid_swing() {
        // proximity = 10 / 20 = 0.5
        let obs = Observation {
            price: 110.0,
            ..best_case()
        };
        assert_eq!(score(&obs).breakdown.supply_demand, 10);
    }

    #[test]
    fn supply_demand_far_from_swing() {
        // proximity = 18 / 20 = 0.9
        let obs = Observation {
            price: 118.0,
            ..best_case()
        };
        assert_eq!(score(&obs).breakdown.supply_demand, 5);
    }

    #[test]
    fn supply_demand_top_of_range_subtracts() {
        // range_pos = 127 / 130 -> above 0.9
        let obs = Observation {
            price: 127.0,
            low_24h: 0.0,
            ..best_case()
        };
        let sd = score(&obs).breakdown.supply_demand;
        // proximity = 27 / 20 > 0.75, so only the range term applies
        assert_eq!(sd, -5);
    }

    #[test]
    fn equal_swing_points_skip_proximity() {
        let obs = Observation {
            last_hl: 100.0,
            last_hh: 100.0,
            ..best_case()
        };
        assert_eq!(score(&obs).breakdown.supply_demand, 5);
    }

    #[test]
    fn equal_range_skips_range_terms() {
        let obs = Observation {
            high_24h: 100.0,
            low_24h: 100.0,
            rsi: 90.0,
            ..best_case()
        };
        let result = score(&obs);
        assert_eq!(result.breakdown.supply_demand, 10);
        assert_eq!(result.breakdown.extreme_penalty, 0);
    }

    #[test]
    fn positioning_high_funding_penalised() {
        let obs = Observation {
            funding_rate: 0.05,
            oi_trend: OiTrend::Flat,
            long_short_ratio: 1.0,
            ..best_case()
        };
        assert_eq!(score(&obs).breakdown.positioning, -5);
    }

    #[test]
    fn rsi_band_edges() {
        for (rsi, expected) in [(40.0, 10), (65.0, 10), (39.9, 5), (65.1, 5), (75.0, 0)] {
            let obs = Observation { rsi, ..best_case() };
            assert_eq!(score(&obs).breakdown.rsi, expected, "rsi = {rsi}");
        }
    }

    #[test]
    fn micro_levels() {
        for (micro, expected) in [
            (MicroConfirmation::Strong, 10),
            (MicroConfirmation::Weak, 5),
            (MicroConfirmation::None, 0),
        ] {
            let obs = Observation { micro, ..best_case() };
            assert_eq!(score(&obs).breakdown.micro, expected);
        }
    }

    #[test]
    fn extreme_penalty_top_decile_and_overbought() {
        let obs = Observation {
            price: 129.0,
            rsi: 80.0,
            ..best_case()
        };
        assert_eq!(score(&obs).breakdown.extreme_penalty, -10);

        let calm = Observation { rsi: 75.0, ..obs };
        assert_eq!(score(&calm).breakdown.extreme_penalty, 0);
    }

    #[test]
    fn worst_case_clamps_to_zero() {
        let obs = Observation {
            price: 200.0,
            trend: Trend::Uptrend,
            last_hl: 100.0,
            last_hh: 100.0,
            break_confirmed: false,
            funding_rate: 1.0,
            oi_trend: OiTrend::Falling,
            long_short_ratio: 2.0,
            rsi: 90.0,
            high_24h: 201.0,
            low_24h: 100.0,
            micro: MicroConfirmation::None,
            ..best_case()
        };
        let result = score(&obs);
        // structure still earns the trend base and the price term
        assert_eq!(result.breakdown.raw_total(), 15 - 5 - 5 - 10);
        assert_eq!(result.score, 0);
        assert_eq!(result.verdict, Verdict::NoGo);
    }

    #[test]
    fn verdict_exact_boundaries() {
        assert_eq!(Verdict::from_score(100), Verdict::Go);
        assert_eq!(Verdict::from_score(70), Verdict::Go);
        assert_eq!(Verdict::from_score(69), Verdict::Conditional);
        assert_eq!(Verdict::from_score(60), Verdict::Conditional);
        assert_eq!(Verdict::from_score(59), Verdict::NoGo);
        assert_eq!(Verdict::from_score(0), Verdict::NoGo);
    }

    #[test]
    fn labels_with_and_without_marker() {
        assert_eq!(Verdict::Go.label(false), "GO");
        assert_eq!(Verdict::NoGo.label(true), "🔴 NO-GO");
        assert_eq!(Verdict::Conditional.label(true), "🟡 Conditional");
    }

    #[test]
    fn breakdown_entries_in_display_order() {
        let names: Vec<String> = ScoreBreakdown::default()
            .entries()
            .iter()
            .map(|(c, _)| c.to_string())
            .collect();
        assert_eq!(
            names,
            ["Structure", "SupplyDemand", "Positioning", "RSI", "Micro", "ExtremePenalty"]
        );
    }

    fn arb_observation() -> impl Strategy<Value = Observation> {
        (
            (
                any::<f64>(),
                prop_oneof![Just(Trend::Uptrend), Just(Trend::Downtrend)],
                any::<f64>(),
                any::<f64>(),
                any::<bool>(),
                any::<f64>(),
                prop_oneof![Just(OiTrend::Rising), Just(OiTrend::Falling), Just(OiTrend::Flat)],
            ),
            (
                any::<f64>(),
                any::<f64>(),
                any::<f64>(),
                any::<f64>(),
                prop_oneof![
                    Just(MicroConfirmation::None),
                    Just(MicroConfirmation::Weak),
                    Just(MicroConfirmation::Strong)
                ],
            ),
        )
            .prop_map(
                |(
                    (price, trend, last_hl, last_hh, break_confirmed, funding_rate, oi_trend),
                    (long_short_ratio, rsi, high_24h, low_24h, micro),
                )| Observation {
                    pair: "ETHUSDT".into(),
                    price,
                    trend,
                    last_hl,
                    last_hh,
                    break_confirmed,
                    funding_rate,
                    oi_trend,
                    long_short_ratio,
                    rsi,
                    high_24h,
                    low_24h,
                    change_24h: 0.0,
                    volume_24h: 0.0,
                    micro,
                },
            )
    }

    proptest! {
        #[test]
        fn score_always_within_bounds(obs in arb_observation()) {
            let result = score(&obs);
            prop_assert!(result.score <= 100);
            prop_assert_eq!(result.score as i32, result.breakdown.raw_total().clamp(0, 100));
            prop_assert_eq!(result.verdict, Verdict::from_score(result.score));
        }

        #[test]
        fn verdict_monotonic_in_score(a in 0u8..=100, b in 0u8..=100) {
            let rank = |v: Verdict| match v {
                Verdict::NoGo => 0,
                Verdict::Conditional => 1,
                Verdict::Go => 2,
            };
            if a <= b {
                prop_assert!(rank(Verdict::from_score(a)) <= rank(Verdict::from_score(b)));
            }
        }
    }
}
