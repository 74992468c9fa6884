//! Fund recommendation scoring. Fund data arrives through the
//! `FundSource` seam; the built-in static source carries a small
//! curated list so recommendations work without any market-data feed.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kosha_core::{Goal, Money};

use crate::util::months_until;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskProfile {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskProfile::Low => write!(f, "Low"),
            RiskProfile::Moderate => write!(f, "Moderate"),
            RiskProfile::High => write!(f, "High"),
        }
    }
}

impl RiskProfile {
    /// Shorter horizons take less risk: under a year Low, under three
    /// years Moderate, beyond that High.
    pub fn for_horizon(months_remaining: f64) -> Self {
        if months_remaining < 12.0 {
            RiskProfile::Low
        } else if months_remaining < 36.0 {
            RiskProfile::Moderate
        } else {
            RiskProfile::High
        }
    }

    /// Risk tiers an investor with this profile can hold.
    fn accepts(self, fund_risk: RiskProfile) -> bool {
        match self {
            RiskProfile::Low => fund_risk == RiskProfile::Low,
            RiskProfile::Moderate => fund_risk != RiskProfile::High,
            RiskProfile::High => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub id: String,
    pub name: String,
    pub category: String,
    pub risk: RiskProfile,
    pub min_sip: Money,
    pub returns_3yr: f64,
}

/// Where candidate funds come from. Implementations return the funds an
/// investor with the given profile can hold.
pub trait FundSource {
    fn funds(&self, profile: RiskProfile) -> Vec<Fund>;
}

// ── Static source ─────────────────────────────────────────────────────────────

/// Curated fallback list, usable offline and in tests.
pub struct StaticFundSource {
    funds: Vec<Fund>,
}

impl Default for StaticFundSource {
    fn default() -> Self {
        let fund = |id: &str, name: &str, category: &str, risk, min_sip, returns_3yr| Fund {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            risk,
            min_sip: Money::new(min_sip),
            returns_3yr,
        };
        Self {
            funds: vec![
                fund("f1", "HDFC Mid-Cap Opportunities", "Equity", RiskProfile::High, 500, 18.5),
                fund("f2", "SBI Blue Chip Fund", "Equity", RiskProfile::Moderate, 500, 14.2),
                fund("f3", "Axis Long Term Equity", "ELSS", RiskProfile::Moderate, 500, 15.8),
                fund("f4", "ICICI Prudential Value", "Value", RiskProfile::High, 1000, 16.4),
                fund("f5", "Parag Parikh Flexi Cap", "Flexi Cap", RiskProfile::Low, 1000, 20.1),
            ],
        }
    }
}

impl StaticFundSource {
    pub fn new(funds: Vec<Fund>) -> Self {
        Self { funds }
    }
}

impl FundSource for StaticFundSource {
    fn funds(&self, profile: RiskProfile) -> Vec<Fund> {
        self.funds
            .iter()
            .filter(|f| profile.accepts(f.risk))
            .cloned()
            .collect()
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub fund: Fund,
    pub suitability: f64,
    pub reason: String,
}

/// Returns carry double weight, alignment with the profile adds a flat
/// bonus, and low SIP minimums get a small accessibility nudge.
fn suitability(fund: &Fund, profile: RiskProfile) -> f64 {
    let mut score = fund.returns_3yr * 2.0;
    if fund.risk == profile {
        score += 20.0;
    }
    if fund.min_sip <= Money::new(500) {
        score += 10.0;
    } else if fund.min_sip <= Money::new(1000) {
        score += 5.0;
    }
    score
}

fn reason(fund: &Fund, months_remaining: f64) -> String {
    match fund.risk {
        RiskProfile::Low => format!(
            "Stable option for {:.0}-month timeline with consistent returns",
            months_remaining
        ),
        RiskProfile::Moderate => {
            "Balanced growth potential suitable for medium-term goals".to_string()
        }
        RiskProfile::High => "Higher growth potential for long-term wealth creation".to_string(),
    }
}

/// Top three funds for a goal, scored against the risk profile its
/// deadline implies.
pub fn recommend<S: FundSource>(
    source: &S,
    goal: &Goal,
    today: NaiveDate,
) -> (RiskProfile, Vec<Recommendation>) {
    let months_remaining = months_until(today, goal.deadline);
    let profile = RiskProfile::for_horizon(months_remaining);

    let mut recommendations: Vec<Recommendation> = source
        .funds(profile)
        .into_iter()
        .map(|fund| Recommendation {
            suitability: suitability(&fund, profile),
            reason: reason(&fund, months_remaining),
            fund,
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.suitability.partial_cmp(&a.suitability).unwrap_or(Ordering::Equal)
    });
    recommendations.truncate(3);

    (profile, recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn goal(deadline: NaiveDate) -> Goal {
        Goal {
            id: None,
            name: "Trip".to_string(),
            category: "travel".to_string(),
            target_amount: Money::new(100_000),
            saved_amount: Money::zero(),
            deadline,
        }
    }

    #[test]
    fn horizon_maps_to_risk_profile() {
        assert_eq!(RiskProfile::for_horizon(6.0), RiskProfile::Low);
        assert_eq!(RiskProfile::for_horizon(24.0), RiskProfile::Moderate);
        assert_eq!(RiskProfile::for_horizon(60.0), RiskProfile::High);
    }

    #[test]
    fn short_deadline_only_offers_low_risk_funds() {
        let (profile, recs) = recommend(&StaticFundSource::default(), &goal(d(2024, 12, 1)), d(2024, 6, 1));
        assert_eq!(profile, RiskProfile::Low);
        assert!(recs.iter().all(|r| r.fund.risk == RiskProfile::Low));
        assert_eq!(recs[0].fund.id, "f5");
    }

    #[test]
    fn moderate_profile_excludes_high_risk() {
        let (profile, recs) = recommend(&StaticFundSource::default(), &goal(d(2026, 6, 1)), d(2024, 6, 1));
        assert_eq!(profile, RiskProfile::Moderate);
        assert!(recs.iter().all(|r| r.fund.risk != RiskProfile::High));
    }

    #[test]
    fn long_horizon_returns_top_three_by_suitability() {
        let (profile, recs) = recommend(&StaticFundSource::default(), &goal(d(2030, 6, 1)), d(2024, 6, 1));
        assert_eq!(profile, RiskProfile::High);
        assert_eq!(recs.len(), 3);
        assert!(recs.windows(2).all(|w| w[0].suitability >= w[1].suitability));
        // HDFC Mid-Cap: 18.5 * 2 + 20 alignment + 10 accessible SIP = 67.
        assert_eq!(recs[0].fund.id, "f1");
        assert_eq!(recs[0].suitability, 67.0);
    }

    #[test]
    fn low_risk_reason_mentions_the_timeline() {
        let (_, recs) = recommend(&StaticFundSource::default(), &goal(d(2024, 12, 1)), d(2024, 6, 1));
        assert!(recs[0].reason.contains("-month timeline"));
    }

    #[test]
    fn alignment_bonus_beats_raw_returns() {
        let funds = vec![
            Fund {
                id: "aligned".to_string(),
                name: "Aligned".to_string(),
                category: "Debt".to_string(),
                risk: RiskProfile::Moderate,
                min_sip: Money::new(5_000),
                returns_3yr: 10.0, // 20 + 20 = 40
            },
            Fund {
                id: "hot".to_string(),
                name: "Hot".to_string(),
                category: "Equity".to_string(),
                risk: RiskProfile::Low,
                min_sip: Money::new(5_000),
                returns_3yr: 14.0, // 28
            },
        ];
        let source = StaticFundSource::new(funds);
        let (_, recs) = recommend(&source, &goal(d(2026, 6, 1)), d(2024, 6, 1));
        assert_eq!(recs[0].fund.id, "aligned");
    }
}
