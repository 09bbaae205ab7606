//! Investment, savings, payback, NPV and IRR for a predicted yearly yield.
//!
//! IRR uses Newton-Raphson with a fixed starting rate of 0.10, tolerance
//! 1e-3 and a 100-iteration cap. These literals are part of the contract:
//! changing them changes which series converge.

use crate::config::EngineConfig;
use crate::models::prediction::FinancialResult;

const IRR_STARTING_RATE: f64 = 0.10;
const IRR_TOLERANCE: f64 = 1e-3;
const IRR_MAX_ITERATIONS: usize = 100;

/// Net present value of a cash-flow series against an upfront investment.
/// Flow `t` is discounted over `t + 1` periods.
pub fn npv(investment: f64, cash_flows: &[f64], discount_rate: f64) -> f64 {
    let discounted: f64 = cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / (1.0 + discount_rate).powi(t as i32 + 1))
        .sum();
    -investment + discounted
}

/// Internal rate of return via Newton-Raphson. Returns `None` when the
/// derivative vanishes, the rate diverges negative, or the iteration budget
/// is exhausted before |NPV| drops under tolerance.
pub fn irr(investment: f64, cash_flows: &[f64]) -> Option<f64> {
    let mut rate = IRR_STARTING_RATE;

    for _ in 0..IRR_MAX_ITERATIONS {
        let value = npv(investment, cash_flows, rate);
        if value.abs() < IRR_TOLERANCE {
            return Some(rate);
        }
        let derivative: f64 = cash_flows
            .iter()
            .enumerate()
            .map(|(t, cf)| -(t as f64 + 1.0) * cf / (1.0 + rate).powi(t as i32 + 2))
            .sum();
        if derivative == 0.0 {
            return None;
        }
        rate -= value / derivative;
        if rate < 0.0 {
            return None;
        }
    }
    None
}

/// Full financial picture for a system of `panel_count` panels producing
/// `yearly_kwh`. NPV and IRR are computed over a constant annual-savings
/// series spanning the configured project lifetime.
pub fn compute_financial(
    yearly_kwh: f64,
    panel_count: u32,
    subsidy_rate: f64,
    electricity_rate: f64,
    config: &EngineConfig,
) -> FinancialResult {
    let investment = panel_count as f64
        * config.panel_unit_cost
        * config.installation_multiplier
        * (1.0 - subsidy_rate);

    let annual_savings = yearly_kwh * electricity_rate;
    let monthly_savings = annual_savings / 12.0;

    // Undefined payback is an explicit absence, not a sentinel infinity
    let payback_years = if annual_savings > 0.0 {
        Some(investment / annual_savings)
    } else {
        None
    };

    let cash_flows = vec![annual_savings; config.project_lifetime_years];
    let npv = npv(investment, &cash_flows, config.discount_rate);
    let irr = irr(investment, &cash_flows);

    FinancialResult {
        investment,
        monthly_savings,
        annual_savings,
        payback_years,
        npv,
        irr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npv_matches_closed_form_annuity() {
        let flows = vec![20_000.0; 10];
        let r = 0.08_f64;
        let computed = npv(100_000.0, &flows, r);
        let annuity = 20_000.0 * (1.0 - (1.0 + r).powi(-10)) / r;
        assert!((computed - (annuity - 100_000.0)).abs() < 1e-6);
    }

    #[test]
    fn irr_of_single_flow_is_ten_percent() {
        // -100000 + 110000/(1+r) = 0 at exactly r = 0.10
        let rate = irr(100_000.0, &[110_000.0]).unwrap();
        assert!((rate - 0.10).abs() < 1e-3);
    }

    #[test]
    fn irr_diverging_negative_is_none() {
        // Flows can never repay the investment; Newton drives the rate down
        assert_eq!(irr(100_000.0, &[1_000.0]), None);
        assert_eq!(irr(100_000.0, &[]), None);
    }

    #[test]
    fn financial_result_assembles_all_fields() {
        let config = EngineConfig::default();
        let result = compute_financial(65_700.0, 100, 0.2, 0.15, &config);

        // 100 panels × 250 × 1.3 × 0.8
        assert!((result.investment - 26_000.0).abs() < 1e-9);
        assert!((result.annual_savings - 9_855.0).abs() < 1e-9);
        assert!((result.monthly_savings - 821.25).abs() < 1e-9);
        let payback = result.payback_years.unwrap();
        assert!((payback - 26_000.0 / 9_855.0).abs() < 1e-9);
        assert!(result.npv > 0.0);
        // Savings dwarf the investment here, so IRR converges comfortably
        assert!(result.irr.unwrap() > 0.10);
    }

    #[test]
    fn zero_savings_means_no_payback() {
        let config = EngineConfig::default();
        let result = compute_financial(0.0, 100, 0.0, 0.15, &config);
        assert_eq!(result.payback_years, None);
        assert_eq!(result.annual_savings, 0.0);
    }
}
