//! The financial formulas behind every report.
//!
//! All functions here are pure and total over finite, non-negative inputs:
//! every combination yields either a finite figure or [`Figure::Infinite`],
//! never `NaN`. Callers are responsible for rejecting negative amounts first
//! (see [`BusinessParameters`](crate::models::BusinessParameters) and
//! [`CampaignData`](crate::models::CampaignData)).

use crate::models::{BreakEven, BusinessParameters, Figure};

/// Units that must be sold before revenue covers fixed costs.
///
/// Infinite when the marginal profit per unit is zero or negative, as selling
/// more never recoups anything.
pub fn break_even_units(fixed_costs: f64, unit_price: f64, variable_cost_per_unit: f64) -> Figure {
    let marginal_profit = unit_price - variable_cost_per_unit;
    if marginal_profit <= 0.0 {
        Figure::Infinite
    } else {
        Figure::from(fixed_costs / marginal_profit)
    }
}

/// Revenue at the break-even volume.
///
/// An infinite volume stays infinite even at a unit price of zero, where the
/// naive product would be `NaN`.
pub fn break_even_revenue(
    fixed_costs: f64,
    unit_price: f64,
    variable_cost_per_unit: f64,
) -> Figure {
    match break_even_units(fixed_costs, unit_price, variable_cost_per_unit) {
        Figure::Finite(units) => Figure::from(units * unit_price),
        Figure::Infinite => Figure::Infinite,
    }
}

/// Both break-even figures for a validated cost structure.
pub fn break_even(business: &BusinessParameters) -> BreakEven {
    let (fixed, price, variable) = (
        business.fixed_costs(),
        business.unit_price(),
        business.variable_cost_per_unit(),
    );
    BreakEven {
        units: break_even_units(fixed, price, variable),
        revenue: break_even_revenue(fixed, price, variable),
    }
}

/// Return on ad spend, as a percentage.
///
/// With no spend, no revenue gives 0 and any revenue is unbounded.
pub fn roas(gross_revenue: f64, ad_spend: f64) -> Figure {
    if ad_spend == 0.0 {
        return if gross_revenue == 0.0 {
            Figure::Finite(0.0)
        } else {
            Figure::Infinite
        };
    }
    Figure::from(gross_revenue / ad_spend * 100.0)
}

/// Return on investment, as a percentage.
///
/// With no investment, no profit gives 0 and any profit is unbounded.
///
/// Note that the investment is subtracted from `profit` again. Reports call
/// this with `profit = revenue - spend`, so the result is
/// `(revenue - 2 * spend) / spend * 100`; a campaign that triples its spend
/// reports 100%, not 200%. Existing reports depend on this figure, so it is
/// kept as is.
pub fn roi(profit: f64, investment: f64) -> Figure {
    if investment == 0.0 {
        return if profit == 0.0 {
            Figure::Finite(0.0)
        } else {
            Figure::Infinite
        };
    }
    Figure::from((profit - investment) / investment * 100.0)
}
