//! Assembly of reports from a client's cost structure and campaign history.
//!
//! Two audiences are served. A client sees their own [`Report`], which
//! requires a complete cost structure and reports an unreachable break-even
//! point as infinite. An administrator sees every client at once: a
//! [`ClientSummary`] per client for export, and a [`ClientDetail`] for the
//! client being inspected, where an unreachable or incomplete break-even is
//! simply reported as unavailable.

use crate::ValidationError;
use crate::formulas::{break_even, roas, roi};
use crate::models::{
    BreakEvenEstimate, BusinessParameters, BusinessParametersDto, CampaignRecord, CampaignReport,
    ClientDetail, ClientOverview, ClientRecord, ClientSummary, Report,
};
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Attach ROAS and ROI to a campaign.
pub fn annotate<ClientId, CampaignId>(
    campaign: CampaignRecord<ClientId, CampaignId>,
) -> CampaignReport<ClientId, CampaignId> {
    let roas = roas(campaign.gross_revenue, campaign.ad_spend);
    let roi = roi(campaign.gross_revenue - campaign.ad_spend, campaign.ad_spend);
    CampaignReport {
        campaign,
        roas,
        roi,
    }
}

/// Build a client's own report.
///
/// `campaigns` are the client's campaigns in any order; the report lists them
/// most recent first.
///
/// # Errors
///
/// [`ValidationError::MissingBusinessData`] if any of the three business
/// fields has not been set, and [`ValidationError::InvalidNumericInput`] if
/// a stored amount is negative.
pub fn build_report<ClientId, CampaignId>(
    business: &BusinessParametersDto,
    campaigns: Vec<CampaignRecord<ClientId, CampaignId>>,
) -> Result<Report<ClientId, CampaignId>, ValidationError> {
    let business = BusinessParameters::try_from(*business)?;

    let mut campaigns = campaigns;
    // stable, so campaigns sharing a timestamp keep their relative order
    campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Report {
        break_even: break_even(&business),
        business,
        campaigns: campaigns.into_iter().map(annotate).collect(),
    })
}

/// The administrator's break-even estimate for a possibly-incomplete cost
/// structure.
///
/// Available only when every field is set (and valid) and the marginal
/// profit is strictly positive. This deliberately differs from
/// [`build_report`], which fails on missing data and reports a
/// non-positive margin as infinity.
pub fn estimate_break_even(business: &BusinessParametersDto) -> BreakEvenEstimate {
    BusinessParameters::try_from(*business)
        .ok()
        .filter(|business| business.marginal_profit() > 0.0)
        .map(|business| break_even(&business))
        .into()
}

/// Build the administrator's detail report for one client.
///
/// `campaigns` may contain campaigns of other clients; only those owned by
/// `client` are considered.
pub fn client_detail<'a, ClientId, CampaignId, I>(
    client: &ClientRecord<ClientId>,
    campaigns: I,
) -> ClientDetail<ClientId, CampaignId>
where
    ClientId: Clone + PartialEq + 'a,
    CampaignId: Clone + 'a,
    I: IntoIterator<Item = &'a CampaignRecord<ClientId, CampaignId>>,
{
    let campaigns: Vec<CampaignReport<ClientId, CampaignId>> = campaigns
        .into_iter()
        .filter(|campaign| campaign.client_id == client.id)
        .cloned()
        .map(annotate)
        .collect();

    let total_ad_spend = campaigns.iter().map(|c| c.campaign.ad_spend).sum();

    ClientDetail {
        client: ClientOverview {
            id: client.id.clone(),
            email: client.email.clone(),
            last_seen: client.last_seen,
            created_at: client.created_at,
            campaign_count: campaigns.len(),
            total_ad_spend,
        },
        break_even: estimate_break_even(&client.business),
        campaigns,
    }
}

#[derive(Default)]
struct Tally {
    count: usize,
    ad_spend: f64,
    gross_revenue: f64,
}

/// Summarize every client's campaigns, one row per client in input order.
///
/// Campaigns are matched to clients by id. A campaign whose owner is not
/// among `clients` (for instance, because the owner has since been removed)
/// contributes to no row. Business fields that were never set are reported
/// as zero.
pub fn summarize_clients<ClientId, CampaignId>(
    clients: &[ClientRecord<ClientId>],
    campaigns: &[CampaignRecord<ClientId, CampaignId>],
) -> Vec<ClientSummary>
where
    ClientId: Eq + Hash,
{
    let mut tallies: FxHashMap<&ClientId, Tally> = clients
        .iter()
        .map(|client| (&client.id, Tally::default()))
        .collect();

    for campaign in campaigns {
        if let Some(tally) = tallies.get_mut(&campaign.client_id) {
            tally.count += 1;
            tally.ad_spend += campaign.ad_spend;
            tally.gross_revenue += campaign.gross_revenue;
        }
    }

    clients
        .iter()
        .map(|client| {
            let tally = tallies.remove(&client.id).unwrap_or_default();
            ClientSummary {
                email: client.email.clone(),
                registration_date: client.created_at,
                last_seen: client.last_seen,
                campaign_count: tally.count,
                total_ad_spend: tally.ad_spend,
                total_gross_revenue: tally.gross_revenue,
                fixed_costs: client.business.fixed_costs.unwrap_or(0.0),
                variable_cost_per_unit: client.business.variable_cost_per_unit.unwrap_or(0.0),
                unit_price: client.business.unit_price.unwrap_or(0.0),
            }
        })
        .collect()
}
