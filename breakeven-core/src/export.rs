use crate::models::ClientSummary;
use time::{OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description};

/// Column headers of the client export, in order.
pub const HEADERS: [&str; 9] = [
    "Email",
    "RegistrationDate",
    "LastSeen",
    "CampaignCount",
    "TotalAdSpend",
    "TotalGrossRevenue",
    "FixedCosts",
    "VariableCostPerUnit",
    "UnitPrice",
];

/// Rendered in place of a last login for clients that never logged in.
pub const NEVER_SEEN: &str = "—";

/// Dates are written day first, as in `31.12.2024`, in UTC.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[day].[month].[year]");

/// Errors that can occur while rendering an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer failed
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the CSV writer failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A date could not be formatted
    #[error("date formatting error: {0}")]
    Format(#[from] time::error::Format),

    /// The rendered document is not valid UTF-8
    #[error("encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

fn format_date(value: OffsetDateTime) -> Result<String, time::error::Format> {
    value.to_offset(UtcOffset::UTC).date().format(DATE_FORMAT)
}

/// Write the client export to `writer`.
///
/// Every field, header included, is wrapped in double quotes; quotes inside a
/// field are doubled. Amounts are written in their shortest exact form
/// (`15`, `15.5`).
pub fn write_csv<W: std::io::Write>(summaries: &[ClientSummary], writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(HEADERS)?;

    for summary in summaries {
        let last_seen = match summary.last_seen {
            Some(last_seen) => format_date(last_seen)?,
            None => NEVER_SEEN.to_owned(),
        };
        wtr.write_record([
            summary.email.clone(),
            format_date(summary.registration_date)?,
            last_seen,
            summary.campaign_count.to_string(),
            summary.total_ad_spend.to_string(),
            summary.total_gross_revenue.to_string(),
            summary.fixed_costs.to_string(),
            summary.variable_cost_per_unit.to_string(),
            summary.unit_price.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render the client export as a string.
pub fn to_csv(summaries: &[ClientSummary]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(summaries, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn summary(email: &str, last_seen: Option<OffsetDateTime>) -> ClientSummary {
        ClientSummary {
            email: email.to_owned(),
            registration_date: datetime!(2024-02-09 23:30 UTC),
            last_seen,
            campaign_count: 2,
            total_ad_spend: 15.0,
            total_gross_revenue: 25.5,
            fixed_costs: 1000.0,
            variable_cost_per_unit: 30.0,
            unit_price: 50.0,
        }
    }

    #[test]
    fn test_header_only() {
        let csv = to_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "\"Email\",\"RegistrationDate\",\"LastSeen\",\"CampaignCount\",\"TotalAdSpend\",\"TotalGrossRevenue\",\"FixedCosts\",\"VariableCostPerUnit\",\"UnitPrice\"\n"
        );
    }

    #[test]
    fn test_rows() {
        let csv = to_csv(&[
            summary("a@example.com", Some(datetime!(2024-03-01 10:00 +03:00))),
            summary("b@example.com", None),
        ])
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "\"a@example.com\",\"09.02.2024\",\"01.03.2024\",\"2\",\"15\",\"25.5\",\"1000\",\"30\",\"50\""
        );
        assert_eq!(
            lines[2],
            "\"b@example.com\",\"09.02.2024\",\"—\",\"2\",\"15\",\"25.5\",\"1000\",\"30\",\"50\""
        );
    }

    #[test]
    fn test_dates_are_utc() {
        let csv = to_csv(&[summary("a@example.com", Some(datetime!(2024-03-01 01:00 +03:00)))]).unwrap();
        assert!(csv.lines().nth(1).unwrap().contains("\"29.02.2024\""));
    }

    #[test]
    fn test_non_ascii_fields_survive() {
        let csv = to_csv(&[summary("jürgen@example.com", None)]).unwrap();
        assert!(csv.contains("\"jürgen@example.com\",\"09.02.2024\",\"—\""));
    }

    #[test]
    fn test_encoding_errors_are_reported() {
        let err = String::from_utf8(vec![0xff]).map_err(ExportError::from).unwrap_err();
        assert!(matches!(err, ExportError::Encoding(_)));
        assert!(err.to_string().starts_with("encoding error"));
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let csv = to_csv(&[summary("odd\"name@example.com", None)]).unwrap();
        assert!(csv.contains("\"odd\"\"name@example.com\""));
    }
}
