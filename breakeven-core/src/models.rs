mod business;
pub use business::{BusinessParameters, BusinessParametersDto};

mod campaign;
pub use campaign::{CampaignData, CampaignDataDto, CampaignRecord};

mod client;
pub use client::{ClientRecord, Credentials, Identity, Role, UnknownRole};

mod figure;
pub use figure::{Figure, INFINITY_MARKER};

mod report;
pub use report::{
    BreakEven, BreakEvenEstimate, CampaignReport, ClientDetail, ClientOverview, ClientSummary,
    Report,
};

// schemars has no built-in support for the time crate, so timestamps are
// described by hand wherever they appear in a model.

#[cfg(feature = "schemars")]
pub(crate) fn datetime_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "string",
        "format": "date-time",
    })
}

#[cfg(feature = "schemars")]
pub(crate) fn optional_datetime_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": ["string", "null"],
        "format": "date-time",
    })
}
