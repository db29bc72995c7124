//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use callboard::analytics::{
    AnalyticsReport, AnalyticsSummary, DailyAvgDuration, DailyCount, HourlyCount, WeekdayCount,
};
use callboard::{CallRecord, Country, Sentiment};

use crate::models::CreateCallRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::calls::create_call,
        super::analytics::get_analytics,
    ),
    components(schemas(
        // Call models
        CreateCallRequest,
        CallRecord,
        Sentiment,
        Country,
        // Analytics models
        AnalyticsReport,
        AnalyticsSummary,
        DailyCount,
        DailyAvgDuration,
        HourlyCount,
        WeekdayCount,
    )),
    tags(
        (name = "Calls", description = "Call record ingestion"),
        (name = "Analytics", description = "Aggregated dashboard views")
    )
)]
pub struct ApiDoc;
