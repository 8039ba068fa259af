//! OpenAPI document covering every REST endpoint.

use utoipa::OpenApi;

use super::handlers::{ad, line_item, system, tracking};

/// Generated OpenAPI document, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "ad-auction-gateway",
        description = "Ranks winning ads per placement and charges line item budgets for delivery events."
    ),
    paths(
        system::health_handler,
        system::category_weights_handler,
        line_item::create_line_item,
        line_item::list_line_items,
        line_item::get_line_item,
        ad::get_winning_ads,
        tracking::track_event,
        tracking::list_events,
    ),
    tags(
        (name = "System", description = "Health and configuration"),
        (name = "Line Items", description = "Campaign management"),
        (name = "Ads", description = "Winning ad auctions"),
        (name = "Tracking", description = "Delivery events and budget charging"),
    )
)]
pub struct ApiDoc;
