//! Line item DTOs for create and list operations.

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::api::validation;
use crate::domain::NewLineItem;
use crate::error::GatewayError;

/// Request body for `POST /lineitems`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateLineItemRequest {
    /// Display name (2–50 letters, digits, spaces).
    pub name: Option<String>,
    /// Owning advertiser (2–10 letters or digits).
    pub advertiser_id: Option<String>,
    /// Amount charged per delivery event (0–50).
    #[schema(value_type = Option<String>)]
    pub bid: Option<Decimal>,
    /// Initial budget (bid–10 000).
    #[schema(value_type = Option<String>)]
    pub budget: Option<Decimal>,
    /// Target ad slot.
    pub placement: Option<String>,
    /// Category labels (at least one).
    pub categories: Option<Vec<String>>,
    /// Keyword labels (at least one).
    pub keywords: Option<Vec<String>>,
}

impl CreateLineItemRequest {
    /// Validates every field, in declaration order, and builds the domain
    /// spec.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ValidationFailed`] for the first bad field.
    pub fn into_new_line_item(self) -> Result<NewLineItem, GatewayError> {
        let name = validation::required_str("name", self.name)?;
        validation::name(&name)?;

        let advertiser_id = validation::required_str("advertiser_id", self.advertiser_id)?;
        validation::advertiser_id(&advertiser_id)?;

        let bid = validation::required("bid", self.bid)?;
        validation::bid(bid)?;

        let budget = validation::required("budget", self.budget)?;
        validation::budget(budget, bid)?;

        let placement = validation::required_str("placement", self.placement)?;
        validation::label("placement", &placement)?;

        let categories = validation::required("categories", self.categories)?;
        validation::labels("categories", &categories)?;

        let keywords = validation::required("keywords", self.keywords)?;
        validation::labels("keywords", &keywords)?;

        Ok(NewLineItem {
            name,
            advertiser_id,
            bid,
            budget,
            placement,
            categories,
            keywords,
        })
    }
}

/// Query parameters for `GET /lineitems`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LineItemListParams {
    /// Only return line items of this advertiser.
    pub advertiser_id: Option<String>,
    /// Only return line items targeting this placement.
    pub placement: Option<String>,
}

impl LineItemListParams {
    /// Validates the filters that are present, dropping blank ones.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ValidationFailed`] for a malformed filter.
    pub fn validated(self) -> Result<(Option<String>, Option<String>), GatewayError> {
        let advertiser_id = self.advertiser_id.filter(|a| !a.is_empty());
        if let Some(a) = &advertiser_id {
            validation::advertiser_id(a)?;
        }
        let placement = self.placement.filter(|p| !p.is_empty());
        if let Some(p) = &placement {
            validation::label("placement", p)?;
        }
        Ok((advertiser_id, placement))
    }
}
