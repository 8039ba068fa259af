//! Winning ad query DTOs.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::validation;
use crate::error::GatewayError;

/// Query parameters for `GET /ads`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdQueryParams {
    /// Ad slot being filled.
    pub placement: Option<String>,
    /// Category of the page or user context.
    pub category: Option<String>,
    /// Keyword of the page or user context.
    pub keyword: Option<String>,
}

/// A validated auction query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdQuery {
    /// Ad slot being filled.
    pub placement: String,
    /// Requested category.
    pub category: String,
    /// Requested keyword.
    pub keyword: String,
}

impl AdQueryParams {
    /// Checks that all three labels are present and well formed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ValidationFailed`] for the first bad field.
    pub fn validated(self) -> Result<AdQuery, GatewayError> {
        let placement = validation::required_str("placement", self.placement)?;
        validation::label("placement", &placement)?;
        let category = validation::required_str("category", self.category)?;
        validation::label("category", &category)?;
        let keyword = validation::required_str("keyword", self.keyword)?;
        validation::label("keyword", &keyword)?;
        Ok(AdQuery {
            placement,
            category,
            keyword,
        })
    }
}
