use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::entry::{EntryDto, EntryStatus, PaymentStatus};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Sort direction for the entry listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Optional, conjunctive filters for the entry listing.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct EntryFilterDto {
    /// Case-insensitive substring match on the alias/notes label.
    pub search: Option<String>,
    pub status: Option<EntryStatus>,
    pub payment_status: Option<PaymentStatus>,
    /// Exact owner match; honored for administrators only.
    pub owner: Option<String>,
    /// Sort by creation timestamp, ascending by default.
    pub sort: Option<SortDirection>,
}

/// Aggregate statistics over the visible entry collection.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EntryStatsDto {
    pub total: usize,
    pub active: usize,
    pub paid: usize,
    /// Sum of admin fees, absent fees counted as zero.
    pub fee_sum: i64,
    /// Per-owner aggregates, excluding administrator-owned entries.
    pub owners: Vec<OwnerStatsDto>,
    /// Entries with an outstanding extension request.
    pub pending_extensions: Vec<EntryDto>,
}

/// Entry count and fee sum for a single owner.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct OwnerStatsDto {
    pub owner: String,
    pub count: usize,
    pub fee_sum: i64,
}

/// Request body for approving an extension.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApproveExtensionDto {
    /// The new expiry timestamp; must be strictly in the future.
    pub valid_until: String,
}

/// Query parameters for the destructive delete endpoint.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
pub struct DeleteEntryParams {
    /// Deletion is irreversible and only proceeds when this is `true`.
    #[serde(default)]
    pub confirm: bool,
}
