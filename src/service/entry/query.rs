//! Derived views over the entry collection.
//!
//! Pure functions over a snapshot: visibility scoping, conjunctive filters,
//! sorting, and aggregate statistics. Nothing here mutates the collection.

use std::collections::BTreeMap;

use crate::model::{
    api::{EntryFilterDto, EntryStatsDto, OwnerStatsDto, SortDirection},
    entry::{EntryDto, EntryStatus, ExtensionState, PaymentStatus},
    user::Actor,
};

/// Entries owned by this username never count towards per-owner fee totals.
const ADMIN_OWNER: &str = "Admin";

/// Filter and sort parameters for the entry listing.
#[derive(Clone, Debug, Default)]
pub struct EntryQuery {
    pub search: Option<String>,
    pub status: Option<EntryStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub owner: Option<String>,
    pub sort: SortDirection,
}

impl From<EntryFilterDto> for EntryQuery {
    fn from(dto: EntryFilterDto) -> Self {
        Self {
            search: dto.search,
            status: dto.status,
            payment_status: dto.payment_status,
            owner: dto.owner,
            sort: dto.sort.unwrap_or_default(),
        }
    }
}

impl EntryQuery {
    /// Applies visibility scoping, the configured filters, and the sort.
    ///
    /// Non-admin viewers only ever see their own entries; the owner filter is
    /// an admin affordance and ignored for everyone else. All filters are
    /// conjunctive. Sorting compares the parsed creation timestamps, not
    /// their string representation.
    pub fn apply(&self, entries: Vec<EntryDto>, viewer: &Actor) -> Vec<EntryDto> {
        let search = self
            .search
            .as_ref()
            .map(|needle| needle.to_lowercase())
            .filter(|needle| !needle.is_empty());

        let mut entries: Vec<EntryDto> = entries
            .into_iter()
            .filter(|entry| viewer.is_admin() || entry.owner == viewer.username)
            .filter(|entry| match &search {
                Some(needle) => entry.alias_notes.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|entry| self.status.is_none_or(|status| entry.status == status))
            .filter(|entry| {
                self.payment_status
                    .is_none_or(|payment| entry.payment_status == payment)
            })
            .filter(|entry| match &self.owner {
                Some(owner) if viewer.is_admin() => &entry.owner == owner,
                _ => true,
            })
            .collect();

        entries.sort_by(|a, b| match self.sort {
            SortDirection::Asc => a.created_at.cmp(&b.created_at),
            SortDirection::Desc => b.created_at.cmp(&a.created_at),
        });

        entries
    }
}

/// Computes aggregate statistics over a (scoped) entry collection.
///
/// Missing admin fees count as zero. Per-owner aggregates skip entries owned
/// by the administrator account, which never carry a real fee obligation.
pub fn statistics(entries: &[EntryDto]) -> EntryStatsDto {
    let total = entries.len();
    let active = entries
        .iter()
        .filter(|entry| entry.status == EntryStatus::Active)
        .count();
    let paid = entries
        .iter()
        .filter(|entry| entry.payment_status == PaymentStatus::Paid)
        .count();
    let fee_sum = entries
        .iter()
        .map(|entry| i64::from(entry.admin_fee.unwrap_or(0)))
        .sum();

    let mut owners: BTreeMap<&str, (usize, i64)> = BTreeMap::new();
    for entry in entries {
        if entry.owner == ADMIN_OWNER {
            continue;
        }

        let stats = owners.entry(&entry.owner).or_default();
        stats.0 += 1;
        stats.1 += i64::from(entry.admin_fee.unwrap_or(0));
    }

    let owners = owners
        .into_iter()
        .map(|(owner, (count, fee_sum))| OwnerStatsDto {
            owner: owner.to_string(),
            count,
            fee_sum,
        })
        .collect();

    let pending_extensions = entries
        .iter()
        .filter(|entry| entry.extension_state == ExtensionState::Pending)
        .cloned()
        .collect();

    EntryStatsDto {
        total,
        active,
        paid,
        fee_sum,
        owners,
        pending_extensions,
    }
}
