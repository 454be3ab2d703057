use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::{error::entry::ValidationError, model::secret::Secret};

/// Subscription tier of a managed account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EntryKind {
    Premium,
    Basic,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::Basic => "Basic",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Premium" => Ok(Self::Premium),
            "Basic" => Ok(Self::Basic),
            other => Err(ValidationError::InvalidValue {
                field: "kind",
                reason: format!("unknown kind {:?}", other),
            }),
        }
    }
}

/// Whether an entry is currently active.
///
/// The stored labels are the German ones the data set has always used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EntryStatus {
    #[serde(rename = "Aktiv")]
    Active,
    #[serde(rename = "Inaktiv")]
    Inactive,
}

impl EntryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Aktiv",
            Self::Inactive => "Inaktiv",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Aktiv" => Ok(Self::Active),
            "Inaktiv" => Ok(Self::Inactive),
            other => Err(ValidationError::InvalidValue {
                field: "status",
                reason: format!("unknown status {:?}", other),
            }),
        }
    }
}

/// Whether the current period has been paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    #[serde(rename = "Gezahlt")]
    Paid,
    #[serde(rename = "Nicht gezahlt")]
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "Gezahlt",
            Self::Unpaid => "Nicht gezahlt",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Gezahlt" => Ok(Self::Paid),
            "Nicht gezahlt" => Ok(Self::Unpaid),
            other => Err(ValidationError::InvalidValue {
                field: "payment_status",
                reason: format!("unknown payment status {:?}", other),
            }),
        }
    }
}

/// Tagged state of an entry's extension request.
///
/// `Approved` and `Rejected` are terminal for the current request but behave
/// like `None` when a fresh request is raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionState {
    None,
    Pending,
    Approved,
    Rejected,
}

impl ExtensionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "none" => Ok(Self::None),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ValidationError::InvalidValue {
                field: "extension_state",
                reason: format!("unknown extension state {:?}", other),
            }),
        }
    }
}

/// A fully materialized entry as returned to API consumers.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EntryDto {
    pub id: i32,
    pub username: String,
    pub password: Secret,
    pub alias_notes: String,
    pub kind: EntryKind,
    pub status: EntryStatus,
    pub payment_status: PaymentStatus,
    pub owner: String,
    pub created_at: NaiveDateTime,
    pub valid_until: NaiveDateTime,
    pub admin_fee: Option<i32>,
    pub note: Option<String>,
    pub extension_state: ExtensionState,
    pub extension_decided_at: Option<NaiveDateTime>,
}

impl EntryDto {
    /// Converts a database model into a DTO.
    ///
    /// Fails when the stored enum labels are not recognized, which indicates
    /// data written outside the application's operations.
    pub fn from_model(model: entity::kontowart_entry::Model) -> Result<Self, ValidationError> {
        Ok(Self {
            id: model.id,
            username: model.username,
            password: Secret::new(model.password),
            alias_notes: model.alias_notes,
            kind: EntryKind::parse(&model.kind)?,
            status: EntryStatus::parse(&model.status)?,
            payment_status: PaymentStatus::parse(&model.payment_status)?,
            owner: model.owner,
            created_at: model.created_at,
            valid_until: model.valid_until,
            admin_fee: model.admin_fee,
            note: model.note,
            extension_state: ExtensionState::parse(&model.extension_state)?,
            extension_decided_at: model.extension_decided_at,
        })
    }
}

/// Fields for creating an entry.
///
/// Timestamps arrive as strings and are parsed with [`parse_timestamp`];
/// omitted optional fields fall back to the defaults documented per field.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EntryDraft {
    pub username: String,
    pub password: Secret,
    pub alias_notes: String,
    pub kind: EntryKind,
    /// Defaults to `Aktiv`.
    pub status: Option<EntryStatus>,
    /// Defaults to `Nicht gezahlt`.
    pub payment_status: Option<PaymentStatus>,
    /// Defaults to the creating actor; only administrators may set it.
    pub owner: Option<String>,
    /// Backdated creation timestamp for importing pre-existing subscribers;
    /// only administrators may set it.
    pub created_at: Option<String>,
    pub valid_until: String,
    /// Computed from creation date and expiry when omitted.
    pub admin_fee: Option<i32>,
    pub note: Option<String>,
}

/// Maps a field that is present in the payload to `Some`, keeping `null`
/// distinguishable from an absent field when paired with `#[serde(default)]`.
fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Partial update of an entry; absent fields are left unchanged.
///
/// The nullable fields take an explicit JSON `null` to clear the stored
/// value, which an absent field does not.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EntryPatch {
    pub username: Option<String>,
    pub password: Option<Secret>,
    pub alias_notes: Option<String>,
    pub kind: Option<EntryKind>,
    pub status: Option<EntryStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub valid_until: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub admin_fee: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "nullable_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<Option<String>>,
}

/// A granted extension as recorded in the append-only history.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtensionRecordDto {
    pub approval_date: NaiveDateTime,
    pub valid_until: NaiveDateTime,
}

impl From<entity::kontowart_extension_history::Model> for ExtensionRecordDto {
    fn from(model: entity::kontowart_extension_history::Model) -> Self {
        Self {
            approval_date: model.approval_date,
            valid_until: model.valid_until,
        }
    }
}

static TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a timestamp string from an API payload.
///
/// Accepts ISO-8601 date-times with either a `T` or space separator, and bare
/// dates which are taken as midnight.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = value.trim();

    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default());
    }

    Err(ValidationError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}
