//! Factory functions for entry fixtures.
//!
//! Each function returns an `ActiveModel` with standard test values so individual
//! tests only override the fields they care about.

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::ActiveValue;

/// An active, paid entry owned by `owner`, valid for another 60 days.
pub fn entry(owner: &str) -> entity::kontowart_entry::ActiveModel {
    let now = Utc::now().naive_utc();

    entity::kontowart_entry::ActiveModel {
        username: ActiveValue::Set(format!("{}@example.com", owner.to_lowercase())),
        password: ActiveValue::Set("hunter2".to_string()),
        alias_notes: ActiveValue::Set(format!("{}'s account", owner)),
        kind: ActiveValue::Set("Premium".to_string()),
        status: ActiveValue::Set("Aktiv".to_string()),
        payment_status: ActiveValue::Set("Gezahlt".to_string()),
        owner: ActiveValue::Set(owner.to_string()),
        created_at: ActiveValue::Set(now),
        valid_until: ActiveValue::Set(now + Duration::days(60)),
        admin_fee: ActiveValue::Set(Some(30)),
        note: ActiveValue::Set(None),
        extension_state: ActiveValue::Set("none".to_string()),
        extension_decided_at: ActiveValue::Set(None),
        ..Default::default()
    }
}

/// An entry whose validity ran out but which still reads active and paid,
/// exactly the shape the expiry sweep is meant to correct.
pub fn expired_entry(owner: &str) -> entity::kontowart_entry::ActiveModel {
    let mut model = entry(owner);
    let now = Utc::now().naive_utc();

    model.created_at = ActiveValue::Set(now - Duration::days(90));
    model.valid_until = ActiveValue::Set(now - Duration::days(1));
    model
}

/// An entry with the given expiry timestamp.
pub fn entry_valid_until(
    owner: &str,
    valid_until: NaiveDateTime,
) -> entity::kontowart_entry::ActiveModel {
    let mut model = entry(owner);

    model.valid_until = ActiveValue::Set(valid_until);
    model
}

/// An entry with a pending extension request.
pub fn entry_with_pending_request(owner: &str) -> entity::kontowart_entry::ActiveModel {
    let mut model = entry(owner);
    let now = Utc::now().naive_utc();

    model.valid_until = ActiveValue::Set(now + Duration::days(10));
    model.extension_state = ActiveValue::Set("pending".to_string());
    model
}
