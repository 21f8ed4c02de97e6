//! PostgreSQL implementation of settings repository.

use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::GlobalSettings;
use crate::domain::repositories::SettingsRepository;
use crate::error::AppError;

/// Raw `user_settings` row: one JSON document per section.
#[derive(sqlx::FromRow)]
struct SettingsRow {
    floating_buttons: Option<String>,
    redirect: Option<String>,
    counter: Option<String>,
    scripts: Option<String>,
}

impl SettingsRow {
    /// Parses every section on its own so one broken document only resets itself.
    fn into_settings(self, owner_id: &str) -> GlobalSettings {
        let document = json!({
            "floatingButtons": section(owner_id, "floating_buttons", self.floating_buttons),
            "redirect": section(owner_id, "redirect", self.redirect),
            "counter": section(owner_id, "counter", self.counter),
            "scripts": section(owner_id, "scripts", self.scripts),
        });

        serde_json::from_value(document).unwrap_or_else(|e| {
            warn!(owner_id, "Falling back to default settings: {}", e);
            GlobalSettings::default()
        })
    }
}

fn section(owner_id: &str, name: &str, raw: Option<String>) -> Value {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Value::Null;
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(owner_id, section = name, "Ignoring malformed settings JSON: {}", e);
        Value::Null
    })
}

/// PostgreSQL repository for account settings.
pub struct PgSettingsRepository {
    pool: Arc<PgPool>,
}

impl PgSettingsRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Option<GlobalSettings>, AppError> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT floating_buttons, redirect, counter, scripts
            FROM user_settings
            WHERE id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| r.into_settings(owner_id)))
    }
}
