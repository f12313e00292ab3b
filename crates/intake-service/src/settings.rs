//! Settings management.

use std::sync::Arc;

use tracing::info;

use intake_core::result::AppResult;
use intake_database::SettingsRepository;
use intake_entity::settings::Settings;

use crate::context::RequestContext;
use crate::sanitize::sanitize_text;

/// Reads and saves the moderation settings.
#[derive(Debug, Clone)]
pub struct SettingsService {
    settings: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }

    /// Current settings.
    pub async fn get(&self) -> AppResult<Settings> {
        self.settings.get().await
    }

    /// Replace the target base directory.
    ///
    /// Only text sanitization happens here; the path is validated against
    /// the trusted root each time it is used.
    pub async fn set(&self, ctx: &RequestContext, target_base_directory: &str) -> AppResult<Settings> {
        let settings = Settings {
            target_base_directory: sanitize_text(target_base_directory),
        };
        let saved = self.settings.set(&settings).await?;

        info!(
            target_base_directory = %saved.target_base_directory,
            user = ctx.actor(),
            "Settings updated"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;

    #[tokio::test]
    async fn test_set_then_get_returns_sanitized_value() {
        let fx = Fixture::new().await;
        let ctx = RequestContext::anonymous();

        let saved = fx
            .settings_service
            .set(&ctx, "  <em>media</em>/gallery\n")
            .await
            .unwrap();
        assert_eq!(saved.target_base_directory, "media/gallery");
        assert_eq!(fx.settings_service.get().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_defaults_to_empty() {
        let fx = Fixture::new().await;
        let settings = fx.settings_service.get().await.unwrap();
        assert!(!settings.has_target_base());
    }
}
