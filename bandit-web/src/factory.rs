//! Composition root. The only place that picks concrete adapters.

use std::sync::Arc;

use bandit_client::BanditClient;

use crate::{
    adapters::outbound::bandit::BanditAdapter,
    app_state::AppState,
    config::Settings,
    domain::{services::TrackingServiceImpl, TimerRegistry},
    templates::Templates,
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("backend client: {0}")]
    Client(#[from] bandit_client::BanditError),
    #[error("templates: {0}")]
    Templates(#[from] tera::Error),
}

/// Wire the backend client, timers and templates into the app state.
pub fn app_state(settings: &Settings) -> Result<AppState, StartupError> {
    let client = BanditClient::new(&settings.backend.base_url, settings.backend.timeout())?;
    let offset = settings.display.offset();

    let service = TrackingServiceImpl::new(
        Arc::new(BanditAdapter::new(client)),
        TimerRegistry::new(settings.timer.period()),
        offset,
    );

    tracing::debug!(
        "backend at {}, days cut at UTC{}",
        settings.backend.base_url,
        offset
    );

    Ok(AppState::new(
        Arc::new(service),
        Templates::load()?,
        offset,
        settings.application.secure_cookies,
    ))
}
