use std::sync::Arc;

use time::UtcOffset;

use crate::{domain::ports::inbound::TrackingService, templates::Templates};

#[derive(Clone)]
pub struct AppState {
    pub tracking: Arc<dyn TrackingService>,
    pub templates: Templates,
    /// Offset in which dates are shown and days are cut.
    pub offset: UtcOffset,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(
        tracking: Arc<dyn TrackingService>,
        templates: Templates,
        offset: UtcOffset,
        secure_cookies: bool,
    ) -> Self {
        Self {
            tracking,
            templates,
            offset,
            secure_cookies,
        }
    }
}
