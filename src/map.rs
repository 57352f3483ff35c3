//! Map click position store
//!
//! Stands in for a map view: the console's `click` builtin records the
//! coordinate that guided commands without an explicit position fly to.

use crate::command::ClickSource;
use async_trait::async_trait;
use gcs_shared::GeoPoint;
use tokio::sync::RwLock;
use tracing::debug;

/// Last clicked map coordinate
#[derive(Default)]
pub struct MapClicks {
    last: RwLock<Option<GeoPoint>>,
}

impl MapClicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click
    pub async fn click(&self, point: GeoPoint) {
        debug!("[MAP] Click at {}", point);
        *self.last.write().await = Some(point);
    }
}

#[async_trait]
impl ClickSource for MapClicks {
    async fn click_position(&self) -> Option<GeoPoint> {
        *self.last.read().await
    }
}
