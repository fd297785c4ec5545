use crate::domain::model::{EntityInfo, HealthMetrics};
use crate::domain::ports::InfoBoxService;
use crate::utils::error::KgError;
use std::sync::Arc;

pub struct EntityInfoController {
    service: Arc<dyn InfoBoxService>,
    pub entity_info: Option<EntityInfo>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl EntityInfoController {
    pub fn new(service: Arc<dyn InfoBoxService>) -> Self {
        Self {
            service,
            entity_info: None,
            is_loading: false,
            error: None,
        }
    }

    pub async fn fetch_entity_info(&mut self, entity_id: &str) {
        if entity_id.is_empty() {
            return;
        }
        self.begin();
        let result = self.service.entity_info(entity_id).await;
        self.finish(result, "Failed to fetch entity info");
    }

    pub async fn fetch_entity_by_label(&mut self, label: &str) {
        if label.is_empty() {
            return;
        }
        self.begin();
        let result = self.service.entity_by_label(label).await;
        self.finish(result, "Failed to fetch entity by label");
    }

    pub fn clear(&mut self) {
        self.entity_info = None;
        self.error = None;
    }

    fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn finish(&mut self, result: Result<EntityInfo, KgError>, fallback: &str) {
        match result {
            Ok(info) => {
                tracing::debug!("Loaded entity {} ({})", info.label, info.id);
                self.entity_info = Some(info);
            }
            Err(e) => {
                let message = e.user_friendly_message();
                self.error = Some(if message.is_empty() {
                    fallback.to_string()
                } else {
                    message
                });
                self.entity_info = None;
            }
        }
        self.is_loading = false;
    }
}

/// Info panel that can be opened from anywhere (search result, map marker,
/// related entity link) and tracks the health-metrics year being viewed.
pub struct InfoSheet {
    entity: EntityInfoController,
    pub is_open: bool,
    selected_year: Option<i32>,
}

impl InfoSheet {
    pub fn new(service: Arc<dyn InfoBoxService>) -> Self {
        Self {
            entity: EntityInfoController::new(service),
            is_open: false,
            selected_year: None,
        }
    }

    pub async fn open(&mut self, id_or_label: &str, use_label: bool) {
        self.is_open = true;
        if use_label {
            self.entity.fetch_entity_by_label(id_or_label).await;
        } else {
            self.entity.fetch_entity_info(id_or_label).await;
        }
        // default to the most recent year
        self.selected_year = self
            .entity
            .entity_info
            .as_ref()
            .and_then(|info| info.health_metrics.as_ref())
            .and_then(|m| m.available_years.first().copied());
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.selected_year = None;
        self.entity.clear();
    }

    pub fn entity_info(&self) -> Option<&EntityInfo> {
        self.entity.entity_info.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.entity.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.entity.is_loading
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.selected_year
    }

    pub fn available_years(&self) -> &[i32] {
        self.entity_info()
            .and_then(|info| info.health_metrics.as_ref())
            .map(|m| m.available_years.as_slice())
            .unwrap_or(&[])
    }

    /// Returns false, and keeps the current year, when `year` has no data.
    pub fn select_year(&mut self, year: i32) -> bool {
        if self.available_years().contains(&year) {
            self.selected_year = Some(year);
            true
        } else {
            false
        }
    }

    pub fn filtered_metrics(&self) -> Option<HealthMetrics> {
        let metrics = self.entity_info()?.health_metrics.as_ref()?;
        let year = self.selected_year?;
        Some(metrics.for_year(year))
    }
}
