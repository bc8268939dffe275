use atelier_config::Settings;

use crate::generate::InsightGenerator;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub generator: InsightGenerator,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let generator = InsightGenerator::new(
            settings.insight.api_key.clone(),
            settings.insight.model.clone(),
            settings.insight.max_tokens,
        );
        Self {
            settings,
            generator,
        }
    }
}
