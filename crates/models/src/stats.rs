use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-project time series. One record per project, upserted as a whole;
/// individual series entries are replaced by label, never appended twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStats {
    pub project_id: Uuid,
    #[serde(default)]
    pub streams: Vec<SeriesPoint>,
    #[serde(default)]
    pub revenue: Vec<SeriesPoint>,
    #[serde(default)]
    pub followers: Vec<SeriesPoint>,
    #[serde(default)]
    pub media_mentions: Vec<SeriesPoint>,
    pub updated_at: DateTime<Utc>,
}

/// A labeled data point: label is a month, date or platform name
/// depending on the metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Streams,
    Revenue,
    Followers,
    MediaMentions,
}

impl ProjectStats {
    pub const TABLE: &'static str = "project_stats";

    pub fn empty(project_id: Uuid) -> Self {
        Self {
            project_id,
            streams: Vec::new(),
            revenue: Vec::new(),
            followers: Vec::new(),
            media_mentions: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn series(&self, metric: Metric) -> &[SeriesPoint] {
        match metric {
            Metric::Streams => &self.streams,
            Metric::Revenue => &self.revenue,
            Metric::Followers => &self.followers,
            Metric::MediaMentions => &self.media_mentions,
        }
    }

    fn series_mut(&mut self, metric: Metric) -> &mut Vec<SeriesPoint> {
        match metric {
            Metric::Streams => &mut self.streams,
            Metric::Revenue => &mut self.revenue,
            Metric::Followers => &mut self.followers,
            Metric::MediaMentions => &mut self.media_mentions,
        }
    }

    /// Replace the value of an existing point with the same label, or
    /// append a new point. Upsert-by-label, not an append-only log.
    pub fn upsert_point(&mut self, metric: Metric, label: &str, value: f64) {
        let series = self.series_mut(metric);
        match series.iter_mut().find(|p| p.label == label) {
            Some(point) => point.value = value,
            None => series.push(SeriesPoint {
                label: label.to_string(),
                value,
            }),
        }
        self.updated_at = Utc::now();
    }
}
