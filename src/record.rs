//! Saved comparison records
//!
//! A record is created once when the user saves a comparison. Afterwards only
//! the metrics, previous metrics and last-checked time change (via recheck),
//! plus the user-owned notes and feedback.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::comparison::{ComparisonClassifier, ComparisonMetrics};
use crate::{ColorData, MatchError, Result};

/// Reference color with the user's label for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub color: ColorData,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, color: ColorData) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// User verdict on a saved comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Like,
    Dislike,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Like => "like",
            Feedback::Dislike => "dislike",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feedback {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "like" => Ok(Feedback::Like),
            "dislike" => Ok(Feedback::Dislike),
            other => Err(MatchError::invalid_input(
                "feedback",
                format!("expected like or dislike, got {:?}", other),
            )),
        }
    }
}

/// Persisted comparison of a sample against two named references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub title: String,
    pub reference_a: NamedColor,
    pub reference_b: NamedColor,
    pub sample: ColorData,
    pub metrics: ComparisonMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_metrics: Option<ComparisonMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    /// Encoded thumbnail (e.g. a data URL), opaque to this crate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ComparisonRecord {
    /// Create a new record with a fresh id
    pub fn new(
        title: impl Into<String>,
        reference_a: NamedColor,
        reference_b: NamedColor,
        sample: ColorData,
        metrics: ComparisonMetrics,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            title: title.into(),
            reference_a,
            reference_b,
            sample,
            metrics,
            previous_metrics: None,
            last_checked_at: None,
            notes: String::new(),
            feedback: None,
            thumbnail: None,
        }
    }

    /// Rerun the classifier on the stored colors
    ///
    /// The current metrics move to `previous_metrics` and `last_checked_at`
    /// is set to `checked_at`.
    pub fn recheck(
        &mut self,
        classifier: &ComparisonClassifier,
        checked_at: DateTime<Utc>,
    ) -> Result<()> {
        let metrics = classifier.classify(
            &self.sample,
            &self.reference_a.color,
            &self.reference_b.color,
        )?;
        self.previous_metrics = Some(std::mem::replace(&mut self.metrics, metrics));
        self.last_checked_at = Some(checked_at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::comparison::SeparationThresholds;

    fn record() -> ComparisonRecord {
        let red = ColorData::from_rgb(Rgb::new(255.0, 0.0, 0.0)).unwrap();
        let blue = ColorData::from_rgb(Rgb::new(0.0, 0.0, 255.0)).unwrap();
        let sample = ColorData::from_rgb(Rgb::new(200.0, 30.0, 60.0)).unwrap();
        let metrics = crate::classify(&sample, &red, &blue).unwrap();
        ComparisonRecord::new(
            "Lipstick",
            NamedColor::new("Red", red),
            NamedColor::new("Blue", blue),
            sample,
            metrics,
            Utc::now(),
        )
    }

    #[test]
    fn test_feedback_parse() {
        assert_eq!("like".parse::<Feedback>().unwrap(), Feedback::Like);
        assert_eq!(" Dislike ".parse::<Feedback>().unwrap(), Feedback::Dislike);
        assert!("meh".parse::<Feedback>().is_err());
    }

    #[test]
    fn test_new_record_has_no_history() {
        let record = record();
        assert!(record.previous_metrics.is_none());
        assert!(record.last_checked_at.is_none());
        assert!(record.notes.is_empty());
    }

    #[test]
    fn test_recheck_moves_metrics_to_previous() {
        let mut record = record();
        let original = record.metrics;

        let strict = ComparisonClassifier::with_thresholds(SeparationThresholds {
            weak: 90.0,
            moderate: 95.0,
            strong: 99.0,
        })
        .unwrap();
        let checked_at = Utc::now();
        record.recheck(&strict, checked_at).unwrap();

        assert_eq!(record.previous_metrics, Some(original));
        assert_eq!(record.last_checked_at, Some(checked_at));
        assert_eq!(record.metrics.d_a, original.d_a);
        assert_ne!(record.metrics.separation_label, original.separation_label);
    }

    #[test]
    fn test_record_json_field_names() {
        let mut record = record();
        record.feedback = Some(Feedback::Like);
        let json = serde_json::to_value(&record).unwrap();

        assert!(json.get("referenceA").is_some());
        assert!(json["metrics"].get("towardB").is_some());
        assert_eq!(json["feedback"], "like");
        assert!(json.get("previousMetrics").is_none());

        let back: ComparisonRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
