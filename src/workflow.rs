//! Use cases tying the engine to the repository
//!
//! Each function takes fully materialized inputs and an explicit repository,
//! calls the pure engine and hands the result on. Nothing here blocks on
//! anything but the repository itself.

use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use image::RgbaImage;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::comparison::{ComparisonClassifier, ComparisonMetrics};
use crate::config::MatchConfig;
use crate::image_loader::{crop_region, Selection};
use crate::interchange;
use crate::record::{ComparisonRecord, Feedback, NamedColor};
use crate::repository::ComparisonRepository;
use crate::{ColorData, MatchError, Result};

/// Sample an RGBA buffer into color data (median color, mean kept alongside)
pub fn capture_color(pixels: &[u8], width: u32, height: u32) -> Result<ColorData> {
    let color = ColorData::from_region(pixels, width, height)?;
    debug!(hex = %color.hex, width, height, "color captured");
    Ok(color)
}

/// Crop `selection` out of a still image and capture its color
///
/// # Errors
///
/// - `MatchError::SelectionTooSmall` below the configured minimum
/// - `MatchError::SelectionOutOfBounds` if the selection leaves the image
pub fn capture_from_image(
    image: &RgbaImage,
    selection: Selection,
    config: &MatchConfig,
) -> Result<ColorData> {
    let (min_width, min_height) = (config.selection.min_width, config.selection.min_height);
    if let Err(e) = selection.ensure_min_size(min_width, min_height) {
        warn!(?selection, "selection rejected: {}", e);
        return Err(e);
    }
    let region = crop_region(image, selection)?;
    let color = ColorData::from_sample(region.sample()?)?;
    debug!(hex = %color.hex, ?selection, "color captured from image");
    Ok(color)
}

/// Slot being filled in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    ReferenceA,
    ReferenceB,
    Sample,
}

/// In-progress comparison: two named references and a sample
///
/// Each capture replaces the slot's color; a slot is never edited in place.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSession {
    reference_a: Option<NamedColor>,
    reference_b: Option<NamedColor>,
    sample: Option<ColorData>,
}

impl ComparisonSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reference_a(&mut self, name: impl Into<String>, color: ColorData) {
        self.reference_a = Some(NamedColor::new(name, color));
    }

    pub fn set_reference_b(&mut self, name: impl Into<String>, color: ColorData) {
        self.reference_b = Some(NamedColor::new(name, color));
    }

    pub fn set_sample(&mut self, color: ColorData) {
        self.sample = Some(color);
    }

    /// Drop the color held in `slot`
    pub fn clear(&mut self, slot: Slot) {
        match slot {
            Slot::ReferenceA => self.reference_a = None,
            Slot::ReferenceB => self.reference_b = None,
            Slot::Sample => self.sample = None,
        }
    }

    pub fn reference_a(&self) -> Option<&NamedColor> {
        self.reference_a.as_ref()
    }

    pub fn reference_b(&self) -> Option<&NamedColor> {
        self.reference_b.as_ref()
    }

    pub fn sample(&self) -> Option<&ColorData> {
        self.sample.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.reference_a.is_some() && self.reference_b.is_some() && self.sample.is_some()
    }

    fn parts(&self) -> Result<(&NamedColor, &NamedColor, &ColorData)> {
        let missing = |what: &str| MatchError::IncompleteComparison {
            missing: what.to_string(),
        };
        Ok((
            self.reference_a.as_ref().ok_or_else(|| missing("reference A"))?,
            self.reference_b.as_ref().ok_or_else(|| missing("reference B"))?,
            self.sample.as_ref().ok_or_else(|| missing("sample"))?,
        ))
    }

    /// Classify the sample against both references
    ///
    /// # Errors
    ///
    /// Returns `MatchError::IncompleteComparison` until all three slots are set.
    pub fn metrics(&self, classifier: &ComparisonClassifier) -> Result<ComparisonMetrics> {
        let (a, b, sample) = self.parts()?;
        classifier.classify(sample, &a.color, &b.color)
    }

    /// Build a record for the current comparison with a fresh id
    pub fn to_record(
        &self,
        classifier: &ComparisonClassifier,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<ComparisonRecord> {
        let metrics = self.metrics(classifier)?;
        let (a, b, sample) = self.parts()?;
        Ok(ComparisonRecord::new(
            title,
            a.clone(),
            b.clone(),
            sample.clone(),
            metrics,
            created_at,
        ))
    }
}

/// Persist a new or edited record
pub fn save_comparison(
    repo: &mut dyn ComparisonRepository,
    record: ComparisonRecord,
) -> Result<Uuid> {
    let id = record.id;
    repo.save(record)?;
    info!(%id, "comparison stored");
    Ok(id)
}

/// Re-evaluate a stored comparison with `classifier`
///
/// The stored metrics move to `previous_metrics`, `last_checked_at` becomes
/// `checked_at` and the updated record is saved and returned.
pub fn recheck(
    repo: &mut dyn ComparisonRepository,
    id: Uuid,
    classifier: &ComparisonClassifier,
    checked_at: DateTime<Utc>,
) -> Result<ComparisonRecord> {
    let mut record = repo.get(id)?;
    record.recheck(classifier, checked_at)?;
    repo.save(record.clone())?;

    if let Some(previous) = &record.previous_metrics {
        if previous.separation_label != record.metrics.separation_label {
            info!(
                %id,
                from = %previous.separation_label,
                to = %record.metrics.separation_label,
                "recheck changed separation label"
            );
        }
    }
    Ok(record)
}

/// Set or clear the user's verdict on a stored comparison
pub fn set_feedback(
    repo: &mut dyn ComparisonRepository,
    id: Uuid,
    feedback: Option<Feedback>,
) -> Result<ComparisonRecord> {
    let mut record = repo.get(id)?;
    record.feedback = feedback;
    repo.save(record.clone())?;
    debug!(%id, ?feedback, "feedback updated");
    Ok(record)
}

/// Replace the notes of a stored comparison
pub fn set_notes(
    repo: &mut dyn ComparisonRepository,
    id: Uuid,
    notes: impl Into<String>,
) -> Result<ComparisonRecord> {
    let mut record = repo.get(id)?;
    record.notes = notes.into();
    repo.save(record.clone())?;
    debug!(%id, "notes updated");
    Ok(record)
}

/// Export every stored record as CSV
pub fn export_all_csv<W: Write>(repo: &dyn ComparisonRepository, writer: W) -> Result<usize> {
    let records = repo.get_all()?;
    interchange::export_csv(&records, writer)?;
    Ok(records.len())
}

/// Export every stored record as a JSON array
pub fn export_all_json<W: Write>(repo: &dyn ComparisonRepository, writer: W) -> Result<usize> {
    let records = repo.get_all()?;
    interchange::export_json(&records, writer)?;
    Ok(records.len())
}

/// Import a JSON array of records into the repository
pub fn import_all_json<R: Read>(repo: &mut dyn ComparisonRepository, reader: R) -> Result<usize> {
    interchange::import_json(repo, reader)
}
