use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A category of detection condition the engine tracks.
///
/// Each kind can be independently enabled or disabled from the presentation
/// layer; disabled kinds freeze their trackers entirely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SignalKind {
    PersonAbsence,
    PhoneVisible,
    Drowsiness,
}

impl SignalKind {
    pub const ALL: [SignalKind; 3] = [
        SignalKind::PersonAbsence,
        SignalKind::PhoneVisible,
        SignalKind::Drowsiness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::PersonAbsence => "PersonAbsence",
            SignalKind::PhoneVisible => "PhoneVisible",
            SignalKind::Drowsiness => "Drowsiness",
        }
    }

    /// Maps a raw detector result onto this kind's violation predicate.
    ///
    /// The perception source reports what it *saw* (person seen, phone seen,
    /// drowsy face seen). Person absence violates when the person was not
    /// seen; the other kinds violate when their target was seen.
    pub fn is_violation(&self, detected: bool) -> bool {
        match self {
            SignalKind::PersonAbsence => !detected,
            SignalKind::PhoneVisible | SignalKind::Drowsiness => detected,
        }
    }
}

/// Pixel-space detection rectangle, passed through untouched so the
/// presentation layer can draw it when the kind's overlay toggle is on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// One detector result for one signal kind on one sampling tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignalObservation {
    /// Whether the detector saw its target class this tick.
    pub active: bool,
    /// Detector confidence in [0, 1]. Values below the kind's acceptance
    /// threshold cause `active` to be disregarded.
    pub confidence: f32,
    pub bbox: Option<BoundingBox>,
}

impl SignalObservation {
    pub fn new(active: bool, confidence: f32) -> Self {
        Self {
            active,
            confidence,
            bbox: None,
        }
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub(crate) fn validate(&self, kind: SignalKind) -> Result<(), FrameError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(FrameError::ConfidenceOutOfRange {
                kind,
                confidence: self.confidence,
            });
        }
        Ok(())
    }
}

/// Everything the perception source classified on one sampling tick.
///
/// Kinds missing from the frame were not evaluated this tick and leave their
/// trackers untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionFrame {
    pub timestamp: DateTime<Utc>,
    pub observations: HashMap<SignalKind, SignalObservation>,
}

impl DetectionFrame {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            observations: HashMap::new(),
        }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn with(mut self, kind: SignalKind, observation: SignalObservation) -> Self {
        self.observations.insert(kind, observation);
        self
    }

    pub fn set(&mut self, kind: SignalKind, observation: SignalObservation) {
        self.observations.insert(kind, observation);
    }

    pub fn get(&self, kind: SignalKind) -> Option<&SignalObservation> {
        self.observations.get(&kind)
    }
}

/// Rejection reasons for individual frame entries. A rejected entry never
/// mutates its tracker; valid entries in the same frame still apply.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameError {
    #[error("confidence {confidence} for {kind:?} is outside [0, 1]")]
    ConfidenceOutOfRange { kind: SignalKind, confidence: f32 },
}

impl FrameError {
    pub fn kind(&self) -> SignalKind {
        match self {
            FrameError::ConfidenceOutOfRange { kind, .. } => *kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_kind_violates_on_absence() {
        assert!(SignalKind::PersonAbsence.is_violation(false));
        assert!(!SignalKind::PersonAbsence.is_violation(true));
    }

    #[test]
    fn phone_and_drowsiness_violate_on_presence() {
        assert!(SignalKind::PhoneVisible.is_violation(true));
        assert!(!SignalKind::PhoneVisible.is_violation(false));
        assert!(SignalKind::Drowsiness.is_violation(true));
        assert!(!SignalKind::Drowsiness.is_violation(false));
    }

    #[test]
    fn confidence_outside_unit_interval_is_rejected() {
        let obs = SignalObservation::new(true, 1.2);
        assert!(obs.validate(SignalKind::PhoneVisible).is_err());

        let obs = SignalObservation::new(true, -0.1);
        assert!(obs.validate(SignalKind::PhoneVisible).is_err());

        let obs = SignalObservation::new(true, f32::NAN);
        assert!(obs.validate(SignalKind::PhoneVisible).is_err());

        let obs = SignalObservation::new(true, 0.0);
        assert!(obs.validate(SignalKind::PhoneVisible).is_ok());
        let obs = SignalObservation::new(true, 1.0);
        assert!(obs.validate(SignalKind::PhoneVisible).is_ok());
    }

    #[test]
    fn frame_builder_keeps_latest_observation_per_kind() {
        let frame = DetectionFrame::now()
            .with(SignalKind::PhoneVisible, SignalObservation::new(false, 0.4))
            .with(SignalKind::PhoneVisible, SignalObservation::new(true, 0.9));

        let obs = frame.get(SignalKind::PhoneVisible).unwrap();
        assert!(obs.active);
        assert_eq!(obs.confidence, 0.9);
        assert!(frame.get(SignalKind::PersonAbsence).is_none());
    }
}
