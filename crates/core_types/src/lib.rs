//! Core types for the Simplify resource console.
//!
//! This crate defines the shared data structures used by the
//! screen library, the web frontend, and the CLI: backend records,
//! form field tables, drafts, and session roles.

mod form;
mod session;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use form::{FieldKind, FieldSpec, FieldViolation, FormDraft, FormMode};
pub use session::{Capability, NavLink, Session, SessionUser};

/// Errors raised while turning a draft into a request body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Record is not a JSON object: {0}")]
    Record(String),
}

/// Result type for draft operations.
pub type Result<T> = std::result::Result<T, DraftError>;

/// Backend-assigned record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A backend-managed entity exposed through a collection endpoint.
///
/// Implementors describe where they live (`COLLECTION`), how they are
/// called in notifications (`KIND`), and which fields a form edits
/// (`FIELDS`). The first [`FieldKind::Text`] field is the record's label.
pub trait Resource: Clone + PartialEq + Serialize + DeserializeOwned {
    /// Path segment under `/api/`, e.g. `skill-type`.
    const COLLECTION: &'static str;
    /// Human-readable kind, e.g. `Skill Type`.
    const KIND: &'static str;
    /// Editable fields in form order.
    const FIELDS: &'static [FieldSpec];

    /// Unique identifier.
    fn id(&self) -> ResourceId;

    /// Name shown in tables, dialogs and toasts.
    fn label(&self) -> &str;
}

/// A skill type that team members can be hired as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillType {
    /// Backend identifier
    pub id: ResourceId,
    /// Display name (e.g. "junior")
    pub name: String,
    /// Salary per simulated day
    pub cost_per_day: f64,
    /// Fraction of tasks produced with errors (0-1)
    pub error_rate: f64,
    /// Tasks per hour
    pub throughput: f64,
    /// Management quality (0-100)
    pub management_quality: f64,
    /// Development quality (0-100)
    pub development_quality: f64,
    /// One-off hiring cost
    pub signing_bonus: f64,
}

/// Form fields for [`SkillType`].
pub const SKILL_TYPE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "name", "Name", FieldKind::Text),
    FieldSpec::new("cost_per_day", "costPerDay", "Cost per Day", FieldKind::PositiveNumber),
    FieldSpec::new("error_rate", "errorRate", "Error Rate", FieldKind::UnitInterval),
    FieldSpec::new("throughput", "throughput", "Throughput", FieldKind::PositiveNumber),
    FieldSpec::new(
        "management_quality",
        "managementQuality",
        "Management Quality",
        FieldKind::Percentage,
    ),
    FieldSpec::new(
        "development_quality",
        "developmentQuality",
        "Development Quality",
        FieldKind::Percentage,
    ),
    FieldSpec::new("signing_bonus", "signingBonus", "Signing Bonus", FieldKind::PositiveNumber),
];

impl Resource for SkillType {
    const COLLECTION: &'static str = "skill-type";
    const KIND: &'static str = "Skill Type";
    const FIELDS: &'static [FieldSpec] = SKILL_TYPE_FIELDS;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}
