//! Editing-task constants and validation.

use crate::error::CoreError;
use crate::validation::{require_non_empty, validate_choice};

// ---------------------------------------------------------------------------
// Clip types
// ---------------------------------------------------------------------------

pub const CLIP_FEATURE: &str = "feature";
pub const CLIP_SHORT_CUT: &str = "short_cut";
pub const CLIP_VERTICAL_CUT: &str = "vertical_cut";
pub const CLIP_TRAILER: &str = "trailer";
pub const CLIP_OTHER: &str = "other";

pub const CLIP_TYPES: &[&str] = &[
    CLIP_FEATURE,
    CLIP_SHORT_CUT,
    CLIP_VERTICAL_CUT,
    CLIP_TRAILER,
    CLIP_OTHER,
];

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

pub const STATUS_NOT_STARTED: &str = "not_started";
pub const STATUS_ROUGH_CUT_IN_PROGRESS: &str = "rough_cut_in_progress";
pub const STATUS_ROUGH_CUT_DONE: &str = "rough_cut_done";
pub const STATUS_FINE_CUT_IN_PROGRESS: &str = "fine_cut_in_progress";
pub const STATUS_CLIENT_REVIEW: &str = "client_review";
pub const STATUS_FINAL: &str = "final";

/// Editing pipeline states in order.
pub const EDITING_STATUSES: &[&str] = &[
    STATUS_NOT_STARTED,
    STATUS_ROUGH_CUT_IN_PROGRESS,
    STATUS_ROUGH_CUT_DONE,
    STATUS_FINE_CUT_IN_PROGRESS,
    STATUS_CLIENT_REVIEW,
    STATUS_FINAL,
];

/// Version label given to a new task when none is supplied.
pub const DEFAULT_EDIT_VERSION: &str = "v0.1";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_clip_name(name: &str) -> Result<(), CoreError> {
    require_non_empty("clip_name", name)
}

pub fn validate_clip_type(clip_type: &str) -> Result<(), CoreError> {
    validate_choice("clip type", clip_type, CLIP_TYPES)
}

pub fn validate_status(status: &str) -> Result<(), CoreError> {
    validate_choice("status", status, EDITING_STATUSES)
}
