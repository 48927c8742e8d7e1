//! Tunable assignment rules.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How strictly a new assignment is checked against the existing timeline.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Display,
  EnumString,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OverlapPolicy {
  /// Reject any assignment starting on or before the latest existing start.
  ///
  /// Records are contiguous (each is closed the day before its successor
  /// begins), so this is exactly "the new start falls inside an existing
  /// span".
  #[default]
  Interval,
  /// Legacy behaviour: reject only an identical (rank, title, start date)
  /// tuple. Backdated starts are accepted and inserted already closed, ending
  /// the day before the next later start; an earlier record they land inside
  /// is not split.
  ExactDuplicate,
}

/// Rules applied by [`crate::engine::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPolicy {
  #[serde(default)]
  pub overlap: OverlapPolicy,
}

impl AssignmentPolicy {
  pub fn legacy() -> Self { Self { overlap: OverlapPolicy::ExactDuplicate } }
}
