//! Question navigation policy.
//!
//! Movement of the question pointer is saturating at both ends: advancing at
//! the last question or retreating at the first is a no-op, not an error.
//! Navigating before the interview has questions fails with `NotStarted` and
//! leaves the session untouched.

use super::model::Session;
use crate::error::{InterviaError, Result};

impl Session {
    /// Moves the question pointer forward, saturating at the last question.
    ///
    /// # Errors
    ///
    /// Returns `NotStarted` if the question list is empty.
    pub fn advance_question(&mut self) -> Result<usize> {
        if self.questions.is_empty() {
            return Err(InterviaError::not_started(&self.id));
        }
        self.current_question_index =
            (self.current_question_index + 1).min(self.questions.len() - 1);
        Ok(self.current_question_index)
    }

    /// Moves the question pointer backward, saturating at the first question.
    ///
    /// # Errors
    ///
    /// Returns `NotStarted` if the question list is empty.
    pub fn retreat_question(&mut self) -> Result<usize> {
        if self.questions.is_empty() {
            return Err(InterviaError::not_started(&self.id));
        }
        self.current_question_index = self.current_question_index.saturating_sub(1);
        Ok(self.current_question_index)
    }

    /// Forces the question pointer back into `[0, len-1]`.
    ///
    /// Used when the question list is (re)assigned, so a stored index can
    /// never point past the end of a shorter list.
    pub fn clamp_question_index(&mut self) {
        if self.questions.is_empty() {
            self.current_question_index = 0;
        } else {
            self.current_question_index =
                self.current_question_index.min(self.questions.len() - 1);
        }
    }
}
