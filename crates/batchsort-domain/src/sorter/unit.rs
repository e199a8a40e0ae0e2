//! Per-array sort units and join bookkeeping shared by both sorters.

use std::any::Any;

use tokio::task::JoinError;
use tracing::warn;

use crate::error::{SortError, SortResult};

/// Work performed by a single unit on its private copy.
pub(crate) type SortUnit = fn(Vec<i64>) -> Vec<i64>;

/// Sorts an owned copy ascending and hands it back.
pub(crate) fn sort_unit(mut sequence: Vec<i64>) -> Vec<i64> {
    sequence.sort_unstable();
    sequence
}

/// Tallies units that did not deliver a result.
pub(crate) struct UnitFailures {
    total: usize,
    failed: usize,
    first: Option<String>,
}

impl UnitFailures {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            failed: 0,
            first: None,
        }
    }

    pub(crate) fn record(&mut self, err: JoinError) {
        self.failed += 1;
        let message = describe_join_error(err);
        if self.first.is_none() {
            self.first = Some(message);
        }
    }

    pub(crate) fn into_result(self) -> SortResult<()> {
        match self.first {
            None => Ok(()),
            Some(message) => Err(SortError::UnitFailed {
                failed: self.failed,
                total: self.total,
                message,
            }),
        }
    }
}

/// Converts the failure of a single-unit run into a [`SortError`].
pub(crate) fn single_unit_failure(err: JoinError) -> SortError {
    SortError::UnitFailed {
        failed: 1,
        total: 1,
        message: describe_join_error(err),
    }
}

fn describe_join_error(err: JoinError) -> String {
    let message = if err.is_panic() {
        format!("unit panicked: {}", panic_message(err.into_panic().as_ref()))
    } else {
        "unit cancelled".to_string()
    };
    warn!(failure = %message, "sort unit failed");
    message
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
