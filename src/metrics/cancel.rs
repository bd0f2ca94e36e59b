// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Cooperative cancellation

use crate::error::{MetricError, MetricResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Poll-and-abort flag shared between a caller and a running pass.
///
/// Clones observe the same flag. Components poll it once per chunk of
/// elements, never per element.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every pass holding this token to stop at its next poll
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// `Err(MetricError::Cancelled)` once [`CancelToken::cancel`] was called
    pub fn check(&self) -> MetricResult<()> {
        if self.is_cancelled() {
            Err(MetricError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(token.check().is_ok());

        handle.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(MetricError::Cancelled)));
    }
}
