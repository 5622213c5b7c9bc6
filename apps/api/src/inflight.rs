//! One action in flight per form.
//!
//! The browser disables its buttons while a request is pending; this is the
//! server-side half of that rule. Forms are keyed by client name; a blank name
//! is not tracked. The slot is released when the guard drops, whether the
//! action succeeded or failed.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::errors::AppError;

#[derive(Debug, Default, Clone)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `form`, or fails with `Busy` if it is taken.
    pub fn acquire(&self, form: &str) -> Result<InFlightGuard, AppError> {
        let form = form.trim();
        if form.is_empty() {
            return Ok(InFlightGuard {
                active: Arc::clone(&self.active),
                form: None,
            });
        }
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(form.to_string()) {
            tracing::debug!("Rejected concurrent action for form '{form}'");
            return Err(AppError::Busy);
        }
        Ok(InFlightGuard {
            active: Arc::clone(&self.active),
            form: Some(form.to_string()),
        })
    }

    #[cfg(test)]
    pub fn is_busy(&self, form: &str) -> bool {
        self.active
            .lock()
            .map(|active| active.contains(form))
            .unwrap_or(false)
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<String>>>,
    form: Option<String>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Some(form) = self.form.take() {
            let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
            active.remove(&form);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_for_same_form_is_busy() {
        let inflight = InFlight::new();
        let _guard = inflight.acquire("山田工務店").unwrap();
        assert!(matches!(inflight.acquire("山田工務店"), Err(AppError::Busy)));
    }

    #[test]
    fn test_different_forms_do_not_block_each_other() {
        let inflight = InFlight::new();
        let _a = inflight.acquire("a").unwrap();
        assert!(inflight.acquire("b").is_ok());
    }

    #[test]
    fn test_blank_form_is_not_tracked() {
        let inflight = InFlight::new();
        let _a = inflight.acquire("").unwrap();
        assert!(inflight.acquire("  ").is_ok());
        assert!(!inflight.is_busy(""));
    }

    #[test]
    fn test_slot_is_released_on_drop() {
        let inflight = InFlight::new();
        {
            let _guard = inflight.acquire("a").unwrap();
            assert!(inflight.is_busy("a"));
        }
        assert!(!inflight.is_busy("a"));
        assert!(inflight.acquire("a").is_ok());
    }
}
