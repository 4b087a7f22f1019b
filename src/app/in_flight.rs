use crate::utils::error::{BloodBankError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

/// One-at-a-time gate for a controller action. A second call while the
/// first is running is rejected with `Busy`, never queued.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

/// Released when dropped, including on early return through `?`.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self, action: &str) -> Result<InFlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                tracing::warn!("⏳ '{}' is already in flight", action);
                BloodBankError::Busy {
                    action: action.to_string(),
                }
            })?;
        Ok(InFlightGuard { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_busy_until_guard_drops() {
        let gate = InFlight::new();

        let guard = gate.try_begin("submit").unwrap();
        assert!(gate.is_busy());
        let err = gate.try_begin("submit").unwrap_err();
        assert!(matches!(err, BloodBankError::Busy { ref action } if action == "submit"));

        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.try_begin("submit").is_ok());
    }

    #[test]
    fn test_guard_released_when_action_fails() {
        let gate = InFlight::new();

        let result: Result<()> = tokio_test::block_on(async {
            let _guard = gate.try_begin("load stock")?;
            Err(BloodBankError::network("blood-stock", "Failed to fetch blood stock"))
        });

        assert!(result.is_err());
        assert!(!gate.is_busy());
    }
}
