use std::time::Duration;

use crate::SortPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the debounce timer; `DebounceElapsed` is expected after `delay`.
    ScheduleReprocess { delay: Duration },
    /// Classify every current item, then sort and apply when `sort` is set.
    RunPass { sort: Option<SortPolicy> },
    /// Forget the original-order baseline.
    ResetLedger,
}
