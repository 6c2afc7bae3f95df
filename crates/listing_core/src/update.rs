use listing_logging::{listing_debug, listing_trace};

use crate::{Effect, Msg, Phase, ReactorState, SortPolicy};

/// Pure update function: applies a message to the reactor and returns the
/// work the engine has to carry out, in order.
pub fn update(mut state: ReactorState, msg: Msg) -> (ReactorState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let sort = automatic_sort(state.settings().sort_by);
            vec![Effect::RunPass { sort }]
        }
        Msg::ItemsInserted { count } => {
            if count == 0 {
                return (state, Vec::new());
            }
            match state.phase() {
                Phase::PendingReprocess => {
                    listing_trace!("absorbed {} inserted items into pending pass", count);
                    Vec::new()
                }
                Phase::Idle => {
                    listing_debug!("{} items inserted; reprocess scheduled", count);
                    state.set_phase(Phase::PendingReprocess);
                    vec![Effect::ScheduleReprocess {
                        delay: state.debounce(),
                    }]
                }
            }
        }
        Msg::DebounceElapsed => {
            if state.phase() == Phase::Idle {
                return (state, Vec::new());
            }
            state.set_phase(Phase::Idle);
            let sort = automatic_sort(state.settings().sort_by);
            vec![Effect::RunPass { sort }]
        }
        Msg::SettingsApplied(settings) => {
            state.set_settings(settings);
            // An explicit switch back to `default` must restore ledger order.
            vec![Effect::RunPass {
                sort: Some(settings.sort_by),
            }]
        }
        Msg::StatsRequested => {
            vec![Effect::RunPass { sort: None }]
        }
        Msg::Navigated(page) => {
            if !state.enter_page(page) {
                return (state, Vec::new());
            }
            let sort = automatic_sort(state.settings().sort_by);
            vec![Effect::ResetLedger, Effect::RunPass { sort }]
        }
    };

    (state, effects)
}

/// Passes the engine starts on its own only reorder for non-default policies.
fn automatic_sort(policy: SortPolicy) -> Option<SortPolicy> {
    (!policy.is_default()).then_some(policy)
}
