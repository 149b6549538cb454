use tally_logging::{tally_debug, tally_trace, tally_warn};

use crate::report::render_summary_table;
use crate::{AppState, Effect, Msg, Reporter};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DocumentChanged { edit, text } => {
            state.set_document(text);
            let generation = state.next_refresh();
            let delay = state.debounce_delay();
            tally_trace!(
                "edit {}..{} schedules refresh generation={} delay={:?}",
                edit.start,
                edit.end,
                generation,
                delay
            );
            vec![Effect::ScheduleRefresh { generation, delay }]
        }
        Msg::RefreshDue { generation } => {
            if state.take_pending(generation) {
                state.refresh_full();
                tally_logging::set_refresh_cycle(state.refresh_count());
                tally_debug!(
                    "refresh generation={} cycle={} sections={}",
                    generation,
                    tally_logging::refresh_cycle(),
                    state.full_report().len()
                );
            } else {
                tally_debug!(
                    "discarding stale refresh generation={} cycle={}",
                    generation,
                    tally_logging::refresh_cycle()
                );
            }
            Vec::new()
        }
        Msg::FocusMoved { position } => {
            // Focus is cheap (one section) so it is never debounced.
            state.move_focus(position);
            Vec::new()
        }
        Msg::ConfigChanged(config) => match Reporter::from_config(&config) {
            Ok(reporter) => {
                state.apply_config(config, reporter);
                state.refresh_full();
                Vec::new()
            }
            Err(err) => {
                tally_warn!("keeping previous configuration: {}", err);
                Vec::new()
            }
        },
        Msg::ToggleFocusWarning => {
            state.toggle_focus_warning();
            Vec::new()
        }
        Msg::ToggleModelineSummary => {
            state.toggle_modeline_summary();
            Vec::new()
        }
        Msg::SummaryRequested => {
            let reports = state.reporter().build_full_report(state.document());
            vec![Effect::ShowSummary {
                table: render_summary_table(&reports),
            }]
        }
    };

    (state, effects)
}
