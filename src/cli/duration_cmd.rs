//! Duration codec command handler

use crate::domain::duration::{ElapsedSeconds, LooseDuration, RelativePast};

use super::args::DurationAction;
use super::presenter::Presenter;

/// Run one codec conversion and print the result
pub fn handle_duration_command(action: DurationAction, presenter: &Presenter) {
    presenter.output(&convert(&action));
}

fn convert(action: &DurationAction) -> String {
    match action {
        DurationAction::Encode { seconds } => ElapsedSeconds::new(*seconds).encode_for_api(),
        DurationAction::Normalize { text } => LooseDuration::new(text.as_str()).normalize(),
        DurationAction::Ago { text } => RelativePast::new(text.as_str()).translate(),
    }
}
