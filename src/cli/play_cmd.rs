//! Play command: waveform view on stderr

use std::process::ExitCode;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{MediaElement, PlaybackError};
use crate::application::PlaybackEngine;
use crate::domain::playback::PlaybackPhase;
use crate::infrastructure::{RodioMediaElement, VirtualMediaElement};

use super::app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
use super::args::PlayOptions;
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Redraw interval
const FRAME: Duration = Duration::from_millis(100);

/// Play a file until it ends or the user interrupts
pub async fn run_play(options: PlayOptions) -> ExitCode {
    let mut presenter = Presenter::new();
    let shutdown = ShutdownSignal::new();
    shutdown.setup();

    let source = options.file.to_string_lossy().into_owned();
    let result = match options.dry_run_length {
        Some(length) => {
            let engine = PlaybackEngine::new(VirtualMediaElement::new(length));
            play(engine, &source, options.seek_bar, &mut presenter, &shutdown.token()).await
        }
        None => {
            let engine = PlaybackEngine::new(RodioMediaElement::new());
            play(engine, &source, options.seek_bar, &mut presenter, &shutdown.token()).await
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e @ PlaybackError::BarOutOfRange { .. }) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_USAGE_ERROR)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

async fn play<E: MediaElement>(
    mut engine: PlaybackEngine<E>,
    source: &str,
    seek_bar: Option<usize>,
    presenter: &mut Presenter,
    cancel: &CancellationToken,
) -> Result<(), PlaybackError> {
    engine.attach(source)?;
    if let Some(bar) = seek_bar {
        let target = engine.seek_to_bar(bar)?;
        tracing::debug!(bar, target, "starting from bar");
    }
    engine.toggle_playback()?;

    let line = render(&engine, presenter);
    presenter.start_spinner(&line);

    let mut frames = tokio::time::interval(FRAME);
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                engine.detach();
                presenter.spinner_fail("Stopped");
                return Ok(());
            }
            _ = frames.tick() => {}
        }

        engine.tick();
        let line = render(&engine, presenter);
        presenter.update_spinner(&line);

        if engine.phase() != PlaybackPhase::Playing {
            break;
        }
    }

    let line = render(&engine, presenter);
    presenter.spinner_success(&line);
    Ok(())
}

fn render<E: MediaElement>(engine: &PlaybackEngine<E>, presenter: &Presenter) -> String {
    let heights = engine
        .waveform()
        .map(|w| w.bar_heights().to_vec())
        .unwrap_or_default();
    presenter.format_playback(
        &heights,
        engine.active_bar_count(),
        engine.elapsed_display(),
        engine.total_display(),
    )
}
