//! Main TUI runner - entry point and event loop

use std::path::PathBuf;

use plantrecog_app::message::Message;
use plantrecog_app::{Engine, ExitReason, Platform};
use plantrecog_core::prelude::*;

use super::{event, render, terminal};

/// Run the TUI over `engine` until the user quits or closes the fatal alert.
///
/// `initial_image` is submitted once the bootstrap settles, as if picked.
pub async fn run<P: Platform>(
    mut engine: Engine<P>,
    initial_image: Option<PathBuf>,
) -> Result<ExitReason> {
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    engine.install_signal_handler();
    engine.start();

    let result = run_loop(&mut term, &mut engine, initial_image);

    engine.shutdown();
    ratatui::restore();

    result.map(|()| engine.exit_reason())
}

/// Main event loop
fn run_loop<P: Platform>(
    terminal: &mut ratatui::DefaultTerminal,
    engine: &mut Engine<P>,
    mut initial_image: Option<PathBuf>,
) -> Result<()> {
    while !engine.should_quit() {
        // Bootstrap results, permission answers, captures, predictions
        engine.drain_pending_messages();

        if engine.state.readiness.is_ready() {
            if let Some(path) = initial_image.take() {
                info!("Submitting {} from the command line", path.display());
                engine.process_message(Message::SubmitFile { path });
            }
        }

        // First real frame: the splash goes away right before it draws
        engine.state.splash.release_if_ready(engine.state.readiness);

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
