//! Headless mode runner - main event loop without TUI
//!
//! Submits queued images one at a time once the bootstrap settles, and
//! forwards every engine event to the caller's sink.

use std::collections::VecDeque;
use std::path::PathBuf;

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use plantrecog_app::message::Message;
use plantrecog_app::{Engine, EngineEvent, ExitReason, Platform};
use plantrecog_core::prelude::*;

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of TUI
///
/// With `image`, that single file is classified and the run ends. Without
/// it, image paths are read from stdin until EOF or `q`.
pub async fn run_headless<P: Platform>(
    mut engine: Engine<P>,
    image: Option<PathBuf>,
) -> Result<ExitReason> {
    info!("═══════════════════════════════════════════════════════");
    info!("PlantRecog starting in HEADLESS mode");
    info!("═══════════════════════════════════════════════════════");

    let (path_tx, path_rx) = mpsc::channel::<PathBuf>(16);
    match image {
        Some(path) => {
            // Dropping the sender afterwards ends the run once this settles
            queue_path(&path_tx, path).await;
        }
        None => {
            std::thread::spawn(move || spawn_stdin_reader_blocking(path_tx));
        }
    }

    engine.install_signal_handler();

    let result = drive(&mut engine, path_rx, |event| event.emit()).await;

    let mut events = engine.subscribe();
    engine.shutdown();
    forward_events(&mut events, &mut |event: HeadlessEvent| event.emit());

    if let Err(e) = &result {
        HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
    }

    info!("PlantRecog headless mode exiting");
    result.map(|()| engine.exit_reason())
}

/// Drive `engine` until every path from `paths` has been submitted and
/// settled, the service turns out to be down, or a quit is requested.
pub async fn drive<P, F>(
    engine: &mut Engine<P>,
    mut paths: mpsc::Receiver<PathBuf>,
    mut emit: F,
) -> Result<()>
where
    P: Platform,
    F: FnMut(HeadlessEvent),
{
    let mut events = engine.subscribe();
    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    let mut paths_open = true;

    engine.start();

    loop {
        forward_events(&mut events, &mut emit);

        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        if engine.state.is_fatal() {
            // Nobody is there to press "Close App"
            engine.process_message(Message::CloseApp);
            continue;
        }

        // Notices have already been emitted; clear them
        while engine
            .state
            .current_alert()
            .is_some_and(|alert| !alert.is_fatal())
        {
            engine.process_message(Message::DismissAlert);
        }

        if engine.state.readiness.is_ready() && !engine.state.is_busy() {
            if let Some(path) = queue.pop_front() {
                emit(HeadlessEvent::image_queued(&path));
                engine.process_message(Message::SubmitFile { path });
                continue;
            }
            if !paths_open {
                engine.process_message(Message::Quit);
                continue;
            }
        }

        tokio::select! {
            msg = engine.next_message() => match msg {
                Some(msg) => engine.process_message(msg),
                None => {
                    info!("Message channel closed");
                    break;
                }
            },
            path = paths.recv(), if paths_open => match path {
                Some(path) => queue.push_back(path),
                None => paths_open = false,
            },
        }
    }

    forward_events(&mut events, &mut emit);
    Ok(())
}

/// Hand one path to the driver, warning if it can no longer take any
async fn queue_path(path_tx: &mpsc::Sender<PathBuf>, path: PathBuf) -> bool {
    match path_tx.send(path).await {
        Ok(()) => true,
        Err(mpsc::error::SendError(path)) => {
            warn!("Image queue closed, {} was not submitted", path.display());
            false
        }
    }
}

/// Emit every engine event received so far
fn forward_events<F: FnMut(HeadlessEvent)>(
    events: &mut broadcast::Receiver<EngineEvent>,
    emit: &mut F,
) {
    loop {
        match events.try_recv() {
            Ok(event) => emit(HeadlessEvent::from(event)),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output skipped {} engine events", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Read image paths from stdin, one per line (blocking)
fn spawn_stdin_reader_blocking(path_tx: mpsc::Sender<PathBuf>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => match line.trim() {
                "" => {}
                "q" | "quit" => {
                    info!("Stdin: quit requested");
                    break;
                }
                path => {
                    if path_tx.blocking_send(PathBuf::from(path)).is_err() {
                        break;
                    }
                }
            },
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}
