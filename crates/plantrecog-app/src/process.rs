//! Message processing

use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::platform::{Collaborators, Platform};
use crate::state::AppState;

/// Process a message through the TEA update function
///
/// Follow-up messages are handled in the same call; actions are dispatched
/// to background tasks.
pub fn process_message<P: Platform>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    collaborators: &Collaborators<P>,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), collaborators);
        }

        msg = result.message;
    }
}
