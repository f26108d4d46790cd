use std::sync::mpsc::{Receiver, Sender};

use crate::engine::chat_client::ChatClient;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::logutil::escape_log;

/// Owns the HTTP client and runs every blocking call off the UI thread.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    client: ChatClient,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        client: ChatClient,
    ) -> Self {
        Self { rx, tx, client }
    }

    /// Runs until the command sender is dropped or the UI stops listening.
    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            let resp = match cmd {
                EngineCommand::Chat { ticket, request } => {
                    log::debug!(
                        "POST {} ticket={} message={}",
                        self.client.chat_url(),
                        ticket.0,
                        escape_log(&request.message)
                    );
                    EngineResponse::ChatCompleted {
                        ticket,
                        result: self.client.post_chat(&request),
                    }
                }

                EngineCommand::FetchImage { path } => {
                    let result = self.client.fetch_image(&path);
                    EngineResponse::ImageLoaded { path, result }
                }
            };

            if self.tx.send(resp).is_err() {
                log::debug!("ui gone, network worker exiting");
                break;
            }
        }
    }
}
