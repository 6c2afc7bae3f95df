use std::pin::Pin;
use std::time::Duration;

use listing_core::{update, Effect, EngineSettings, ListingPage, ListingStats, Msg, ReactorState};
use listing_logging::{listing_debug, listing_info, listing_warn};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Sleep;

use crate::channel::{
    decode_request, encode_response, ApplySettingsResponse, ChannelError, Request, Response,
};
use crate::pass::ListingEngine;
use crate::store::SettingsStore;

enum EngineCommand {
    ApplySettings {
        settings: EngineSettings,
        reply: oneshot::Sender<ApplySettingsResponse>,
    },
    GetStats {
        reply: oneshot::Sender<ListingStats>,
    },
    InsertMarkup {
        markup: String,
        reply: oneshot::Sender<usize>,
    },
    Navigate {
        url: String,
    },
    Snapshot {
        reply: oneshot::Sender<String>,
    },
    Settle {
        reply: oneshot::Sender<()>,
    },
}

/// Cheap, cloneable handle to the engine task. The task owns the page, the
/// ledger and the reactor; it stops once every handle is dropped.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    /// Read the initial settings from `store` and start the engine task on the
    /// current tokio runtime.
    pub async fn start(engine: ListingEngine, store: &dyn SettingsStore, debounce: Duration) -> Self {
        let settings = store.get().await;
        Self::spawn(engine, settings, debounce)
    }

    pub fn spawn(engine: ListingEngine, settings: EngineSettings, debounce: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let actor = EngineActor {
            engine,
            state: ReactorState::with_debounce(settings, debounce),
            debounce: None,
            last_stats: ListingStats::default(),
            settle_waiters: Vec::new(),
        };
        tokio::spawn(actor.run(cmd_rx));
        Self { cmd_tx }
    }

    /// Never errors: an unreachable engine is reported as `success: false`.
    pub async fn apply_settings(&self, settings: EngineSettings) -> ApplySettingsResponse {
        let (reply, rx) = oneshot::channel();
        if self
            .cmd_tx
            .send(EngineCommand::ApplySettings { settings, reply })
            .is_err()
        {
            return ApplySettingsResponse::FAILED;
        }
        rx.await.unwrap_or(ApplySettingsResponse::FAILED)
    }

    pub async fn stats(&self) -> Result<ListingStats, ChannelError> {
        self.request(|reply| EngineCommand::GetStats { reply }).await
    }

    /// Host-side infinite-scroll insertion. Returns how many listing items the
    /// markup contained.
    pub async fn insert_markup(&self, markup: impl Into<String>) -> Result<usize, ChannelError> {
        let markup = markup.into();
        self.request(|reply| EngineCommand::InsertMarkup { markup, reply })
            .await
    }

    pub fn navigate(&self, url: impl Into<String>) -> Result<(), ChannelError> {
        self.cmd_tx
            .send(EngineCommand::Navigate { url: url.into() })
            .map_err(|_| ChannelError::Disconnected)
    }

    /// Current page markup, including moves and markers.
    pub async fn snapshot_html(&self) -> Result<String, ChannelError> {
        self.request(|reply| EngineCommand::Snapshot { reply }).await
    }

    /// Resolves once no debounced pass is pending, so the page reflects every
    /// insertion made before the call.
    pub async fn settle(&self) -> Result<(), ChannelError> {
        self.request(|reply| EngineCommand::Settle { reply }).await
    }

    /// Answer one JSON request from the control surface with one JSON response.
    pub async fn handle_json(&self, raw: &str) -> String {
        let response = match decode_request(raw) {
            Ok(Request::ApplySettings { settings }) => {
                Response::Applied(self.apply_settings(settings).await)
            }
            Ok(Request::GetStats) => match self.stats().await {
                Ok(stats) => Response::Stats(stats),
                Err(err) => {
                    listing_warn!("stats request failed: {}", err);
                    Response::Applied(ApplySettingsResponse::FAILED)
                }
            },
            Err(err) => {
                listing_warn!("rejected request: {}", err);
                Response::Applied(ApplySettingsResponse::FAILED)
            }
        };
        encode_response(&response).unwrap_or_else(|err| {
            listing_warn!("failed to encode response: {}", err);
            r#"{"success":false}"#.to_string()
        })
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> EngineCommand,
    ) -> Result<T, ChannelError> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(command(reply))
            .map_err(|_| ChannelError::Disconnected)?;
        rx.await.map_err(|_| ChannelError::Disconnected)
    }
}

struct EngineActor {
    engine: ListingEngine,
    state: ReactorState,
    debounce: Option<Pin<Box<Sleep>>>,
    last_stats: ListingStats,
    settle_waiters: Vec<oneshot::Sender<()>>,
}

impl EngineActor {
    async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<EngineCommand>) {
        listing_info!(
            "engine started (sort={}, applied={}, highlight_viewed={})",
            self.state.settings().sort_by,
            self.state.settings().applied_action,
            self.state.settings().highlight_viewed
        );
        self.dispatch(Msg::Started);

        loop {
            tokio::select! {
                command = cmd_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                () = async {
                    match self.debounce.as_mut() {
                        Some(sleep) => sleep.await,
                        None => std::future::pending().await,
                    }
                }, if self.debounce.is_some() => {
                    self.debounce = None;
                    self.dispatch(Msg::DebounceElapsed);
                    self.release_waiters();
                }
            }
        }
        listing_info!("engine stopped");
    }

    fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::ApplySettings { settings, reply } => {
                self.dispatch(Msg::SettingsApplied(settings));
                let _ = reply.send(ApplySettingsResponse::OK);
            }
            EngineCommand::GetStats { reply } => {
                self.dispatch(Msg::StatsRequested);
                let _ = reply.send(self.last_stats);
            }
            EngineCommand::InsertMarkup { markup, reply } => {
                let inserted = self.engine.document_mut().append_markup(&markup);
                self.dispatch(Msg::ItemsInserted {
                    count: inserted.len(),
                });
                let _ = reply.send(inserted.len());
            }
            EngineCommand::Navigate { url } => match ListingPage::from_url(&url) {
                Some(page) => self.dispatch(Msg::Navigated(page)),
                None => listing_warn!("ignored navigation to unparseable url {:?}", url),
            },
            EngineCommand::Snapshot { reply } => {
                let _ = reply.send(self.engine.document().to_html());
            }
            EngineCommand::Settle { reply } => {
                self.settle_waiters.push(reply);
                self.release_waiters();
            }
        }
    }

    fn release_waiters(&mut self) {
        if self.debounce.is_some() {
            return;
        }
        for waiter in self.settle_waiters.drain(..) {
            let _ = waiter.send(());
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleReprocess { delay } => {
                listing_debug!("reprocess in {:?}", delay);
                self.debounce = Some(Box::pin(tokio::time::sleep(delay)));
            }
            Effect::RunPass { sort } => {
                let settings = *self.state.settings();
                let report = self.engine.run_pass(&settings, sort);
                self.last_stats = report.stats;
            }
            Effect::ResetLedger => self.engine.reset_ledger(),
        }
    }
}
