//! Async driver for [`ListingController`].
//!
//! [`ListingService::spawn`] starts a task that owns the controller and
//! processes commands one at a time. Each fetch ticket runs in its own
//! task racing the transport against the ticket's cancellation token;
//! every outcome, including cancellation, is routed back to the owning
//! task so the controller's generation check decides what is applied.
//!
//! The latest [`ListingSnapshot`] is published on a
//! [`tokio::sync::watch`] channel. Call [`ListingHandle::subscribe`] to
//! observe it.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use vnshelf_catalog::{CatalogError, CatalogTransport, SearchPage};
use vnshelf_core::maturity::MaturitySelection;
use vnshelf_core::model::TitleSummary;
use vnshelf_core::temporal::DateSelection;

use crate::controller::{
    gate_results, Completion, FetchTicket, Generation, ListingController, ListingEntry,
    ListingQuery, ListingState,
};
use crate::params::{self, ParamStore};

/// Capacity of the command channel.
const COMMAND_CHANNEL_CAPACITY: usize = 64;

// ---------------------------------------------------------------------------
// Commands and snapshots
// ---------------------------------------------------------------------------

/// A viewer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingCommand {
    Refresh,
    SelectPage(u32),
    SelectDate(DateSelection),
    NextMonth,
    PreviousMonth,
    SetPageSize(u32),
    SetMaturity(MaturitySelection),
}

/// Everything an observer needs to render the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub state: ListingState,
    pub query: ListingQuery,
    pub maturity: MaturitySelection,
    pub can_navigate_months: bool,
}

impl ListingSnapshot {
    fn of(controller: &ListingController) -> Self {
        Self {
            state: controller.state().clone(),
            query: controller.query(),
            maturity: controller.maturity(),
            can_navigate_months: controller.can_navigate_months(),
        }
    }

    /// Rows of the current page with gated cover slots.
    pub fn visible_results(&self) -> Vec<ListingEntry<'_>> {
        match &self.state {
            ListingState::Ready { results, .. } => gate_results(results, self.maturity),
            _ => Vec::new(),
        }
    }
}

/// Errors from a [`ListingHandle`].
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// The service task has stopped.
    #[error("Listing service is not running")]
    Closed,
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Cloneable front end of a running [`ListingService`].
#[derive(Debug, Clone)]
pub struct ListingHandle {
    commands: mpsc::Sender<ListingCommand>,
    snapshots: watch::Receiver<ListingSnapshot>,
}

impl ListingHandle {
    pub async fn send(&self, command: ListingCommand) -> Result<(), ListingError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ListingError::Closed)
    }

    pub async fn refresh(&self) -> Result<(), ListingError> {
        self.send(ListingCommand::Refresh).await
    }

    pub async fn select_page(&self, page: u32) -> Result<(), ListingError> {
        self.send(ListingCommand::SelectPage(page)).await
    }

    pub async fn select_date(&self, date: DateSelection) -> Result<(), ListingError> {
        self.send(ListingCommand::SelectDate(date)).await
    }

    pub async fn set_maturity(&self, maturity: MaturitySelection) -> Result<(), ListingError> {
        self.send(ListingCommand::SetMaturity(maturity)).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> ListingSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListingSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until the listing leaves `Loading` and return that snapshot.
    pub async fn settled(&self) -> Result<ListingSnapshot, ListingError> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx
            .wait_for(|s| s.state.is_settled())
            .await
            .map_err(|_| ListingError::Closed)?;
        Ok(snapshot.clone())
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

struct FetchCompletion {
    generation: Generation,
    result: Result<SearchPage<TitleSummary>, CatalogError>,
}

/// Task that owns a [`ListingController`].
pub struct ListingService<T, P> {
    controller: ListingController,
    transport: Arc<T>,
    params: P,
    snapshot_tx: watch::Sender<ListingSnapshot>,
    completion_tx: mpsc::UnboundedSender<FetchCompletion>,
}

impl<T, P> ListingService<T, P>
where
    T: CatalogTransport + 'static,
    P: ParamStore + 'static,
{
    /// Start the service task. It stops when `shutdown` is cancelled or
    /// every [`ListingHandle`] has been dropped.
    pub fn spawn(
        controller: ListingController,
        transport: Arc<T>,
        params: P,
        shutdown: CancellationToken,
    ) -> (ListingHandle, tokio::task::JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(ListingSnapshot::of(&controller));

        let service = Self {
            controller,
            transport,
            params,
            snapshot_tx,
            completion_tx,
        };
        let task = tokio::spawn(service.run(command_rx, completion_rx, shutdown));

        let handle = ListingHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<ListingCommand>,
        mut completions: mpsc::UnboundedReceiver<FetchCompletion>,
        shutdown: CancellationToken,
    ) {
        tracing::info!("Listing service started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(done) = completions.recv() => {
                    if self.controller.complete(done.generation, done.result) == Completion::Applied {
                        self.publish();
                    }
                }
            }
        }
        self.controller.abandon();
        tracing::info!("Listing service stopped");
    }

    fn handle(&mut self, command: ListingCommand) {
        let before = self.controller.query();
        let ticket = match command {
            ListingCommand::Refresh => Some(self.controller.refresh()),
            ListingCommand::SelectPage(page) => Some(self.controller.select_page(page)),
            ListingCommand::SelectDate(date) => Some(self.controller.select_date(date)),
            ListingCommand::NextMonth => self.controller.next_month(),
            ListingCommand::PreviousMonth => self.controller.previous_month(),
            ListingCommand::SetPageSize(size) => Some(self.controller.set_page_size(size)),
            ListingCommand::SetMaturity(maturity) => {
                self.controller.set_maturity(maturity);
                None
            }
        };

        let after = self.controller.query();
        if before.date != after.date {
            params::write_date(&self.params, &before.date, &after.date);
        } else if before.page != after.page {
            params::write_page(&self.params, after.page);
        }

        if let Some(ticket) = ticket {
            tracing::info!(
                generation = ticket.generation.value(),
                page = after.page,
                released = %ticket.request.released,
                "Fetching listing",
            );
            self.spawn_fetch(ticket);
        }
        self.publish();
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let transport = Arc::clone(&self.transport);
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let FetchTicket {
                generation,
                request,
                cancel,
            } = ticket;

            let result = tokio::select! {
                _ = cancel.cancelled() => Err(CatalogError::Cancelled),
                result = transport.search_titles(&request) => result,
            };

            // The receiver only goes away when the service stops.
            let _ = completion_tx.send(FetchCompletion { generation, result });
        });
    }

    fn publish(&self) {
        self.snapshot_tx
            .send_replace(ListingSnapshot::of(&self.controller));
    }
}
