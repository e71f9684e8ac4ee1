//! Wires configuration, gateway, wallet and read-model together.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use ballot_actions::{ActionSubmitter, ViewRefresher};
use ballot_gateway::{AppDetails, HttpGateway, SubmissionOutcome, WalletClient};
use ballot_session::SessionTracker;
use ballot_sync::{ProposalReadModel, ProposalView};
use ballot_types::{ProposalDraft, ProposalId, Timestamp};
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::render;

/// How long `connect` waits for the wallet to finish sign-in.
const CONNECT_WAIT: Duration = Duration::from_secs(60);
const CONNECT_POLL: Duration = Duration::from_secs(1);

pub struct App {
    config: ClientConfig,
    model: Arc<ProposalReadModel<HttpGateway>>,
    view: Arc<ProposalView>,
    session: SessionTracker<WalletClient>,
    actions: ActionSubmitter<Arc<WalletClient>>,
}

impl App {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let gateway = HttpGateway::new(config.gateway_config())?;
        let model = Arc::new(ProposalReadModel::new(gateway, config.sync_config()));
        let view = Arc::new(ProposalView::new(config.conflict_policy));

        let wallet = Arc::new(WalletClient::new(
            config.wallet_url.clone(),
            config.network,
            AppDetails::default(),
        )?);
        let session = SessionTracker::new(wallet.clone(), config.network);
        let actions = ActionSubmitter::new(wallet, config.contract.clone())
            .with_hook(Arc::new(ViewRefresher::new(model.clone(), view.clone())));

        Ok(Self {
            config,
            model,
            view,
            session,
            actions,
        })
    }

    /// Refresh and print the proposal list.
    pub async fn list(&self) -> anyhow::Result<()> {
        self.view.refresh(&self.model).await;
        self.print_view();
        Ok(())
    }

    fn print_view(&self) {
        let state = self.view.snapshot();
        if let Some(error) = &state.error {
            eprintln!("{error}");
            return;
        }
        if state.proposals.is_empty() {
            println!("No proposals yet.");
        }
        for p in &state.proposals {
            println!("{}", render::proposal_line(p));
        }
        if !state.omitted.is_empty() {
            let ids: Vec<String> = state.omitted.iter().map(|id| format!("#{id}")).collect();
            eprintln!("(could not load {})", ids.join(", "));
        }
    }

    pub async fn show(&self, id: ProposalId) -> anyhow::Result<()> {
        let voter = self.session.sync().await.address().cloned();
        let ctx = self
            .model
            .context(id, voter.as_ref())
            .await
            .with_context(|| format!("failed to load proposal #{id}"))?;
        let results = match self.model.contract().voting_results(id).await {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(%id, "voting results unavailable: {e}");
                None
            }
        };
        print!("{}", render::proposal_detail(&ctx, results.as_ref(), Timestamp::now()));
        Ok(())
    }

    pub async fn create(&self, title: String, description: String) -> anyhow::Result<()> {
        let draft = ProposalDraft::new(title, description);
        draft.validate()?;
        let outcome = self
            .actions
            .create_proposal(draft.title.trim(), draft.description.trim())
            .await?;
        self.report(outcome);
        Ok(())
    }

    /// Refuse actions on closed proposals unless forced.
    ///
    /// Advisory only: the contract enforces the voting window.
    async fn ensure_active(&self, id: ProposalId, force: bool) -> anyhow::Result<()> {
        if force {
            return Ok(());
        }
        if !self.model.contract().is_voting_active(id).await {
            bail!("voting is not active for proposal #{id} (use --force to submit anyway)");
        }
        Ok(())
    }

    pub async fn vote(&self, id: ProposalId, in_favor: bool, force: bool) -> anyhow::Result<()> {
        self.ensure_active(id, force).await?;
        let outcome = self.actions.vote(id, in_favor).await?;
        self.report(outcome);
        Ok(())
    }

    pub async fn end(&self, id: ProposalId, force: bool) -> anyhow::Result<()> {
        self.ensure_active(id, force).await?;
        let outcome = self.actions.end_voting(id).await?;
        self.report(outcome);
        Ok(())
    }

    fn report(&self, outcome: SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Finished(receipt) => {
                println!("Transaction submitted: {}", receipt.txid);
                println!("It takes effect once confirmed on chain.");
                self.print_view();
            }
            SubmissionOutcome::Cancelled => println!("Transaction cancelled."),
        }
    }

    /// Refresh on an interval until Ctrl-C.
    pub async fn watch(&self, interval: Option<u64>) -> anyhow::Result<()> {
        let period = interval
            .map(|s| Duration::from_secs(s.max(1)))
            .unwrap_or_else(|| self.config.poll_interval());
        info!(period_secs = period.as_secs(), "watching proposals");

        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, stopping watch");
                    break;
                }
                _ = ticker.tick() => {
                    if self.view.refresh(&self.model).await {
                        println!("---");
                        self.print_view();
                    }
                }
            }
        }
        Ok(())
    }

    pub async fn connect(&self) -> anyhow::Result<()> {
        if let Some(address) = self.session.sync().await.address() {
            println!("Already connected as {address}");
            return Ok(());
        }
        self.session.sign_in().await?;
        println!("Approve the connection in your wallet...");

        let deadline = tokio::time::Instant::now() + CONNECT_WAIT;
        while tokio::time::Instant::now() < deadline {
            tokio::time::sleep(CONNECT_POLL).await;
            if let Some(address) = self.session.sync().await.address() {
                println!("Connected as {address}");
                return Ok(());
            }
        }
        bail!("wallet did not complete sign-in within {}s", CONNECT_WAIT.as_secs())
    }

    pub async fn disconnect(&self) -> anyhow::Result<()> {
        let reload = self.session.sign_out().await;
        self.view.reset();
        info!(generation = reload.generation, "session state discarded");
        println!("Disconnected.");
        Ok(())
    }

    pub async fn status(&self) -> anyhow::Result<()> {
        let state = self.session.sync().await;
        match state.address() {
            Some(address) => println!("Connected as {address} ({})", self.config.network.as_str()),
            None => println!("Not connected ({})", self.config.network.as_str()),
        }
        Ok(())
    }

    pub fn contracts(&self) {
        println!("voting contract: {}", self.model.contract().contract_info());
        for (name, id) in &self.config.contracts {
            println!("{name:<20} {id}");
        }
    }
}
