//! Sign-out followed by a full reload of view state.

use std::sync::Arc;

use ballot_nullables::{NullGateway, NullWalletAuth, SAMPLE_ADDRESS};
use ballot_session::{SessionState, SessionTracker};
use ballot_sync::{ProposalReadModel, ProposalView, SyncConfig};
use ballot_types::NetworkId;

#[tokio::test]
async fn sign_out_then_reload_starts_clean() {
    let wallet = Arc::new(NullWalletAuth::new());
    let session = SessionTracker::new(wallet.clone(), NetworkId::Mainnet);
    let model = ProposalReadModel::new(NullGateway::with_proposals(2), SyncConfig::default());
    let view = ProposalView::default();

    session.sign_in().await.unwrap();
    assert_eq!(wallet.auth_requests(), 1);
    assert!(!session.is_connected());

    wallet.approve_sample();
    let state = session.sync().await;
    assert_eq!(state.address().map(|a| a.as_str()), Some(SAMPLE_ADDRESS));
    view.refresh(&model).await;
    assert_eq!(view.snapshot().proposals.len(), 2);

    let reload = session.sign_out().await;
    view.reset();
    assert_eq!(reload.generation, 1);
    assert!(view.snapshot().proposals.is_empty());

    assert_eq!(session.sync().await, SessionState::Disconnected);
}

#[tokio::test]
async fn unreachable_wallet_still_clears_local_session() {
    let wallet = Arc::new(NullWalletAuth::signed_in());
    let session = SessionTracker::new(wallet.clone(), NetworkId::Testnet);
    assert!(session.sync().await.is_connected());

    wallet.set_unavailable(true);
    let reload = session.sign_out().await;
    assert_eq!(reload.generation, session.generation());
    assert!(!session.is_connected());
    assert!(session.sign_in().await.is_err());
}
