//! Read-model behaviour against a nullable gateway.

use std::sync::Arc;
use std::time::Duration;

use ballot_gateway::{functions, GatewayError};
use ballot_nullables::{sample_proposal, NullGateway, SAMPLE_ADDRESS};
use ballot_sync::{
    ConflictPolicy, FailurePolicy, ProposalReadModel, ProposalView, SyncConfig, SyncError,
    ViewState, LOAD_FAILED_MESSAGE,
};
use ballot_types::{Principal, ProposalId, Timestamp, VoteRecord};

fn model(gw: NullGateway) -> ProposalReadModel<NullGateway> {
    ProposalReadModel::new(gw, SyncConfig::default())
}

fn model_with(gw: Arc<NullGateway>, config: SyncConfig) -> Arc<ProposalReadModel<Arc<NullGateway>>> {
    Arc::new(ProposalReadModel::new(gw, config))
}

#[tokio::test]
async fn count_n_issues_exactly_n_item_queries() {
    for n in [0u64, 1, 2, 7] {
        let model = model(NullGateway::with_proposals(n));
        let report = model.fetch_all().await.unwrap();

        let asked: Vec<u64> = model
            .contract()
            .gateway()
            .calls_to(functions::GET_PROPOSAL)
            .iter()
            .filter_map(|c| c.id_arg())
            .collect();
        assert_eq!(asked, (1..=n).collect::<Vec<_>>());
        assert_eq!(model.contract().gateway().calls_to(functions::GET_PROPOSAL_COUNT).len(), 1);
        assert_eq!(report.proposals.len() as u64, n);
    }
}

#[tokio::test]
async fn proposals_arrive_in_ascending_id_order() {
    let gw = NullGateway::with_proposals(5);
    gw.set_latency(Duration::from_millis(2));
    let config = SyncConfig {
        max_concurrency: 3,
        ..SyncConfig::default()
    };
    let model = ProposalReadModel::new(gw, config);
    let report = model.fetch_all().await.unwrap();
    let ids: Vec<u64> = report.proposals.iter().map(|p| p.proposal_id.get()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(model.contract().gateway().max_in_flight() <= 3);
}

#[tokio::test]
async fn default_fetch_is_sequential() {
    let gw = NullGateway::with_proposals(4);
    gw.set_latency(Duration::from_millis(2));
    let model = model(gw);
    model.fetch_all().await.unwrap();
    assert_eq!(model.contract().gateway().max_in_flight(), 1);
}

#[tokio::test]
async fn failing_ids_are_omitted_silently() {
    let gw = NullGateway::with_proposals(5);
    gw.fail_proposal(2, GatewayError::Transport("reset".into()));
    gw.fail_proposal(4, GatewayError::Http(500));
    let report = model(gw).fetch_all().await.unwrap();

    assert_eq!(report.count, 5);
    let ids: Vec<u64> = report.proposals.iter().map(|p| p.proposal_id.get()).collect();
    assert_eq!(ids, vec![1, 3, 5]);
    assert_eq!(
        report.failed_ids(),
        vec![ProposalId::new(2).unwrap(), ProposalId::new(4).unwrap()]
    );
    assert!(!report.is_complete());
}

#[tokio::test]
async fn count_failure_reads_as_empty_under_omit() {
    let gw = NullGateway::with_proposals(3);
    gw.fail_count(GatewayError::Http(503));
    let model = model(gw);
    let report = model.fetch_all().await.unwrap();
    assert_eq!(report.count, 0);
    assert!(report.proposals.is_empty());
    assert_eq!(report.count_error, Some(GatewayError::Http(503)));
    assert!(model.contract().gateway().calls_to(functions::GET_PROPOSAL).is_empty());
}

#[tokio::test]
async fn fail_fast_stops_at_first_failure() {
    let gw = NullGateway::with_proposals(4);
    gw.fail_proposal(2, GatewayError::Http(500));
    let config = SyncConfig {
        failure_policy: FailurePolicy::FailFast,
        ..SyncConfig::default()
    };
    let model = ProposalReadModel::new(gw, config);
    let err = model.fetch_all().await.unwrap_err();
    assert_eq!(
        err,
        SyncError::Proposal {
            id: ProposalId::new(2).unwrap(),
            source: GatewayError::Http(500),
        }
    );
    // Sequential by default, so nothing past the failing id was asked for.
    assert_eq!(model.contract().gateway().calls_to(functions::GET_PROPOSAL).len(), 2);
}

#[tokio::test]
async fn fail_fast_count_failure_fails_view_refresh() {
    let gw = NullGateway::with_proposals(2);
    gw.fail_count(GatewayError::Transport("down".into()));
    let config = SyncConfig {
        failure_policy: FailurePolicy::FailFast,
        ..SyncConfig::default()
    };
    let model = ProposalReadModel::new(gw, config);
    let view = ProposalView::default();
    assert!(view.refresh(&model).await);
    let state = view.snapshot();
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
    assert!(!state.loading);
}

#[tokio::test]
async fn context_queries_activity_once_and_defaults_false() {
    let gw = NullGateway::with_proposals(2);
    let voter = Principal::parse(SAMPLE_ADDRESS).unwrap();
    let record = VoteRecord {
        vote: false,
        timestamp: Timestamp::new(42),
    };
    gw.set_vote(SAMPLE_ADDRESS, 1, record);
    let model = model(gw);

    // No activity scripted: the query fails and reads as inactive.
    let ctx = model
        .context(ProposalId::new(1).unwrap(), Some(&voter))
        .await
        .unwrap();
    assert!(!ctx.voting_active);
    assert_eq!(ctx.user_vote, Some(record));
    assert_eq!(ctx.proposal, sample_proposal(1));
    assert_eq!(
        model.contract().gateway().calls_to(functions::IS_VOTING_ACTIVE).len(),
        1
    );

    model.contract().gateway().set_active(2, true);
    let ctx = model.context(ProposalId::new(2).unwrap(), None).await.unwrap();
    assert!(ctx.voting_active);
    assert!(ctx.can_vote());
    assert_eq!(model.contract().gateway().calls_to(functions::GET_VOTE).len(), 1);
}

/// Start refresh A (held at the count query), run refresh B to completion
/// against changed contract state, then let A finish.
async fn reverse_completion(policy: ConflictPolicy) -> (ViewState, u64, u64) {
    let gw = Arc::new(NullGateway::with_proposals(1));
    let model = model_with(gw.clone(), SyncConfig::default());
    let view = Arc::new(ProposalView::new(policy));

    let gate = gw.hold_next(functions::GET_PROPOSAL_COUNT);
    let first = {
        let (model, view) = (model.clone(), view.clone());
        tokio::spawn(async move {
            let ticket = view.begin();
            let result = model.fetch_all().await;
            view.apply(ticket, result);
            ticket.seq()
        })
    };
    gate.entered().await;

    gw.set_proposal(sample_proposal(2));
    gw.set_proposal(sample_proposal(3));
    let ticket_b = view.begin();
    let result_b = model.fetch_all().await;
    view.apply(ticket_b, result_b);
    assert_eq!(view.snapshot().proposals.len(), 3);

    gate.release();
    let ticket_a = first.await.unwrap();
    (view.snapshot(), ticket_a, ticket_b.seq())
}

#[tokio::test]
async fn reverse_completion_last_completed_keeps_later_completer() {
    let (state, ticket_a, _) = reverse_completion(ConflictPolicy::LastCompleted).await;
    assert_eq!(state.proposals.len(), 1);
    assert_eq!(state.applied, ticket_a);
    assert!(!state.loading);
}

#[tokio::test]
async fn reverse_completion_latest_issued_keeps_later_issued() {
    let (state, _, ticket_b) = reverse_completion(ConflictPolicy::LatestIssued).await;
    assert_eq!(state.proposals.len(), 3);
    assert_eq!(state.applied, ticket_b);
    assert!(!state.loading);
}
