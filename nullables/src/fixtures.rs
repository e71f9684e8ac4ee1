//! Sample data and encoders shared by the nullables.

use ballot_clarity::{ClarityError, ClarityValue};
use ballot_types::{Principal, Proposal, ProposalId, ProposalStatus, Timestamp};

/// A valid mainnet address for tests.
pub const SAMPLE_ADDRESS: &str = "SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B";

/// A deterministic active proposal for `id`.
///
/// # Panics
///
/// If `id` is zero.
pub fn sample_proposal(id: u64) -> Proposal {
    let proposal_id = ProposalId::new(id).expect("proposal ids start at 1");
    Proposal {
        proposal_id,
        title: format!("Proposal {id}"),
        description: format!("Description of proposal {id}"),
        proposer: Principal::parse(SAMPLE_ADDRESS).expect("sample address is valid"),
        votes_for: id * 3,
        votes_against: id,
        created_at: Timestamp::new(1_700_000_000 + id),
        end_time: Timestamp::new(1_700_086_400 + id),
        executed: false,
        quorum: 10,
        status: ProposalStatus::Active,
    }
}

fn status_value(status: &ProposalStatus) -> ClarityValue {
    ClarityValue::StringAscii(status.as_str().to_string())
}

/// Encode a proposal the way `get-proposal` returns it (the bare tuple).
pub fn proposal_to_clarity(p: &Proposal) -> Result<ClarityValue, ClarityError> {
    Ok(ClarityValue::tuple([
        ("title", ClarityValue::string_utf8(p.title.clone())),
        ("description", ClarityValue::string_utf8(p.description.clone())),
        ("proposer", ClarityValue::principal(&p.proposer)?),
        ("votes-for", ClarityValue::uint(p.votes_for)),
        ("votes-against", ClarityValue::uint(p.votes_against)),
        ("created-at", ClarityValue::uint(p.created_at.as_secs())),
        ("end-time", ClarityValue::uint(p.end_time.as_secs())),
        ("executed", ClarityValue::Bool(p.executed)),
        ("quorum", ClarityValue::uint(p.quorum)),
        ("status", status_value(&p.status)),
    ]))
}

/// Encode the `get-voting-results` tuple derived from a proposal.
pub(crate) fn results_to_clarity(p: &Proposal) -> ClarityValue {
    ClarityValue::tuple([
        ("votes-for", ClarityValue::uint(p.votes_for)),
        ("votes-against", ClarityValue::uint(p.votes_against)),
        ("total-votes", ClarityValue::uint(p.total_votes())),
        ("status", status_value(&p.status)),
    ])
}
