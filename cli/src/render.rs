//! Plain-text rendering of proposals for the terminal.

use ballot_sync::ProposalContext;
use ballot_types::{Proposal, Timestamp, VotingResults};
use ballot_utils::{format_duration, truncate_address};

/// One summary line per proposal.
pub fn proposal_line(p: &Proposal) -> String {
    let tally = p.tally();
    format!(
        "#{:<4} {:<8} {}  (for {} / {}%, against {} / {}%, total {})",
        p.proposal_id.get(),
        p.status.as_str(),
        p.title,
        p.votes_for,
        tally.for_percentage(),
        p.votes_against,
        tally.against_percentage(),
        tally.total(),
    )
}

/// Full view of one proposal.
pub fn proposal_detail(
    ctx: &ProposalContext,
    results: Option<&VotingResults>,
    now: Timestamp,
) -> String {
    let p = &ctx.proposal;
    let tally = p.tally();
    let quorum = if tally.meets_quorum(p.quorum) { "met" } else { "not met" };

    let mut out = format!(
        "Proposal #{id}: {title}\n{description}\n\n\
         Proposer:   {proposer}\n\
         Status:     {status}\n\
         For:        {votes_for} ({for_pct}%)\n\
         Against:    {votes_against} ({against_pct}%)\n\
         Total:      {total}\n\
         Quorum:     {quorum_n} ({quorum})\n",
        id = p.proposal_id,
        title = p.title,
        description = p.description,
        proposer = truncate_address(p.proposer.as_str()),
        status = p.status,
        votes_for = p.votes_for,
        for_pct = tally.for_percentage(),
        votes_against = p.votes_against,
        against_pct = tally.against_percentage(),
        total = tally.total(),
        quorum_n = p.quorum,
    );
    if let Some(r) = results {
        out.push_str(&format!("Reported:   {} votes, {}\n", r.total_votes, r.status));
    }
    if p.executed {
        out.push_str("Executed:   yes\n");
    }

    out.push_str(&match (ctx.voting_active, ctx.time_remaining(now)) {
        (false, _) => "Voting:     closed\n".to_string(),
        // The window has passed but nobody has called end-voting yet.
        (true, 0) => "Voting:     open, awaiting end-voting\n".to_string(),
        (true, left) => format!("Voting:     open, {} left\n", format_duration(left)),
    });

    out.push_str(match &ctx.user_vote {
        Some(v) if v.vote => "Your vote:  for\n",
        Some(_) => "Your vote:  against\n",
        None => "Your vote:  none\n",
    });
    out
}
