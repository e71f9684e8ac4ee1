//! Decoding raw Clarity results into domain types.
//!
//! Contract functions wrap their answers in `(ok ..)` / `(some ..)`;
//! `(err ..)` and `none` mean the thing asked about does not exist.

use ballot_clarity::ClarityValue;
use ballot_types::{Principal, Proposal, ProposalId, ProposalStatus, Timestamp, VoteRecord, VotingResults};

use crate::GatewayError;

/// Peel `ok`/`some` wrappers; map `err`/`none` to [`GatewayError::NotFound`].
pub fn unwrap_found(value: ClarityValue, what: &str) -> Result<ClarityValue, GatewayError> {
    let mut current = value;
    loop {
        current = match current {
            ClarityValue::ResponseOk(inner) | ClarityValue::OptionalSome(inner) => *inner,
            ClarityValue::ResponseErr(_) | ClarityValue::OptionalNone => {
                return Err(GatewayError::NotFound(what.to_string()))
            }
            other => return Ok(other),
        };
    }
}

fn u64_field(tuple: &ClarityValue, name: &str) -> Result<u64, GatewayError> {
    Ok(tuple.field(name)?.expect_u64()?)
}

fn text_field(tuple: &ClarityValue, name: &str) -> Result<String, GatewayError> {
    Ok(tuple.field(name)?.expect_text()?.to_string())
}

fn status_field(tuple: &ClarityValue) -> Result<ProposalStatus, GatewayError> {
    Ok(ProposalStatus::from_contract(tuple.field("status")?.expect_text()?))
}

/// Decode a `get-proposal-count` result.
pub fn decode_count(value: ClarityValue) -> Result<u64, GatewayError> {
    Ok(unwrap_found(value, "proposal count")?.expect_u64()?)
}

/// Decode an `is-voting-active` result.
pub fn decode_active(value: ClarityValue) -> Result<bool, GatewayError> {
    Ok(unwrap_found(value, "voting status")?.expect_bool()?)
}

/// Decode a `get-proposal` result for `id`.
pub fn decode_proposal(id: ProposalId, value: ClarityValue) -> Result<Proposal, GatewayError> {
    let tuple = unwrap_found(value, &format!("proposal #{id}"))?;

    let proposer_raw = tuple.field("proposer")?.expect_principal()?;
    let proposer = Principal::parse(proposer_raw)
        .map_err(|e| GatewayError::MalformedResponse(format!("proposer: {e}")))?;

    Ok(Proposal {
        proposal_id: id,
        title: text_field(&tuple, "title")?,
        description: text_field(&tuple, "description")?,
        proposer,
        votes_for: u64_field(&tuple, "votes-for")?,
        votes_against: u64_field(&tuple, "votes-against")?,
        created_at: Timestamp::new(u64_field(&tuple, "created-at")?),
        end_time: Timestamp::new(u64_field(&tuple, "end-time")?),
        executed: tuple.field("executed")?.expect_bool()?,
        quorum: u64_field(&tuple, "quorum")?,
        status: status_field(&tuple)?,
    })
}

/// Decode a `get-voting-results` result.
pub fn decode_voting_results(id: ProposalId, value: ClarityValue) -> Result<VotingResults, GatewayError> {
    let tuple = unwrap_found(value, &format!("results for proposal #{id}"))?;
    Ok(VotingResults {
        votes_for: u64_field(&tuple, "votes-for")?,
        votes_against: u64_field(&tuple, "votes-against")?,
        total_votes: u64_field(&tuple, "total-votes")?,
        status: status_field(&tuple)?,
    })
}

/// Decode a `get-vote` result.
pub fn decode_vote_record(value: ClarityValue) -> Result<VoteRecord, GatewayError> {
    let tuple = unwrap_found(value, "vote")?;
    Ok(VoteRecord {
        vote: tuple.field("vote")?.expect_bool()?,
        timestamp: Timestamp::new(u64_field(&tuple, "timestamp")?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_clarity::ClarityError;

    const PROPOSER: &str = "SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B";

    fn proposal_tuple() -> ClarityValue {
        let proposer = Principal::parse(PROPOSER).unwrap();
        ClarityValue::tuple([
            ("title", ClarityValue::string_utf8("Fund docs")),
            ("description", ClarityValue::string_utf8("Pay for documentation")),
            ("proposer", ClarityValue::principal(&proposer).unwrap()),
            ("votes-for", ClarityValue::uint(3u64)),
            ("votes-against", ClarityValue::uint(1u64)),
            ("created-at", ClarityValue::uint(100u64)),
            ("end-time", ClarityValue::uint(1100u64)),
            ("executed", ClarityValue::Bool(false)),
            ("quorum", ClarityValue::uint(10u64)),
            ("status", ClarityValue::StringAscii("active".into())),
        ])
    }

    #[test]
    fn proposal_decoded_from_ok_some() {
        let id = ProposalId::new(4).unwrap();
        let raw = ClarityValue::ok(ClarityValue::some(proposal_tuple()));
        let p = decode_proposal(id, raw).unwrap();
        assert_eq!(p.proposal_id, id);
        assert_eq!(p.title, "Fund docs");
        assert_eq!(p.proposer.as_str(), PROPOSER);
        assert_eq!((p.votes_for, p.votes_against), (3, 1));
        assert_eq!(p.end_time, Timestamp::new(1100));
        assert_eq!(p.status, ProposalStatus::Active);
        assert_eq!(p.tally().for_percentage(), "75.0");
    }

    #[test]
    fn contract_proposer_is_kept() {
        let mut fields = match proposal_tuple() {
            ClarityValue::Tuple(f) => f,
            _ => unreachable!(),
        };
        fields.insert(
            "proposer".into(),
            ClarityValue::ContractPrincipal {
                version: 22,
                hash160: [0u8; 20],
                name: "dao-executor".into(),
            },
        );
        let p = decode_proposal(ProposalId::new(2).unwrap(), ClarityValue::Tuple(fields)).unwrap();
        assert!(p.proposer.is_contract());
        assert_eq!(p.proposer.as_str(), "SP000000000000000000002Q6VF78.dao-executor");
    }

    #[test]
    fn none_is_not_found() {
        let id = ProposalId::new(9).unwrap();
        let err = decode_proposal(id, ClarityValue::OptionalNone).unwrap_err();
        assert_eq!(err, GatewayError::NotFound("proposal #9".into()));
        assert!(err.is_not_found());
    }

    #[test]
    fn err_response_is_not_found() {
        let err = decode_vote_record(ClarityValue::err(ClarityValue::uint(404u64))).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_field_reported() {
        let mut fields = match proposal_tuple() {
            ClarityValue::Tuple(f) => f,
            _ => unreachable!(),
        };
        fields.remove("quorum");
        let err = decode_proposal(ProposalId::new(1).unwrap(), ClarityValue::Tuple(fields))
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Decode(ClarityError::MissingField("quorum".into()))
        );
    }

    #[test]
    fn count_and_active() {
        assert_eq!(decode_count(ClarityValue::ok(ClarityValue::uint(5u64))).unwrap(), 5);
        assert_eq!(decode_count(ClarityValue::uint(0u64)).unwrap(), 0);
        assert!(decode_active(ClarityValue::ok(ClarityValue::Bool(true))).unwrap());
        assert!(decode_active(ClarityValue::uint(1u64)).is_err());
    }

    #[test]
    fn results_and_vote_record() {
        let results = decode_voting_results(
            ProposalId::new(1).unwrap(),
            ClarityValue::ok(ClarityValue::tuple([
                ("votes-for", ClarityValue::uint(2u64)),
                ("votes-against", ClarityValue::uint(2u64)),
                ("total-votes", ClarityValue::uint(4u64)),
                ("status", ClarityValue::StringAscii("rejected".into())),
            ])),
        )
        .unwrap();
        assert_eq!(results.total_votes, 4);
        assert_eq!(results.status, ProposalStatus::Rejected);

        let record = decode_vote_record(ClarityValue::some(ClarityValue::tuple([
            ("vote", ClarityValue::Bool(false)),
            ("timestamp", ClarityValue::uint(55u64)),
        ])))
        .unwrap();
        assert!(!record.vote);
        assert_eq!(record.timestamp, Timestamp::new(55));
    }
}
