//! End-to-end proposal flows across the voting variants.

use agora_roles::MemoryRoleRegistry;
use agora_types::{ActionCall, OrgAddress, ProposalId, RoleId, Timestamp};
use agora_voting::{
    BalancePower, BlendedPower, Event, FlatPower, MemoryBalances, PowerClass, RecordingGateway,
    VotingConfig, VotingEngine,
};

fn addr(name: &str) -> OrgAddress {
    OrgAddress::new(format!("org_{name}"))
}

fn voter(i: usize) -> OrgAddress {
    addr(&format!("voter{i}"))
}

fn config() -> VotingConfig {
    VotingConfig {
        quorum_percent: 50,
        require_strict_majority: true,
        min_duration_minutes: 1,
        ..VotingConfig::default()
    }
}

/// Engine + registry with ten role-holding voters and one creator.
fn direct_democracy() -> (VotingEngine, MemoryRoleRegistry) {
    let authority = addr("authority");
    let mut engine = VotingEngine::new(
        addr("module"),
        authority.clone(),
        config(),
        Box::new(FlatPower),
    )
    .unwrap();
    engine
        .add_creator_role(&authority, RoleId::new("creator"))
        .unwrap();
    engine
        .add_voter_role(&authority, RoleId::new("voter"))
        .unwrap();
    for t in ["treasury", "registry", "vault"] {
        engine.allow_target(&authority, addr(t)).unwrap();
    }

    let mut registry = MemoryRoleRegistry::new();
    registry.grant(addr("creator"), RoleId::new("creator"));
    for i in 0..10 {
        registry.grant(voter(i), RoleId::new("voter"));
    }
    (engine, registry)
}

fn batch_for(target: &str, marker: u8) -> Vec<ActionCall> {
    vec![ActionCall::new(addr(target), marker as u128, vec![marker])]
}

/// The canonical scenario: quorum 50%, 3 options, 10 eligible voters each
/// worth 100 units. Six voters split 70/30 between options 0 and 1; four
/// abstain. Total cast 600; option 0 gets 420, option 1 gets 180 — quorum
/// and majority both met, winner option 0.
#[test]
fn test_split_ballot_scenario_elects_option_zero() {
    let (mut engine, registry) = direct_democracy();
    let now = Timestamp::new(10_000);
    let id = engine
        .create_proposal(
            &addr("creator"),
            &registry,
            "choose a budget".into(),
            60,
            vec!["plan a".into(), "plan b".into(), "plan c".into()],
            vec![
                batch_for("treasury", 1),
                batch_for("registry", 2),
                batch_for("vault", 3),
            ],
            now,
        )
        .unwrap();

    for i in 0..6 {
        engine
            .vote(&voter(i), &registry, id, &[0, 1], &[70, 30], now)
            .unwrap();
    }

    let proposal = engine.proposal(id).unwrap();
    assert_eq!(proposal.totals, vec![420, 180, 0]);
    assert_eq!(proposal.total_weight_cast, 600);

    let mut gateway = RecordingGateway::new();
    let after = Timestamp::new(proposal.ends_at.as_secs() + 1);
    let outcome = engine.finalize(id, &mut gateway, after).unwrap();
    assert_eq!(outcome.winner, 0);
    assert_eq!(outcome.winner_total, 420);
    assert!(outcome.valid);

    // Exactly the winning option's batch was forwarded, nothing else.
    assert_eq!(gateway.executed, vec![(id, batch_for("treasury", 1))]);
}

/// Vote entirely for option k, finalize, and only option k's batch
/// reaches the gateway.
#[test]
fn test_only_winning_batch_forwarded() {
    for k in 0..3usize {
        let (mut engine, registry) = direct_democracy();
        let now = Timestamp::new(0);
        let targets = ["treasury", "registry", "vault"];
        let id = engine
            .create_proposal(
                &addr("creator"),
                &registry,
                "pick one".into(),
                60,
                targets.iter().map(|t| t.to_string()).collect(),
                targets
                    .iter()
                    .enumerate()
                    .map(|(i, t)| batch_for(t, i as u8 + 1))
                    .collect(),
                now,
            )
            .unwrap();

        for i in 0..10 {
            engine.vote(&voter(i), &registry, id, &[k], &[100], now).unwrap();
        }
        let after = Timestamp::new(engine.proposal(id).unwrap().ends_at.as_secs() + 1);
        let mut gateway = RecordingGateway::new();
        let outcome = engine.finalize(id, &mut gateway, after).unwrap();
        assert_eq!(outcome.winner, k);
        assert!(outcome.valid);
        assert_eq!(gateway.executed, vec![(id, batch_for(targets[k], k as u8 + 1))]);
    }
}

/// An exact top-two tie under strict majority never produces a winner.
#[test]
fn test_strict_majority_tie_invalidates() {
    let (mut engine, registry) = direct_democracy();
    // Drop the quorum so only the tie stands in the way.
    engine.set_quorum(&addr("authority"), 30).unwrap();
    let now = Timestamp::new(0);
    let id = engine
        .create_proposal(
            &addr("creator"),
            &registry,
            "tied question".into(),
            60,
            vec!["a".into(), "b".into()],
            vec![batch_for("treasury", 1), batch_for("registry", 2)],
            now,
        )
        .unwrap();

    // Six voters split evenly: 300 vs 300 of 600 cast. Quorum at 30% is
    // met (300*100 > 600*30) but strict majority is not.
    for i in 0..6 {
        let option = i % 2;
        engine.vote(&voter(i), &registry, id, &[option], &[100], now).unwrap();
    }

    let after = Timestamp::new(engine.proposal(id).unwrap().ends_at.as_secs() + 1);
    let mut gateway = RecordingGateway::new();
    let outcome = engine.finalize(id, &mut gateway, after).unwrap();
    assert!(!outcome.valid);
    assert!(gateway.executed.is_empty());
}

/// Participation variant: power follows balances at cast time, with a
/// floor that keeps dust accounts out.
#[test]
fn test_participation_weighting() {
    let authority = addr("authority");
    let mut balances = MemoryBalances::new();
    balances.set(voter(0), 900);
    balances.set(voter(1), 300);
    balances.set(voter(2), 5); // below floor

    let mut engine = VotingEngine::new(
        addr("module"),
        authority.clone(),
        config(),
        Box::new(BalancePower::new(Box::new(balances), 10, false)),
    )
    .unwrap();
    engine.add_voter_role(&authority, RoleId::new("voter")).unwrap();

    let mut registry = MemoryRoleRegistry::new();
    for i in 0..3 {
        registry.grant(voter(i), RoleId::new("voter"));
    }

    let now = Timestamp::new(0);
    let id = engine
        .create_proposal(
            &authority,
            &registry,
            "stake-weighted".into(),
            60,
            vec!["a".into(), "b".into()],
            vec![Vec::new(), Vec::new()],
            now,
        )
        .unwrap();

    engine.vote(&voter(0), &registry, id, &[0], &[100], now).unwrap();
    engine.vote(&voter(1), &registry, id, &[1], &[100], now).unwrap();
    assert!(engine
        .vote(&voter(2), &registry, id, &[0], &[100], now)
        .is_err());

    let proposal = engine.proposal(id).unwrap();
    assert_eq!(proposal.totals, vec![900, 300]);
    assert_eq!(proposal.total_weight_cast, 1200);

    let after = Timestamp::new(proposal.ends_at.as_secs() + 1);
    let mut gateway = RecordingGateway::new();
    let outcome = engine.finalize(id, &mut gateway, after).unwrap();
    // 900*100 > 1200*50 → quorum met; 900 > 300 → majority met.
    assert_eq!(outcome.winner, 0);
    assert!(outcome.valid);
}

/// Hybrid variant: flat and balance classes blended 50/50.
#[test]
fn test_hybrid_blended_weighting() {
    let authority = addr("authority");
    let mut balances = MemoryBalances::new();
    balances.set(voter(0), 1_000);
    balances.set(voter(1), 0);

    let blended = BlendedPower::new(vec![
        PowerClass {
            strategy: Box::new(FlatPower),
            share_percent: 50,
        },
        PowerClass {
            strategy: Box::new(BalancePower::new(Box::new(balances), 0, false)),
            share_percent: 50,
        },
    ])
    .unwrap();

    let mut engine = VotingEngine::new(
        addr("module"),
        authority.clone(),
        config(),
        Box::new(blended),
    )
    .unwrap();
    engine.add_voter_role(&authority, RoleId::new("voter")).unwrap();
    let mut registry = MemoryRoleRegistry::new();
    registry.grant(voter(0), RoleId::new("voter"));
    registry.grant(voter(1), RoleId::new("voter"));

    let now = Timestamp::new(0);
    let id = engine
        .create_proposal(
            &authority,
            &registry,
            "blend".into(),
            60,
            vec!["a".into(), "b".into()],
            vec![Vec::new(), Vec::new()],
            now,
        )
        .unwrap();

    // voter0: 100*50/100 + 1000*50/100 = 550; voter1: 50 + 0 = 50.
    engine.vote(&voter(0), &registry, id, &[0], &[100], now).unwrap();
    engine.vote(&voter(1), &registry, id, &[1], &[100], now).unwrap();
    let proposal = engine.proposal(id).unwrap();
    assert_eq!(proposal.totals, vec![550, 50]);
    assert_eq!(proposal.total_weight_cast, 600);
}

/// Full lifecycle: create → vote → finalize → paginated cleanup, with
/// the event stream carrying every transition.
#[test]
fn test_lifecycle_events() {
    let (mut engine, registry) = direct_democracy();
    engine.take_events(); // discard setup events

    let now = Timestamp::new(0);
    let id = engine
        .create_proposal(
            &addr("creator"),
            &registry,
            "event check".into(),
            60,
            vec!["a".into(), "b".into()],
            vec![batch_for("treasury", 1), Vec::new()],
            now,
        )
        .unwrap();
    engine.vote(&voter(0), &registry, id, &[0], &[100], now).unwrap();

    let after = Timestamp::new(engine.proposal(id).unwrap().ends_at.as_secs() + 1);
    let mut gateway = RecordingGateway::new();
    engine.finalize(id, &mut gateway, after).unwrap();
    engine.cleanup(id, &[voter(0)], after).unwrap();
    engine.cleanup(id, &[], after).unwrap();

    let events = engine.take_events();
    assert!(matches!(events[0], Event::ProposalCreated { id: e, .. } if e == id));
    assert!(matches!(events[1], Event::VoteCast { power: 100, .. }));
    assert!(matches!(
        events[2],
        Event::WinnerAnnounced {
            winner: 0,
            valid: true,
            executed: true,
            ..
        }
    ));
    assert!(matches!(
        events[3],
        Event::ProposalCleaned {
            markers_removed: 1,
            ..
        }
    ));
    assert!(matches!(
        events[4],
        Event::ProposalCleaned {
            batches_removed: true,
            ..
        }
    ));
}

/// Finalizing an id that was never created reports the invalid id, and
/// the engine stays usable.
#[test]
fn test_unknown_proposal_is_typed_failure() {
    let (mut engine, registry) = direct_democracy();
    let mut gateway = RecordingGateway::new();
    assert!(engine
        .finalize(ProposalId::new(7), &mut gateway, Timestamp::new(0))
        .is_err());
    // Engine still accepts new work afterwards.
    assert!(engine
        .create_proposal(
            &addr("creator"),
            &registry,
            "still alive".into(),
            60,
            vec!["a".into()],
            vec![Vec::new()],
            Timestamp::new(0),
        )
        .is_ok());
}
