//! Property checks over generated delivery sequences.

use strictly_cricket::{
    BALLS_PER_OVER, Delivery, ErrorKind, ExtraKind, GuardRejection, InningsInvariants,
    InvariantSet, MAX_WICKETS, MatchConfig, RawSetup, ScoringError, Scorer,
};
use strum::IntoEnumIterator;

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn delivery(&mut self) -> Delivery {
        let extras: Vec<ExtraKind> = ExtraKind::iter().collect();
        match self.next() % 16 {
            0..=6 => Delivery::run((self.next() % 7) as u8),
            7..=11 => Delivery::run(0),
            12 => Delivery::Wicket,
            13 => Delivery::extra_runs(ExtraKind::Bye, (self.next() % 6 + 1) as u8),
            _ => Delivery::extra(extras[(self.next() as usize) % extras.len()]),
        }
    }
}

fn scorer(overs: u32) -> Scorer {
    let players: Vec<String> = (1..=11).map(|n| format!("P{}", n)).collect();
    let raw = RawSetup::default()
        .with_overs(overs)
        .with_team_one_players(players);
    Scorer::with_config(MatchConfig::from_raw(raw).unwrap())
}

#[test]
fn test_ball_count_and_over_ledger_hold_for_generated_sequences() {
    for seed in 1..=25u64 {
        let mut rng = Lcg(seed);
        let mut scorer = scorer(5);
        let limit = scorer.state().ball_limit();
        let mut legal = 0;
        let mut over_runs = 0;
        let mut wickets = 0;

        for _ in 0..300 {
            let delivery = rng.delivery();
            let runs_before = scorer.state().runs();
            match scorer.deliver(delivery) {
                Ok(report) => {
                    if delivery.is_legal() {
                        legal += 1;
                    }
                    over_runs += scorer.state().runs() - runs_before;
                    if report.over_completed {
                        assert_eq!(scorer.state().over_history().last(), Some(&over_runs));
                        assert!(scorer.state().current_over().is_empty());
                        over_runs = 0;
                    }
                    if scorer.pending_batter().is_some() {
                        scorer.supply_batter("").unwrap();
                    }
                }
                Err(e) => {
                    assert_eq!(e.kind(), ErrorKind::GuardRejection, "seed {}", seed);
                    assert!(!scorer.can_deliver_ball(), "seed {}: {}", seed, e);
                }
            }

            let state = scorer.state();
            assert_eq!(state.balls_bowled(), legal, "seed {}", seed);
            assert!(state.balls_bowled() <= limit);
            assert!(state.wickets() >= wickets && state.wickets() <= MAX_WICKETS);
            wickets = state.wickets();
            assert_eq!(
                state.over_history().len() as u32,
                state.balls_bowled() / BALLS_PER_OVER
            );
            assert!(
                InningsInvariants::check_all(state).is_ok(),
                "seed {}: {:?}",
                seed,
                InningsInvariants::check_all(state)
            );
        }
    }
}

#[test]
fn test_all_out_stops_scoring() {
    let mut scorer = scorer(20);
    for n in 1..=MAX_WICKETS {
        let report = scorer.record_wicket().unwrap();
        assert_eq!(scorer.state().wickets(), n);
        if n < MAX_WICKETS {
            assert!(scorer.pending_batter().is_none(), "bench supplies wicket {}", n);
        } else {
            assert_eq!(report.incoming, strictly_cricket::Incoming::Nobody);
        }
    }

    assert!(!scorer.can_deliver_ball());
    assert_eq!(scorer.status(), strictly_cricket::LiveStatus::InningsComplete);
    let before = scorer.state().clone();
    for delivery in [
        Delivery::run(1),
        Delivery::Wicket,
        Delivery::extra(ExtraKind::Wide),
        Delivery::extra(ExtraKind::Penalty),
    ] {
        assert_eq!(
            scorer.deliver(delivery),
            Err(ScoringError::Guard(GuardRejection::InningsComplete))
        );
    }
    assert_eq!(scorer.state(), &before);
}

#[test]
fn test_overs_exhausted_stops_scoring() {
    let mut scorer = scorer(1);
    for _ in 0..6 {
        scorer.record_run(2).unwrap();
    }
    assert_eq!(scorer.state().balls_bowled(), 6);
    assert_eq!(
        scorer.record_extra(ExtraKind::NoBall),
        Err(GuardRejection::InningsComplete.into())
    );
    let notices = scorer.drain_notices();
    assert_eq!(
        notices.last().map(|n| n.message.as_str()),
        Some("Innings complete")
    );
}

#[test]
fn test_every_extra_kind_keeps_score_ledger() {
    let mut scorer = scorer(20);
    for kind in ExtraKind::iter() {
        scorer.record_extra(kind).unwrap();
        assert!(InningsInvariants::check_all(scorer.state()).is_ok(), "{}", kind);
    }
    assert_eq!(scorer.state().extras().total(), scorer.state().runs());
}
