//! End-to-end innings scenarios through the scorer.

use strictly_cricket::{
    Batter, ExtraKind, Incoming, MatchConfig, Partnership, RawSetup, RequiredRate, Scoreboard,
    Scorer,
};

fn scorer_with(players: &[&str]) -> Scorer {
    let raw = RawSetup::default()
        .with_team_one_players(players.iter().map(|p| p.to_string()).collect::<Vec<_>>());
    let mut scorer = Scorer::new();
    scorer.apply_setup(raw, false).unwrap();
    scorer
}

fn striker_name(scorer: &Scorer) -> Option<String> {
    scorer.state().striker().map(|b| b.name().to_string())
}

#[test]
fn test_boundary_then_single() {
    let mut scorer = scorer_with(&["A", "B"]);

    scorer.record_run(4).unwrap();
    let a = &scorer.state().batters()[0];
    assert_eq!((a.runs(), a.balls(), a.fours()), (4, 1, 1));
    assert_eq!(striker_name(&scorer).as_deref(), Some("A"));

    scorer.record_run(1).unwrap();
    let state = scorer.state();
    assert_eq!(state.runs(), 5);
    assert_eq!(state.batters()[0].runs(), 5);
    assert_eq!(state.batters()[0].balls(), 2);
    assert_eq!(striker_name(&scorer).as_deref(), Some("B"));
    assert_eq!(scorer.state().partnership(), Partnership { runs: 5, balls: 2 });
}

#[test]
fn test_wide_on_fresh_innings() {
    let mut scorer = scorer_with(&["A", "B"]);
    let before: Vec<Batter> = scorer.state().batters().to_vec();

    scorer.record_extra(ExtraKind::Wide).unwrap();

    let state = scorer.state();
    assert_eq!(state.runs(), 1);
    assert_eq!(state.extras().wide, 1);
    assert_eq!(state.balls_bowled(), 0);
    assert_eq!(state.batters(), before.as_slice());
    let labels: Vec<&str> = state.last_balls().iter().map(|b| b.label().as_str()).collect();
    assert_eq!(labels, vec!["Wd"]);
}

#[test]
fn test_six_singles_complete_an_over() {
    let mut scorer = scorer_with(&["A", "B"]);
    for _ in 0..6 {
        scorer.record_run(1).unwrap();
    }
    let state = scorer.state();
    assert_eq!(state.balls_bowled(), 6);
    assert_eq!(state.over_history(), &[6]);
    assert!(state.current_over().is_empty());
    // Six odd-run rotations and no extra end-of-over swap.
    assert_eq!(striker_name(&scorer).as_deref(), Some("A"));
}

#[test]
fn test_dot_over_rotates_at_end() {
    let mut scorer = scorer_with(&["A", "B"]);
    for _ in 0..6 {
        scorer.record_run(0).unwrap();
    }
    assert_eq!(striker_name(&scorer).as_deref(), Some("B"));
    assert_eq!(scorer.state().over_history(), &[0]);
}

#[test]
fn test_wicket_with_empty_bench_takes_default_name() {
    let mut scorer = scorer_with(&["A", "B"]);
    scorer.record_run(3).unwrap();
    // B is on strike after the three.
    let report = scorer.record_wicket().unwrap();
    let Incoming::Requested(request) = report.incoming else {
        panic!("Expected a new-batter request");
    };
    assert_eq!(request.default_name(), "Batter 3");

    let name = scorer.supply_batter("").unwrap();
    assert_eq!(name, "Batter 3");

    let state = scorer.state();
    assert_eq!(striker_name(&scorer).as_deref(), Some("Batter 3"));
    assert_eq!(state.non_striker().map(|b| b.name()), Some("A"));
    assert_eq!(state.partnership(), Partnership::default());
    assert_eq!(state.fall_of_wickets().len(), 1);
    assert_eq!(state.fall_of_wickets()[0].to_string(), "3/1 (B, 0.1)");
    assert!(scorer.pending_batter().is_none());
}

#[test]
fn test_chase_required_rate() {
    let raw = RawSetup::default()
        .with_overs(20u32)
        .with_target(120u32)
        .with_chasing(true);
    let mut scorer = Scorer::with_config(MatchConfig::from_raw(raw).unwrap());

    // 80 runs from 90 balls: ten fours, forty singles, forty dots.
    for _ in 0..10 {
        scorer.record_run(4).unwrap();
    }
    for _ in 0..40 {
        scorer.record_run(1).unwrap();
        scorer.record_run(0).unwrap();
    }

    let state = scorer.state();
    assert_eq!(state.runs(), 80);
    assert_eq!(state.balls_bowled(), 90);

    let analytics = scorer.analytics();
    assert_eq!(analytics.overs, "15.0");
    assert_eq!(analytics.required_runs, Some(40));
    assert_eq!(analytics.balls_remaining, 30);
    assert_eq!(analytics.required_rate, RequiredRate::Rate(8.0));
    assert_eq!(analytics.required_rate.to_string(), "8.00");
    assert_eq!(analytics.innings_label, "Chase");
}

#[test]
fn test_target_reached_has_no_required_rate() {
    let raw = RawSetup::default().with_target(4u32).with_chasing(true);
    let mut scorer = Scorer::with_config(MatchConfig::from_raw(raw).unwrap());
    scorer.record_run(6).unwrap();
    let analytics = scorer.analytics();
    assert_eq!(analytics.required_runs, Some(0));
    assert_eq!(analytics.required_rate, RequiredRate::NotApplicable);
    assert_eq!(analytics.required_rate.to_string(), "—");
}

#[test]
fn test_bye_runs_feed_extras_and_partnership() {
    let mut scorer = scorer_with(&["A", "B"]);
    scorer.record_extra_runs(ExtraKind::LegBye, 4).unwrap();
    scorer.record_extra(ExtraKind::NoBall).unwrap();
    scorer.record_extra(ExtraKind::Penalty).unwrap();

    let state = scorer.state();
    assert_eq!(state.runs(), 10);
    assert_eq!(state.extras().leg_bye, 4);
    assert_eq!(state.extras().total(), 10);
    assert_eq!(state.balls_bowled(), 1);
    assert_eq!(scorer.analytics().extras, "10 (0b, 4lb, 1nb, 0wd, 5p)");
    let labels: Vec<String> = Scoreboard::capture(&scorer).current_over().clone();
    assert_eq!(labels, vec!["Lb4", "Nb", "+5"]);
}

#[test]
fn test_over_ending_odd_single_does_not_double_rotate() {
    let mut scorer = scorer_with(&["A", "B"]);
    for _ in 0..5 {
        scorer.record_run(0).unwrap();
    }
    scorer.record_run(1).unwrap();
    // The single rotated strike; the end of the over must not swap back.
    assert_eq!(striker_name(&scorer).as_deref(), Some("B"));
}
