use super::*;

/// Ledger plus the two registries it would be kept in step with
fn setup(games: &[(PlayerId, PlayerId, Winner, i32)]) -> (GameLedger, PlayerRegistry, PlayerRegistry) {
    let mut ledger = GameLedger::new();
    let mut local = PlayerRegistry::new();
    let mut global = PlayerRegistry::new();
    for &(a, b, winner, duration) in games {
        ledger.add_game(a, b, winner, duration).unwrap();
        local.record_game(a, b, winner).unwrap();
        global.record_game(a, b, winner).unwrap();
    }
    (ledger, local, global)
}

#[test]
fn test_aggregates() {
    let (ledger, _, _) = setup(&[
        (1, 2, Winner::FirstPlayer, 10),
        (2, 3, Winner::Draw, 20),
    ]);
    assert_eq!(ledger.game_count(), 2);
    assert_eq!(ledger.longest(), 20);
    assert_eq!(ledger.total_duration(), 30);
    assert!((ledger.average_duration() - 15.0).abs() < 1e-9);
    assert_eq!(ledger.participant_count(), 3);
    assert_eq!(ledger.total_time_for(2), 30);
    assert_eq!(ledger.total_time_for(9), 0);
}

#[test]
fn test_empty_ledger_average() {
    let ledger = GameLedger::new();
    assert_eq!(ledger.average_duration(), 0.0);
    assert_eq!(ledger.longest(), 0);
}

#[test]
fn test_pairing_is_unordered() {
    let (mut ledger, _, _) = setup(&[(4, 7, Winner::SecondPlayer, 5)]);
    assert!(ledger.exists_pairing(4, 7));
    assert!(ledger.exists_pairing(7, 4));
    assert!(!ledger.exists_pairing(4, 5));

    let err = ledger.add_game(7, 4, Winner::Draw, 1).unwrap_err();
    assert!(matches!(err, ChessError::GameAlreadyExists { first: 7, second: 4 }));
    assert_eq!(ledger.game_count(), 1);
}

#[test]
fn test_negative_duration_rejected() {
    let mut ledger = GameLedger::new();
    let err = ledger.add_game(1, 2, Winner::Draw, -1).unwrap_err();
    assert!(matches!(err, ChessError::InvalidPlayTime(-1)));
    assert_eq!(ledger.game_count(), 0);
    assert_eq!(ledger.participant_count(), 0);
}

#[test]
fn test_zero_duration_allowed() {
    let mut ledger = GameLedger::new();
    ledger.add_game(1, 2, Winner::Draw, 0).unwrap();
    assert_eq!(ledger.longest(), 0);
    assert_eq!(ledger.game_count(), 1);
}

#[test]
fn test_withdrawal_converts_draw_and_loss() {
    let (mut ledger, mut local, mut global) = setup(&[
        (1, 2, Winner::FirstPlayer, 10), // quitter 2 lost: no change for 1
        (2, 3, Winner::Draw, 20),        // draw becomes a win for 3
        (4, 2, Winner::SecondPlayer, 30), // quitter 2 won: 4's loss becomes a win
    ]);

    let rewritten = ledger.apply_withdrawal(2, &mut local, &mut global);
    assert_eq!(rewritten, 3);

    for registry in [&local, &global] {
        let one = registry.get(1).unwrap();
        assert_eq!((one.wins, one.losses, one.draws), (1, 0, 0));
        let three = registry.get(3).unwrap();
        assert_eq!((three.wins, three.losses, three.draws), (1, 0, 0));
        let four = registry.get(4).unwrap();
        assert_eq!((four.wins, four.losses, four.draws), (1, 0, 0));
        assert_eq!(four.games_played, 1);
    }

    // History is kept, the quitter no longer counts as a participant of any game
    assert_eq!(ledger.game_count(), 3);
    assert_eq!(ledger.participant_count(), 4);
    assert_eq!(ledger.total_time_for(2), 0);
    assert!(!ledger.exists_pairing(2, 3));

    let outcomes: Vec<GameOutcome> = ledger.games().map(|game| game.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            GameOutcome::SecondForfeited,
            GameOutcome::FirstForfeited,
            GameOutcome::SecondForfeited,
        ]
    );
}

#[test]
fn test_double_withdrawal_of_pairing() {
    let (mut ledger, mut local, mut global) = setup(&[(1, 2, Winner::Draw, 10)]);

    ledger.apply_withdrawal(1, &mut local, &mut global);
    assert_eq!(local.get(2).unwrap().wins, 1);
    local.remove(1);
    global.remove(1);

    // Player 2 was already credited, the second withdrawal changes no counters
    let before = *global.get(2).unwrap();
    assert_eq!(ledger.apply_withdrawal(2, &mut local, &mut global), 1);
    assert_eq!(*global.get(2).unwrap(), before);

    let game = ledger.games().next().unwrap();
    assert_eq!(game.outcome, GameOutcome::BothForfeited);
    assert_eq!((game.first, game.second), (Slot::Forfeited, Slot::Forfeited));
}

#[test]
fn test_withdrawal_frees_pairing() {
    let (mut ledger, mut local, mut global) = setup(&[(1, 2, Winner::FirstPlayer, 10)]);
    ledger.apply_withdrawal(1, &mut local, &mut global);
    assert!(!ledger.exists_pairing(1, 2));

    // A returning player 1 is not counted twice as a participant
    ledger.add_game(1, 2, Winner::Draw, 5).unwrap();
    assert_eq!(ledger.game_count(), 2);
    assert_eq!(ledger.participant_count(), 2);
}

#[test]
fn test_clone_is_independent() {
    let (ledger, mut local, mut global) = setup(&[(1, 2, Winner::Draw, 10)]);
    let mut copy = ledger.clone();
    copy.apply_withdrawal(1, &mut local, &mut global);
    copy.add_game(3, 4, Winner::Draw, 99).unwrap();

    assert!(ledger.exists_pairing(1, 2));
    assert_eq!(ledger.game_count(), 1);
    assert_eq!(ledger.longest(), 10);
}
