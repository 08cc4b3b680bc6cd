use super::*;
use chess_system::Winner;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chess_runner_{}_{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn add_game(tournament: i32, first: i32, second: i32, winner: Winner, play_time: i32) -> Command {
    Command::AddGame {
        tournament: Some(tournament),
        first: Some(first),
        second: Some(second),
        winner: Some(winner),
        play_time: Some(play_time),
    }
}

fn haifa() -> Command {
    Command::AddTournament {
        id: Some(1),
        max_games_per_player: Some(2),
        location: Some("Haifa".to_string()),
    }
}

#[test]
fn test_result_codes_follow_errors() {
    assert_eq!(ResultCode::from(&ChessError::InvalidId), ResultCode::InvalidId);
    assert_eq!(
        ResultCode::from(&ChessError::ExceededGames { player: 1, limit: 2 }),
        ResultCode::ExceededGames
    );
    assert_eq!(
        ResultCode::from(&ChessError::SaveFailure(std::io::Error::other("disk full"))),
        ResultCode::SaveFailure
    );
    assert!(ResultCode::Success.is_success());
    assert!(!ResultCode::NullArgument.is_success());
}

#[test]
fn test_missing_argument_is_null_argument() {
    let mut runner = ScenarioRunner::new(RunnerConfig::default());
    let report = runner.execute(
        0,
        &Command::AddTournament {
            id: Some(1),
            max_games_per_player: None,
            location: Some("Haifa".to_string()),
        },
    );
    assert_eq!(report.code, ResultCode::NullArgument);
    assert!(report.message.unwrap().contains("max_games_per_player"));
    assert!(runner.system().store().is_empty());
}

#[test]
fn test_run_reports_every_command() {
    let mut runner = ScenarioRunner::new(RunnerConfig::default());
    let scenario = Scenario {
        commands: vec![
            haifa(),
            add_game(1, 1, 2, Winner::FirstPlayer, 10),
            add_game(1, 2, 1, Winner::Draw, 5),
            add_game(1, 2, 3, Winner::Draw, 20),
            Command::AveragePlayTime { player: Some(2) },
            Command::EndTournament { id: Some(1) },
            Command::EndTournament { id: Some(1) },
        ],
    };

    let summary = runner.run(&scenario).unwrap();
    assert_eq!(
        summary.codes(),
        vec![
            ResultCode::Success,
            ResultCode::Success,
            ResultCode::GameAlreadyExists,
            ResultCode::Success,
            ResultCode::Success,
            ResultCode::Success,
            ResultCode::TournamentEnded,
        ]
    );
    assert_eq!(summary.succeeded, 5);
    assert_eq!(summary.failed, 2);
    assert!(!summary.stopped_early);
    assert_eq!(summary.commands[4].average_play_time, Some(15.0));
    assert_eq!(summary.commands[5].winner, Some(1));
    assert_eq!(summary.tournaments, 1);
    assert_eq!(summary.players, 3);
    assert_eq!(summary.statistics.len(), 1);
    assert_eq!(summary.levels[0].player_id, 1);
}

#[test]
fn test_stop_on_error() {
    let config = RunnerConfig {
        stop_on_error: true,
        ..Default::default()
    };
    let mut runner = ScenarioRunner::new(config);
    let scenario = Scenario {
        commands: vec![
            haifa(),
            Command::RemovePlayer { id: Some(4) },
            add_game(1, 1, 2, Winner::Draw, 1),
        ],
    };

    let summary = runner.run(&scenario).unwrap();
    assert_eq!(
        summary.codes(),
        vec![ResultCode::Success, ResultCode::PlayerNotExist]
    );
    assert!(summary.stopped_early);
    assert_eq!(runner.system().players().len(), 0);
}

#[test]
fn test_reports_written_to_configured_paths() {
    let dir = temp_dir("reports");
    let config = RunnerConfig {
        levels_path: dir.join("levels.txt"),
        statistics_path: dir.join("stats.txt"),
        summary_path: Some(dir.join("summary.json")),
        ..Default::default()
    };
    let mut runner = ScenarioRunner::new(config);
    let scenario = Scenario {
        commands: vec![
            haifa(),
            add_game(1, 1, 2, Winner::FirstPlayer, 10),
            add_game(1, 2, 3, Winner::Draw, 20),
            Command::SaveStatistics { path: None },
            Command::EndTournament { id: Some(1) },
            Command::SaveLevels { path: None },
            Command::SaveStatistics { path: None },
        ],
    };

    let summary = runner.run(&scenario).unwrap();
    assert_eq!(summary.commands[3].code, ResultCode::NoTournamentsEnded);
    assert_eq!(summary.failed, 1);

    let levels = std::fs::read_to_string(dir.join("levels.txt")).unwrap();
    assert_eq!(levels, "1 6.00\n3 2.00\n2 -4.00\n");
    let stats = std::fs::read_to_string(dir.join("stats.txt")).unwrap();
    assert_eq!(stats, "1\n20\n15.00\nHaifa\n2\n3\n");

    let saved = RunSummary::load(&dir.join("summary.json")).unwrap();
    assert_eq!(saved, summary);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_unwritable_report_is_save_failure() {
    let dir = temp_dir("unwritable");
    let mut runner = ScenarioRunner::new(RunnerConfig::default());
    let report = runner.execute(
        0,
        &Command::SaveLevels {
            path: Some(dir.join("no_such_dir").join("levels.txt")),
        },
    );
    assert_eq!(report.code, ResultCode::SaveFailure);
    std::fs::remove_dir_all(&dir).unwrap();
}
