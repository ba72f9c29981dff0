//! Tests for the human/engine game loop.

use perfect_toe::{Board, EngineConfig, GameSession, GameStatus, MoveError, Player, Position};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_engine_answers_corner_with_center() {
    init_tracing();
    let mut session = GameSession::default();

    assert_eq!(session.apply_human_move(0, 0), Ok(GameStatus::InProgress));
    let reply = session.request_engine_move().expect("engine move");

    assert_eq!(reply, Position::Center);
    assert_eq!(session.to_move(), Player::X);
    assert_eq!(session.status(), GameStatus::InProgress);
}

#[test]
fn test_occupied_square_rejected() {
    let mut session = GameSession::default();
    session.apply_human_move(0, 0).unwrap();
    session.request_engine_move().unwrap();
    let before = session.board().clone();

    assert_eq!(
        session.apply_human_move(1, 1),
        Err(MoveError::SquareOccupied(Position::Center))
    );
    assert_eq!(
        session.apply_human_move(0, 0),
        Err(MoveError::SquareOccupied(Position::TopLeft))
    );
    assert_eq!(session.board(), &before);
    assert_eq!(session.to_move(), Player::X);
}

#[test]
fn test_out_of_bounds_rejected() {
    let mut session = GameSession::default();
    assert_eq!(
        session.apply_human_move(3, 0),
        Err(MoveError::OutOfBounds { row: 3, col: 0 })
    );
    assert_eq!(session.board(), &Board::new());
}

#[test]
fn test_turn_order_enforced() {
    let mut session = GameSession::default();

    assert_eq!(
        session.request_engine_move(),
        Err(MoveError::WrongPlayer(Player::O))
    );

    session.apply_human_move(2, 2).unwrap();
    assert_eq!(
        session.apply_human_move(0, 0),
        Err(MoveError::WrongPlayer(Player::X))
    );
}

/// Human always takes the first free square; the engine must come out ahead
/// or level.
fn play_out(session: &mut GameSession) -> GameStatus {
    loop {
        let status = if session.to_move() == session.human() {
            let pos = Position::valid_moves(session.board())[0];
            session.apply_human_move(pos.row(), pos.col()).unwrap()
        } else {
            session.request_engine_move().unwrap();
            session.status()
        };
        if status.is_over() {
            return status;
        }
    }
}

#[test]
fn test_game_over_blocks_further_moves() {
    let mut session = GameSession::default();
    let status = play_out(&mut session);

    assert_ne!(status, GameStatus::Won(Player::X));
    assert!(session.is_over());
    assert_eq!(session.apply_human_move(0, 0), Err(MoveError::GameOver));
    assert_eq!(session.request_engine_move(), Err(MoveError::GameOver));
}

#[test]
fn test_naive_human_loses() {
    let mut session = GameSession::default();
    assert_eq!(play_out(&mut session), GameStatus::Won(Player::O));
}

#[test]
fn test_reset_starts_a_fresh_game() {
    let mut session = GameSession::default();
    play_out(&mut session);

    session.reset();
    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.status(), GameStatus::InProgress);
    assert_eq!(session.to_move(), Player::X);
    assert!(session.apply_human_move(1, 1).is_ok());
}

#[test]
fn test_engine_can_open_as_x() {
    let config = EngineConfig::new(Player::X);
    let mut session = GameSession::new(config);

    assert_eq!(session.human(), Player::O);
    assert_eq!(
        session.apply_human_move(0, 0),
        Err(MoveError::WrongPlayer(Player::O))
    );

    let opening = session.request_engine_move().unwrap();
    assert_eq!(opening, Position::TopLeft);
    assert_eq!(session.to_move(), Player::O);
}

/// Tries every human reply through the public session surface.
fn every_line(session: &GameSession, games: &mut u32) {
    match session.status() {
        GameStatus::Won(winner) => {
            assert_eq!(winner, session.engine(), "engine lost:\n{}", session.board());
            *games += 1;
            return;
        }
        GameStatus::Draw => {
            *games += 1;
            return;
        }
        GameStatus::InProgress => {}
    }

    if session.to_move() == session.engine() {
        let mut next = session.clone();
        next.request_engine_move().unwrap();
        every_line(&next, games);
    } else {
        for pos in Position::valid_moves(session.board()) {
            let mut next = session.clone();
            next.apply_human_move(pos.row(), pos.col()).unwrap();
            every_line(&next, games);
        }
    }
}

#[test]
fn test_session_engine_never_loses() {
    let session = GameSession::new(EngineConfig::default().with_alpha_beta(true));
    let mut games = 0;
    every_line(&session, &mut games);
    assert!(games > 0);
}
