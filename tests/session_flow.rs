use std::fs;
use std::path::Path;

use anyhow::Result;
use brickfall::autopilot::Autopilot;
use brickfall::persistence::{PersistError, SaveStore};
use brickfall::platform::{ManualClock, RunOptions, StopReason, run_session};
use brickfall::renderer::{FrameView, Renderer};
use brickfall::sim::{GameEvent, Outcome, SessionPhase, SnapshotError};
use brickfall::{Game, Settings};
use serde_json::json;

struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &FrameView) {}
}

fn write_save(dir: &Path, save: serde_json::Value) -> Result<()> {
    fs::write(dir.join("save.json"), serde_json::to_string(&save)?)?;
    Ok(())
}

fn drive(game: &mut Game, options: RunOptions) -> Result<brickfall::platform::RunSummary> {
    let mut clock = ManualClock::new();
    Ok(run_session(
        game,
        &mut clock,
        &mut NullRenderer,
        Some(&Autopilot::default()),
        &options,
    )?)
}

#[test]
fn quit_and_resume_across_restarts() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let mut first = Game::new(Settings::default(), SaveStore::new(dir.path()));
    first.new_session()?;
    let summary = drive(
        &mut first,
        RunOptions {
            quit_after: Some(500),
            ..Default::default()
        },
    )?;
    assert_eq!(summary.reason, StopReason::Quit { saved: true });
    let saved = first.state().clone();
    drop(first);

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("save.json"))?)?;
    assert_eq!(raw["score"], saved.score);
    assert_eq!(raw["bricks"].as_array().map(Vec::len), Some(60));

    let mut second = Game::new(Settings::default(), SaveStore::new(dir.path()));
    assert!(second.resume_session()?);
    assert_eq!(second.phase(), SessionPhase::Running);
    assert_eq!(second.state().score, saved.score);
    assert_eq!(second.state().lives, saved.lives);
    assert_eq!(second.state().ball.pos, saved.ball.pos);
    assert_eq!(second.state().ball.vel, saved.ball.vel);
    assert_eq!(second.state().paddle.x, saved.paddle.x);
    assert_eq!(second.state().bricks.alive_flags(), saved.bricks.alive_flags());
    Ok(())
}

#[test]
fn last_life_lost_from_resumed_save() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_save(
        dir.path(),
        json!({
            "score": 17,
            "lives": 1,
            "paddle": { "x": 100.0 },
            "ball": { "x": 700.0, "y": 604.0, "vx": 0.0, "vy": 3.0 },
            "bricks": vec![true; 60],
        }),
    )?;

    let mut game = Game::new(Settings::default(), SaveStore::new(dir.path()));
    assert!(game.resume_session()?);
    let summary = drive(&mut game, RunOptions::default())?;

    assert_eq!(summary.reason, StopReason::Ended);
    assert_eq!(game.phase(), SessionPhase::Ended(Outcome::Defeat));
    assert!(!dir.path().join("save.json").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("history.json"))?,
        r#"["17"]"#
    );
    Ok(())
}

#[test]
fn last_brick_wins_from_resumed_save() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut bricks = vec![false; 60];
    bricks[0] = true;
    write_save(
        dir.path(),
        json!({
            "score": 59,
            "lives": 2,
            "paddle": { "x": 400.0 },
            "ball": { "x": 40.0, "y": 90.0, "vx": 0.0, "vy": -3.0 },
            "bricks": bricks,
        }),
    )?;

    let mut game = Game::new(Settings::default(), SaveStore::new(dir.path()));
    assert!(game.resume_session()?);
    let summary = drive(&mut game, RunOptions::default())?;

    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.phase, SessionPhase::Ended(Outcome::Victory));
    assert_eq!(summary.score, 60);
    assert_eq!(game.history().latest(), Some(60));
    Ok(())
}

#[test]
fn score_at_limit_does_not_wrap() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_save(
        dir.path(),
        json!({
            "score": u32::MAX,
            "lives": 2,
            "paddle": { "x": 400.0 },
            "ball": { "x": 40.0, "y": 90.0, "vx": 0.0, "vy": -3.0 },
            "bricks": vec![true; 60],
        }),
    )?;

    let mut game = Game::new(Settings::default(), SaveStore::new(dir.path()));
    assert!(game.resume_session()?);
    let events = game.step()?;

    assert!(events.contains(&GameEvent::BrickDestroyed { index: 0, value: 1 }));
    assert_eq!(game.state().score, u32::MAX);
    assert_eq!(game.phase(), SessionPhase::Running);
    Ok(())
}

#[test]
fn save_with_extra_lives_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_save(
        dir.path(),
        json!({
            "score": 3,
            "lives": u32::MAX,
            "paddle": { "x": 400.0 },
            "ball": { "x": 400.0, "y": 300.0, "vx": 3.0, "vy": 3.0 },
            "bricks": vec![true; 60],
        }),
    )?;

    let mut game = Game::new(Settings::default(), SaveStore::new(dir.path()));
    assert!(matches!(
        game.resume_session(),
        Err(PersistError::Invalid {
            source: SnapshotError::TooManyLives { .. },
            ..
        })
    ));
    assert_eq!(game.phase(), SessionPhase::Menu);
    Ok(())
}

#[test]
fn history_keeps_five_most_recent() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(
        dir.path().join("history.json"),
        r#"["1","2","3","4","5"]"#,
    )?;
    write_save(
        dir.path(),
        json!({
            "score": 6,
            "lives": 1,
            "paddle": { "x": 100.0 },
            "ball": { "x": 700.0, "y": 604.0, "vx": 0.0, "vy": 3.0 },
            "bricks": vec![true; 60],
        }),
    )?;

    let mut game = Game::new(Settings::default(), SaveStore::new(dir.path()));
    assert_eq!(game.history().len(), 5);
    game.resume_session()?;
    drive(&mut game, RunOptions::default())?;

    assert_eq!(
        game.history().scores().collect::<Vec<_>>(),
        vec![2, 3, 4, 5, 6]
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("history.json"))?,
        r#"["2","3","4","5","6"]"#
    );
    Ok(())
}

#[test]
fn truncated_save_is_an_error_not_a_new_game() -> Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("save.json"), r#"{"score": 4, "lives": 2, "paddle""#)?;

    let mut game = Game::new(Settings::default(), SaveStore::new(dir.path()));
    assert!(game.resume_session().is_err());
    assert_eq!(game.phase(), SessionPhase::Menu);
    assert!(dir.path().join("save.json").exists());
    Ok(())
}
