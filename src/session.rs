//! One running game: state, RNG, high-score file and the sound sink.
//!
//! `Session` is the only place that turns tick events into side effects.

use rand::Rng;

use crate::compute::{restart, tick};
use crate::entities::{GameEvent, GameState, GameStatus};
use crate::error::GameResult;
use crate::highscore::HighScoreStore;
use crate::input::{Command, FrameInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Fire,
    Explosion,
    Pickup,
}

/// Fire-and-forget sound output.
pub trait AudioPlayer {
    fn play(&mut self, sound: Sound);
}

/// Draws a consistent snapshot after a tick has finished.
pub trait Renderer {
    fn render(&mut self, state: &GameState, now_ms: u64) -> GameResult<()>;
}

/// Plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl AudioPlayer for Silent {
    fn play(&mut self, _sound: Sound) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<A, R> {
    state: GameState,
    store: HighScoreStore,
    audio: A,
    rng: R,
}

impl<A: AudioPlayer, R: Rng> Session<A, R> {
    /// `state` should already carry the stored high score
    /// (see [`HighScoreStore::load`]).
    pub fn new(state: GameState, store: HighScoreStore, audio: A, rng: R) -> Self {
        Session {
            state,
            store,
            audio,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Run one tick with this tick's commands.
    pub fn step(&mut self, commands: &[Command], now_ms: u64) -> Flow {
        if commands.contains(&Command::Quit) {
            return Flow::Quit;
        }
        if self.state.status == GameStatus::GameOver && commands.contains(&Command::Restart) {
            self.state = restart(&self.state);
        }

        let input = FrameInput::from_commands(commands);
        self.state = tick(&self.state, &input, now_ms, &mut self.rng);
        self.dispatch_events();
        Flow::Continue
    }

    pub fn present(&self, renderer: &mut impl Renderer, now_ms: u64) -> GameResult<()> {
        renderer.render(&self.state, now_ms)
    }

    fn dispatch_events(&mut self) {
        for event in &self.state.events {
            match event {
                GameEvent::Shot => self.audio.play(Sound::Fire),
                GameEvent::Explosion => self.audio.play(Sound::Explosion),
                GameEvent::PowerUpPickup(_) => self.audio.play(Sound::Pickup),
                GameEvent::NewHighScore(score) => {
                    // Write failures are logged and dropped.
                    match self.store.save(*score) {
                        Ok(()) => log::info!("new high score {} saved", score),
                        Err(e) => log::warn!("{}", e),
                    }
                }
            }
        }
    }
}
