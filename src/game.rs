//! Run-state machine and timer ownership
//!
//! [`Game`] is the only place timers are armed or stopped. The front-end
//! feeds it wall-clock deltas and the action key; it feeds back
//! [`GameEvent`]s.

use serde::{Deserialize, Serialize};

use crate::autopilot;
use crate::consts::*;
use crate::sim::{EndReason, GameEvent, GameState, spawn_obstacle, tick};
use crate::timer::IntervalTimer;
use crate::tuning::Tuning;

/// Top-level run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Start screen, no timers armed
    Idle,
    /// Both timers armed
    Running,
    /// Timers stopped, final score frozen until restart
    Ended,
}

/// Which timer fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    Tick,
    Spawn,
}

/// Game controller owning the world, the run state and both timers
pub struct Game {
    tuning: Tuning,
    state: GameState,
    run: RunState,
    last_end: Option<EndReason>,
    /// Base seed; each run uses `base_seed + runs_started`
    base_seed: u64,
    runs_started: u64,
    /// Controller clock (ms), advanced only by `update`
    clock_ms: f64,
    tick_timer: IntervalTimer,
    spawn_timer: IntervalTimer,
    autopilot: bool,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let state = GameState::new(seed, &tuning);
        let spawn_timer = IntervalTimer::new(tuning.spawn_interval_ms);
        Self {
            tuning,
            state,
            run: RunState::Idle,
            last_end: None,
            base_seed: seed,
            runs_started: 0,
            clock_ms: 0.0,
            tick_timer: IntervalTimer::new(TICK_MS),
            spawn_timer,
            autopilot: false,
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Reason the most recent run ended, if any
    pub fn last_end(&self) -> Option<EndReason> {
        self.last_end
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Whether either timer is currently armed
    pub fn timers_armed(&self) -> bool {
        self.tick_timer.is_armed() || self.spawn_timer.is_armed()
    }

    /// The single action key: starts a run from Idle, flaps while Running
    pub fn press_action(&mut self) {
        match self.run {
            RunState::Idle => self.start_run(),
            RunState::Running => {
                self.state.player.flap(self.tuning.jump_velocity);
                self.events.push(GameEvent::Flapped);
            }
            RunState::Ended => log::debug!("Action ignored, run has ended"),
        }
    }

    /// Throw away the current run and start a new one immediately
    pub fn restart(&mut self) {
        self.start_run();
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the controller clock, firing due timers in time order
    pub fn update(&mut self, elapsed_ms: f64) {
        let target = self.clock_ms + elapsed_ms.clamp(0.0, MAX_FRAME_MS);

        let mut fired = 0;
        while let Some((due, event)) = self.next_due(target) {
            if fired == MAX_EVENTS_PER_FRAME {
                log::warn!("Timer backlog at {:.0}ms, dropping it", due);
                self.tick_timer.start(target);
                self.spawn_timer.start(target);
                break;
            }
            fired += 1;
            self.clock_ms = due;
            self.handle_timer(event);
        }

        self.clock_ms = target;
    }

    /// Earliest armed timer due by `until`; ticks win ties
    fn next_due(&self, until: f64) -> Option<(f64, TimerEvent)> {
        match (self.tick_timer.due_by(until), self.spawn_timer.due_by(until)) {
            (Some(t), Some(s)) if s < t => Some((s, TimerEvent::Spawn)),
            (Some(t), _) => Some((t, TimerEvent::Tick)),
            (None, Some(s)) => Some((s, TimerEvent::Spawn)),
            (None, None) => None,
        }
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick => {
                self.tick_timer.fire();
                if self.autopilot && autopilot::should_flap(&self.state, &self.tuning) {
                    self.press_action();
                }
                let outcome = tick(&mut self.state, &self.tuning);
                if outcome.scored > 0 {
                    self.events.push(GameEvent::Scored {
                        score: self.state.score,
                    });
                }
                if let Some(reason) = outcome.terminal {
                    self.end_run(reason);
                }
            }
            TimerEvent::Spawn => {
                self.spawn_timer.fire();
                spawn_obstacle(&mut self.state, &self.tuning);
            }
        }
    }

    fn stop_timers(&mut self) {
        self.tick_timer.stop();
        self.spawn_timer.stop();
    }

    fn start_run(&mut self) {
        self.stop_timers();

        let seed = self.base_seed.wrapping_add(self.runs_started);
        self.runs_started += 1;
        self.state = GameState::new(seed, &self.tuning);
        self.last_end = None;
        self.run = RunState::Running;

        self.tick_timer.start(self.clock_ms);
        self.spawn_timer.start(self.clock_ms);
        self.events.push(GameEvent::Started);
        log::info!("Run {} started with seed {}", self.runs_started, seed);
    }

    fn end_run(&mut self, reason: EndReason) {
        self.stop_timers();
        self.run = RunState::Ended;
        self.last_end = Some(reason);
        self.events.push(GameEvent::Ended {
            reason,
            score: self.state.score,
        });
        log::info!(
            "Run {} ended ({}) with score {}",
            self.runs_started,
            reason.as_str(),
            self.state.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `total_ms` to the controller in display-sized frames
    fn run_for(game: &mut Game, total_ms: f64) {
        let mut left = total_ms;
        while left > 0.0 {
            let frame = left.min(16.0);
            game.update(frame);
            left -= frame;
        }
    }

    #[test]
    fn test_idle_until_first_action() {
        let mut game = Game::new(Tuning::default(), 1);
        assert_eq!(game.run_state(), RunState::Idle);
        assert!(!game.timers_armed());

        run_for(&mut game, 500.0);
        assert_eq!(game.state().time_ticks, 0);

        game.press_action();
        assert_eq!(game.run_state(), RunState::Running);
        assert!(game.timers_armed());
        assert_eq!(game.drain_events(), vec![GameEvent::Started]);
        // Starting does not also flap
        assert_eq!(game.state().player.vel_y, 0.0);
    }

    #[test]
    fn test_runs_at_sixty_ticks_per_second() {
        let mut game = Game::new(Tuning::default(), 1);
        game.press_action();
        run_for(&mut game, 500.0);
        let ticks = game.state().time_ticks;
        assert!((29..=30).contains(&ticks), "ticks = {ticks}");
    }

    #[test]
    fn test_action_while_running_flaps() {
        let mut game = Game::new(Tuning::default(), 1);
        game.press_action();
        run_for(&mut game, 100.0);
        game.drain_events();

        game.press_action();
        assert_eq!(game.state().player.vel_y, game.tuning().jump_velocity);
        assert_eq!(game.drain_events(), vec![GameEvent::Flapped]);
    }

    #[test]
    fn test_falling_ends_run_and_stops_timers() {
        let mut game = Game::new(Tuning::default(), 1);
        game.press_action();
        run_for(&mut game, 1_000.0);

        assert_eq!(game.run_state(), RunState::Ended);
        assert_eq!(game.last_end(), Some(EndReason::FellOffScreen));
        assert!(!game.timers_armed());
        let events = game.drain_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::Ended {
                reason: EndReason::FellOffScreen,
                score: 0
            })
        );

        // Frozen: no more ticks, action key ignored
        let ticks = game.state().time_ticks;
        run_for(&mut game, 500.0);
        game.press_action();
        assert_eq!(game.state().time_ticks, ticks);
        assert_eq!(game.run_state(), RunState::Ended);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_spawner_runs_on_its_own_interval() {
        let tuning = Tuning {
            gravity: 0.0,
            ..Tuning::default()
        };
        let mut game = Game::new(tuning, 9);
        game.press_action();

        run_for(&mut game, 1_990.0);
        assert!(game.state().obstacles.is_empty());

        run_for(&mut game, 100.0);
        assert_eq!(game.run_state(), RunState::Running);
        assert_eq!(game.state().obstacles.len(), 1);
        assert!(game.state().obstacles[0].x < game.tuning().viewport_width);
    }

    #[test]
    fn test_restart_resets_world() {
        let mut game = Game::new(Tuning::default(), 1);
        game.press_action();
        run_for(&mut game, 1_000.0);
        assert_eq!(game.run_state(), RunState::Ended);

        game.state.score = 7;
        game.state.obstacles.push(crate::sim::Obstacle::new(99, 10.0, 60.0, 100.0, 150.0));

        game.restart();
        assert_eq!(game.run_state(), RunState::Running);
        assert_eq!(game.score(), 0);
        assert!(game.state().obstacles.is_empty());
        assert_eq!(game.state().time_ticks, 0);
        assert_eq!(game.last_end(), None);
        assert!(game.timers_armed());
    }

    #[test]
    fn test_restart_while_running_keeps_single_schedule() {
        let mut game = Game::new(Tuning::default(), 1);
        game.press_action();
        run_for(&mut game, 100.0);
        game.restart();
        game.restart();

        run_for(&mut game, 500.0);
        let ticks = game.state().time_ticks;
        assert!((29..=30).contains(&ticks), "ticks = {ticks}");
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut game = Game::new(Tuning::default(), 1);
        game.press_action();
        game.update(10_000.0);
        assert!(game.state().time_ticks <= MAX_EVENTS_PER_FRAME as u64);
    }

    #[test]
    fn test_autopilot_outlives_free_fall() {
        let tuning = Tuning::default();
        let mut game = Game::new(tuning, 5);
        game.set_autopilot(true);
        game.press_action();
        run_for(&mut game, 1_500.0);
        assert_eq!(game.run_state(), RunState::Running);
    }
}
