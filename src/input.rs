use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::entities::{GamePhase, Lane};

/// Pointer travel per frame while a steering key is held
pub const NUDGE_PER_FRAME: f32 = 0.02;

/// On terminals that never report key releases, a steering key counts as let go once its
/// autorepeat has been silent this long
const HOLD_TIMEOUT: Duration = Duration::from_millis(600);

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    /// The mouse moved to this pointer value
    PointTo(f32),
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    /// Last press or autorepeat of a steering key
    last_steer_at: Option<Instant>,
    /// Set once the terminal has sent a release event
    releases_seen: bool,
}

/// Map a terminal column inside `scene` to a pointer value.
///
/// The scene also shows the scenery beside the lanes while the pointer only spans the lane
/// centers, so everything outside them saturates at 0 and 1.
pub fn pointer_from_column(column: u16, scene: Rect, config: &GameConfig) -> f32 {
    if scene.width <= 1 {
        return 0.5;
    }
    let fraction =
        (f32::from(column.saturating_sub(scene.x)) / f32::from(scene.width - 1)).min(1.0);
    let world_x = config.view_left() + (config.view_right() - config.view_left()) * fraction;
    let lane_left = config.lane_center(Lane::Left);
    let lane_right = config.lane_center(Lane::Right);
    ((world_x - lane_left) / (lane_right - lane_left)).clamp(0.0, 1.0)
}

fn is_steering(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char('a' | 'A' | 'd' | 'D') | KeyCode::Left | KeyCode::Right
    )
}

/// Manages input polling and translates raw terminal events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Screen area the mouse maps onto
    scene: Rect,
    config: GameConfig,
}

impl InputManager {
    pub fn new(config: GameConfig) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            scene: Rect::default(),
            config,
        }
    }

    /// Remember where the lanes were drawn this frame
    pub fn set_scene(&mut self, scene: Rect) {
        self.scene = scene;
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, phase: GamePhase) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        let now = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => self.handle_key_event(key_event, phase, now),
                Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event, phase),
                _ => {}
            }
        }
        self.expire_held_keys(now);

        Ok(())
    }

    /// Let go of steering keys whose autorepeat stopped, unless real releases are reported
    fn expire_held_keys(&mut self, now: Instant) {
        if self.key_state.releases_seen {
            return;
        }
        if let Some(at) = self.key_state.last_steer_at
            && now.duration_since(at) > HOLD_TIMEOUT
        {
            self.key_state.left = false;
            self.key_state.right = false;
            self.key_state.last_steer_at = None;
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent, phase: GamePhase) {
        if phase != GamePhase::Running {
            return;
        }
        if matches!(
            mouse_event.kind,
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)
        ) {
            let pointer = pointer_from_column(mouse_event.column, self.scene, &self.config);
            self.oneshot_actions.push(InputAction::PointTo(pointer));
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, phase: GamePhase, now: Instant) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, phase, now),
            KeyEventKind::Repeat if is_steering(key_event.code) => {
                self.handle_key_press(key_event, phase, now)
            }
            KeyEventKind::Release => {
                self.key_state.releases_seen = true;
                self.handle_key_release(key_event.code);
            }
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, phase: GamePhase, now: Instant) {
        // Quit works in any phase
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        let is_key = |c: char| {
            key_event.code == KeyCode::Char(c)
                || key_event.code == KeyCode::Char(c.to_ascii_uppercase())
        };

        match phase {
            GamePhase::Running if is_key('p') => {
                self.oneshot_actions.push(InputAction::Pause);
                return;
            }
            GamePhase::Paused if is_key('p') => {
                self.oneshot_actions.push(InputAction::Resume);
                return;
            }
            GamePhase::GameOver | GamePhase::Victory if is_key('r') => {
                self.oneshot_actions.push(InputAction::Restart);
                return;
            }
            _ => {}
        }

        if phase == GamePhase::Running {
            match key_event.code {
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    self.key_state.left = true;
                    self.key_state.right = false;
                    self.key_state.last_steer_at = Some(now);
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    self.key_state.right = true;
                    self.key_state.left = false;
                    self.key_state.last_steer_at = Some(now);
                }
                _ => {}
            }
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, phase: GamePhase) -> Vec<InputAction> {
        let mut actions = self.oneshot_actions.clone();

        if phase == GamePhase::Running {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
        }

        actions
    }
}
