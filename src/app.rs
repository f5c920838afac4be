use color_eyre::Result;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::entities::RandomFactory;
use crate::input::{InputAction, InputManager, NUDGE_PER_FRAME};
use crate::renderer::{GameRenderer, RenderView, scene_rect};
use crate::sim::{Session, clamp_pointer};

/// The terminal host: owns the session and feeds it the wall clock and the pointer.
pub struct App {
    running: bool,
    session: Session,
    /// Horizontal pointer in [0, 1]
    pointer: f32,
    /// Session time is measured from here
    epoch: Instant,
    last_frame_time: Instant,
    fps: u32,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    pub fn new(config: GameConfig) -> Result<Self> {
        let factory =
            RandomFactory::new(config.normal_collision_radius, config.heavy_collision_radius);
        let session = Session::start(config.clone(), factory, 0.0)?;
        let now = Instant::now();

        Ok(Self {
            running: true,
            session,
            pointer: 0.5,
            epoch: now,
            last_frame_time: now,
            fps: 0,
            input_manager: InputManager::new(config.clone()),
            renderer: GameRenderer::new(config),
            audio_manager: AudioManager::default(),
        })
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            let size = terminal.size()?;
            self.input_manager
                .set_scene(scene_rect(Rect::new(0, 0, size.width, size.height)));

            terminal.draw(|frame| {
                let view = RenderView {
                    frame: self.session.view(),
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            let phase = self.session.state().phase;
            self.input_manager.poll_events(phase)?;
            let actions = self.input_manager.get_actions(phase);
            self.process_actions(&actions);

            let now_ms = self.now_ms();
            self.session.tick(now_ms, self.pointer);
            for event in self.session.drain_events() {
                self.audio_manager.play_event(&event);
            }

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    fn process_actions(&mut self, actions: &[InputAction]) {
        let now_ms = self.now_ms();
        for action in actions {
            match action {
                InputAction::Quit => self.running = false,
                InputAction::Pause => self.session.pause(now_ms),
                InputAction::Resume => self.session.resume(now_ms),
                InputAction::Restart => {
                    self.session.restart(now_ms);
                    self.pointer = 0.5;
                }
                _ => self.pointer = steer(self.pointer, *action),
            }
        }
    }
}

/// New pointer value after a steering action
pub fn steer(pointer: f32, action: InputAction) -> f32 {
    match action {
        InputAction::MoveLeft => clamp_pointer(pointer - NUDGE_PER_FRAME),
        InputAction::MoveRight => clamp_pointer(pointer + NUDGE_PER_FRAME),
        InputAction::PointTo(target) => clamp_pointer(target),
        _ => pointer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_nudges_and_clamps() {
        assert!((steer(0.5, InputAction::MoveLeft) - 0.48).abs() < 1e-6);
        assert!((steer(0.5, InputAction::MoveRight) - 0.52).abs() < 1e-6);
        assert_eq!(steer(0.01, InputAction::MoveLeft), 0.0);
        assert_eq!(steer(0.99, InputAction::MoveRight), 1.0);
    }

    #[test]
    fn test_mouse_overrides_pointer() {
        assert_eq!(steer(0.1, InputAction::PointTo(0.75)), 0.75);
        assert_eq!(steer(0.1, InputAction::PointTo(f32::NAN)), 0.5);
        assert_eq!(steer(0.3, InputAction::Quit), 0.3);
    }
}
