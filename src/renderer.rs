use crate::config::GameConfig;
use crate::entities::{EnemyKind, EnvironmentKind, GamePhase, PowerUpKind, Prop};
use crate::sim::FrameView;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Widest the scene is drawn, in columns
const MAX_SCENE_WIDTH: u16 = 90;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub frame: FrameView<'a>,
    pub area: Rect,
    pub fps: u32,
}

/// Screen area the lanes and their scenery are drawn into: a centered column between the HUD
/// and the controls hint
pub fn scene_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(2).min(MAX_SCENE_WIDTH);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + 1,
        width,
        height: area.height.saturating_sub(2),
    }
}

/// Maps world coordinates onto the scene's character grid
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    scene: Rect,
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl Projection {
    pub fn new(scene: Rect, config: &GameConfig) -> Self {
        Self {
            scene,
            left: config.view_left(),
            right: config.view_right(),
            top: config.enemy_spawn_y.max(config.powerup_spawn_y) + 2.0,
            bottom: config.player_y - config.cull_margin,
        }
    }

    /// Cell for a world position, or `None` when it is off screen
    pub fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if self.scene.width == 0 || self.scene.height == 0 {
            return None;
        }
        let fx = (x - self.left) / (self.right - self.left);
        let fy = (self.top - y) / (self.top - self.bottom);
        if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
            return None;
        }
        let col = (fx * f32::from(self.scene.width - 1)).round() as u16;
        let row = (fy * f32::from(self.scene.height - 1)).round() as u16;
        Some((self.scene.x + col, self.scene.y + row))
    }
}

/// Brightness from depth: far things are dim, near things bold
pub fn depth_style(depth: f32, config: &GameConfig, color: Color) -> Style {
    let span = config.perspective_end_depth - config.perspective_start_depth;
    let t = if span.abs() <= f32::EPSILON {
        1.0
    } else {
        (depth - config.perspective_start_depth) / span
    };
    let style = Style::default().fg(color);
    if t < 1.0 / 3.0 {
        style.add_modifier(Modifier::DIM)
    } else if t < 2.0 / 3.0 {
        style
    } else {
        style.add_modifier(Modifier::BOLD)
    }
}

fn enemy_glyph(kind: EnemyKind) -> (&'static str, Color) {
    match kind {
        EnemyKind::Normal => ("Z", Color::Red),
        EnemyKind::Fat => ("@", Color::LightRed),
        EnemyKind::Crawling => ("z", Color::Magenta),
        EnemyKind::Baby => ("o", Color::LightMagenta),
    }
}

fn prop_glyph(kind: EnvironmentKind, prop: &Prop) -> (&'static str, Color) {
    match kind {
        EnvironmentKind::Desert => {
            const SHAPES: [&str; 3] = ["Y", "^", "n"];
            (SHAPES[prop.variant % SHAPES.len()], Color::Yellow)
        }
        EnvironmentKind::CrystalCaverns => {
            // A crystal turns through four silhouettes per half revolution
            const SPIN: [&str; 4] = ["|", "/", "-", "\\"];
            let quarter = (prop.spin / std::f32::consts::FRAC_PI_4).rem_euclid(4.0) as usize;
            let color = if prop.variant % 2 == 0 {
                Color::Cyan
            } else {
                Color::LightBlue
            };
            (SPIN[quarter % SPIN.len()], color)
        }
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    config: GameConfig,
}

impl GameRenderer {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Main render method that dispatches to phase-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.frame.state.phase {
            GamePhase::Running => self.render_game(frame, view),
            GamePhase::Paused => self.render_paused(frame, view),
            GamePhase::GameOver | GamePhase::Victory => self.render_end(frame, view),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let scene = scene_rect(area);
        let projection = Projection::new(scene, &self.config);
        let world = &view.frame;

        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let outer = Rect {
            x: scene.x.saturating_sub(1),
            width: scene.width + 2,
            ..scene
        }
        .intersection(area);
        frame.render_widget(block, outer);

        let buffer = frame.buffer_mut();
        self.draw_lanes(buffer, &projection);

        for prop in &world.environment.props {
            if let Some((col, row)) = projection.cell(prop.x, prop.display_y()) {
                let (glyph, color) = prop_glyph(world.environment.kind, prop);
                buffer.set_string(col, row, glyph, depth_style(prop.depth, &self.config, color));
            }
        }

        for powerup in world.powerups {
            if let Some((col, row)) = projection.cell(powerup.x, powerup.y) {
                let color = match powerup.kind {
                    PowerUpKind::FireRate => Color::Yellow,
                    PowerUpKind::UnitGain => Color::Cyan,
                };
                let label = format!("[{}]", powerup.label());
                let col = col.saturating_sub(label.len() as u16 / 2).max(scene.x);
                buffer.set_string(col, row, label, depth_style(powerup.depth, &self.config, color));
            }
        }

        for enemy in world.enemies {
            // Sway leans the sprite a column either way
            let x = enemy.x + enemy.pose.sway;
            if let Some((col, row)) = projection.cell(x, enemy.y) {
                let (glyph, color) = enemy_glyph(enemy.kind);
                buffer.set_string(col, row, glyph, depth_style(enemy.depth, &self.config, color));
            }
        }

        for projectile in world.projectiles {
            if let Some((col, row)) = projection.cell(projectile.x, projectile.y) {
                buffer.set_string(
                    col,
                    row,
                    "|",
                    depth_style(projectile.depth, &self.config, Color::White),
                );
            }
        }

        for unit in &world.formation.units {
            if let Some((col, row)) = projection.cell(unit.x, unit.y) {
                buffer.set_string(
                    col,
                    row,
                    "A",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        self.render_hud(frame, view);
    }

    /// Lane edges, the divider and the player line
    fn draw_lanes(&self, buffer: &mut Buffer, projection: &Projection) {
        let faint = Style::default().fg(Color::DarkGray);
        let edges = [
            (self.config.scene_left(), "│"),
            (0.0, "┊"),
            (self.config.scene_right(), "│"),
        ];
        let step = (projection.top - projection.bottom) / f32::from(projection.scene.height.max(1));
        for (x, glyph) in edges {
            let mut y = projection.top;
            while y >= projection.bottom {
                if let Some((col, row)) = projection.cell(x, y) {
                    buffer.set_string(col, row, glyph, faint);
                }
                y -= step;
            }
        }

        let mut x = self.config.scene_left();
        let step = (projection.right - projection.left) / f32::from(projection.scene.width.max(1));
        while x <= self.config.scene_right() {
            if let Some((col, row)) = projection.cell(x, self.config.player_y) {
                buffer.set_string(col, row, "─", faint);
            }
            x += step;
        }
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let state = view.frame.state;
        let label = Style::default().fg(Color::DarkGray);
        let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let stats = Line::from(vec![
            Span::styled("Units: ", label),
            Span::styled(format!("{}", state.player_units), value(Color::Green)),
            Span::styled("  Enemies: ", label),
            Span::styled(format!("{}", state.live_enemies), value(Color::Red)),
            Span::styled("  Wave: ", label),
            Span::styled(
                format!("{}/{}", state.waves_spawned, self.config.required_waves),
                value(Color::Yellow),
            ),
            Span::styled("  Fire: ", label),
            Span::styled(format!("{:.0}ms", state.fire_interval_ms), value(Color::Cyan)),
            Span::styled("  FPS: ", label),
            Span::styled(format!("{}", view.fps), value(Color::White)),
        ]);
        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let elapsed_secs = (view.frame.elapsed_ms / 1000.0).max(0.0) as u64;
        let place = Line::from(vec![
            Span::styled(view.frame.environment.kind.get_name(), label),
            Span::styled(
                format!("  {:02}:{:02}", elapsed_secs / 60, elapsed_secs % 60),
                value(Color::White),
            ),
        ]);
        frame.render_widget(Paragraph::new(place).right_aligned(), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[Mouse/A/D/Arrows: Steer] [P: Pause] [Q: Quit]",
            label,
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];
        let pause_area = centered(view.area, 30, 6);
        frame.render_widget(Clear, pause_area);
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// End screen over the frozen final frame
    fn render_end(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let state = view.frame.state;
        let (message, color) = match state.phase {
            GamePhase::Victory => ("Victory!", Color::Green),
            _ => ("Game Over!", Color::Red),
        };
        let elapsed_secs = (view.frame.elapsed_ms / 1000.0).max(0.0) as u64;

        let end_text = vec![
            Line::from(""),
            Line::from(message).centered().bold().fg(color),
            Line::from(""),
            Line::from(format!("Waves: {}", state.waves_spawned))
                .centered()
                .yellow(),
            Line::from(format!("Units left: {}", state.player_units))
                .centered()
                .green(),
            Line::from(format!(
                "Time: {:02}:{:02}",
                elapsed_secs / 60,
                elapsed_secs % 60
            ))
            .centered()
            .cyan(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];
        let end_area = centered(view.area, 34, 11);
        frame.render_widget(Clear, end_area);
        frame.render_widget(
            Paragraph::new(end_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .alignment(Alignment::Center),
            end_area,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Environment, RandomFactory};

    fn projection() -> Projection {
        Projection::new(Rect::new(0, 1, 75, 25), &GameConfig::default())
    }

    #[test]
    fn test_scene_corners() {
        let config = GameConfig::default();
        let p = projection();
        // Top-left is the view's left edge at the top of the view
        assert_eq!(p.cell(config.view_left(), 14.0), Some((0, 1)));
        assert_eq!(p.cell(config.view_right(), -10.0), Some((74, 25)));
    }

    #[test]
    fn test_off_screen_is_skipped() {
        let p = projection();
        assert_eq!(p.cell(0.0, 20.0), None);
        assert_eq!(p.cell(-8.0, 0.0), None);
        assert_eq!(p.cell(0.0, -11.0), None);
    }

    #[test]
    fn test_lanes_map_to_screen_halves() {
        let p = projection();
        let (left_col, _) = p.cell(-1.9, 0.0).unwrap();
        let (right_col, _) = p.cell(1.9, 0.0).unwrap();
        assert!(left_col < 37);
        assert!(right_col > 37);
    }

    #[test]
    fn test_lanes_sit_inside_the_view() {
        let config = GameConfig::default();
        let p = projection();
        let (left_edge, _) = p.cell(config.scene_left(), 0.0).unwrap();
        let (right_edge, _) = p.cell(config.scene_right(), 0.0).unwrap();
        assert!(left_edge > 0);
        assert!(right_edge < 74);
    }

    #[test]
    fn test_scenery_is_drawable() {
        let config = GameConfig::default();
        let p = Projection::new(scene_rect(Rect::new(0, 0, 120, 40)), &config);
        for seed in 0..50 {
            let mut factory = RandomFactory::seeded(seed);
            for kind in [EnvironmentKind::Desert, EnvironmentKind::CrystalCaverns] {
                let environment = Environment::new(kind, &config, &mut factory);
                for prop in &environment.props {
                    let (col, _) = p
                        .cell(prop.x, config.player_y + 1.0)
                        .expect("prop column off screen");
                    let (left_edge, _) = p.cell(config.scene_left(), 0.0).unwrap();
                    let (right_edge, _) = p.cell(config.scene_right(), 0.0).unwrap();
                    // Scenery stays outside the lanes
                    assert!(col <= left_edge || col >= right_edge);
                }
            }
        }
    }

    #[test]
    fn test_fresh_desert_prop_maps_to_a_cell() {
        let config = GameConfig::default();
        let p = Projection::new(scene_rect(Rect::new(0, 0, 120, 40)), &config);
        let mut factory = RandomFactory::seeded(1);
        let environment = Environment::new(EnvironmentKind::Desert, &config, &mut factory);
        for prop in &environment.props {
            assert!(p.cell(prop.x, prop.display_y()).is_some());
        }
    }

    #[test]
    fn test_depth_brightness() {
        let config = GameConfig::default();
        let far = depth_style(0.0, &config, Color::Red);
        let near = depth_style(3.0, &config, Color::Red);
        assert!(far.add_modifier.contains(Modifier::DIM));
        assert!(near.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_scene_rect_is_centered() {
        let scene = scene_rect(Rect::new(0, 0, 100, 40));
        assert_eq!(scene.width, MAX_SCENE_WIDTH);
        assert_eq!(scene.x, 5);
        assert_eq!(scene.y, 1);
        assert_eq!(scene.height, 38);

        let tiny = scene_rect(Rect::new(0, 0, 1, 1));
        assert_eq!(tiny.width, 0);
        assert_eq!(tiny.height, 0);
    }
}
