use glam::Vec2;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{Enemy, EnemyKind, FlightMode};
use crate::game::{GameMode, World};

const PLAYER_SPRITE: [&str; 2] = ["/A\\", "^^^"];

const TITLE: &str = "TO THE DEATH STAR";
const SUBTITLE: &str = "AND BACK";
const STORY: [&str; 7] = [
    "A mighty power station halfway across",
    "the galaxy is charging a weapon",
    "capable of destroying Earth.",
    "",
    "Debbie climbs into her starship,",
    "the GIZMO, to defend her family",
    "and cats from certain doom.",
];

/// View struct that holds everything needed for one frame
pub struct RenderView<'a> {
    pub world: &'a World,
    pub area: Rect,
    pub fps: u32,
}

/// Maps world pixels onto the cells of the playfield rectangle
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub field: Rect,
    pub view_w: f32,
    pub view_h: f32,
}

impl Viewport {
    /// Cell under a world point, or None when it falls outside the field.
    pub fn project(&self, pos: Vec2) -> Option<(u16, u16)> {
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= self.view_w || pos.y >= self.view_h {
            return None;
        }
        let cx = (pos.x / self.view_w * self.field.width as f32) as u16;
        let cy = (pos.y / self.view_h * self.field.height as f32) as u16;
        if cx >= self.field.width || cy >= self.field.height {
            return None;
        }
        Some((self.field.x + cx, self.field.y + cy))
    }

    /// World pixels covered by one cell row
    pub fn row_height(&self) -> f32 {
        self.view_h / self.field.height.max(1) as f32
    }

    pub fn col_width(&self) -> f32 {
        self.view_w / self.field.width.max(1) as f32
    }
}

fn enemy_glyph(kind: EnemyKind) -> (&'static str, Color) {
    match kind {
        EnemyKind::Mouse => ("<o>", Color::Gray),
        EnemyKind::Feather => ("}~{", Color::LightMagenta),
        EnemyKind::Yarn => ("(@)", Color::LightRed),
        EnemyKind::Catnip => ("*#*", Color::Green),
        EnemyKind::Laser => ("[=]", Color::Red),
        EnemyKind::Bee => ("{*}", Color::Yellow),
        EnemyKind::Boss => ("<W>", Color::Cyan),
    }
}

/// Draw `text` centred on a world point, clipped to the field.
fn put_centered(buffer: &mut Buffer, view: &Viewport, center: Vec2, text: &str, style: Style) {
    if let Some((x, y)) = view.project(center) {
        let half = text.chars().count() as u16 / 2;
        let x = x.saturating_sub(half).max(view.field.x);
        let room = (view.field.x + view.field.width).saturating_sub(x) as usize;
        let clipped: String = text.chars().take(room).collect();
        buffer.set_string(x, y, clipped, style);
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer {}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to mode-specific screens
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.world.mode {
            GameMode::Title => self.render_title(frame, view),
            GameMode::Playing => self.render_game(frame, view),
            GameMode::Paused => self.render_paused(frame, view),
            GameMode::GameOver => self.render_game_over(frame, view),
            GameMode::Victory => self.render_victory(frame, view),
        }
    }

    /// Bordered playfield keeping roughly the world's aspect ratio
    fn playfield(&self, frame: &mut Frame, area: Rect, world: &World) -> Viewport {
        // Cells are about twice as tall as wide
        let aspect = world.config.view_w / world.config.view_h * 2.0;
        let height = area.height.saturating_sub(2);
        let width = ((height as f32 * aspect) as u16 + 2).min(area.width);
        let outer = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + 1,
            width,
            height: height + 1,
        };
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let field = block.inner(outer);
        frame.render_widget(block, outer);
        Viewport {
            field,
            view_w: world.config.view_w,
            view_h: world.config.view_h,
        }
    }

    fn render_stars(&self, buffer: &mut Buffer, view: &Viewport, world: &World) {
        for star in &world.stars {
            if let Some((x, y)) = view.project(star.pos) {
                let (glyph, color) = if star.size > 1 {
                    ("+", Color::Gray)
                } else {
                    (".", Color::DarkGray)
                };
                buffer.set_string(x, y, glyph, Style::default().fg(color));
            }
        }
    }

    fn render_beams(&self, buffer: &mut Buffer, view: &Viewport, world: &World) {
        let cfg = &world.config;
        for beam in &world.beams {
            let Some(captor) = world.find_enemy(beam.owner).map(|i| &world.enemies[i]) else {
                continue;
            };
            let top = Vec2::new(captor.center().x, captor.pos.y + captor.size.y);
            let style = Style::default().fg(Color::LightBlue);
            let mut depth = view.row_height() * 0.5;
            while depth <= beam.len {
                let half = beam.half_width_at(depth, cfg.beam_width, cfg.beam_cone_spread);
                let mut dx = -half;
                while dx <= half {
                    if let Some((x, y)) = view.project(top + Vec2::new(dx, depth)) {
                        buffer.set_string(x, y, ":", style);
                    }
                    dx += view.col_width();
                }
                depth += view.row_height();
            }
        }
    }

    fn render_enemy(&self, buffer: &mut Buffer, view: &Viewport, enemy: &Enemy) {
        if matches!(enemy.mode, FlightMode::Spawning { .. }) {
            return;
        }
        let (glyph, color) = enemy_glyph(enemy.kind);
        let color = if enemy.is_flashing() { Color::White } else { color };
        put_centered(
            buffer,
            view,
            enemy.center(),
            glyph,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
    }

    fn render_ship(&self, buffer: &mut Buffer, view: &Viewport, center: Vec2, color: Color) {
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        let row = view.row_height();
        for (i, line) in PLAYER_SPRITE.iter().enumerate() {
            let at = center + Vec2::new(0.0, (i as f32 - 0.5) * row);
            put_centered(buffer, view, at, line, style);
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let world = view.world;
        let vp = self.playfield(frame, view.area, world);
        let buffer = frame.buffer_mut();

        self.render_stars(buffer, &vp, world);
        self.render_beams(buffer, &vp, world);

        for enemy in &world.enemies {
            self.render_enemy(buffer, &vp, enemy);
        }

        if let Some(ship) = &world.captured_ship {
            self.render_ship(buffer, &vp, ship.pos + ship.size * 0.5, Color::Red);
        }
        if let Some(ship) = &world.rescue_ship {
            self.render_ship(buffer, &vp, ship.pos, Color::LightCyan);
        }

        let player = &world.player;
        if player.alive {
            // blink while invulnerable
            let blink_off = player.is_invulnerable() && (player.invulnerable_time * 10.0) as u32 % 2 == 0;
            if !blink_off {
                let color = if player.is_flashing() {
                    Color::White
                } else {
                    Color::Green
                };
                let c = player.center();
                if player.dual {
                    let offset = Vec2::new(world.config.dual_shot_spacing, 0.0);
                    self.render_ship(buffer, &vp, c - offset, color);
                    self.render_ship(buffer, &vp, c + offset, color);
                } else {
                    self.render_ship(buffer, &vp, c, color);
                }
            }
        }

        for bullet in &world.bullets {
            let center = bullet.bounds().center();
            put_centered(buffer, &vp, center, "|", Style::default().fg(Color::Yellow));
        }
        for bullet in &world.enemy_bullets {
            let center = bullet.bounds().center();
            put_centered(buffer, &vp, center, "!", Style::default().fg(Color::Magenta));
        }
        for powerup in &world.powerups {
            let glyph = powerup.kind.get_char().to_string();
            put_centered(
                buffer,
                &vp,
                powerup.pos,
                &glyph,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            );
        }
        for particle in &world.particles {
            let color = if particle.life > 0.3 {
                Color::Yellow
            } else if particle.life > 0.15 {
                Color::LightRed
            } else {
                Color::Red
            };
            put_centered(buffer, &vp, particle.pos, "*", Style::default().fg(color));
        }

        self.render_hud(frame, view);
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let world = view.world;
        let label = Style::default().fg(Color::DarkGray);
        let value = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(format!("{}", world.player.score), value(Color::Yellow)),
            Span::styled("  Lives: ", label),
            Span::styled(format!("{}", world.player.lives), value(Color::Green)),
            Span::styled("  Wave: ", label),
            Span::styled(format!("{}", world.wave), value(Color::Cyan)),
        ];
        if world.player.dual {
            spans.push(Span::styled("  DUAL", value(Color::LightCyan)));
        }
        if world.buffs.treat_active() {
            spans.push(Span::styled(format!("  Treat {:.0}s", world.buffs.treat), value(Color::Magenta)));
        }
        if world.buffs.fish_active() {
            spans.push(Span::styled(format!("  Fish {:.0}s", world.buffs.fish), value(Color::Blue)));
        }
        spans.push(Span::styled("  FPS: ", label));
        spans.push(Span::styled(format!("{}", view.fps), value(Color::White)));

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[A/D/Arrows: Move] [Space: Fire] [P: Pause] [Q: Quit]",
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

    /// Centred boxed message on top of whatever is already drawn
    fn render_banner(&self, frame: &mut Frame, area: Rect, lines: Vec<Line>, color: Color) {
        let width = 44.min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let banner = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .alignment(Alignment::Center),
            banner,
        );
    }

    fn render_title(&self, frame: &mut Frame, view: &RenderView) {
        let vp = self.playfield(frame, view.area, view.world);
        self.render_stars(frame.buffer_mut(), &vp, view.world);
        let mut lines = vec![
            Line::from(""),
            Line::from(TITLE).centered().bold().yellow(),
            Line::from(SUBTITLE).centered().bold().yellow(),
            Line::from(""),
        ];
        lines.extend(STORY.iter().map(|&text| Line::from(text).centered().white()));
        lines.extend([
            Line::from(""),
            Line::from("Press Enter to start").centered().green(),
            Line::from("Press Q to quit").centered().white(),
        ]);
        self.render_banner(frame, view.area, lines, Color::Yellow);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        let lines = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];
        self.render_banner(frame, view.area, lines, Color::Yellow);
    }

    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        let world = view.world;
        let lines = vec![
            Line::from(""),
            Line::from("GAME OVER").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", world.player.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Reached wave {}", world.wave)).centered().cyan(),
            Line::from(""),
            Line::from("Press Enter to play again").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];
        self.render_banner(frame, view.area, lines, Color::Red);
    }

    fn render_victory(&self, frame: &mut Frame, view: &RenderView) {
        let vp = self.playfield(frame, view.area, view.world);
        self.render_stars(frame.buffer_mut(), &vp, view.world);
        let lines = vec![
            Line::from(""),
            Line::from("VICTORY!").centered().green().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.world.player.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press Enter to play again").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];
        self.render_banner(frame, view.area, lines, Color::Green);
    }
}
