use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use log::{info, warn};
use lluvia_config::Config;
use lluvia_core::{Parallax, ParticleGenerator, Scene};
use lluvia_scene::{CELL_HEIGHT_PX, CELL_WIDTH_PX, SceneRenderer};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::{Line, Span},
};

use crate::audio::AudioOutput;

mod audio;
mod logging;

/// Frame interval, about 30 fps.
const FRAME: Duration = Duration::from_millis(33);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Some(path) = logging::init() {
        info!("logging to {}", path.display());
    }

    let config = Config::load().unwrap_or_else(|e| {
        warn!("{e}, using defaults");
        Config::default()
    });
    let app = App::new(&config)?;

    let mut terminal = ratatui::init();
    let result = execute!(std::io::stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| app.run(&mut terminal));
    if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture) {
        warn!("failed to disable mouse capture: {e}");
    }
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Flags, messages and particles.
    scene: Scene,
    /// Cell grid reused across frames.
    renderer: SceneRenderer,
    /// Ambient music player, silent when no command is configured.
    audio: Box<dyn AudioOutput>,
    /// Last audio problem, shown until the next toggle.
    status: Option<String>,
    /// Origin of the animation clock.
    started: Instant,
    /// Scene area from the last draw, for pointer math.
    area: Rect,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let generator = match config.seed {
            Some(seed) => {
                info!("particle seed {seed}");
                ParticleGenerator::from_seed(seed)
            }
            None => ParticleGenerator::from_entropy(),
        };
        let scene = Scene::new(config.messages(), generator, config.scene_options())?;
        Ok(Self {
            running: false,
            scene,
            renderer: SceneRenderer::new(),
            audio: audio::from_config(&config.audio),
            status: None,
            started: Instant::now(),
            area: Rect::default(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let now = self.elapsed_ms();
            self.scene.tick(now);
            terminal.draw(|frame| self.render(frame, now))?;
            self.handle_crossterm_events()?;
        }
        self.teardown();
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame, now: u64) {
        let [scene_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        self.area = scene_area;

        let snapshot = self.scene.snapshot(now);
        self.renderer.render_area(frame, scene_area, &snapshot, now);

        let line = match &self.status {
            Some(status) => Line::from(status.as_str().fg(Color::LightRed)).centered(),
            None => self.help_line(),
        };
        frame.render_widget(line, help_area);
    }

    fn help_line(&self) -> Line<'static> {
        let flags = self.scene.flags();
        let key = |k: &'static str| k.bold().fg(Color::LightBlue);
        let label = |l: String| Span::from(l).dark_gray();
        let on_off = |on: bool| if on { "on" } else { "off" };
        Line::from(vec![
            key("space"),
            label(" next  ".into()),
            key("r"),
            label(format!(" rain {}  ", on_off(flags.raining))),
            key("n"),
            label(format!(" {}  ", if flags.night { "night" } else { "day" })),
            key("m"),
            label(format!(" music {}  ", on_off(flags.audio_playing))),
            key("s"),
            label(format!(" {} speed  ", self.scene.speed().name())),
            key("q"),
            label(" quit".into()),
        ])
        .centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(_, _) => self.scene.resize(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ') | KeyCode::Enter) => self.scene.tap(self.elapsed_ms()),
            (_, KeyCode::Char('r')) => self.scene.toggle_rain(),
            (_, KeyCode::Char('n')) => self.scene.toggle_time(),
            (_, KeyCode::Char('m')) => self.toggle_audio(),
            (_, KeyCode::Char('s')) => self.scene.set_speed(self.scene.speed().next()),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.scene.tap(self.elapsed_ms()),
            MouseEventKind::Moved => {
                let parallax = pointer_parallax(self.area, mouse.column, mouse.row);
                self.scene.set_parallax(parallax);
            }
            _ => {}
        }
    }

    /// Flip the audio flag and start or stop the player to match. The flag
    /// flips even when the player fails.
    fn toggle_audio(&mut self) {
        let playing = self.scene.toggle_audio();
        let result = if playing {
            self.audio.play()
        } else {
            self.audio.pause()
        };
        self.status = match result {
            Ok(()) => None,
            Err(e) => {
                warn!("{e}");
                Some(e.to_string())
            }
        };
    }

    /// Cancel pending advances and stop the music.
    fn teardown(&mut self) {
        self.scene.teardown();
        if let Err(e) = self.audio.pause() {
            warn!("{e}");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Parallax for a pointer at cell (`column`, `row`), in the pixel units the
/// scene works in.
fn pointer_parallax(area: Rect, column: u16, row: u16) -> Parallax {
    let x = column.saturating_sub(area.x) as f32 * CELL_WIDTH_PX;
    let y = row.saturating_sub(area.y) as f32 * CELL_HEIGHT_PX;
    Parallax::from_pointer(
        x,
        y,
        area.width as f32 * CELL_WIDTH_PX,
        area.height as f32 * CELL_HEIGHT_PX,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let config = Config {
            seed: Some(3),
            audio: lluvia_config::AudioConfig {
                command: Vec::new(),
                ..Default::default()
            },
            ..Config::default()
        };
        App::new(&config).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_keys_toggle_flags() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('n'));
        assert!(app.scene.flags().raining);
        assert!(app.scene.flags().night);

        press(&mut app, KeyCode::Char('m'));
        assert!(app.scene.flags().audio_playing);
        assert!(app.audio.is_playing());
        assert!(app.status.is_none());
        press(&mut app, KeyCode::Char('m'));
        assert!(!app.audio.is_playing());
    }

    #[test]
    fn test_teardown_stops_music() {
        let mut app = app();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.audio.is_playing());

        app.teardown();
        assert!(!app.audio.is_playing());
        assert_eq!(app.scene.tick(u64::MAX), 0);
    }

    #[test]
    fn test_audio_failure_still_toggles() {
        let config = Config {
            audio: lluvia_config::AudioConfig {
                command: vec!["mpv".into()],
                track: "/nonexistent/lluvia.mp3".into(),
            },
            ..Config::default()
        };
        let mut app = App::new(&config).unwrap();
        press(&mut app, KeyCode::Char('m'));
        assert!(app.scene.flags().audio_playing);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            app.running = true;
            press(&mut app, code);
            assert!(!app.running);
        }
        let mut app = app();
        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_speed_key_cycles() {
        let mut app = app();
        let before = app.scene.speed();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.scene.speed(), before.next());
    }

    #[test]
    fn test_pointer_parallax_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let center = pointer_parallax(area, 40, 12);
        assert_eq!(center.sky_offset(), 0.0);
        let corner = pointer_parallax(area, 0, 0);
        assert!(corner.x < 0.0 && corner.y < 0.0);
    }
}
