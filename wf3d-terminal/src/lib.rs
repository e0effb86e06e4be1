//! Terminal-based ASCII wireframe renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wf3d_core::{Axes, Camera, Renderable, Shape, Vector};

pub mod renderer;

pub use renderer::AsciiSurface;

/// Degrees added per keypress
const ROTATE_STEP: f32 = 5.0;

/// Main application struct for terminal 3D rendering.
///
/// Shows one shape at a time over an optional set of axes; the arrow keys
/// spin the current shape, Tab cycles through the shapes.
#[derive(Debug)]
pub struct TerminalApp {
    shapes: Vec<Shape>,
    current: usize,
    axes: Axes,
    show_axes: bool,
    camera: Camera,
    surface: AsciiSurface,
    spin: [f32; 3],
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(shapes: Vec<Shape>) -> io::Result<Self> {
        if shapes.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "need at least one shape to show",
            ));
        }
        let (width, height) = terminal::size()?;

        // Terminal cells are roughly twice as tall as they are wide.
        let aspect = width as f32 / (height as f32 * 2.0);
        let mut camera = Camera::new();
        let near = 1.0;
        let half = near * 30f32.to_radians().tan();
        camera.frustum(-half * aspect, half * aspect, -half, half, near, 50.0);
        camera.look_at(
            Vector::new(0.0, 1.5, 4.0),
            Vector::new(0.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
        );

        log::debug!("terminal surface {}x{}, aspect {:.2}", width, height, aspect);

        Ok(Self {
            shapes,
            current: 0,
            axes: Axes::new(-2.0, 2.0, -2.0, 2.0, -2.0, 2.0, 4),
            show_axes: true,
            camera,
            surface: AsciiSurface::new(width as usize, height as usize),
            spin: [0.0; 3],
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('w') | KeyCode::Up => self.rotate_by(ROTATE_STEP, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.rotate_by(-ROTATE_STEP, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.rotate_by(0.0, -ROTATE_STEP, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.rotate_by(0.0, ROTATE_STEP, 0.0),
                KeyCode::Char('e') => self.rotate_by(0.0, 0.0, ROTATE_STEP),
                KeyCode::Char('r') => self.rotate_by(0.0, 0.0, -ROTATE_STEP),
                KeyCode::Tab | KeyCode::Char('n') => {
                    self.current = (self.current + 1) % self.shapes.len();
                    self.spin = self.shapes[self.current].orientation();
                }
                KeyCode::Char('x') => {
                    self.show_axes = !self.show_axes;
                }
                KeyCode::Char('f') => {
                    let shape = &mut self.shapes[self.current];
                    shape.wire = !shape.wire;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn rotate_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.spin[0] += dx;
        self.spin[1] += dy;
        self.spin[2] += dz;
        let [tx, ty, tz] = self.spin;
        self.shapes[self.current].orient(tx, ty, tz);
    }

    fn update(&mut self) {
        // Continuous slow rotation for demo effect
        self.rotate_by(0.3, 0.5, 0.0);
    }

    fn render(&mut self) -> io::Result<()> {
        self.surface.clear();

        if self.show_axes {
            // Axes live in world space, so they go through view and
            // projection together.
            let pv = self.camera.projection().mult(&self.camera.view());
            self.axes.draw(&mut self.surface, &pv);
        }

        self.shapes[self.current].render(&mut self.surface, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.surface.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "WF3D Terminal Renderer | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll Tab=Shape X=Axes F=Wire Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
