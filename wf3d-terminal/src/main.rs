//! WF3D Terminal Demo - primitive showcase
//!
//! Cycles through the built-in primitives with Tab.
//! Controls:
//!   - WASD / Arrow Keys: Rotate the current shape
//!   - E/R: Roll rotation
//!   - Tab/N: Next shape, X: Toggle axes, F: Toggle wireframe
//!   - Q/ESC: Quit

use anyhow::Result;
use wf3d_core::Shape;
use wf3d_terminal::TerminalApp;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut shapes = vec![
        Shape::cube(),
        Shape::tetra(),
        Shape::cylinder(24)?,
        Shape::sphere(3)?,
    ];
    for shape in &mut shapes {
        // The default black edges vanish on a dark terminal.
        shape.edge_color = WHITE;
        shape.resize(1.5, 1.5, 1.5);
    }

    log::info!("starting terminal renderer (press Q to quit)");
    let mut app = TerminalApp::new(shapes)?;
    app.run()?;
    log::info!("terminal renderer closed");

    Ok(())
}
