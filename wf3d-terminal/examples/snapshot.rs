//! Example: render a small arranged scene to stdout as a single frame
//!
//! Usage: cargo run --example snapshot

use std::io::{self, stdout, Write};

use wf3d_core::{Axes, Camera, Renderable, Shape, Vector};
use wf3d_terminal::AsciiSurface;

fn main() -> io::Result<()> {
    let mut camera = Camera::new();
    camera.frustum(-1.0, 1.0, -0.5, 0.5, 1.0, 50.0);
    camera.look_at(
        Vector::new(0.0, 2.0, 6.0),
        Vector::new(0.0, 0.0, 0.0),
        Vector::new(0.0, 1.0, 0.0),
    );

    let mut cube = Shape::cube();
    cube.move_to(-1.5, 0.0, 0.0);
    cube.orient(20.0, 30.0, 0.0);

    let mut sphere = Shape::sphere(2).expect("depth 2 is within range");
    sphere.move_to(1.5, 0.0, 0.0);

    let mut cylinder = Shape::cylinder(16).expect("16 sides is plenty");
    cylinder.move_to(0.0, 0.0, -1.5);
    cylinder.orient(0.0, 0.0, 25.0);

    for shape in [&mut cube, &mut sphere, &mut cylinder] {
        shape.edge_color = [1.0, 1.0, 1.0, 1.0];
    }

    let mut surface = AsciiSurface::new(100, 40);
    let pv = camera.projection().mult(&camera.view());
    Axes::new(-2.0, 2.0, -2.0, 2.0, -2.0, 2.0, 4).draw(&mut surface, &pv);
    for shape in [&cube, &sphere, &cylinder] {
        shape.render(&mut surface, &camera);
    }

    let mut out = stdout();
    surface.draw(&mut out)?;
    out.flush()
}
