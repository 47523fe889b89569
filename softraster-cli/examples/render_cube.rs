/// Example: render the built-in cube and preview it in the terminal
///
/// Usage: cargo run --example render_cube -- [output.tga]

use std::env;
use std::io::stdout;

use softraster_cli::AsciiPreview;
use softraster_core::{Camera, DepthBuffer, Format, Framebuffer, Mesh, RenderSettings, Renderer, Viewport};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let output = env::args().nth(1).unwrap_or_else(|| "cube.tga".to_string());

    let (width, height) = (400, 400);
    let mesh = Mesh::cube(1.0);
    let settings = RenderSettings::new(
        Camera::default(),
        Viewport::centered(width, height),
        nalgebra::Vector3::new(1.0, 2.0, 3.0),
    )?;
    let renderer = Renderer::new(settings)?;

    let mut image = Framebuffer::new(width, height, Format::Rgb);
    let mut depth = DepthBuffer::new(width, height);
    let stats = renderer.render(&mesh, &mut image, &mut depth);
    println!("Drew {} of {} faces", stats.drawn, stats.faces);

    image.save(&output)?;
    println!("Wrote {}", output);

    AsciiPreview::fit(&image, 80, 40).draw(&image, &mut stdout())?;
    Ok(())
}
