/// Command-line front end for the softraster renderer
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::terminal;
use log::{error, info};
use softraster_core::{
    load_obj, render_wireframe, Color, DepthBuffer, Framebuffer, Mesh, RenderConfig, Renderer,
};

pub mod preview;

pub use preview::AsciiPreview;

pub const DEFAULT_MESH: &str = "obj/african_head/african_head.obj";
pub const DEFAULT_OUTPUT: &str = "output.tga";

/// Render a triangulated OBJ mesh to an image file
#[derive(Parser, Debug, Clone)]
#[command(name = "softraster", version, about)]
pub struct Args {
    /// OBJ mesh to render
    #[arg(default_value = DEFAULT_MESH)]
    pub mesh: PathBuf,

    /// Output image (.tga or .png)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// TOML render configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Image width, overrides the config file
    #[arg(long)]
    pub width: Option<usize>,

    /// Image height, overrides the config file
    #[arg(long)]
    pub height: Option<usize>,

    /// Draw face edges instead of shaded triangles
    #[arg(long)]
    pub wireframe: bool,

    /// Print an ASCII preview of the result to the terminal
    #[arg(long)]
    pub preview: bool,
}

/// One render run: config, mesh in, image out
pub struct App {
    args: Args,
    config: RenderConfig,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => RenderConfig::load_from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(width) = args.width {
            config.width = width;
        }
        if let Some(height) = args.height {
            config.height = height;
        }
        config.wireframe |= args.wireframe;
        Ok(Self { args, config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Load the mesh; an empty mesh counts as a failed load.
    pub fn load_mesh(&self) -> Result<Mesh> {
        let path = &self.args.mesh;
        let mesh =
            load_obj(path).with_context(|| format!("failed to load mesh {}", path.display()))?;
        if mesh.nverts() == 0 {
            bail!("mesh {} has no vertices", path.display());
        }
        Ok(mesh)
    }

    pub fn render(&self, mesh: &Mesh) -> Result<Framebuffer> {
        let settings = self.config.to_settings().context("invalid render configuration")?;
        let (width, height) = (self.config.width, self.config.height);
        let mut image = Framebuffer::new(width, height, self.config.format.into());

        if self.config.wireframe {
            render_wireframe(mesh, &mut image, Color::WHITE);
        } else {
            let renderer = Renderer::new(settings)?;
            let mut depth = DepthBuffer::new(width, height);
            let stats = renderer.render(mesh, &mut image, &mut depth);
            info!(
                "{} of {} faces drawn, {} pixels",
                stats.drawn, stats.faces, stats.pixels
            );
        }
        Ok(image)
    }

    pub fn run(&self) -> Result<()> {
        let mesh = self.load_mesh()?;
        let image = self.render(&mesh)?;
        image
            .save(&self.args.output)
            .with_context(|| format!("failed to write {}", self.args.output.display()))?;

        if self.args.preview {
            let (columns, rows) = terminal::size().unwrap_or((80, 24));
            let preview = AsciiPreview::fit(&image, columns as usize, rows.saturating_sub(1) as usize);
            preview.draw(&image, &mut stdout())?;
        }
        Ok(())
    }
}

/// Map a run result to the process status: 0 on success, 1 on any failure.
pub fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const TRIANGLE: &str = "\
v -0.5 -0.5 0.0
v 0.5 -0.5 0.0
v 0.0 0.5 0.0
vn 0.0 0.0 1.0
vt 0.0 0.0
f 1/1/1 2/1/1 3/1/1
";

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("softraster-cli-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    fn app(mesh: &Path, output: &Path, extra: &[&str]) -> App {
        let mut argv = vec![
            "softraster".to_string(),
            mesh.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        App::new(Args::try_parse_from(argv).unwrap()).unwrap()
    }

    #[test]
    fn test_default_arguments() {
        let args = Args::try_parse_from(["softraster"]).unwrap();
        assert_eq!(args.mesh, PathBuf::from(DEFAULT_MESH));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!args.wireframe);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let app = app(Path::new("m.obj"), Path::new("o.tga"), &["--width", "64", "--wireframe"]);
        assert_eq!(app.config().width, 64);
        assert_eq!(app.config().height, 800);
        assert!(app.config().wireframe);
    }

    #[test]
    fn test_renders_triangle_to_file() {
        let mesh = scratch("tri.obj", TRIANGLE);
        let output = std::env::temp_dir().join(format!("softraster-cli-{}-tri.png", std::process::id()));
        let app = app(&mesh, &output, &["--width", "32", "--height", "32"]);
        app.run().unwrap();

        let written = fs::read(&output).unwrap();
        assert!(!written.is_empty());
        let _ = fs::remove_file(&mesh);
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_wireframe_render() {
        let mesh = scratch("wire.obj", TRIANGLE);
        let app = app(&mesh, Path::new("unused.tga"), &["--width", "16", "--height", "16", "--wireframe"]);
        let image = app.render(&app.load_mesh().unwrap()).unwrap();
        // (-0.5, -0.5) lands on pixel (4, 4)
        assert_eq!(image.as_bytes()[(4 * 16 + 4) * 3], 255);
        let _ = fs::remove_file(&mesh);
    }

    #[test]
    fn test_non_triangulated_mesh_fails() {
        let mesh = scratch(
            "quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let app = app(&mesh, Path::new("unused.tga"), &[]);
        let err = app.load_mesh().unwrap_err();
        assert!(format!("{:#}", err).contains("triangulated"));
        let _ = fs::remove_file(&mesh);
    }

    fn run_argv(argv: &[String]) -> ExitCode {
        let result = Args::try_parse_from(argv)
            .map_err(anyhow::Error::from)
            .and_then(App::new)
            .and_then(|app| app.run());
        exit_code(result)
    }

    #[test]
    fn test_exit_codes() {
        let quad = scratch("quad-exit.obj", "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        let argv = ["softraster".to_string(), quad.display().to_string()];
        assert_eq!(run_argv(&argv), ExitCode::from(1));

        let tri = scratch("tri-exit.obj", TRIANGLE);
        let output = std::env::temp_dir().join(format!("softraster-cli-{}-exit.tga", std::process::id()));
        let argv = [
            "softraster".to_string(),
            tri.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
            "--width".to_string(),
            "8".to_string(),
            "--height".to_string(),
            "8".to_string(),
        ];
        assert_eq!(run_argv(&argv), ExitCode::SUCCESS);

        let _ = fs::remove_file(&quad);
        let _ = fs::remove_file(&tri);
        let _ = fs::remove_file(&output);
    }

    #[test]
    fn test_empty_mesh_fails() {
        let mesh = scratch("empty.obj", "# no geometry\n");
        let app = app(&mesh, Path::new("unused.tga"), &[]);
        assert!(app.load_mesh().is_err());
        let _ = fs::remove_file(&mesh);
    }

    #[test]
    fn test_missing_config_fails() {
        let args = Args::try_parse_from(["softraster", "-c", "/no/such/render.toml"]).unwrap();
        assert!(App::new(args).is_err());
    }
}
