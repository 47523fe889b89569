/// softraster - render an OBJ mesh to an image
///
/// Usage: softraster [MESH] [-o OUTPUT] [-c CONFIG] [--wireframe] [--preview]
///
/// Exits with status 1 when the mesh cannot be loaded or the image cannot be written.
use std::process::ExitCode;

use clap::Parser;
use softraster_cli::{exit_code, App, Args};

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    exit_code(App::new(args).and_then(|app| app.run()))
}
