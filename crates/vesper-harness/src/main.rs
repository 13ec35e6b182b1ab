use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};

use vesper_engine::config::{HarnessConfig, resolve_shader_path};
use vesper_engine::context::{Presenter, initialize};
use vesper_engine::logging::init_logging;
use vesper_engine::render_loop::RenderLoop;
use vesper_engine::scene::{Scene, StageSources, TRIANGLE};

const USAGE: &str = "usage: vesper [VERTEX_SHADER [FRAGMENT_SHADER]]";

fn main() -> ExitCode {
    let config = match config_from_args(std::env::args_os().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(config.logging.clone());

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Positional arguments override the vertex, then the fragment shader path.
fn config_from_args(args: impl IntoIterator<Item = OsString>) -> Result<HarnessConfig> {
    let mut config = HarnessConfig::new();
    let mut args = args.into_iter();

    if let Some(vs) = args.next() {
        config = config.vertex_shader(vs);
    }
    if let Some(fs) = args.next() {
        config = config.fragment_shader(fs);
    }
    if let Some(extra) = args.next() {
        bail!("unexpected argument {:?}", extra);
    }
    Ok(config)
}

fn read_shader(path: &Path) -> Result<String> {
    let path = resolve_shader_path(path, Path::new(env!("CARGO_MANIFEST_DIR")));
    std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read shader source {}", path.display()))
}

fn run(config: HarnessConfig) -> Result<()> {
    let vertex = read_shader(&config.vertex_shader)?;
    let fragment = read_shader(&config.fragment_shader)?;

    let context =
        initialize(&config.window, config.gpu.clone()).context("failed to bootstrap context")?;

    let scene = Scene::build(
        context.render_ctx(),
        StageSources {
            vertex: &vertex,
            fragment: &fragment,
        },
        &TRIANGLE,
    )
    .context("setup failed")?;

    RenderLoop::new(config.clear_color)
        .run(Presenter::new(context, scene))
        .context("render loop failed")?;

    Ok(())
}
