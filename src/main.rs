use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod config;
mod io;
mod layout;
mod render;
mod style;

use config::IconConfig;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = IconConfig::load();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &IconConfig) -> Result<(), Box<dyn Error>> {
    let icons = render::render_set(config)?;
    debug!(sizes = ?icons.sizes(), "rendered icon set");

    let output = &config.output;
    let report = io::pack(&icons, &output.ico_path(), &output.png_path())?;
    debug!(frames = report.frame_count, "packed icon");
    println!("Created {}", report.ico_path.display());
    println!(
        "Created {} ({}x{})",
        report.png_path.display(),
        report.primary_size,
        report.primary_size
    );

    if output.export_frames {
        for path in io::export_frames(&icons, &output.dir)? {
            println!("Created {}", path.display());
        }
    }
    Ok(())
}
