use std::io::{Write, stdout};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use tracing::info;

use hostsnap::config::{self, load_config, load_config_from_path};
use hostsnap::logging::init_logging;
use hostsnap::render::{Renderer, write_text};
use hostsnap::system::assembler::SnapshotAssembler;
use hostsnap::system::gpu::NvidiaSmi;
use hostsnap::system::source::SysinfoHost;

#[derive(Parser)]
#[command(
    name = "hostsnap",
    about = "Print a snapshot of host system metrics",
    version
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the snapshot as JSON instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Skip the GPU section
    #[arg(long, default_value_t = false)]
    no_gpu: bool,

    /// Include network interfaces
    #[arg(long, default_value_t = false)]
    network: bool,

    /// Log level for stderr output (overridden by RUST_LOG)
    #[arg(
        long,
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json)?;
    let config = load_config_for_cli(&cli);

    let mut host = SysinfoHost::new();
    let mut gpu = NvidiaSmi::new(config.gpu.nvidia_smi.clone());
    let snapshot = SnapshotAssembler::new(&mut host, &mut gpu, config.sections).assemble();
    info!("snapshot assembled");

    let mut out = stdout().lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &snapshot)?;
        writeln!(out)?;
    } else {
        let sections = Renderer::new(config.render).render(&snapshot);
        write_text(&mut out, &sections)?;
    }
    out.flush()?;

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if cli.no_gpu {
        config.sections.gpu = false;
    }
    if cli.network {
        config.sections.network = true;
    }

    config
}
