use anyhow::Context;
use clap::{Parser, Subcommand};
use editor::draft::PatternDraft;
use gui_bridge::bridge::GuiBridge;
use hapticore::device::{DeviceSession, LoopbackDevice};
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ComposerConfig;
use workflow::runner::Runner;

mod editor;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Compose, save and play haptic suit patterns")]
struct Args {
    /// Load composer settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Folder holding one JSON record per pattern
    #[arg(long)]
    pattern_dir: Option<PathBuf>,
    /// Folder holding appended pattern files
    #[arg(long)]
    appended_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save a pattern under a name, replacing any pattern with that name
    Save {
        name: String,
        #[command(flatten)]
        draft: PatternDraft,
    },
    /// Print the resolved muscles and pulse of a saved pattern
    Show { name: String },
    /// List saved pattern names
    List,
    /// Connect to the suit and play a saved pattern
    Send {
        name: String,
        /// Pulse every muscle for three seconds after connecting
        #[arg(long, default_value_t = false)]
        startup_pulse: bool,
    },
    /// Play saved patterns one after another and store the result
    Append {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long)]
        output: String,
    },
    /// Play a stored appended pattern
    SendAppended { name: String },
    /// Keep the HTTP bridge alive until Ctrl+C
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match args.config {
        Some(path) => ComposerConfig::load(path)?,
        None => ComposerConfig::default(),
    }
    .with_dirs(args.pattern_dir, args.appended_dir);

    let runner = Runner::new(config.clone());
    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating composer runtime")?;

    match args.command {
        Command::Save { name, draft } => {
            let path = runner.save(&draft.into_record(&name))?;
            println!("Saved {} -> {}", name, path.display());
        }
        Command::Show { name } => {
            println!("{}", runner.view(&name)?.summary());
        }
        Command::List => {
            for name in runner.list()? {
                println!("{}", name);
            }
        }
        Command::Send {
            name,
            startup_pulse,
        } => {
            let pattern = runner.compose(&name)?;
            let mut session = DeviceSession::new(LoopbackDevice::default());
            runtime.block_on(runner.play(&mut session, &pattern, startup_pulse))?;
            session.disconnect();
            println!(
                "Sent {} -> {} pulses, {:.2}s",
                name,
                pattern.len(),
                pattern.total_duration()
            );
        }
        Command::Append { names, output } => {
            let (combined, path) = runner.append(&names, &output)?;
            println!(
                "Appended {} patterns into {} ({} pulses) -> {}",
                combined.segment_count(),
                output,
                combined.len(),
                path.display()
            );
        }
        Command::SendAppended { name } => {
            let pattern = runner.load_appended(&name)?;
            let mut session = DeviceSession::new(LoopbackDevice::default());
            runtime.block_on(runner.play(&mut session, &pattern, false))?;
            session.disconnect();
            println!("Sent appended {} -> {} pulses", name, pattern.len());
        }
        Command::Serve { port } => {
            let addr = SocketAddr::from(([127, 0, 0, 1], port.unwrap_or(config.bind_port)));
            let bridge = GuiBridge::new(
                Arc::new(runner),
                DeviceSession::new(LoopbackDevice::default()),
            );
            runtime.block_on(async {
                tokio::select! {
                    served = bridge.serve(addr) => served,
                    stopped = signal::ctrl_c() => stopped
                        .context("awaiting Ctrl+C to exit")
                        .map(|()| info!("[GUI] shutting down")),
                }
            })?;
        }
    }

    Ok(())
}
