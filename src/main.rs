#![forbid(unsafe_code)]
mod error;
mod settings;
mod topology;
mod utils;
mod xorg;
mod xrandr;

use std::fmt::Write;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use error::Error;
use settings::{Rate, Resolution, Settings};
use topology::{Orientation, Topology};

#[derive(Parser)]
#[command(author, version, about, arg_required_else_help(true))]
struct Args {
    /// X display to talk to, exported as DISPLAY for xrandr.
    #[arg(long, global = true, env = "DISPLAY_CONF_DISPLAY")]
    display: Option<String>,
    /// Read saved `xrandr --verbose` output from this file instead of running
    /// xrandr. Use "-" for stdin. Ignored by `apply`.
    #[arg(long, global = true, env = "DISPLAY_CONF_INPUT")]
    input: Option<PathBuf>,
    /// X.Org config file that current modes are persisted to.
    #[arg(
        long,
        global = true,
        env = "DISPLAY_CONF_CONFIG_PATH",
        default_value = xorg::DEFAULT_CONFIG_PATH
    )]
    config_path: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the display topology.
    Query,
    /// List resolutions and refresh rates of connected outputs.
    Modes,
    /// Print the X.Org config for the current modes.
    Config {
        /// Write the config to --config-path instead of printing it.
        #[arg(long)]
        write: bool,
    },
    /// Change the settings of one output, then persist the current modes.
    Apply {
        /// Output name as reported by xrandr, e.g. HDMI-1.
        #[arg(long)]
        output: String,
        /// Turn the output off.
        #[arg(long)]
        off: bool,
        /// Mode such as 1920x1080. Without it the output is set to its preferred mode.
        #[arg(long)]
        mode: Option<Resolution>,
        /// Refresh rate in Hz.
        #[arg(long, requires = "mode")]
        rate: Option<Rate>,
        /// One of normal, left, right, inverted.
        #[arg(long, requires = "mode")]
        rotate: Option<Orientation>,
        /// Do not write the X.Org config afterwards.
        #[arg(long)]
        no_persist: bool,
    },
}

fn read_input(path: &Path) -> Result<String, Error> {
    let read_error = |source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(read_error)?;
        Ok(text)
    } else {
        fs::read_to_string(path).map_err(read_error)
    }
}

fn load_topology(args: &Args) -> Result<Topology, Error> {
    let topology = match &args.input {
        Some(path) => xrandr::parse(&read_input(path)?),
        None => xrandr::get_topology(args.display.as_deref())?,
    };
    log::trace!("topology = {topology:?}");
    Ok(topology)
}

#[cfg(feature = "json")]
fn format_topology(topology: &Topology) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(topology)?)
}

#[cfg(not(feature = "json"))]
fn format_topology(topology: &Topology) -> Result<String, Error> {
    Ok(format!("{topology:#?}"))
}

/// One block per connected output, the current refresh rate marked with `*`.
fn format_modes(topology: &Topology) -> String {
    let mut text = String::new();

    for output in topology.outputs.iter().filter(|output| output.connected) {
        let current = output.current_mode();
        writeln!(text, "{}", output.name).expect("unable to append to text");

        for resolution in output.resolutions() {
            let current_rate = current
                .filter(|mode| mode.name == resolution)
                .and_then(|mode| mode.dimensions.vertical.as_ref())
                .and_then(|vertical| vertical.clock);
            let rates: Vec<String> = output
                .refresh_rates(resolution)
                .into_iter()
                .map(|rate| match current_rate {
                    Some(current_rate) if current_rate == rate => format!("{rate}*"),
                    _ => rate.to_string(),
                })
                .collect();
            writeln!(text, "   {resolution:<12}{}", rates.join("  "))
                .expect("unable to append to text");
        }
    }

    text
}

fn persist(topology: &Topology, config_path: &Path) -> Result<(), Error> {
    if xorg::persist(config_path, &xorg::serialize(topology))? {
        log::info!("persisted current modes to {config_path:?}");
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Error> {
    match &args.command {
        Command::Query => {
            println!("{}", format_topology(&load_topology(&args)?)?);
        }
        Command::Modes => {
            print!("{}", format_modes(&load_topology(&args)?));
        }
        Command::Config { write } => {
            let topology = load_topology(&args)?;
            if *write {
                persist(&topology, &args.config_path)?;
            } else {
                print!("{}", xorg::serialize(&topology));
            }
        }
        Command::Apply {
            output,
            off,
            mode,
            rate,
            rotate,
            no_persist,
        } => {
            let display = args.display.as_deref();
            let settings = Settings {
                output: output.clone(),
                enabled: !off,
                resolution: mode.clone(),
                orientation: *rotate,
                rate: rate.clone(),
            };
            log::debug!("settings = {settings:?}");

            settings.check_output(&xrandr::get_topology(display)?)?;
            xrandr::apply_settings(display, &settings)?;

            if !no_persist {
                persist(&xrandr::get_topology(display)?, &args.config_path)?;
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        log::error!("{err}");
        eprintln!("display-conf: {err}");
        process::exit(1);
    }
}
