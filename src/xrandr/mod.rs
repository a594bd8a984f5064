use crate::error::Error;
use crate::settings::{Rate, Resolution, Settings};
use crate::topology::{Orientation, Topology};
use crate::utils::run;
use std::process;

mod parsing;

pub(crate) use parsing::parse;

struct Xrandr {
    command: process::Command,
}

impl Xrandr {
    fn new(display: Option<&str>) -> Self {
        let mut command = process::Command::new("xrandr");
        if let Some(display) = display {
            command.env("DISPLAY", display);
        }
        Self { command }
    }

    fn verbose(mut self) -> Self {
        self.command.arg("--verbose");
        self
    }

    fn output(mut self, output_name: &str) -> Self {
        self.command.arg("--output").arg(output_name);
        self
    }

    fn off(mut self) -> Self {
        self.command.arg("--off");
        self
    }

    fn auto(mut self) -> Self {
        self.command.arg("--auto");
        self
    }

    fn rotate(mut self, orientation: Option<Orientation>) -> Self {
        if let Some(orientation) = orientation {
            self.command.arg("--rotate").arg(orientation.as_str());
        }
        self
    }

    fn mode(mut self, resolution: Option<&Resolution>) -> Self {
        if let Some(resolution) = resolution {
            self.command.arg("--mode").arg(resolution.to_string());
        }
        self
    }

    fn rate(mut self, rate: Option<&Rate>) -> Self {
        if let Some(rate) = rate {
            self.command.arg("--rate").arg(rate.to_string());
        }
        self
    }

    fn command(self) -> process::Command {
        self.command
    }
}

pub(crate) fn get_topology(display: Option<&str>) -> Result<Topology, Error> {
    let xrandr_output = run(Xrandr::new(display).verbose().command())?;
    Ok(parse(&xrandr_output))
}

fn build_apply_command(display: Option<&str>, settings: &Settings) -> process::Command {
    let xrandr = Xrandr::new(display).output(&settings.output);

    if !settings.enabled {
        xrandr.off().command()
    } else if settings.resolution.is_none() {
        xrandr.auto().command()
    } else {
        xrandr
            .rotate(settings.orientation)
            .mode(settings.resolution.as_ref())
            .rate(settings.rate.as_ref())
            .command()
    }
}

pub(crate) fn apply_settings(display: Option<&str>, settings: &Settings) -> Result<(), Error> {
    run(build_apply_command(display, settings))?;
    Ok(())
}
