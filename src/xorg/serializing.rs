use std::fmt;

use crate::topology::{HorizontalTiming, Mode, Output, Topology, VerticalTiming};

const SCREEN_IDENTIFIER: &str = "Screen0";
const DEVICE_IDENTIFIER: &str = "Device0";
const DEFAULT_DEPTH: u32 = 24;
// The video driver is not discovered from X.
const DRIVER: &str = "modesetting";

/// Monitor, Screen and Device sections persisting one output's current mode.
///
/// Every triple reuses the same Screen and Device identifiers, so when several
/// outputs are written only the last one's Screen and Device take effect.
struct Sections<'a> {
    output: &'a Output,
    mode: &'a Mode,
    rate: f64,
    horizontal: &'a HorizontalTiming,
    vertical: &'a VerticalTiming,
}

impl<'a> Sections<'a> {
    fn new(output: &'a Output, mode: &'a Mode) -> Option<Self> {
        Some(Self {
            output,
            mode,
            rate: mode.rate?,
            horizontal: mode.dimensions.horizontal.as_ref()?,
            vertical: mode.dimensions.vertical.as_ref()?,
        })
    }
}

impl fmt::Display for Sections<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            output,
            mode,
            rate,
            horizontal: h,
            vertical: v,
        } = self;

        writeln!(f, "Section \"Monitor\"")?;
        writeln!(f, "    Identifier \"{}\"", output.name)?;
        writeln!(
            f,
            "    Modeline \"{}\"  {}  {} {} {} {} {} {} {} {} {}",
            mode.name,
            rate,
            h.width,
            h.start,
            h.end,
            h.total,
            v.width,
            v.start,
            v.end,
            v.total,
            mode.optionals.to_lowercase()
        )?;
        if let Some(orientation) = output.orientation {
            writeln!(f, "    Option \"Rotate\" \"{orientation}\"")?;
        }
        writeln!(f, "EndSection")?;
        writeln!(f)?;

        writeln!(f, "Section \"Screen\"")?;
        writeln!(f, "    Identifier \"{SCREEN_IDENTIFIER}\"")?;
        writeln!(f, "    Monitor \"{}\"", output.name)?;
        writeln!(f, "    DefaultDepth {DEFAULT_DEPTH}")?;
        writeln!(f, "    SubSection \"Display\"")?;
        writeln!(f, "        Modes \"{}\"", mode.name)?;
        writeln!(f, "    EndSubSection")?;
        writeln!(f, "EndSection")?;
        writeln!(f)?;

        writeln!(f, "Section \"Device\"")?;
        writeln!(f, "    Identifier \"{DEVICE_IDENTIFIER}\"")?;
        writeln!(f, "    Driver \"{DRIVER}\"")?;
        writeln!(f, "EndSection")
    }
}

/// Renders the current mode of every connected output as xorg.conf sections.
///
/// An empty string means there is nothing to persist.
pub(crate) fn serialize(topology: &Topology) -> String {
    let sections = topology
        .outputs
        .iter()
        .filter(|output| output.connected)
        .flat_map(|output| {
            output
                .modes
                .iter()
                .filter(|mode| mode.current)
                .map(move |mode| (output, mode))
        })
        .filter_map(|(output, mode)| {
            let sections = Sections::new(output, mode);
            if sections.is_none() {
                log::warn!(
                    "not persisting mode {} of {}: rate or timing is missing",
                    mode.name,
                    output.name
                );
            }
            sections
        })
        .map(|sections| sections.to_string())
        .collect::<Vec<_>>();

    sections.join("\n")
}
