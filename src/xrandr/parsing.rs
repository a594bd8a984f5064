use crate::topology::{
    HorizontalTiming, Mode, Orientation, Output, Timing, Topology, VerticalTiming,
};
use regex::{Captures, Regex};

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Header {
        name: &'a str,
        connection: Connection,
    },
    Mode(Box<Mode>),
    HorizontalTiming(HorizontalTiming),
    VerticalTiming(VerticalTiming),
    Unrecognized,
}

#[derive(Debug, PartialEq)]
enum Connection {
    Connected {
        geometry: Option<Geometry>,
        orientation: Option<Orientation>,
    },
    Disconnected,
}

#[derive(Debug, PartialEq)]
struct Geometry {
    width: Option<u32>,
    height: Option<u32>,
    left: Option<u32>,
    top: Option<u32>,
}

struct Parser {
    connected_line_regex: Regex,
    disconnected_line_regex: Regex,
    mode_line_regex: Regex,
    marker_regex: Regex,
    horizontal_line_regex: Regex,
    vertical_line_regex: Regex,
}

impl Parser {
    fn new() -> Self {
        Self {
            connected_line_regex: Regex::new(
                r"(?x)
                ^(?P<name>\S+)
                \sconnected
                (?:\sprimary)?
                (?:\s(?P<width>\d+)x(?P<height>\d+)\+(?P<left>\d+)\+(?P<top>\d+))?
                (?:\s\(\w+\))?
                (?:\s(?P<rotation>\w+))?
                (?:\s|$)
            ",
            )
            .expect("bad connected_line_regex"),
            disconnected_line_regex: Regex::new(
                r"^(?P<name>\S+)\s(?:disconnected|unknown connection)",
            )
            .expect("bad disconnected_line_regex"),
            mode_line_regex: Regex::new(
                r"(?x)
                ^\s+(?P<width>\d+)x(?P<height>\d+i?)
                .*\s\(\w+\)
                \s+(?P<rate>\d+\.\d+)MHz
                \s*(?P<flags>(?:[+-]?\w+(?:\s+|$))*)
            ",
            )
            .expect("bad mode_line_regex"),
            marker_regex: Regex::new(r"(?:^|\s)[+*-]?(?:current|preferred)\b")
                .expect("bad marker_regex"),
            horizontal_line_regex: Regex::new(
                r"(?x)
                ^\s+h:
                \s+width\s+(?P<width>\d+)
                \s+start\s+(?P<start>\d+)
                \s+end\s+(?P<end>\d+)
                \s+total\s+(?P<total>\d+)
                \s*skew\s*(?P<skew>\w+)
                \s*clock\s*(?P<clock>\d+(?:\.\d+)?)
            ",
            )
            .expect("bad horizontal_line_regex"),
            vertical_line_regex: Regex::new(
                r"(?x)
                ^\s+v:
                \s+height\s+(?P<height>\d+)
                \s+start\s+(?P<start>\d+)
                \s+end\s+(?P<end>\d+)
                \s+total\s+(?P<total>\d+)
                \s*clock\s*(?P<clock>\d+(?:\.\d+)?)
            ",
            )
            .expect("bad vertical_line_regex"),
        }
    }

    /// Classifies one line of `xrandr --verbose` output.
    ///
    /// Patterns are tried in a fixed order and the first match wins: the
    /// connected header must be tried before the disconnected one.
    fn classify_line<'a>(&self, line: &'a str) -> Line<'a> {
        if let Some(caps) = self.connected_line_regex.captures(line) {
            Line::Header {
                name: caps.name("name").map_or("", |name| name.as_str()),
                connection: Self::connected(&caps),
            }
        } else if let Some(caps) = self.disconnected_line_regex.captures(line) {
            Line::Header {
                name: caps.name("name").map_or("", |name| name.as_str()),
                connection: Connection::Disconnected,
            }
        } else if let Some(caps) = self.mode_line_regex.captures(line) {
            Line::Mode(Box::new(Mode {
                name: format!("{}x{}", &caps["width"], &caps["height"]),
                width: caps["width"].to_string(),
                height: caps["height"].to_string(),
                rate: caps["rate"].parse().ok(),
                optionals: self.sync_flags(&caps["flags"]).to_string(),
                // Markers are searched in the whole line, not in a dedicated field.
                current: line.contains("current"),
                preferred: line.contains("preferred"),
                dimensions: Timing::default(),
            }))
        } else if let Some(caps) = self.horizontal_line_regex.captures(line) {
            Line::HorizontalTiming(HorizontalTiming {
                width: caps["width"].to_string(),
                start: caps["start"].to_string(),
                end: caps["end"].to_string(),
                total: caps["total"].to_string(),
                skew: caps["skew"].to_string(),
                clock: caps["clock"].parse().ok(),
            })
        } else if let Some(caps) = self.vertical_line_regex.captures(line) {
            Line::VerticalTiming(VerticalTiming {
                width: caps["height"].to_string(),
                start: caps["start"].to_string(),
                end: caps["end"].to_string(),
                total: caps["total"].to_string(),
                clock: caps["clock"].parse().ok(),
            })
        } else {
            Line::Unrecognized
        }
    }

    /// Cuts the flag run before a trailing `current`/`preferred` marker.
    fn sync_flags<'a>(&self, flags: &'a str) -> &'a str {
        match self.marker_regex.find(flags) {
            Some(marker) => &flags[..marker.start()],
            None => flags,
        }
    }

    fn connected(caps: &Captures<'_>) -> Connection {
        let number = |group: &str| caps.name(group).and_then(|m| m.as_str().parse().ok());

        let geometry = caps.name("width").map(|_| Geometry {
            width: number("width"),
            height: number("height"),
            left: number("left"),
            top: number("top"),
        });

        let orientation = match caps.name("rotation") {
            Some(rotation) => rotation.as_str().parse().ok(),
            // xrandr leaves the rotation out of the header when it is normal
            None if geometry.is_some() => Some(Orientation::Normal),
            None => None,
        };

        Connection::Connected {
            geometry,
            orientation,
        }
    }

    fn parse(&self, xrandr_output: &str) -> Topology {
        xrandr_output
            .lines()
            .map(|line| self.classify_line(line))
            .fold(TopologyBuilder::default(), TopologyBuilder::apply)
            .topology
    }
}

#[derive(Default)]
struct TopologyBuilder {
    topology: Topology,
    current_output: Option<usize>,
    current_mode_index: usize,
}

impl TopologyBuilder {
    fn apply(mut self, line: Line<'_>) -> Self {
        match line {
            Line::Header { name, connection } => self.start_output(name, connection),
            Line::Mode(mode) => self.push_mode(*mode),
            Line::HorizontalTiming(horizontal) => match self.last_mode_mut() {
                Some(mode) => mode.dimensions.horizontal = Some(horizontal),
                None => log::trace!("ignoring horizontal timing without a mode: {horizontal:?}"),
            },
            Line::VerticalTiming(vertical) => match self.last_mode_mut() {
                Some(mode) => mode.dimensions.vertical = Some(vertical),
                None => log::trace!("ignoring vertical timing without a mode: {vertical:?}"),
            },
            Line::Unrecognized => {}
        }
        self
    }

    fn start_output(&mut self, name: &str, connection: Connection) {
        let position = match self.topology.position(name) {
            Some(position) => position,
            None => {
                let index = self.topology.outputs.len();
                self.topology.outputs.push(Output::new(name, index));
                index
            }
        };

        let output = &mut self.topology.outputs[position];
        *output = Output::new(name, output.index);

        if let Connection::Connected {
            geometry,
            orientation,
        } = connection
        {
            output.connected = true;
            output.orientation = orientation;
            let geometry = geometry.unwrap_or(Geometry {
                width: Some(0),
                height: Some(0),
                left: Some(0),
                top: Some(0),
            });
            output.width = geometry.width;
            output.height = geometry.height;
            output.left = geometry.left;
            output.top = geometry.top;
        }

        self.current_output = Some(position);
        self.current_mode_index = 0;
    }

    fn push_mode(&mut self, mode: Mode) {
        let Some(output) = self
            .current_output
            .and_then(|position| self.topology.outputs.get_mut(position))
        else {
            log::trace!("ignoring mode {} outside of an output", mode.name);
            return;
        };

        output.modes.push(mode);
        self.current_mode_index += 1;
    }

    fn last_mode_mut(&mut self) -> Option<&mut Mode> {
        let output = self.topology.outputs.get_mut(self.current_output?)?;
        let index = self.current_mode_index.checked_sub(1)?;
        output.modes.get_mut(index)
    }
}

pub(crate) fn parse(xrandr_output: &str) -> Topology {
    Parser::new().parse(xrandr_output)
}
