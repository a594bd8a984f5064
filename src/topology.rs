use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[cfg(feature = "json")]
use serde::Serialize;

/// Snapshot of every output reported by one xrandr query, in discovery order.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Topology {
    pub(crate) outputs: Vec<Output>,
}

impl Topology {
    pub(crate) fn get(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|output| output.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|output| output.name == name)
    }
}

#[cfg(feature = "json")]
impl Serialize for Topology {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.outputs.len()))?;
        for output in &self.outputs {
            map.serialize_entry(&output.name, output)?;
        }
        map.end()
    }
}

#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub(crate) struct Output {
    #[cfg_attr(feature = "json", serde(skip))]
    pub(crate) name: String,
    pub(crate) index: usize,
    pub(crate) connected: bool,
    pub(crate) orientation: Option<Orientation>,
    pub(crate) modes: Vec<Mode>,
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) left: Option<u32>,
    pub(crate) top: Option<u32>,
}

impl Output {
    pub(crate) fn new(name: &str, index: usize) -> Self {
        Self {
            name: name.to_string(),
            index,
            connected: false,
            orientation: None,
            modes: Vec::new(),
            width: None,
            height: None,
            left: None,
            top: None,
        }
    }

    pub(crate) fn current_mode(&self) -> Option<&Mode> {
        self.modes.iter().find(|mode| mode.current)
    }

    /// Distinct mode names, in the order xrandr lists them.
    pub(crate) fn resolutions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for mode in &self.modes {
            if !names.contains(&mode.name.as_str()) {
                names.push(&mode.name);
            }
        }
        names
    }

    /// Distinct vertical refresh rates (Hz) offered for one mode name.
    pub(crate) fn refresh_rates(&self, name: &str) -> Vec<f64> {
        let mut rates: Vec<f64> = Vec::new();
        let clocks = self
            .modes
            .iter()
            .filter(|mode| mode.name == name)
            .filter_map(|mode| mode.dimensions.vertical.as_ref())
            .filter_map(|vertical| vertical.clock);
        for clock in clocks {
            if !rates.contains(&clock) {
                rates.push(clock);
            }
        }
        rates
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "lowercase"))]
pub(crate) enum Orientation {
    Normal,
    Left,
    Right,
    Inverted,
}

impl Orientation {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Orientation::Normal => "normal",
            Orientation::Left => "left",
            Orientation::Right => "right",
            Orientation::Inverted => "inverted",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "normal" => Ok(Orientation::Normal),
            "left" => Ok(Orientation::Left),
            "right" => Ok(Orientation::Right),
            "inverted" => Ok(Orientation::Inverted),
            _ => Err(Error::InvalidOrientation(value.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub(crate) struct Mode {
    pub(crate) name: String,
    pub(crate) width: String,
    pub(crate) height: String,
    /// Pixel clock in MHz.
    pub(crate) rate: Option<f64>,
    pub(crate) optionals: String,
    pub(crate) current: bool,
    pub(crate) preferred: bool,
    pub(crate) dimensions: Timing,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub(crate) struct Timing {
    pub(crate) horizontal: Option<HorizontalTiming>,
    pub(crate) vertical: Option<VerticalTiming>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub(crate) struct HorizontalTiming {
    pub(crate) width: String,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) total: String,
    pub(crate) skew: String,
    /// Line rate in kHz.
    pub(crate) clock: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub(crate) struct VerticalTiming {
    pub(crate) width: String,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) total: String,
    /// Refresh rate in Hz.
    pub(crate) clock: Option<f64>,
}
