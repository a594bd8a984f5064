use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;
use crate::topology::{Orientation, Topology};

/// A change request for a single output, validated before xrandr runs.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Settings {
    pub(crate) output: String,
    pub(crate) enabled: bool,
    pub(crate) resolution: Option<Resolution>,
    pub(crate) orientation: Option<Orientation>,
    pub(crate) rate: Option<Rate>,
}

impl Settings {
    pub(crate) fn check_output(&self, topology: &Topology) -> Result<(), Error> {
        match topology.get(&self.output) {
            Some(_) => Ok(()),
            None => Err(Error::UnknownOutput(self.output.clone())),
        }
    }
}

lazy_static! {
    static ref RESOLUTION_REGEX: Regex =
        Regex::new(r"^\d+x\d+\w*$").expect("bad resolution_regex");
}

/// Mode name such as `1920x1080` or `1920x1080i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution(String);

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if RESOLUTION_REGEX.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(Error::InvalidResolution(value.to_string()))
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Refresh rate in Hz, kept as typed so xrandr receives the caller's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rate(String);

impl FromStr for Rate {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().parse::<f64>() {
            Ok(rate) if rate.is_finite() && rate > 0.0 => Ok(Self(value.trim().to_string())),
            _ => Err(Error::InvalidRate(value.to_string())),
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
