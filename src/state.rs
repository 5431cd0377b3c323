//! State pattern: a parcel whose lifecycle phases decide their own
//! transitions.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Ordered,
    Delivered,
    Received,
}

/// Outcome of asking a phase to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Phase, to: Phase },
    Stayed { advisory: &'static str },
}

impl Transition {
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            Transition::Stayed { advisory } => Some(*advisory),
            Transition::Moved { .. } => None,
        }
    }
}

impl Phase {
    pub const NAMES: &'static [&'static str] = &["ordered", "delivered", "received"];

    pub fn next(self, parcel: &mut Parcel) -> Transition {
        match self {
            Phase::Ordered => parcel.set_phase(Phase::Delivered),
            Phase::Delivered => parcel.set_phase(Phase::Received),
            Phase::Received => Transition::Stayed {
                advisory: "This package is already received by a client.",
            },
        }
    }

    pub fn prev(self, parcel: &mut Parcel) -> Transition {
        match self {
            Phase::Ordered => Transition::Stayed {
                advisory: "The package is in its root state.",
            },
            Phase::Delivered => parcel.set_phase(Phase::Ordered),
            Phase::Received => parcel.set_phase(Phase::Delivered),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Phase::Ordered => "Package ordered, not yet at office.",
            Phase::Delivered => "Package at office, not yet received.",
            Phase::Received => "Package received by client.",
        }
    }
}

impl FromStr for Phase {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(Phase::Ordered),
            "delivered" => Ok(Phase::Delivered),
            "received" => Ok(Phase::Received),
            _ => Err(CatalogError::unknown_variant("phase", s, Self::NAMES)),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Ordered => "ordered",
            Phase::Delivered => "delivered",
            Phase::Received => "received",
        };
        f.write_str(name)
    }
}

/// Context object. It only delegates; the current phase picks the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parcel {
    phase: Phase,
}

impl Parcel {
    pub fn new() -> Self {
        Self::starting_at(Phase::Ordered)
    }

    pub fn starting_at(phase: Phase) -> Self {
        Self { phase }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn set_phase(&mut self, to: Phase) -> Transition {
        let from = self.phase;
        self.phase = to;
        debug!(%from, %to, "parcel phase changed");
        Transition::Moved { from, to }
    }

    pub fn advance(&mut self) -> Transition {
        self.phase.next(self)
    }

    pub fn retreat(&mut self) -> Transition {
        self.phase.prev(self)
    }

    pub fn describe(&self) -> &'static str {
        self.phase.describe()
    }
}

impl Default for Parcel {
    fn default() -> Self {
        Self::new()
    }
}
