//! Pane identity, move direction, and rendered sides.
//!
//! Logic only ever talks about [`Pane::Source`] and [`Pane::Target`]. Which
//! side of the screen a pane ends up on is decided by [`Layout`], so
//! right-to-left renderings can flip the panes without touching any
//! selection or move logic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One of the two item collections managed by a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    /// Items not in the target key list.
    Source,
    /// Items whose key is in the target key list.
    Target,
}

impl Pane {
    /// The other pane.
    pub fn other(self) -> Self {
        match self {
            Pane::Source => Pane::Target,
            Pane::Target => Pane::Source,
        }
    }

    /// The side this pane is rendered on.
    pub fn side(self, layout: Layout) -> Side {
        match (self, layout) {
            (Pane::Source, Layout::Ltr) | (Pane::Target, Layout::Rtl) => Side::Left,
            (Pane::Target, Layout::Ltr) | (Pane::Source, Layout::Rtl) => Side::Right,
        }
    }
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pane::Source => write!(f, "source"),
            Pane::Target => write!(f, "target"),
        }
    }
}

impl FromStr for Pane {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "source" => Ok(Pane::Source),
            "target" => Ok(Pane::Target),
            _ => Err(ParseError::Pane(s.to_string())),
        }
    }
}

/// Direction of a move, named after the logical layout.
///
/// `Right` moves items into the target pane, `Left` moves them back to the
/// source pane. These names are part of the `on_change` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// The pane items are taken from.
    pub fn origin(self) -> Pane {
        match self {
            Direction::Right => Pane::Source,
            Direction::Left => Pane::Target,
        }
    }

    /// The pane items end up in.
    pub fn destination(self) -> Pane {
        self.origin().other()
    }

    /// The direction that moves items into `pane`.
    pub fn toward(pane: Pane) -> Self {
        match pane {
            Pane::Target => Direction::Right,
            Pane::Source => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseError::Direction(s.to_string())),
        }
    }
}

/// A physical side of the rendered control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The pane rendered on this side.
    pub fn pane(self, layout: Layout) -> Pane {
        match (self, layout) {
            (Side::Left, Layout::Ltr) | (Side::Right, Layout::Rtl) => Pane::Source,
            (Side::Right, Layout::Ltr) | (Side::Left, Layout::Rtl) => Pane::Target,
        }
    }
}

/// Reading direction of the hosting UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Ltr,
    Rtl,
}

impl FromStr for Layout {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ltr" => Ok(Layout::Ltr),
            "rtl" => Ok(Layout::Rtl),
            _ => Err(ParseError::Layout(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_panes() {
        assert_eq!(Direction::Right.origin(), Pane::Source);
        assert_eq!(Direction::Right.destination(), Pane::Target);
        assert_eq!(Direction::Left.origin(), Pane::Target);
        assert_eq!(Direction::toward(Pane::Source), Direction::Left);
    }

    #[test]
    fn test_rtl_flips_sides() {
        assert_eq!(Pane::Source.side(Layout::Ltr), Side::Left);
        assert_eq!(Pane::Source.side(Layout::Rtl), Side::Right);
        for layout in [Layout::Ltr, Layout::Rtl] {
            for pane in [Pane::Source, Pane::Target] {
                assert_eq!(pane.side(layout).pane(layout), pane);
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Right".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("target".parse::<Pane>(), Ok(Pane::Target));
        assert_eq!(
            "up".parse::<Direction>(),
            Err(ParseError::Direction("up".to_string()))
        );
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Right).unwrap(), r#""right""#);
        let layout: Layout = serde_json::from_str(r#""rtl""#).unwrap();
        assert_eq!(layout, Layout::Rtl);
    }
}
