use crate::*;
use derive_more::Display;
use std::str::FromStr;

/// A cursor location between characters, 0-based on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display)]
#[display("{line}:{character}")]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parses `LINE:CHARACTER`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidPosition(s.to_string());
        let (line, character) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            line: line.trim().parse().map_err(|_| invalid())?,
            character: character.trim().parse().map_err(|_| invalid())?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{start}-{end}")]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_and_character() {
        assert_eq!("4:65".parse::<Position>().ok(), Some(Position::new(4, 65)));
        assert_eq!(" 0 : 7 ".parse::<Position>().ok(), Some(Position::new(0, 7)));
    }

    #[test]
    fn rejects_malformed_positions() {
        for s in ["", "12", "a:1", "1:-3", "1:2:3"] {
            assert!(matches!(s.parse::<Position>(), Err(Error::InvalidPosition(_))), "{s}");
        }
    }

    #[test]
    fn orders_by_line_then_character() {
        assert!(Position::new(0, 90) < Position::new(1, 0));
        assert!(Range::new(Position::new(0, 2), Position::new(0, 5)).contains(Position::new(0, 5)));
    }
}
