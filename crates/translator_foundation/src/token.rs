//! Tokens produced by the lexer.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, TokenClassId};

/// Location of a character or token in a script.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// Zero-based line number.
    pub row_index: usize,
    /// Zero-based column, with tabs expanded to the configured width.
    pub in_row_position: usize,
    /// Zero-based character offset from the start of the script.
    pub in_string_position: usize,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(row_index: usize, in_row_position: usize, in_string_position: usize) -> Self {
        Self {
            row_index,
            in_row_position,
            in_string_position,
        }
    }

    /// Returns this position moved back by `len` characters on the same row.
    #[must_use]
    pub const fn back(self, len: usize) -> Self {
        Self {
            row_index: self.row_index,
            in_row_position: self.in_row_position.saturating_sub(len),
            in_string_position: self.in_string_position.saturating_sub(len),
        }
    }
}

impl fmt::Display for Position {
    /// One-based `row;column` form used in diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.row_index + 1, self.in_row_position + 1)
    }
}

/// A token recognized in a script.
///
/// `id` is the grammar node the token matched (a listed terminal or a defined
/// token). `None` marks input the lexer could not recognize.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParsedToken {
    /// The matched text.
    pub name: String,
    /// The grammar node this token matched.
    pub id: Option<NodeId>,
    /// The token class the node belongs to.
    pub token_class_id: TokenClassId,
    /// Where the token starts.
    pub position: Position,
}

impl ParsedToken {
    /// Creates a recognized token.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        id: NodeId,
        token_class_id: TokenClassId,
        position: Position,
    ) -> Self {
        Self {
            name: name.into(),
            id: Some(id),
            token_class_id,
            position,
        }
    }

    /// Creates a token for unrecognized input.
    #[must_use]
    pub fn undefined(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            id: None,
            token_class_id: TokenClassId::UNDEFINED,
            position,
        }
    }

    /// Returns true if the lexer could not recognize this token.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        self.id.is_none()
    }

    /// Zero-based line number.
    #[must_use]
    pub fn row_index(&self) -> usize {
        self.position.row_index
    }

    /// Zero-based column.
    #[must_use]
    pub fn in_row_position(&self) -> usize {
        self.position.in_row_position
    }

    /// Zero-based character offset.
    #[must_use]
    pub fn in_string_position(&self) -> usize {
        self.position.in_string_position
    }

    /// Character offset just past the end of the token.
    #[must_use]
    pub fn end_position(&self) -> usize {
        self.position.in_string_position + self.name.chars().count()
    }
}

impl fmt::Display for ParsedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at ({})", self.name, self.position)
    }
}
