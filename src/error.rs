//! Errors reported by binary trees and the maps built on them.

use std::error;
use std::fmt;
use std::result;

/// The reason a `Position` was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidPosition {
    /// The position was issued by a different tree.
    ForeignTree,
    /// The node behind the position has been deleted.
    Deleted,
}

/// A structural precondition of a low-level tree mutator that did not hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StructuralViolation {
    RootExists,
    LeftChildExists,
    RightChildExists,
    TwoChildren,
    NotLeaf,
    /// The root has no parent to rotate above.
    RotateRoot,
    /// A trinode restructure needs a parent and a grandparent.
    MissingGrandparent,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    InvalidPosition(InvalidPosition),
    KeyNotFound,
    StructuralViolation(StructuralViolation),
}

impl From<InvalidPosition> for Error {
    fn from(err: InvalidPosition) -> Error {
        Error::InvalidPosition(err)
    }
}

impl From<StructuralViolation> for Error {
    fn from(err: StructuralViolation) -> Error {
        Error::StructuralViolation(err)
    }
}

impl fmt::Display for InvalidPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidPosition::ForeignTree => write!(f, "position does not belong to this tree"),
            InvalidPosition::Deleted => write!(f, "position is no longer valid"),
        }
    }
}

impl fmt::Display for StructuralViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StructuralViolation::RootExists => write!(f, "root exists"),
            StructuralViolation::LeftChildExists => write!(f, "left child exists"),
            StructuralViolation::RightChildExists => write!(f, "right child exists"),
            StructuralViolation::TwoChildren => write!(f, "position has two children"),
            StructuralViolation::NotLeaf => write!(f, "position must be a leaf"),
            StructuralViolation::RotateRoot => write!(f, "cannot rotate the root"),
            StructuralViolation::MissingGrandparent => write!(f, "position has no grandparent"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidPosition(reason) => write!(f, "invalid position: {}", reason),
            Error::KeyNotFound => write!(f, "key not found"),
            Error::StructuralViolation(violation) => {
                write!(f, "structural violation: {}", violation)
            },
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
