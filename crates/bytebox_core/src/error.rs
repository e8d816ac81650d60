use thiserror::Error;

use crate::cycle::CycleState;
use crate::memory::map::RegionKind;

/// A memory map that cannot be served safely.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("region {kind:?} is empty")]
    Empty { kind: RegionKind },
    #[error("region {kind:?} at 0x{start:04X} ({len} bytes) runs past the end of memory")]
    OutOfRange {
        kind: RegionKind,
        start: u16,
        len: usize,
    },
    #[error("regions {first:?} and {second:?} overlap at 0x{at:04X}")]
    Overlap {
        first: RegionKind,
        second: RegionKind,
        at: u16,
    },
}

/// Raised by a guest when it cannot continue (the equivalent of a module trap).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct Trap(pub String);

impl Trap {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("a guest module is already loaded")]
    AlreadyLoaded,
    #[error("guest import `{0}` cannot be resolved against the host")]
    UnresolvedImport(String),
    #[error("guest does not export `{0}`")]
    MissingExport(&'static str),
    #[error("invalid memory map: {0}")]
    Map(#[from] MapError),
}

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("cannot {action} while the cycle is {state:?}")]
    InvalidState {
        action: &'static str,
        state: CycleState,
    },
    #[error("guest trapped in `{export}`: {trap}")]
    Trap { export: &'static str, trap: Trap },
}
