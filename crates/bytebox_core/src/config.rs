use bytebox_common::Color;
use typed_builder::TypedBuilder;

use crate::memory::map::{Region, DEFAULT_REGIONS};
use crate::memory::video::DEFAULT_PALETTE;

/// Host-side console settings. None of these are visible to the guest as
/// configuration; they only decide the initial contents of memory and the
/// region table the guest runs against.
#[derive(TypedBuilder, Clone, Debug)]
pub struct ConsoleConfig {
    /// Fixed value for the SEED register. Random when unset.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u8>,
    #[builder(default = DEFAULT_PALETTE)]
    pub palette: [Color; 4],
    #[builder(default = DEFAULT_REGIONS.to_vec())]
    pub regions: Vec<Region>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
