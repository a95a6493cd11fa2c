//! System-wide constants for the OpenPeg bridge.

/// Prefix applied to foreign symbols when they are represented as pegged
/// denominations on the destination ledger (e.g. `ETH` → `peg/ETH`).
///
/// The `/` separator cannot appear in a native denomination, so pegged
/// denoms can never alias native ones. This prefix is a stable wire
/// contract: changing it changes every pegged denomination.
pub const PEGGED_DENOM_PREFIX: &str = "peg/";

/// Name of the module account that holds bridge escrow.
pub const MODULE_NAME: &str = "bridge";

/// Default consensus threshold: percent of active validators that must
/// submit the identical claim before it finalizes.
pub const DEFAULT_CONSENSUS_THRESHOLD: u32 = 67;

/// Maximum length of an account or validator address.
pub const MAX_ADDRESS_LEN: usize = 90;

/// Maximum length of an asset symbol.
pub const MAX_SYMBOL_LEN: usize = 16;

/// Maximum length of a source-chain identifier.
pub const MAX_SOURCE_CHAIN_LEN: usize = 32;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bridge name.
pub const BRIDGE_NAME: &str = "OpenPeg";
