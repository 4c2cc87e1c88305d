//! Commands emitted to external devices.

use std::collections::BTreeMap;

use fg_core::{DeviceId, FunctionId, Variant};

/// A device/function invocation queued by a fired rule.
///
/// Commands are plain records; the host drains them after each tick and
/// routes them to its providers. There is no callback path.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub device: DeviceId,
    pub function: FunctionId,
    pub args: BTreeMap<String, Variant>,
}
