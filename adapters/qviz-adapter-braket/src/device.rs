//! Known Braket managed simulators.

use qviz_hal::Capabilities;

/// SV1 state vector simulator.
pub const SV1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/sv1";

/// DM1 density matrix simulator.
pub const DM1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/dm1";

/// TN1 tensor network simulator.
pub const TN1: &str = "arn:aws:braket:::device/quantum-simulator/amazon/tn1";

/// Braket's per-task shot limit for managed simulators.
pub const MAX_SHOTS: u32 = 100_000;

/// Capabilities of a known simulator ARN.
pub fn capabilities_for_device(device_arn: &str) -> Option<Capabilities> {
    let (name, qubits) = match device_arn {
        SV1 => ("Amazon SV1", 34),
        DM1 => ("Amazon DM1", 17),
        TN1 => ("Amazon TN1", 50),
        _ => return None,
    };
    Some(Capabilities::simulator(name, qubits, MAX_SHOTS))
}

/// Resolve a short device name (`"sv1"`, `"dm1"`, `"tn1"`) to its ARN.
pub fn arn_for_name(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "sv1" => Some(SV1),
        "dm1" => Some(DM1),
        "tn1" => Some(TN1),
        _ => None,
    }
}
