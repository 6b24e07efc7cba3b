//! SMA register map constants and the static poll catalog
//!
//! Register addresses and scale factors are device-protocol constants from
//! the SMA Modbus profile, not tunables. The catalog is fixed at compile
//! time, never mutated, and safe to share across any number of polls.

use crate::codec::EncodingKind;
use serde::Serialize;

// ============================================================================
// SMA Modbus profile constants
// ============================================================================

/// SMA-specific Modbus unit identifier, used for every request
pub const SMA_UNIT_ID: u8 = 3;

/// Total yield (cumulative energy fed into the grid)
pub const TOTAL_YIELD: u16 = 30529;

/// DC input current
pub const DC_CURRENT: u16 = 30769;

/// DC input voltage
pub const DC_VOLTAGE: u16 = 30771;

/// DC input power
pub const DC_POWER: u16 = 30773;

/// AC active power, all phases
pub const AC_POWER: u16 = 30775;

/// AC active power, phase L1
pub const AC_POWER_L1: u16 = 30777;

/// AC active power, phase L2
pub const AC_POWER_L2: u16 = 30779;

/// AC active power, phase L3
pub const AC_POWER_L3: u16 = 30781;

/// Grid frequency (defined by the profile, not currently polled)
pub const GRID_FREQUENCY: u16 = 31447;

/// Outside temperature (defined by the profile, not currently polled)
pub const OUTSIDE_TEMPERATURE: u16 = 34609;

// ============================================================================
// Poll catalog
// ============================================================================

/// One entry of the poll catalog: a named measurement and how to read it
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegisterDef {
    /// Measurement name, used as the payload key
    pub name: &'static str,
    /// Starting holding-register address
    pub address: u16,
    /// Multiplier converting the raw integer into the physical unit
    pub scale: f64,
    /// Physical unit label, for human-readable output only
    pub unit: &'static str,
    /// How the two registers are packed
    pub encoding: EncodingKind,
}

/// Measurements read on every poll cycle, in request order.
pub const CATALOG: &[RegisterDef] = &[
    RegisterDef {
        name: "total_return",
        address: TOTAL_YIELD,
        scale: 0.001,
        unit: "kWh",
        encoding: EncodingKind::UInt32,
    },
    RegisterDef {
        name: "dc_a",
        address: DC_CURRENT,
        scale: 0.001,
        unit: "A",
        encoding: EncodingKind::Int32,
    },
    RegisterDef {
        name: "dc_v",
        address: DC_VOLTAGE,
        scale: 0.01,
        unit: "V",
        encoding: EncodingKind::Int32,
    },
    RegisterDef {
        name: "dc_p",
        address: DC_POWER,
        scale: 1.0,
        unit: "W",
        encoding: EncodingKind::Int32,
    },
    RegisterDef {
        name: "ac_p",
        address: AC_POWER,
        scale: 1.0,
        unit: "W",
        encoding: EncodingKind::Int32,
    },
    RegisterDef {
        name: "ac_p1",
        address: AC_POWER_L1,
        scale: 1.0,
        unit: "W",
        encoding: EncodingKind::Int32,
    },
    RegisterDef {
        name: "ac_p2",
        address: AC_POWER_L2,
        scale: 1.0,
        unit: "W",
        encoding: EncodingKind::Int32,
    },
    RegisterDef {
        name: "ac_p3",
        address: AC_POWER_L3,
        scale: 1.0,
        unit: "W",
        encoding: EncodingKind::Int32,
    },
    // Known in the profile but not polled; the sentinel/scale pair has never
    // been verified against a live device. Keep disabled until tested.
    // RegisterDef {
    //     name: "net_frequency",
    //     address: GRID_FREQUENCY,
    //     scale: 1.0,
    //     unit: "Hz",
    //     encoding: EncodingKind::UInt32,
    // },
];
