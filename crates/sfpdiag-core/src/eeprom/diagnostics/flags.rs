use serde::Serialize;

use crate::eeprom::common::bit;

use super::layout;

/// Status/control byte 110.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusControlFlags {
    pub raw: u8,
    pub tx_disable_state: bool,
    pub soft_tx_disable: bool,
    pub rs1_state: bool,
    pub rs0_state: bool,
    pub soft_rs0_select: bool,
    pub tx_fault_state: bool,
    pub rx_los_state: bool,
    pub data_not_ready: bool,
}

impl StatusControlFlags {
    pub fn from_raw(raw: u8) -> Self {
        Self {
            raw,
            tx_disable_state: bit(raw, layout::TX_DISABLE_STATE_BIT),
            soft_tx_disable: bit(raw, layout::SOFT_TX_DISABLE_BIT),
            rs1_state: bit(raw, layout::RS1_STATE_BIT),
            rs0_state: bit(raw, layout::RS0_STATE_BIT),
            soft_rs0_select: bit(raw, layout::SOFT_RS0_SELECT_BIT),
            tx_fault_state: bit(raw, layout::TX_FAULT_STATE_BIT),
            rx_los_state: bit(raw, layout::RX_LOS_STATE_BIT),
            data_not_ready: bit(raw, layout::DATA_NOT_READY_BIT),
        }
    }

    /// Realtime values are authoritative only when bit 0 is clear.
    pub fn data_ready(&self) -> bool {
        !self.data_not_ready
    }

    pub fn labels(&self) -> Vec<&'static str> {
        [
            (self.tx_disable_state, "TX_DISABLE asserted"),
            (self.soft_tx_disable, "Soft TX disable"),
            (self.rs1_state, "RS(1) high"),
            (self.rs0_state, "RS(0) high"),
            (self.soft_rs0_select, "Soft RS(0) select"),
            (self.tx_fault_state, "TX_FAULT asserted"),
            (self.rx_los_state, "RX_LOS asserted"),
            (self.data_not_ready, "Data not ready"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}

/// One pair of alarm (112..=113) or warning (116..=117) flag bytes.
///
/// Both pairs share the same bit layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ThresholdFlags {
    pub raw: [u8; 2],
    pub temperature_high: bool,
    pub temperature_low: bool,
    pub vcc_high: bool,
    pub vcc_low: bool,
    pub bias_high: bool,
    pub bias_low: bool,
    pub tx_power_high: bool,
    pub tx_power_low: bool,
    pub rx_power_high: bool,
    pub rx_power_low: bool,
    pub laser_temperature_high: bool,
    pub laser_temperature_low: bool,
    pub tec_current_high: bool,
    pub tec_current_low: bool,
}

impl ThresholdFlags {
    pub fn from_raw(raw: [u8; 2]) -> Self {
        let [first, second] = raw;
        Self {
            raw,
            temperature_high: bit(first, 7),
            temperature_low: bit(first, 6),
            vcc_high: bit(first, 5),
            vcc_low: bit(first, 4),
            bias_high: bit(first, 3),
            bias_low: bit(first, 2),
            tx_power_high: bit(first, 1),
            tx_power_low: bit(first, 0),
            rx_power_high: bit(second, 7),
            rx_power_low: bit(second, 6),
            laser_temperature_high: bit(second, 5),
            laser_temperature_low: bit(second, 4),
            tec_current_high: bit(second, 3),
            tec_current_low: bit(second, 2),
        }
    }

    pub fn any(&self) -> bool {
        !self.asserted().is_empty()
    }

    /// Names of the asserted flags, in bit order.
    pub fn asserted(&self) -> Vec<&'static str> {
        [
            (self.temperature_high, "temperature high"),
            (self.temperature_low, "temperature low"),
            (self.vcc_high, "vcc high"),
            (self.vcc_low, "vcc low"),
            (self.bias_high, "tx bias high"),
            (self.bias_low, "tx bias low"),
            (self.tx_power_high, "tx power high"),
            (self.tx_power_low, "tx power low"),
            (self.rx_power_high, "rx power high"),
            (self.rx_power_low, "rx power low"),
            (self.laser_temperature_high, "laser temperature high"),
            (self.laser_temperature_low, "laser temperature low"),
            (self.tec_current_high, "TEC current high"),
            (self.tec_current_low, "TEC current low"),
        ]
        .into_iter()
        .filter_map(|(set, label)| set.then_some(label))
        .collect()
    }
}
