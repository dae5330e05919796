/// Carrier configuration for channel-based PWM backends.
///
/// The defaults reproduce the fixed values this driver has always used:
/// 25 kHz carrier, 8-bit resolution, logical channels 0 and 1 for lines A
/// and B. Backends that derive their duty range from a timer ignore
/// `resolution_bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PwmConfig {
    /// PWM carrier frequency in Hz.
    pub frequency_hz: u32,
    /// Duty cycle resolution in bits, 1..=16.
    pub resolution_bits: u8,
    /// Logical channel bound to line A.
    pub channel_a: u8,
    /// Logical channel bound to line B.
    pub channel_b: u8,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 25_000,
            resolution_bits: 8,
            channel_a: 0,
            channel_b: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_carrier() {
        let config = PwmConfig::default();
        assert_eq!(config.frequency_hz, 25_000);
        assert_eq!(config.resolution_bits, 8);
        assert_eq!(config.channel_a, 0);
        assert_eq!(config.channel_b, 1);
    }
}
