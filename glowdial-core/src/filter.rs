//! oversampling decimation

/// Unweighted mean of one window, truncating. Sums in u32, wide enough
/// for any practical window of 12-bit samples; N must be non-zero.
pub fn average<const N: usize>(window: &[u16; N]) -> u16 {
    let sum = window.iter().map(|&v| u32::from(v)).sum::<u32>();
    (sum / N as u32) as u16
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_flat_windows() {
        assert_eq!(average(&[0u16; 8]), 0);
        assert_eq!(average(&[4095u16; 8]), 4095);
    }

    #[test]
    fn test_average_truncates() {
        // sum 16095, mean 2011.875
        let window = [0, 1000, 2000, 3000, 4000, 4095, 500, 1500];
        assert_eq!(average(&window), 2011);
    }

    #[test]
    fn test_average_stays_in_converter_range() {
        let window = [4095, 0, 4095, 0, 4095, 0, 4095, 1];
        let mean = average(&window);
        assert!(mean <= 4095);
        assert_eq!(mean, 2047); // floor(16381 / 8)
    }
}
