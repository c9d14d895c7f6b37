use embassy_stm32::adc::{Adc, AnyAdcChannel, RingBufferedAdc, Sequence};
use embassy_stm32::peripherals::{ADC1, DMA2_CH0};
use embassy_stm32::Peri;
use grounded::uninit::GroundedArrayCell;

use crate::config;

static RING_BUFFER: GroundedArrayCell<u16, { config::adc::DMA_RING_LEN }> =
    GroundedArrayCell::uninit();

/// Free-running conversion with the transfer engine draining into the
/// hardware ring; each `read` hands back one window per half-transfer.
pub fn ring(
    adc: Peri<'static, ADC1>,
    dma: Peri<'static, DMA2_CH0>,
    pot: &mut AnyAdcChannel<ADC1>,
) -> RingBufferedAdc<'static, ADC1> {
    let ring_buffer: &mut [u16] = unsafe {
        RING_BUFFER.initialize_all_copied(0);
        let (ptr, len) = RING_BUFFER.get_ptr_len();
        core::slice::from_raw_parts_mut(ptr, len)
    };
    let mut adc = Adc::new(adc).into_ring_buffered(dma, ring_buffer);
    adc.set_sample_sequence(Sequence::One, pot, config::adc::WINDOW_SAMPLE_TIME);
    adc
}

/// One-shot conversions for direct mode; the caller paces the reads.
pub fn oneshot(adc: Peri<'static, ADC1>) -> Adc<'static, ADC1> {
    let mut adc = Adc::new(adc);
    adc.set_sample_time(config::adc::DIRECT_SAMPLE_TIME);
    adc
}
