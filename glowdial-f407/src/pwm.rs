use embassy_stm32::gpio::OutputType;
use embassy_stm32::peripherals::{PE13, PE14, TIM1};
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm, SimplePwmChannels};
use embassy_stm32::Peri;

use crate::config;

/// Brings up TIM1 with both LED channels claimed; the compare registers
/// come up at zero, so nothing lights until a pipeline commits a duty.
pub fn init(
    tim: Peri<'static, TIM1>,
    buffered_led: Peri<'static, PE13>,
    direct_led: Peri<'static, PE14>,
) -> SimplePwmChannels<'static, TIM1> {
    let pwm = SimplePwm::new(
        tim,
        None,
        None,
        Some(PwmPin::new(buffered_led, OutputType::PushPull)),
        Some(PwmPin::new(direct_led, OutputType::PushPull)),
        config::pwm::FREQ,
        config::pwm::COUNTING,
    );
    let mut channels = pwm.split();
    channels.ch3.set_polarity(config::pwm::POLARITY);
    channels.ch4.set_polarity(config::pwm::POLARITY);
    channels.ch3.enable();
    channels.ch4.enable();
    channels
}
