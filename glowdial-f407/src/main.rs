#![no_std]
#![no_main]

mod analog;
mod config;
mod control;
mod pwm;

use embassy_executor::Spawner;
use embassy_stm32::adc::AdcChannel;
use embassy_stm32::time::Hertz;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let hw_config = {
        use embassy_stm32::rcc::*;

        let mut config = embassy_stm32::Config::default();
        config.rcc.hse = Some(Hse {
            freq: Hertz::mhz(8),
            mode: HseMode::Oscillator,
        });
        config.rcc.pll_src = PllSource::HSE;
        config.rcc.pll = Some(Pll {
            prediv: PllPreDiv::DIV4,
            mul: PllMul::MUL168,
            divp: Some(PllPDiv::DIV4), // 8 / 4 * 168 / 4 = 84 MHz
            divq: Some(PllQDiv::DIV7), // 8 / 4 * 168 / 7 = 48 MHz
            divr: None,
        });
        config.rcc.sys = Sysclk::PLL1_P; // 84 MHz
        config.rcc.ahb_pre = AHBPrescaler::DIV1; // 84 MHz
        config.rcc.apb1_pre = APBPrescaler::DIV2; // 42 MHz
        config.rcc.apb2_pre = APBPrescaler::DIV1; // 84 MHz
        config
    };
    let p = embassy_stm32::init(hw_config);

    defmt::info!("glowdial up, mode: {}", config::MODE);

    // init pwm leds
    let leds = pwm::init(p.TIM1, p.PE13, p.PE14);

    // pot wiper
    let mut pot = p.PA5.degrade_adc();

    match config::MODE {
        config::Mode::Buffered => {
            let adc = analog::ring(p.ADC1, p.DMA2_CH0, &mut pot);
            spawner.must_spawn(control::buffered(adc, leds.ch3));
        }
        config::Mode::Direct => {
            let adc = analog::oneshot(p.ADC1);
            spawner.must_spawn(control::direct(adc, pot, leds.ch4));
        }
    }

    let fault = control::FAULT.wait().await;
    defmt::error!("pipeline fault: {}", fault);
}
