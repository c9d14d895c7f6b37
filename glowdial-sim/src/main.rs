//! host-side dry run of the dial pipeline

use color_eyre::Result;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use glowdial_core::{Arena, DutyScale, Excursion, LevelWatch, Pipeline, SampleRing};
use std::convert::Infallible;
use tinyrand::{Rand, Seeded, Wyrand};

const RING_CAPACITY: usize = 8;
const RESOLUTION_BITS: u32 = 12;
const PERIOD_TICKS: u16 = 1000;
const FULL_SCALE: i32 = 4095;
const BAR_WIDTH: usize = 32;

/// stand-in for a timer channel; every commit comes back in the
/// pipeline's update, so nothing is kept here
struct ConsoleLed;

impl ErrorType for ConsoleLed {
    type Error = Infallible;
}

impl SetDutyCycle for ConsoleLed {
    fn max_duty_cycle(&self) -> u16 {
        PERIOD_TICKS
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Infallible> {
        Ok(())
    }
}

fn bar(duty: u16) -> String {
    let lit = duty as usize * BAR_WIDTH / PERIOD_TICKS as usize;
    format!("{}{}", "#".repeat(lit), " ".repeat(BAR_WIDTH - lit))
}

/// triangle dial sweep with converter noise through the buffered path
fn sweep(rand: &mut Wyrand) -> Result<()> {
    println!("buffered sweep:");
    let scale = DutyScale::new(RESOLUTION_BITS, PERIOD_TICKS);
    let mut pipeline = Pipeline::new(ConsoleLed, scale)?;
    let mut watch = LevelWatch::new(16, 4080);
    let mut arena = Arena::<RING_CAPACITY>::new();
    let mut dial = 0i32;
    let mut step = 64i32;
    for window in 0..96 {
        for slot in arena.write_ring() {
            // +/- 16 counts of noise around the dial position
            let noise = i32::from(rand.next_lim_u16(33)) - 16;
            *slot = (dial + noise).clamp(0, FULL_SCALE) as u16;
            dial += step;
            if dial <= 0 || dial >= FULL_SCALE {
                dial = dial.clamp(0, FULL_SCALE);
                step = -step;
            }
        }
        let update = pipeline.on_window(arena.swap())?;
        match watch.observe(update.level) {
            Some(Excursion::Began) => println!("  level {:4} left the usable band", update.level),
            Some(Excursion::Ended) => println!("  level {:4} back in band", update.level),
            None => {}
        }
        if window % 8 == 0 {
            println!(
                "  level {:4} -> duty {:3} |{}|",
                update.level,
                update.duty,
                bar(update.duty)
            );
        }
    }
    let stats = pipeline.stats();
    println!(
        "  {} updates, {} overruns, {} band excursions",
        stats.updates,
        stats.overruns,
        watch.excursions()
    );
    Ok(())
}

/// unsmoothed single conversions through the direct path
fn direct_spot_checks() -> Result<()> {
    println!("direct spot checks:");
    let scale = DutyScale::new(RESOLUTION_BITS, PERIOD_TICKS);
    let mut pipeline = Pipeline::new(ConsoleLed, scale)?;
    for sample in [0u16, 1024, 2048, 3072, 4095] {
        let update = pipeline.on_sample(sample)?;
        println!("  sample {:4} -> duty {:3}", update.level, update.duty);
    }
    Ok(())
}

/// reader at half the writer's pace, on both window stores
fn overlap_demo() {
    println!("slow reader against a refilling window:");

    // shared ring: the copy interleaves two passes of the writer
    let mut ring = SampleRing::<RING_CAPACITY>::new();
    for _ in 0..RING_CAPACITY {
        ring.push(1);
    }
    let mut seen = [0u16; RING_CAPACITY];
    for slot in 0..RING_CAPACITY {
        seen[slot] = ring.window()[slot];
        ring.push(2);
        ring.push(2);
    }
    let torn = seen.contains(&1) && seen.contains(&2);
    println!("  shared ring: {seen:?} torn: {torn}");

    // arena: the handed-over ring holds still while the other fills
    let mut arena = Arena::<RING_CAPACITY>::new();
    arena.write_ring().fill(1);
    arena.swap();
    let mut seen = [0u16; RING_CAPACITY];
    for slot in 0..RING_CAPACITY {
        seen[slot] = arena.read_ring()[slot];
        let head = slot * 2 % RING_CAPACITY;
        arena.write_ring()[head] = 2;
        arena.write_ring()[(head + 1) % RING_CAPACITY] = 2;
    }
    println!("  arena:       {seen:?} stable: {}", seen == [1; RING_CAPACITY]);
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let mut rand = Wyrand::seed(0x610d);
    sweep(&mut rand)?;
    direct_spot_checks()?;
    overlap_demo();
    Ok(())
}
