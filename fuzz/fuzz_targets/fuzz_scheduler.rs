//! Fuzz target for scheduler run control.
//!
//! This target drives a scheduler with arbitrary host commands and an
//! engine that fails on demand, checking cycle accounting and that an
//! engine failure always leaves the scheduler paused.

#![no_main]

use arbitrary::Arbitrary;
use chip8_pulse::{FnEngine, Opcode, Scheduler, Speed};
use libfuzzer_sys::fuzz_target;
use std::cell::Cell;
use std::rc::Rc;

/// Host command applied to the scheduler
#[derive(Debug, Arbitrary)]
enum Command {
    Pulse,
    Pause,
    Resume,
    Step,
    SetSpeed { numerator: u8, denominator: u8 },
    Capture(bool),
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Opcodes returned by the engine, in order
    program: Vec<u16>,
    /// Tick on which the engine fails, if any
    fail_on: Option<u16>,
    commands: Vec<Command>,
}

fuzz_target!(|input: FuzzInput| {
    if input.program.is_empty() || input.commands.len() > 256 {
        return;
    }

    let ticks = Rc::new(Cell::new(0u64));
    let counter = Rc::clone(&ticks);
    let program = input.program;
    let fail_on = input.fail_on.map(u64::from);

    let engine = FnEngine::new(move || {
        let tick = counter.get();
        counter.set(tick + 1);
        if Some(tick) == fail_on {
            return Err(std::fmt::Error);
        }
        Ok(Opcode::new(program[tick as usize % program.len()]))
    });

    let mut scheduler = Scheduler::new(engine);

    for command in input.commands {
        match command {
            Command::Pulse => match scheduler.on_pulse() {
                Ok(report) => assert!(report.executed == report.planned),
                Err(_) => assert!(scheduler.is_paused()),
            },
            Command::Pause => scheduler.pause(),
            Command::Resume => scheduler.resume(),
            Command::Step => {
                let was_paused = scheduler.is_paused();
                match scheduler.step() {
                    Ok(stepped) => assert_eq!(stepped.is_some(), was_paused),
                    Err(_) => assert!(scheduler.is_paused()),
                }
            }
            Command::SetSpeed {
                numerator,
                denominator,
            } => {
                // Zero is rejected at construction
                if let Ok(speed) = Speed::new(numerator.into(), denominator.into()) {
                    scheduler.set_speed(speed);
                }
            }
            Command::Capture(on) => scheduler.set_capture(on),
        }

        assert!(scheduler.history().len() <= 20);
    }

    // Failed ticks are not counted as executed cycles
    let failures = u64::from(fail_on.is_some_and(|f| f < ticks.get()));
    assert_eq!(scheduler.total_cycles() + failures, ticks.get());
});
