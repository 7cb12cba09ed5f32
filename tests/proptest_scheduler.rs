//! Property-based tests for scheduler invariants.
//!
//! Random sequences of host commands are applied to a scheduler and to a
//! plain model of the run state; the engine must have ticked exactly as
//! often as the model predicts.

use chip8_pulse::{ReplayEngine, Scheduler, Speed};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Command {
    Pulse,
    Pause,
    Resume,
    Step,
    SetSpeed(Speed),
    Capture(bool),
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => Just(Command::Pulse),
        1 => Just(Command::Pause),
        1 => Just(Command::Resume),
        2 => Just(Command::Step),
        1 => (1u32..=8, 1u32..=4).prop_map(|(n, d)| Command::SetSpeed(Speed::new(n, d).unwrap())),
        1 => any::<bool>().prop_map(Command::Capture),
    ]
}

proptest! {
    #[test]
    fn prop_ticks_match_model(
        program in prop::collection::vec(any::<u16>(), 1..16),
        commands in prop::collection::vec(command(), 0..64),
    ) {
        let mut s = Scheduler::new(ReplayEngine::new(program));
        let mut paused = false;
        let mut speed = Speed::NORMAL;
        let mut expected: u64 = 0;

        for cmd in commands {
            match cmd {
                Command::Pulse => {
                    let executed = s.on_pulse().unwrap().executed;
                    let planned = if paused { 0 } else { speed.cycles_for(10) };
                    prop_assert_eq!(executed, planned);
                    expected += u64::from(planned);
                }
                Command::Pause => {
                    s.pause();
                    paused = true;
                }
                Command::Resume => {
                    s.resume();
                    paused = false;
                }
                Command::Step => {
                    let stepped = s.step().unwrap();
                    prop_assert_eq!(stepped.is_some(), paused);
                    if paused {
                        expected += 1;
                    }
                }
                Command::SetSpeed(new_speed) => {
                    s.set_speed(new_speed);
                    speed = new_speed;
                }
                Command::Capture(on) => s.set_capture(on),
            }

            prop_assert_eq!(s.is_paused(), paused);
            prop_assert_eq!(s.speed(), speed);
        }

        prop_assert_eq!(s.total_cycles(), expected);
        prop_assert_eq!(s.engine().ticks(), expected);
        prop_assert!(s.history().len() <= 20);
    }

    #[test]
    fn prop_cycles_for_is_rounded_product(n in 1u32..=100, d in 1u32..=100, base in 0u32..=1000) {
        let speed = Speed::new(n, d).unwrap();
        let exact = f64::from(n) * f64::from(base) / f64::from(d);
        let cycles = speed.cycles_for(base);

        prop_assert!((f64::from(cycles) - exact).abs() <= 0.5);
    }

    #[test]
    fn prop_speed_is_reduced(n in 1u32..=10_000, d in 1u32..=10_000) {
        let speed = Speed::new(n, d).unwrap();
        let k = 7;
        prop_assert_eq!(Speed::new(n * k, d * k).unwrap(), speed);
        prop_assert_eq!(
            u64::from(speed.numerator()) * u64::from(d),
            u64::from(n) * u64::from(speed.denominator())
        );
    }
}
