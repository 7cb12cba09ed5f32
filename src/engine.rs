//! # Engine Abstraction
//!
//! This module provides the `Engine` trait that decouples the scheduler from
//! any particular CHIP-8 virtual machine. The engine owns memory, registers,
//! timers and the display; the scheduler only ever asks it to advance by one
//! instruction cycle and report the opcode it executed.
//!
//! Two implementations are provided:
//!
//! - [`ReplayEngine`] cycles through a fixed opcode program, which makes it a
//!   convenient stand-in for tests and tooling
//! - [`FnEngine`] adapts any closure, for hosts whose engine lives behind a
//!   foreign interface

use std::convert::Infallible;

use crate::opcode::Opcode;

/// A CHIP-8 virtual machine driven one cycle at a time.
///
/// # Design
///
/// - `tick(&mut self)`: every call executes exactly one instruction
/// - `Error`: engines that cannot fail use [`Infallible`]
/// - The scheduler treats any error as fatal for the running session
///
/// # Examples
///
/// ```
/// use chip8_pulse::{Engine, Opcode};
/// use std::convert::Infallible;
///
/// /// Executes a jump-to-self forever
/// struct SpinEngine;
///
/// impl Engine for SpinEngine {
///     type Error = Infallible;
///
///     fn tick(&mut self) -> Result<Opcode, Self::Error> {
///         Ok(Opcode::new(0x1200))
///     }
/// }
///
/// let mut engine = SpinEngine;
/// assert_eq!(engine.tick(), Ok(Opcode::new(0x1200)));
/// ```
pub trait Engine {
    /// Failure reported by [`Engine::tick`].
    type Error: std::error::Error + 'static;

    /// Advances the machine by one instruction and returns the opcode executed.
    fn tick(&mut self) -> Result<Opcode, Self::Error>;
}

impl<E: Engine + ?Sized> Engine for &mut E {
    type Error = E::Error;

    fn tick(&mut self) -> Result<Opcode, Self::Error> {
        (**self).tick()
    }
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    type Error = E::Error;

    fn tick(&mut self) -> Result<Opcode, Self::Error> {
        (**self).tick()
    }
}

/// Engine that replays a fixed opcode program in a loop.
///
/// Every tick returns the next opcode and wraps back to the start after the
/// last one. An empty program replays `0x0000`.
///
/// # Examples
///
/// ```
/// use chip8_pulse::{Engine, Opcode, ReplayEngine};
///
/// let mut engine = ReplayEngine::new(vec![0x00E0u16, 0x1200]);
/// assert_eq!(engine.tick().unwrap(), Opcode::new(0x00E0));
/// assert_eq!(engine.tick().unwrap(), Opcode::new(0x1200));
/// assert_eq!(engine.tick().unwrap(), Opcode::new(0x00E0));
/// assert_eq!(engine.ticks(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReplayEngine {
    program: Vec<Opcode>,
    position: usize,
    ticks: u64,
}

impl ReplayEngine {
    /// Creates an engine that replays `program`.
    pub fn new<I, T>(program: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Opcode>,
    {
        Self {
            program: program.into_iter().map(Into::into).collect(),
            position: 0,
            ticks: 0,
        }
    }

    /// Creates an engine from a ROM image of big-endian words.
    ///
    /// A trailing odd byte is ignored.
    pub fn from_rom(rom: &[u8]) -> Self {
        Self::new(
            rom.chunks_exact(2)
                .map(|word| Opcode::from_be_bytes(word[0], word[1])),
        )
    }

    /// Total number of ticks executed.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Opcodes replayed by this engine.
    pub fn program(&self) -> &[Opcode] {
        &self.program
    }
}

impl Engine for ReplayEngine {
    type Error = Infallible;

    fn tick(&mut self) -> Result<Opcode, Self::Error> {
        self.ticks += 1;
        let Some(&op) = self.program.get(self.position) else {
            return Ok(Opcode::default());
        };
        self.position = (self.position + 1) % self.program.len();
        Ok(op)
    }
}

/// Adapts a closure into an [`Engine`].
///
/// # Examples
///
/// ```
/// use chip8_pulse::{Engine, FnEngine, Opcode};
/// use std::convert::Infallible;
///
/// let mut pc = 0x200u16;
/// let mut engine = FnEngine::new(move || {
///     pc += 2;
///     Ok::<_, Infallible>(Opcode::new(0x1000 | pc))
/// });
/// assert_eq!(engine.tick().unwrap(), Opcode::new(0x1202));
/// ```
pub struct FnEngine<F> {
    tick: F,
}

impl<F> FnEngine<F> {
    /// Wraps `tick`, which is called once per cycle.
    pub fn new(tick: F) -> Self {
        Self { tick }
    }
}

impl<F, E> Engine for FnEngine<F>
where
    F: FnMut() -> Result<Opcode, E>,
    E: std::error::Error + 'static,
{
    type Error = E;

    fn tick(&mut self) -> Result<Opcode, Self::Error> {
        (self.tick)()
    }
}
