/*!
emulator.rs - Execution session: one register file bound to one mapper.

Overview
========
`Emulator::run(budget)` executes instructions until the cycle budget is spent,
a stop is requested, or a fatal opcode is fetched. Per instruction:

1. Check the stop flag (lock, read, clear). A stop zeroes the budget and
   ends the run before anything is fetched.
2. Fetch the opcode at PC and advance PC.
3. Debit the opcode's table cost from the budget.
4. Dispatch.

Entering `run` discards any stop requested while no run was active. The
budget is checked only before a fetch, so the last instruction may debit
past zero; the remainder handed back is clamped at 0. A lock or unknown
opcode latches `ErrorState` and returns at once, keeping its debit. While an
error is latched every `run` is a no-op that hands the budget back untouched;
`reinitialize` (or `reset`) clears it.

Sharing
=======
The session borrows its mapper mutably for its whole life; one mapper serves
one session. The only state shared across threads is the stop flag, reachable
through `StopHandle`.
*/

use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};

use crate::cpu::cycles::base_cycles;
use crate::cpu::dispatch::{self, Outcome};
use crate::cpu::state::CpuState;
use crate::cpu::table::descriptor;
use crate::error::AccessError;
use crate::mapper::{Mapper, RESET_VECTOR};

/// Latched fatal condition of a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ErrorState {
    #[default]
    None,
    /// A lock (KIL) opcode was executed.
    CpuLock,
    /// An opcode outside the recognised set was fetched.
    UnknownInstruction,
}

/// Cloneable handle that asks a running session to stop early.
///
/// The request is observed before the next opcode fetch and zeroes the
/// remaining budget. A request made while no run is in progress is dropped
/// when the next run starts.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    flag: Arc<Mutex<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        *self.flag.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    pub fn is_stop_requested(&self) -> bool {
        *self.flag.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read and clear the request.
    pub(crate) fn take(&self) -> bool {
        let mut flag = self.flag.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *flag, false)
    }
}

pub struct Emulator<'m, M: Mapper + ?Sized> {
    cpu: CpuState,
    mapper: &'m mut M,
    error: ErrorState,
    clocks_used: u64,
    stop: StopHandle,
}

impl<'m, M: Mapper + ?Sized> Emulator<'m, M> {
    pub fn new(mapper: &'m mut M, cpu: CpuState) -> Self {
        Self {
            cpu,
            mapper,
            error: ErrorState::None,
            clocks_used: 0,
            stop: StopHandle::default(),
        }
    }

    /// Execute up to `budget` cycles and return what is left of it (never
    /// below 0).
    ///
    /// Mapper access errors abort the run; the instruction that hit it may
    /// have partially updated registers.
    pub fn run(&mut self, budget: i32) -> Result<i32, AccessError> {
        if self.error != ErrorState::None {
            return Ok(budget.max(0));
        }
        self.stop.take();

        let mut remaining = budget;
        while remaining > 0 {
            if self.stop.take() {
                info!("stop requested at PC ${:04X}, {} cycles left", self.cpu.pc(), remaining);
                remaining = 0;
                break;
            }

            let pc = self.cpu.pc();
            let opcode = self.mapper.read(pc)?;
            self.cpu.advance_pc(1);
            let cost = base_cycles(opcode);
            remaining -= cost;
            self.clocks_used += cost as u64;

            let desc = descriptor(opcode);
            #[cfg(feature = "trace")]
            log::trace!(target: "instr", "{:04X}  {:02X}  {:<4}{:?} {}", pc, opcode, desc.mnemonic, desc.mode, remaining);

            match dispatch::execute(desc, &mut self.cpu, &mut *self.mapper)? {
                Outcome::Continue => {}
                Outcome::Lock => {
                    self.error = ErrorState::CpuLock;
                    warn!("processor locked by ${:02X} at ${:04X}", opcode, pc);
                    return Ok(remaining.max(0));
                }
                Outcome::Unknown => {
                    self.error = ErrorState::UnknownInstruction;
                    warn!("unknown instruction ${:02X} at ${:04X}", opcode, pc);
                    return Ok(remaining.max(0));
                }
            }
        }
        Ok(remaining.max(0))
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn error_state(&self) -> ErrorState {
        self.error
    }

    /// Total cycles debited across every run of this session.
    pub fn cycle_count(&self) -> u64 {
        self.clocks_used
    }

    pub fn cpu(&self) -> &CpuState {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CpuState {
        &mut self.cpu
    }

    pub fn cpu_copy(&self) -> CpuState {
        self.cpu
    }

    pub fn set_cpu(&mut self, cpu: CpuState) {
        self.cpu = cpu;
    }

    /// Power-on registers; clears a latched error.
    pub fn reinitialize(&mut self) {
        self.cpu = CpuState::new();
        self.error = ErrorState::None;
    }

    /// `reinitialize`, then start at the address in the reset vector.
    pub fn reset(&mut self) -> Result<(), AccessError> {
        self.reinitialize();
        let start = self.mapper.read_word(RESET_VECTOR)?;
        self.cpu.set_pc(start);
        Ok(())
    }

    pub fn mapper(&self) -> &M {
        &*self.mapper
    }

    pub fn mapper_mut(&mut self) -> &mut M {
        &mut *self.mapper
    }
}
