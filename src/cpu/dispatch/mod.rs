/*!
dispatch - Executes one decoded instruction.

Overview
========
The run loop fetches the opcode, advances PC past it, debits the cycle cost
and then hands the opcode's `Descriptor` to `execute`. From there each kind
of instruction goes to its family handler:

- `misc`          register transfers, index increment/decrement, stack, flags
- `branches`      the eight conditional relative branches
- `control_flow`  BRK, JSR, RTI, RTS, JMP
- `groups`        the bit-pattern groups: ALU reads, stores, read-modify-write, BIT

Lock and unknown opcodes do no work here; they come back as an `Outcome` and
the session latches the matching error state.

Caller Requirements
===================
- PC points at the first operand byte.
- The cycle budget has already been debited.

Errors
======
A mapper refusing an access (`AccessError`) aborts the instruction where it
happened and propagates to the caller. Registers updated before the refused
access keep their new values.
*/

mod branches;
mod control_flow;
mod groups;
mod misc;

use crate::cpu::state::CpuState;
use crate::cpu::table::{Descriptor, Kind};
use crate::error::AccessError;
use crate::mapper::Mapper;

/// What the session should do after one instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Continue,
    /// A lock opcode was fetched.
    Lock,
    /// The opcode is not a recognised instruction.
    Unknown,
}

pub(crate) fn execute<M: Mapper + ?Sized>(
    desc: &Descriptor,
    cpu: &mut CpuState,
    mapper: &mut M,
) -> Result<Outcome, AccessError> {
    match desc.kind {
        Kind::Lock => return Ok(Outcome::Lock),
        Kind::Unknown => return Ok(Outcome::Unknown),
        // Operand bytes are skipped, never read.
        Kind::Nop => cpu.advance_pc(desc.mode.operand_len()),
        Kind::Implied(op) => misc::handle(op, cpu, mapper)?,
        Kind::Branch { flag, set } => branches::handle(flag, set, cpu, mapper)?,
        Kind::Brk | Kind::Jsr | Kind::Rti | Kind::Rts | Kind::Jmp => {
            control_flow::handle(desc.kind, desc.mode, cpu, mapper)?
        }
        Kind::Read { .. } | Kind::Store(_) | Kind::Modify(_) | Kind::Bit => {
            groups::handle(desc.kind, desc.mode, cpu, mapper)?
        }
    }
    Ok(Outcome::Continue)
}
