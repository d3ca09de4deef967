/*!
control_flow.rs - Control-flow / system family handler

Overview
========
  BRK            (0x00)
  JSR abs        (0x20)
  RTI            (0x40)
  RTS            (0x60)
  JMP abs        (0x4C)
  JMP (ind)      (0x6C)

Stack Layout
============
Return addresses go on the stack low byte first, so the high byte is on top:

  BRK  push lo(PC+1), hi(PC+1), P ; set B ; PC := [$FFFE]
  JSR  push lo(PC+1), hi(PC+1)    ; PC := operand
  RTI  pull P, hi, lo             ; PC := hi:lo
  RTS  pull hi, lo                ; PC := hi:lo + 1

PC+1 is taken with PC at the first operand byte, so BRK returns to its own
address + 2 (past the padding byte) and JSR pushes the address of its last
operand byte.

JMP (ind) reads the high byte of the target from `ptr + 1` even when the
pointer sits at the end of a page.
*/

use crate::cpu::addressing::{AddrMode, fetch_word, resolve_address};
use crate::cpu::state::{BREAK, CpuState, DEBUG};
use crate::cpu::table::Kind;
use crate::error::AccessError;
use crate::mapper::{BRK_VECTOR, Mapper};

pub(super) fn handle<M: Mapper + ?Sized>(
    kind: Kind,
    mode: AddrMode,
    cpu: &mut CpuState,
    mapper: &mut M,
) -> Result<(), AccessError> {
    match kind {
        Kind::Brk => {
            cpu.advance_pc(2);
            let ret = cpu.pc().wrapping_sub(1);
            cpu.push_return(mapper, ret)?;
            let p = cpu.status();
            cpu.push_u8(mapper, p)?;
            cpu.set_pc(mapper.read_word(BRK_VECTOR)?);
            cpu.assign_flag(BREAK, true);
        }
        Kind::Jsr => {
            let ret = cpu.pc().wrapping_add(1);
            cpu.push_return(mapper, ret)?;
            let target = fetch_word(cpu, mapper)?;
            cpu.set_pc(target);
        }
        Kind::Rti => {
            let p = cpu.pop_u8(mapper)?;
            cpu.set_status(p);
            let ret = cpu.pop_return(mapper)?;
            cpu.set_pc(ret);
        }
        Kind::Rts => {
            let ret = cpu.pop_return(mapper)?;
            cpu.set_pc(ret.wrapping_add(1));
        }
        Kind::Jmp => match resolve_address(mode, cpu, mapper)? {
            Some(target) => cpu.set_pc(target),
            None => cpu.assign_flag(DEBUG, true),
        },
        _ => cpu.assign_flag(DEBUG, true),
    }
    Ok(())
}
