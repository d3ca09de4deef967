/*!
groups.rs - Bit-pattern group handler (cc = 01, 10, 00)

Covered Instructions
--------------------
Reads (ALU into a register):
  ORA AND EOR ADC LDA CMP SBC  (A, all eight cc=01 modes)
  LDX (imm, zp, zp,Y, abs, abs,Y)   LDY (imm, zp, zp,X, abs, abs,X)
  CPX CPY (imm, zp, abs)
Stores:
  STA (all cc=01 memory modes)   STX (zp, zp,Y, abs)   STY (zp, zp,X, abs)
Read-modify-write:
  ASL ROL LSR ROR (A, zp, zp,X, abs, abs,X)   INC DEC (zp, zp,X, abs, abs,X)
Bit test:
  BIT (zp, abs)

Memory read-modify-write goes through the temp register: read into temp,
operate, write temp back. Stores and RMW never touch the status byte except
through the ALU.

A mode that produces no operand or address for the instruction kind sets the
DEBUG status bit and leaves everything else alone. The descriptor table never
builds such a pairing, so the bit only shows up when a caller feeds a hand
made descriptor.
*/

use crate::cpu::addressing::{AddrMode, load_operand, resolve_address};
use crate::cpu::execute::{apply, bit};
use crate::cpu::state::{CpuState, DEBUG, Reg8, Register};
use crate::cpu::table::Kind;
use crate::error::AccessError;
use crate::mapper::Mapper;

pub(super) fn handle<M: Mapper + ?Sized>(
    kind: Kind,
    mode: AddrMode,
    cpu: &mut CpuState,
    mapper: &mut M,
) -> Result<(), AccessError> {
    match kind {
        Kind::Read { op, reg } => match load_operand(mode, cpu, mapper)? {
            Some(v) => {
                let (status, cell) = cpu.status_and(reg);
                apply(op, status, cell, Reg8::new(v));
            }
            None => cpu.assign_flag(DEBUG, true),
        },
        Kind::Store(reg) => match resolve_address(mode, cpu, mapper)? {
            Some(addr) => mapper.write(addr, cpu.register(reg).get())?,
            None => cpu.assign_flag(DEBUG, true),
        },
        Kind::Modify(op) if mode == AddrMode::Accumulator => {
            let (status, cell) = cpu.status_and(Register::A);
            apply(op, status, cell, Reg8::default());
        }
        Kind::Modify(op) => match resolve_address(mode, cpu, mapper)? {
            Some(addr) => {
                cpu.temp.set(mapper.read(addr)?);
                apply(op, &mut cpu.status, &mut cpu.temp, Reg8::default());
                mapper.write(addr, cpu.temp.get())?;
            }
            None => cpu.assign_flag(DEBUG, true),
        },
        Kind::Bit => match load_operand(mode, cpu, mapper)? {
            Some(v) => bit(&mut cpu.status, cpu.a, Reg8::new(v)),
            None => cpu.assign_flag(DEBUG, true),
        },
        _ => cpu.assign_flag(DEBUG, true),
    }
    Ok(())
}
