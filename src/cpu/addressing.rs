/*!
addressing.rs - Addressing modes and operand resolution.

Overview
========
Each resolver reads the operand byte(s) at PC, advances PC past them and
returns either a value (load path) or an effective address (store and
read-modify-write paths).

Operand widths:
- 1 byte : immediate, zero page, zero page indexed, both indirect forms, relative
- 2 bytes: absolute, absolute indexed, JMP indirect
- 0 bytes: implied, accumulator

Caller Assumptions
==================
- PC points at the first operand byte (the opcode is already consumed).
- Zero-page indexing wraps inside page zero, as does the second pointer
  byte of the indirect modes ($FF -> $00).
- JMP indirect reads its target pointer without the page-wrap quirk of the
  real silicon: the high byte always comes from `ptr + 1`.
*/

use crate::cpu::state::CpuState;
use crate::error::AccessError;
use crate::mapper::Mapper;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    /// (zp,X): zero-page address plus X, then dereferenced.
    IndexedIndirect,
    /// (zp),Y: zero-page pointer dereferenced, then plus Y.
    IndirectIndexed,
    /// JMP (abs)
    Indirect,
    Relative,
}

impl AddrMode {
    /// Operand bytes following the opcode.
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
            _ => 1,
        }
    }
}

/// Fetch next byte from the instruction stream, incrementing PC.
pub(crate) fn fetch_byte<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u8, AccessError> {
    let v = mapper.read(cpu.pc)?;
    cpu.advance_pc(1);
    Ok(v)
}

/// Fetch next little-endian word (low, then high), incrementing PC twice.
pub(crate) fn fetch_word<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    let lo = fetch_byte(cpu, mapper)? as u16;
    let hi = fetch_byte(cpu, mapper)? as u16;
    Ok((hi << 8) | lo)
}

/// Pointer stored at `zp`, `zp + 1` with the second byte wrapping in page zero.
pub(crate) fn read_word_zp<M: Mapper + ?Sized>(mapper: &M, zp: u8) -> Result<u16, AccessError> {
    let lo = mapper.read(zp as u16)? as u16;
    let hi = mapper.read(zp.wrapping_add(1) as u16)? as u16;
    Ok((hi << 8) | lo)
}

// -------------------------
// Effective address helpers
// -------------------------

#[inline]
pub(crate) fn addr_zp<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    Ok(fetch_byte(cpu, mapper)? as u16)
}

#[inline]
pub(crate) fn addr_zp_x<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    Ok(fetch_byte(cpu, mapper)?.wrapping_add(cpu.x()) as u16)
}

#[inline]
pub(crate) fn addr_zp_y<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    Ok(fetch_byte(cpu, mapper)?.wrapping_add(cpu.y()) as u16)
}

#[inline]
pub(crate) fn addr_abs<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    fetch_word(cpu, mapper)
}

#[inline]
pub(crate) fn addr_abs_x<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    Ok(fetch_word(cpu, mapper)?.wrapping_add(cpu.x() as u16))
}

#[inline]
pub(crate) fn addr_abs_y<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    Ok(fetch_word(cpu, mapper)?.wrapping_add(cpu.y() as u16))
}

#[inline]
pub(crate) fn addr_ind_x<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    let zp = fetch_byte(cpu, mapper)?.wrapping_add(cpu.x());
    read_word_zp(mapper, zp)
}

#[inline]
pub(crate) fn addr_ind_y<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    let zp = fetch_byte(cpu, mapper)?;
    Ok(read_word_zp(mapper, zp)?.wrapping_add(cpu.y() as u16))
}

#[inline]
pub(crate) fn addr_indirect<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &M) -> Result<u16, AccessError> {
    let ptr = fetch_word(cpu, mapper)?;
    mapper.read_word(ptr)
}

/// Effective address for memory modes; `None` for modes without one
/// (implied, accumulator, immediate, relative). PC is left alone in that case.
pub(crate) fn resolve_address<M: Mapper + ?Sized>(
    mode: AddrMode,
    cpu: &mut CpuState,
    mapper: &M,
) -> Result<Option<u16>, AccessError> {
    let addr = match mode {
        AddrMode::ZeroPage => addr_zp(cpu, mapper)?,
        AddrMode::ZeroPageX => addr_zp_x(cpu, mapper)?,
        AddrMode::ZeroPageY => addr_zp_y(cpu, mapper)?,
        AddrMode::Absolute => addr_abs(cpu, mapper)?,
        AddrMode::AbsoluteX => addr_abs_x(cpu, mapper)?,
        AddrMode::AbsoluteY => addr_abs_y(cpu, mapper)?,
        AddrMode::IndexedIndirect => addr_ind_x(cpu, mapper)?,
        AddrMode::IndirectIndexed => addr_ind_y(cpu, mapper)?,
        AddrMode::Indirect => addr_indirect(cpu, mapper)?,
        AddrMode::Implied | AddrMode::Accumulator | AddrMode::Immediate | AddrMode::Relative => {
            return Ok(None);
        }
    };
    Ok(Some(addr))
}

/// Operand value for the load path: the immediate byte, or the byte at the
/// effective address. `None` for modes that carry no operand.
pub(crate) fn load_operand<M: Mapper + ?Sized>(
    mode: AddrMode,
    cpu: &mut CpuState,
    mapper: &M,
) -> Result<Option<u8>, AccessError> {
    if mode == AddrMode::Immediate {
        return fetch_byte(cpu, mapper).map(Some);
    }
    match resolve_address(mode, cpu, mapper)? {
        Some(addr) => mapper.read(addr).map(Some),
        None => Ok(None),
    }
}
