/*!
state.rs - 2A03 register file (programmer-visible CPU state) and small helpers.

Overview
========
`CpuState` owns every architecturally visible register. It knows nothing
about decoding or timing; those live in `dispatch` and `emulator`. Mapper
access is limited to the stack helpers, which need the fixed stack page.

Registers
=========
The accumulator, both index registers, the stack pointer and the temp
scratch cell are `Reg8` values: one byte with an unsigned and a signed
view. Both views always denote the same bit pattern; there is no aliased
storage to keep in sync.

The program counter is a plain `u16` and wraps at 16 bits. The stack
pointer is an offset into page $01 and wraps modulo 256.

Power-on state
==============
A = X = Y = temp = 0, SP = $FF, P = 0, PC = $8000.

Status Register Bit Layout
==========================
Bit: 7 6 5 4 3 2 1 0
     N V d B D I Z C
Where:
  N = NEGATIVE
  V = OVERFLOW
  d = DEBUG (set when dispatch reaches a branch it should never reach)
  B = BREAK
  D = DECIMAL (tracked, never used for arithmetic on the 2A03)
  I = IRQ_DISABLE
  Z = ZERO
  C = CARRY
*/

use std::fmt;

use crate::cpu::execute::set_flag;
use crate::error::AccessError;
use crate::mapper::{Mapper, STACK_BASE};

/// Processor status flag bit masks.
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const DEBUG: u8 = 0b0010_0000; // Non-standard: invalid dispatch marker.
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// One 8-bit register cell with unsigned and two's-complement views.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Reg8(u8);

impl Reg8 {
    #[inline]
    pub const fn new(v: u8) -> Self {
        Self(v)
    }

    /// Unsigned view.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn set(&mut self, v: u8) {
        self.0 = v;
    }

    /// Two's-complement view of the same byte.
    #[inline]
    pub const fn signed(self) -> i8 {
        self.0 as i8
    }

    #[inline]
    pub fn set_signed(&mut self, v: i8) {
        self.0 = v as u8;
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 & 0x80 != 0
    }
}

impl fmt::Debug for Reg8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:02X}", self.0)
    }
}

impl From<u8> for Reg8 {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

impl From<Reg8> for u8 {
    fn from(r: Reg8) -> Self {
        r.0
    }
}

/// Registers an instruction can name as its ALU target or store source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    A,
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub pc: u16,
    pub a: Reg8,
    pub x: Reg8,
    pub y: Reg8,
    pub sp: Reg8,
    pub temp: Reg8,
    pub status: u8,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            pc: crate::mapper::PRG_ROM,
            a: Reg8(0),
            x: Reg8(0),
            y: Reg8(0),
            sp: Reg8(0xFF),
            temp: Reg8(0),
            status: 0,
        }
    }
}

impl CpuState {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Power-on register state.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Basic Accessors
    // ---------------------------------------------------------------------
    #[inline]
    pub fn a(&self) -> u8 {
        self.a.get()
    }
    #[inline]
    pub fn x(&self) -> u8 {
        self.x.get()
    }
    #[inline]
    pub fn y(&self) -> u8 {
        self.y.get()
    }
    #[inline]
    pub fn sp(&self) -> u8 {
        self.sp.get()
    }
    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn status(&self) -> u8 {
        self.status
    }

    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.a.set(v);
    }
    #[inline]
    pub fn set_x(&mut self, v: u8) {
        self.x.set(v);
    }
    #[inline]
    pub fn set_y(&mut self, v: u8) {
        self.y.set(v);
    }
    #[inline]
    pub fn set_sp(&mut self, v: u8) {
        self.sp.set(v);
    }
    #[inline]
    pub fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    pub fn set_status(&mut self, v: u8) {
        self.status = v;
    }

    /// Status word and one register, borrowed together for the ALU.
    #[inline]
    pub(crate) fn status_and(&mut self, reg: Register) -> (&mut u8, &mut Reg8) {
        match reg {
            Register::A => (&mut self.status, &mut self.a),
            Register::X => (&mut self.status, &mut self.x),
            Register::Y => (&mut self.status, &mut self.y),
        }
    }

    #[inline]
    pub fn register(&self, reg: Register) -> Reg8 {
        match reg {
            Register::A => self.a,
            Register::X => self.x,
            Register::Y => self.y,
        }
    }

    // ---------------------------------------------------------------------
    // Program Counter
    // ---------------------------------------------------------------------

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    // ---------------------------------------------------------------------
    // Flags
    // ---------------------------------------------------------------------

    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }

    #[inline]
    pub fn assign_flag(&mut self, mask: u8, value: bool) {
        set_flag(&mut self.status, mask, value);
    }

    // ---------------------------------------------------------------------
    // Stack
    // ---------------------------------------------------------------------
    //
    // Push: write at $0100 + SP, then SP - 1.
    // Pull: SP + 1, then read at $0100 + SP.
    // No overflow or underflow detection; SP simply wraps.

    #[inline]
    fn stack_addr(&self) -> u16 {
        STACK_BASE + self.sp.get() as u16
    }

    pub fn push_u8<M: Mapper + ?Sized>(&mut self, mapper: &mut M, value: u8) -> Result<(), AccessError> {
        mapper.write(self.stack_addr(), value)?;
        self.sp.set(self.sp.get().wrapping_sub(1));
        Ok(())
    }

    pub fn pop_u8<M: Mapper + ?Sized>(&mut self, mapper: &M) -> Result<u8, AccessError> {
        self.sp.set(self.sp.get().wrapping_add(1));
        mapper.read(self.stack_addr())
    }

    /// Push a return address low byte first.
    pub fn push_return<M: Mapper + ?Sized>(&mut self, mapper: &mut M, addr: u16) -> Result<(), AccessError> {
        self.push_u8(mapper, addr as u8)?;
        self.push_u8(mapper, (addr >> 8) as u8)
    }

    /// Pull a return address pushed by `push_return` (high byte comes off first).
    pub fn pop_return<M: Mapper + ?Sized>(&mut self, mapper: &M) -> Result<u16, AccessError> {
        let hi = self.pop_u8(mapper)? as u16;
        let lo = self.pop_u8(mapper)? as u16;
        Ok((hi << 8) | lo)
    }
}
