/*!
execute.rs - ALU and flag engine.

`apply` combines a register cell with an operand and updates the status
word. Read-modify-write operations (shifts, rotates, increment, decrement)
work on the cell in place and ignore the operand; the dispatcher hands them
either the accumulator or the temp register holding a memory byte.

Arithmetic follows the 2A03 binary mode only (no decimal mode):
- ADC: `A + M + C`. Carry is the unsigned wrap of `A + M`, tested as
  `A > (A + M) as u8`; overflow is set when A and M agree in sign and the
  result does not.
- SBC: the same adder fed with `-M` and `-C`, i.e. `A - M - C`. Carry and
  overflow use the negated operand.
- CMP/CPX/CPY: signed difference; carry means `reg >= operand` as signed
  bytes. The register is not written.
*/

use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, Reg8, ZERO};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Or,
    Xor,
    And,
    Add,
    Sub,
    /// Register := operand.
    Load,
    Compare,
    Asl,
    Rol,
    Lsr,
    Ror,
    Inc,
    Dec,
}

#[inline]
pub(crate) fn set_flag(status: &mut u8, mask: u8, on: bool) {
    if on {
        *status |= mask;
    } else {
        *status &= !mask;
    }
}

#[inline]
pub(crate) fn update_zn(status: &mut u8, value: Reg8) {
    set_flag(status, NEGATIVE, value.is_negative());
    set_flag(status, ZERO, value.get() == 0);
}

/// Apply `op` to `reg` with `operand`, updating flags in `status`.
pub(crate) fn apply(op: Operation, status: &mut u8, reg: &mut Reg8, operand: Reg8) {
    match op {
        Operation::Or => {
            reg.set(reg.get() | operand.get());
            update_zn(status, *reg);
        }
        Operation::Xor => {
            reg.set(reg.get() ^ operand.get());
            update_zn(status, *reg);
        }
        Operation::And => {
            reg.set(reg.get() & operand.get());
            update_zn(status, *reg);
        }
        Operation::Add | Operation::Sub => {
            let carry = *status & CARRY;
            let (rhs, carry_in) = if op == Operation::Sub {
                (operand.get().wrapping_neg(), carry.wrapping_neg())
            } else {
                (operand.get(), carry)
            };
            let lhs = reg.get();
            let result = lhs.wrapping_add(rhs).wrapping_add(carry_in);

            set_flag(status, OVERFLOW, (lhs ^ result) & (rhs ^ result) & 0x80 != 0);
            set_flag(status, CARRY, lhs > lhs.wrapping_add(rhs));
            reg.set(result);
            update_zn(status, *reg);
        }
        Operation::Load => {
            *reg = operand;
            update_zn(status, *reg);
        }
        Operation::Compare => {
            let diff = reg.signed().wrapping_sub(operand.signed());
            set_flag(status, ZERO, diff == 0);
            set_flag(status, NEGATIVE, diff < 0);
            set_flag(status, CARRY, reg.signed() >= operand.signed());
        }
        Operation::Asl => {
            let v = reg.get();
            set_flag(status, CARRY, v & 0x80 != 0);
            reg.set(v << 1);
            update_zn(status, *reg);
        }
        Operation::Rol => {
            let v = reg.get();
            let carry_in = *status & CARRY;
            set_flag(status, CARRY, v & 0x80 != 0);
            reg.set((v << 1) | carry_in);
            update_zn(status, *reg);
        }
        Operation::Lsr => {
            let v = reg.get();
            set_flag(status, CARRY, v & 0x01 != 0);
            reg.set(v >> 1);
            update_zn(status, *reg);
        }
        Operation::Ror => {
            let v = reg.get();
            let carry_in = (*status & CARRY) << 7;
            set_flag(status, CARRY, v & 0x01 != 0);
            reg.set((v >> 1) | carry_in);
            update_zn(status, *reg);
        }
        Operation::Inc => {
            reg.set(reg.get().wrapping_add(1));
            update_zn(status, *reg);
        }
        Operation::Dec => {
            reg.set(reg.get().wrapping_sub(1));
            update_zn(status, *reg);
        }
    }
}

/// BIT: Z from `a & operand`, N and V copied from operand bits 7 and 6.
pub(crate) fn bit(status: &mut u8, a: Reg8, operand: Reg8) {
    let m = operand.get();
    set_flag(status, ZERO, a.get() & m == 0);
    set_flag(status, NEGATIVE, m & 0x80 != 0);
    set_flag(status, OVERFLOW, m & 0x40 != 0);
}

/// Transfer `src` into `dst` and set N/Z from the copied value.
#[inline]
pub(crate) fn transfer(status: &mut u8, src: Reg8, dst: &mut Reg8) {
    *dst = src;
    update_zn(status, src);
}
