/*!
misc.rs - Transfers / Index / Stack / Flag family handler

Handles the single-byte instructions:

Index registers:
  INX (0xE8), INY (0xC8), DEX (0xCA), DEY (0x88)

Transfers:
  TAX (0xAA), TAY (0xA8), TXA (0x8A), TYA (0x98), TSX (0xBA), TXS (0x9A)

Stack:
  PHA (0x48), PLA (0x68), PHP (0x08), PLP (0x28)

Flag operations:
  CLC (0x18), SEC (0x38), CLI (0x58), SEI (0x78),
  CLD (0xD8), SED (0xF8), CLV (0xB8)

Every transfer sets N/Z from the copied value, TXS included. PHP and PLP move
the status byte unchanged; no bits are forced on push.
*/

use crate::cpu::execute::{Operation, apply, transfer, update_zn};
use crate::cpu::state::{CARRY, CpuState, DECIMAL, IRQ_DISABLE, OVERFLOW, Reg8, Register};
use crate::cpu::table::Implied;
use crate::error::AccessError;
use crate::mapper::Mapper;

fn step_index(cpu: &mut CpuState, reg: Register, op: Operation) {
    let (status, cell) = cpu.status_and(reg);
    apply(op, status, cell, Reg8::default());
}

pub(super) fn handle<M: Mapper + ?Sized>(op: Implied, cpu: &mut CpuState, mapper: &mut M) -> Result<(), AccessError> {
    match op {
        Implied::Inx => step_index(cpu, Register::X, Operation::Inc),
        Implied::Iny => step_index(cpu, Register::Y, Operation::Inc),
        Implied::Dex => step_index(cpu, Register::X, Operation::Dec),
        Implied::Dey => step_index(cpu, Register::Y, Operation::Dec),

        Implied::Tax => transfer(&mut cpu.status, cpu.a, &mut cpu.x),
        Implied::Tay => transfer(&mut cpu.status, cpu.a, &mut cpu.y),
        Implied::Txa => transfer(&mut cpu.status, cpu.x, &mut cpu.a),
        Implied::Tya => transfer(&mut cpu.status, cpu.y, &mut cpu.a),
        Implied::Tsx => transfer(&mut cpu.status, cpu.sp, &mut cpu.x),
        Implied::Txs => transfer(&mut cpu.status, cpu.x, &mut cpu.sp),

        Implied::Pha => {
            let a = cpu.a();
            cpu.push_u8(mapper, a)?;
        }
        Implied::Php => {
            let p = cpu.status();
            cpu.push_u8(mapper, p)?;
        }
        Implied::Pla => {
            let v = cpu.pop_u8(mapper)?;
            cpu.a.set(v);
            update_zn(&mut cpu.status, cpu.a);
        }
        Implied::Plp => {
            let v = cpu.pop_u8(mapper)?;
            cpu.set_status(v);
        }

        Implied::Clc => cpu.assign_flag(CARRY, false),
        Implied::Sec => cpu.assign_flag(CARRY, true),
        Implied::Cli => cpu.assign_flag(IRQ_DISABLE, false),
        Implied::Sei => cpu.assign_flag(IRQ_DISABLE, true),
        Implied::Clv => cpu.assign_flag(OVERFLOW, false),
        Implied::Cld => cpu.assign_flag(DECIMAL, false),
        Implied::Sed => cpu.assign_flag(DECIMAL, true),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::MemoryPolicy;
    use crate::cpu::state::{CpuState, NEGATIVE, OVERFLOW, ZERO};
    use crate::mapper::Nrom;
    use crate::test_utils::step;

    fn setup(program: &[u8]) -> (CpuState, Nrom) {
        let mut m = Nrom::blank(MemoryPolicy::default());
        m.load_bytes(0x8000, program);
        (CpuState::new(), m)
    }

    #[test]
    fn index_increment_wraps() {
        // INX; DEY
        let (mut cpu, mut m) = setup(&[0xE8, 0x88]);
        cpu.set_x(0xFF);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.x(), 0);
        assert!(cpu.is_flag_set(ZERO));
        step(&mut cpu, &mut m);
        assert_eq!(cpu.y(), 0xFF);
        assert!(cpu.is_flag_set(NEGATIVE));
        assert!(!cpu.is_flag_set(ZERO));
    }

    #[test]
    fn transfers_sequence() {
        // TAX; TYA; TXA; TAY; TXS; TSX
        let (mut cpu, mut m) = setup(&[0xAA, 0x98, 0x8A, 0xA8, 0x9A, 0xBA]);
        cpu.set_a(5);
        cpu.set_y(3);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.x(), 5);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.a(), 3);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.a(), 5);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.y(), 5);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.sp(), 5);
        assert!(!cpu.is_flag_set(NEGATIVE));
        assert!(!cpu.is_flag_set(ZERO));

        cpu.sp.set_signed(-10);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.x.signed(), -10);
        assert!(cpu.is_flag_set(NEGATIVE));
        assert!(!cpu.is_flag_set(ZERO));
    }

    #[test]
    fn tya_flags_follow_accumulator() {
        // TYA
        let (mut cpu, mut m) = setup(&[0x98]);
        cpu.set_a(0x80);
        cpu.set_y(0x00);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.a(), 0);
        assert!(cpu.is_flag_set(ZERO));
        assert!(!cpu.is_flag_set(NEGATIVE));
    }

    #[test]
    fn stack_push_and_pull() {
        // PHA; PLA; PHP; PLP
        let (mut cpu, mut m) = setup(&[0x48, 0x68, 0x08, 0x28]);
        cpu.set_a(10);
        step(&mut cpu, &mut m);
        assert_eq!(m.memory()[0x01FF], 10);
        assert_eq!(cpu.sp(), 0xFE);

        cpu.a.set_signed(-5);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.a(), 10);
        assert_eq!(cpu.sp(), 0xFF);

        cpu.set_status(ZERO | OVERFLOW);
        step(&mut cpu, &mut m);
        assert_eq!(m.memory()[0x01FF], 0x42);

        cpu.set_status(0);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.status(), 0x42);
    }

    #[test]
    fn pla_sets_zero_flag() {
        // PLA with a zero on the stack
        let (mut cpu, mut m) = setup(&[0x68]);
        cpu.set_a(0x33);
        cpu.set_sp(0xFE);
        step(&mut cpu, &mut m);
        assert_eq!(cpu.a(), 0);
        assert!(cpu.is_flag_set(ZERO));
    }

    #[test]
    fn flag_operations() {
        use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE};
        // SEC; SED; SEI; CLC; CLD; CLI; CLV
        let (mut cpu, mut m) = setup(&[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58, 0xB8]);
        for _ in 0..3 {
            step(&mut cpu, &mut m);
        }
        assert_eq!(cpu.status(), CARRY | DECIMAL | IRQ_DISABLE);
        for _ in 0..3 {
            step(&mut cpu, &mut m);
        }
        assert_eq!(cpu.status(), 0);
        cpu.assign_flag(OVERFLOW, true);
        step(&mut cpu, &mut m);
        assert!(!cpu.is_flag_set(OVERFLOW));
    }
}
