/*!
branches.rs - Relative branch handler (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ)

Each branch tests one status flag for set or clear. When taken, the signed
displacement is added to the address of the next instruction (PC after the
operand byte). Otherwise only the operand byte is skipped.

Timing: the table cost already includes the taken cycle; page crossings are
not charged.
*/

use crate::cpu::state::CpuState;
use crate::error::AccessError;
use crate::mapper::Mapper;

pub(super) fn handle<M: Mapper + ?Sized>(flag: u8, set: bool, cpu: &mut CpuState, mapper: &M) -> Result<(), AccessError> {
    if cpu.is_flag_set(flag) != set {
        cpu.advance_pc(1);
        return Ok(());
    }
    let offset = mapper.read(cpu.pc())? as i8;
    cpu.pc = cpu.pc.wrapping_add(1).wrapping_add(offset as u16);
    Ok(())
}
