//! Opcode byte values and the `aaabbbcc` bit-field layout.
//!
//! Most opcodes split into an operation (`aaa` + `cc`, masked by
//! `MASK_AAACC`) and an addressing mode (`bbb`, masked by `MASK_BBB`).
//! The `cc` bits pick the instruction group. Everything else is listed
//! explicitly.

pub const MASK_AAACC: u8 = 0xE3;
pub const MASK_BBB: u8 = 0x1C;
pub const MASK_CC: u8 = 0x03;

pub const CC_00: u8 = 0x00;
pub const CC_01: u8 = 0x01;
pub const CC_10: u8 = 0x02;

// ----- Group cc = 01 -----
pub const OP_ORA: u8 = 0x01;
pub const OP_AND: u8 = 0x21;
pub const OP_EOR: u8 = 0x41;
pub const OP_ADC: u8 = 0x61;
pub const OP_STA: u8 = 0x81;
pub const OP_LDA: u8 = 0xA1;
pub const OP_CMP: u8 = 0xC1;
pub const OP_SBC: u8 = 0xE1;

pub const AMODE_ZPAGE_IND_X: u8 = 0x00;
pub const AMODE_ZPAGE: u8 = 0x04;
pub const AMODE_IMMED: u8 = 0x08;
pub const AMODE_ABS: u8 = 0x0C;
pub const AMODE_ZPAGE_IND_Y: u8 = 0x10;
pub const AMODE_ZPAGE_X: u8 = 0x14;
pub const AMODE_ABS_Y: u8 = 0x18;
pub const AMODE_ABS_X: u8 = 0x1C;

// ----- Group cc = 10 -----
pub const OP_ASL: u8 = 0x02;
pub const OP_ROL: u8 = 0x22;
pub const OP_LSR: u8 = 0x42;
pub const OP_ROR: u8 = 0x62;
pub const OP_STX: u8 = 0x82;
pub const OP_LDX: u8 = 0xA2;
pub const OP_DEC: u8 = 0xC2;
pub const OP_INC: u8 = 0xE2;

/// `bbb` = 000 in groups 00 and 10 is immediate, not (zp,X).
pub const AMODE_IMMED_ALT: u8 = 0x00;
pub const AMODE_ACCUM: u8 = 0x08;

// ----- Group cc = 00 -----
pub const OP_BIT: u8 = 0x20;
pub const OP_JMP: u8 = 0x40;
pub const OP_JMP_IND: u8 = 0x60;
pub const OP_STY: u8 = 0x80;
pub const OP_LDY: u8 = 0xA0;
pub const OP_CPY: u8 = 0xC0;
pub const OP_CPX: u8 = 0xE0;

// ----- Single byte -----
pub const OP_INX: u8 = 0xE8;
pub const OP_INY: u8 = 0xC8;
pub const OP_DEX: u8 = 0xCA;
pub const OP_DEY: u8 = 0x88;
pub const OP_TAX: u8 = 0xAA;
pub const OP_TAY: u8 = 0xA8;
pub const OP_TXA: u8 = 0x8A;
pub const OP_TYA: u8 = 0x98;
pub const OP_TSX: u8 = 0xBA;
pub const OP_TXS: u8 = 0x9A;
pub const OP_PHA: u8 = 0x48;
pub const OP_PHP: u8 = 0x08;
pub const OP_PLA: u8 = 0x68;
pub const OP_PLP: u8 = 0x28;
pub const OP_CLC: u8 = 0x18;
pub const OP_SEC: u8 = 0x38;
pub const OP_CLI: u8 = 0x58;
pub const OP_SEI: u8 = 0x78;
pub const OP_CLV: u8 = 0xB8;
pub const OP_CLD: u8 = 0xD8;
pub const OP_SED: u8 = 0xF8;
pub const OP_NOP: u8 = 0xEA;

// ----- Control flow -----
pub const OP_BRK: u8 = 0x00;
pub const OP_JSR: u8 = 0x20;
pub const OP_RTI: u8 = 0x40;
pub const OP_RTS: u8 = 0x60;
pub const OP_JMP_ABS: u8 = 0x4C;
pub const OP_JMP_INDIRECT: u8 = 0x6C;

pub const OP_BPL: u8 = 0x10;
pub const OP_BMI: u8 = 0x30;
pub const OP_BVC: u8 = 0x50;
pub const OP_BVS: u8 = 0x70;
pub const OP_BCC: u8 = 0x90;
pub const OP_BCS: u8 = 0xB0;
pub const OP_BNE: u8 = 0xD0;
pub const OP_BEQ: u8 = 0xF0;

// ----- Undocumented -----
/// One-byte no-ops.
pub const SINGLE_NOPS: [u8; 6] = [0x1A, 0x3A, 0x5A, 0x7A, 0xDA, 0xFA];
/// Two-byte no-ops: the operand byte is skipped, never read.
pub const DOUBLE_NOPS: [u8; 14] = [
    0x04, 0x14, 0x34, 0x44, 0x54, 0x64, 0x74, 0x80, 0x82, 0x89, 0xC2, 0xD4, 0xE2, 0xF4,
];
/// Opcodes that lock the processor.
pub const LOCK_OPCODES: [u8; 12] = [
    0x02, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2,
];
