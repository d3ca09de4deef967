/*!
table.rs - Opcode descriptor table.

Purpose
=======
Every opcode byte maps to one `Descriptor`: mnemonic, addressing mode, what
the dispatcher should do with it (`Kind`) and which decoding rule produced
it (`Group`). The 256 entries are computed at compile time, so the run loop
does a single indexed load per fetch and never re-derives bit fields.

Decoding
========
1. Explicit opcodes first: lock opcodes, both no-op forms, BRK/JSR/RTI/RTS,
   the eight branches and the single-byte register, stack and flag
   instructions.
2. Everything else is split as `aaabbbcc`. `aaa|cc` picks the operation and
   `bbb` the addressing mode; the mode table depends on `cc`:

   | bbb  | cc=01          | cc=10       | cc=00       |
   |------|----------------|-------------|-------------|
   | 000  | (zp,X)         | #imm        | #imm        |
   | 001  | zp             | zp          | zp          |
   | 010  | #imm           | A           | -           |
   | 011  | abs            | abs         | abs         |
   | 100  | (zp),Y         | -           | -           |
   | 101  | zp,X           | zp,X        | zp,X        |
   | 110  | abs,Y          | -           | -           |
   | 111  | abs,X          | abs,X       | abs,X       |

   STX and LDX swap X indexing for Y (zp,Y and abs,Y).
3. A combination the operation does not accept (STA #imm, LDX A, cc=11, ...)
   decodes as `Kind::Unknown`.
*/

use crate::cpu::addressing::AddrMode;
use crate::cpu::execute::Operation;
use crate::cpu::opcodes::*;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, Register, ZERO};

/// Single-byte register, stack and flag instructions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Implied {
    Inx,
    Iny,
    Dex,
    Dey,
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    Pha,
    Php,
    Pla,
    Plp,
    Clc,
    Sec,
    Cli,
    Sei,
    Clv,
    Cld,
    Sed,
}

/// What the dispatcher does with an opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Halts the processor.
    Lock,
    /// Skips `mode.operand_len()` bytes without reading them.
    Nop,
    /// Not a recognised instruction.
    Unknown,
    Implied(Implied),
    /// Branch when `status & flag` is set (`set == true`) or clear.
    Branch { flag: u8, set: bool },
    Brk,
    Jsr,
    Rti,
    Rts,
    Jmp,
    /// ALU operation with a memory or immediate operand into `reg`.
    Read { op: Operation, reg: Register },
    Store(Register),
    /// Read-modify-write on memory or the accumulator.
    Modify(Operation),
    Bit,
}

/// Which decoding rule classified the opcode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Group {
    Explicit,
    Cc00,
    Cc01,
    Cc10,
    Unassigned,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    pub kind: Kind,
    pub group: Group,
}

impl Descriptor {
    const fn new(opcode: u8, mnemonic: &'static str, mode: AddrMode, kind: Kind, group: Group) -> Self {
        Self {
            opcode,
            mnemonic,
            mode,
            kind,
            group,
        }
    }

    const fn explicit(opcode: u8, mnemonic: &'static str, mode: AddrMode, kind: Kind) -> Self {
        Self::new(opcode, mnemonic, mode, kind, Group::Explicit)
    }

    const fn unknown(opcode: u8, group: Group) -> Self {
        Self::new(opcode, "???", AddrMode::Implied, Kind::Unknown, group)
    }

    /// True for opcodes that end execution of the session.
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind, Kind::Lock | Kind::Unknown)
    }
}

/// Descriptor for `opcode`.
#[inline]
pub fn descriptor(opcode: u8) -> &'static Descriptor {
    &DESCRIPTORS[opcode as usize]
}

pub static DESCRIPTORS: [Descriptor; 256] = build_table();

const fn build_table() -> [Descriptor; 256] {
    let mut table = [Descriptor::unknown(0, Group::Unassigned); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
}

const fn contains(list: &[u8], op: u8) -> bool {
    let mut i = 0;
    while i < list.len() {
        if list[i] == op {
            return true;
        }
        i += 1;
    }
    false
}

const fn decode(op: u8) -> Descriptor {
    if contains(&LOCK_OPCODES, op) {
        return Descriptor::explicit(op, "KIL", AddrMode::Implied, Kind::Lock);
    }
    if op == OP_NOP || contains(&SINGLE_NOPS, op) {
        return Descriptor::explicit(op, "NOP", AddrMode::Implied, Kind::Nop);
    }
    if contains(&DOUBLE_NOPS, op) {
        return Descriptor::explicit(op, "DOP", AddrMode::Immediate, Kind::Nop);
    }
    if let Some(d) = decode_explicit(op) {
        return d;
    }
    match op & MASK_CC {
        CC_01 => decode_cc01(op),
        CC_10 => decode_cc10(op),
        CC_00 => decode_cc00(op),
        _ => Descriptor::unknown(op, Group::Unassigned),
    }
}

const fn decode_explicit(op: u8) -> Option<Descriptor> {
    match op {
        OP_BRK => Some(Descriptor::explicit(op, "BRK", AddrMode::Implied, Kind::Brk)),
        OP_JSR => Some(Descriptor::explicit(op, "JSR", AddrMode::Absolute, Kind::Jsr)),
        OP_RTI => Some(Descriptor::explicit(op, "RTI", AddrMode::Implied, Kind::Rti)),
        OP_RTS => Some(Descriptor::explicit(op, "RTS", AddrMode::Implied, Kind::Rts)),

        OP_BPL => branch(op, NEGATIVE, false, "BPL"),
        OP_BMI => branch(op, NEGATIVE, true, "BMI"),
        OP_BVC => branch(op, OVERFLOW, false, "BVC"),
        OP_BVS => branch(op, OVERFLOW, true, "BVS"),
        OP_BCC => branch(op, CARRY, false, "BCC"),
        OP_BCS => branch(op, CARRY, true, "BCS"),
        OP_BNE => branch(op, ZERO, false, "BNE"),
        OP_BEQ => branch(op, ZERO, true, "BEQ"),

        OP_INX => implied(op, Implied::Inx, "INX"),
        OP_INY => implied(op, Implied::Iny, "INY"),
        OP_DEX => implied(op, Implied::Dex, "DEX"),
        OP_DEY => implied(op, Implied::Dey, "DEY"),
        OP_TAX => implied(op, Implied::Tax, "TAX"),
        OP_TAY => implied(op, Implied::Tay, "TAY"),
        OP_TXA => implied(op, Implied::Txa, "TXA"),
        OP_TYA => implied(op, Implied::Tya, "TYA"),
        OP_TSX => implied(op, Implied::Tsx, "TSX"),
        OP_TXS => implied(op, Implied::Txs, "TXS"),
        OP_PHA => implied(op, Implied::Pha, "PHA"),
        OP_PHP => implied(op, Implied::Php, "PHP"),
        OP_PLA => implied(op, Implied::Pla, "PLA"),
        OP_PLP => implied(op, Implied::Plp, "PLP"),
        OP_CLC => implied(op, Implied::Clc, "CLC"),
        OP_SEC => implied(op, Implied::Sec, "SEC"),
        OP_CLI => implied(op, Implied::Cli, "CLI"),
        OP_SEI => implied(op, Implied::Sei, "SEI"),
        OP_CLV => implied(op, Implied::Clv, "CLV"),
        OP_CLD => implied(op, Implied::Cld, "CLD"),
        OP_SED => implied(op, Implied::Sed, "SED"),
        _ => None,
    }
}

const fn implied(op: u8, i: Implied, name: &'static str) -> Option<Descriptor> {
    Some(Descriptor::explicit(op, name, AddrMode::Implied, Kind::Implied(i)))
}

const fn branch(op: u8, flag: u8, set: bool, name: &'static str) -> Option<Descriptor> {
    Some(Descriptor::explicit(op, name, AddrMode::Relative, Kind::Branch { flag, set }))
}

const fn decode_cc01(op: u8) -> Descriptor {
    let mode = match op & MASK_BBB {
        AMODE_ZPAGE_IND_X => AddrMode::IndexedIndirect,
        AMODE_ZPAGE => AddrMode::ZeroPage,
        AMODE_IMMED => AddrMode::Immediate,
        AMODE_ABS => AddrMode::Absolute,
        AMODE_ZPAGE_IND_Y => AddrMode::IndirectIndexed,
        AMODE_ZPAGE_X => AddrMode::ZeroPageX,
        AMODE_ABS_Y => AddrMode::AbsoluteY,
        _ => AddrMode::AbsoluteX,
    };
    let (name, kind) = match op & MASK_AAACC {
        OP_ORA => ("ORA", read(Operation::Or)),
        OP_AND => ("AND", read(Operation::And)),
        OP_EOR => ("EOR", read(Operation::Xor)),
        OP_ADC => ("ADC", read(Operation::Add)),
        OP_STA => {
            if matches!(mode, AddrMode::Immediate) {
                return Descriptor::unknown(op, Group::Cc01);
            }
            ("STA", Kind::Store(Register::A))
        }
        OP_LDA => ("LDA", read(Operation::Load)),
        OP_CMP => ("CMP", read(Operation::Compare)),
        _ => ("SBC", read(Operation::Sub)),
    };
    Descriptor::new(op, name, mode, kind, Group::Cc01)
}

const fn read(op: Operation) -> Kind {
    Kind::Read { op, reg: Register::A }
}

const fn decode_cc10(op: u8) -> Descriptor {
    let aaa = op & MASK_AAACC;
    let y_indexed = aaa == OP_STX || aaa == OP_LDX;
    let mode = match op & MASK_BBB {
        AMODE_IMMED_ALT => AddrMode::Immediate,
        AMODE_ZPAGE => AddrMode::ZeroPage,
        AMODE_ACCUM => AddrMode::Accumulator,
        AMODE_ABS => AddrMode::Absolute,
        AMODE_ZPAGE_X if y_indexed => AddrMode::ZeroPageY,
        AMODE_ZPAGE_X => AddrMode::ZeroPageX,
        AMODE_ABS_X if y_indexed => AddrMode::AbsoluteY,
        AMODE_ABS_X => AddrMode::AbsoluteX,
        _ => return Descriptor::unknown(op, Group::Cc10),
    };

    let (name, kind, accepted) = match aaa {
        OP_ASL => ("ASL", Kind::Modify(Operation::Asl), modify_mode(mode, true)),
        OP_ROL => ("ROL", Kind::Modify(Operation::Rol), modify_mode(mode, true)),
        OP_LSR => ("LSR", Kind::Modify(Operation::Lsr), modify_mode(mode, true)),
        OP_ROR => ("ROR", Kind::Modify(Operation::Ror), modify_mode(mode, true)),
        OP_STX => (
            "STX",
            Kind::Store(Register::X),
            matches!(mode, AddrMode::ZeroPage | AddrMode::Absolute | AddrMode::ZeroPageY),
        ),
        OP_LDX => (
            "LDX",
            Kind::Read { op: Operation::Load, reg: Register::X },
            !matches!(mode, AddrMode::Accumulator),
        ),
        OP_DEC => ("DEC", Kind::Modify(Operation::Dec), modify_mode(mode, false)),
        _ => ("INC", Kind::Modify(Operation::Inc), modify_mode(mode, false)),
    };
    if !accepted {
        return Descriptor::unknown(op, Group::Cc10);
    }
    Descriptor::new(op, name, mode, kind, Group::Cc10)
}

const fn modify_mode(mode: AddrMode, accumulator: bool) -> bool {
    match mode {
        AddrMode::ZeroPage | AddrMode::Absolute | AddrMode::ZeroPageX | AddrMode::AbsoluteX => true,
        AddrMode::Accumulator => accumulator,
        _ => false,
    }
}

const fn decode_cc00(op: u8) -> Descriptor {
    let mode = match op & MASK_BBB {
        AMODE_IMMED_ALT => AddrMode::Immediate,
        AMODE_ZPAGE => AddrMode::ZeroPage,
        AMODE_ABS => AddrMode::Absolute,
        AMODE_ZPAGE_X => AddrMode::ZeroPageX,
        AMODE_ABS_X => AddrMode::AbsoluteX,
        _ => return Descriptor::unknown(op, Group::Cc00),
    };
    let short = matches!(mode, AddrMode::Immediate | AddrMode::ZeroPage | AddrMode::Absolute);

    let (name, kind, accepted) = match op & MASK_AAACC {
        OP_BIT => ("BIT", Kind::Bit, matches!(mode, AddrMode::ZeroPage | AddrMode::Absolute)),
        OP_JMP => ("JMP", Kind::Jmp, op == OP_JMP_ABS),
        OP_JMP_IND => ("JMP", Kind::Jmp, op == OP_JMP_INDIRECT),
        OP_STY => (
            "STY",
            Kind::Store(Register::Y),
            matches!(mode, AddrMode::ZeroPage | AddrMode::Absolute | AddrMode::ZeroPageX),
        ),
        OP_LDY => ("LDY", Kind::Read { op: Operation::Load, reg: Register::Y }, true),
        OP_CPY => ("CPY", Kind::Read { op: Operation::Compare, reg: Register::Y }, short),
        OP_CPX => ("CPX", Kind::Read { op: Operation::Compare, reg: Register::X }, short),
        _ => ("???", Kind::Unknown, false),
    };
    if !accepted {
        return Descriptor::unknown(op, Group::Cc00);
    }
    // JMP (abs) shares bbb=011 with the absolute form.
    let mode = if op == OP_JMP_INDIRECT { AddrMode::Indirect } else { mode };
    Descriptor::new(op, name, mode, kind, Group::Cc00)
}
