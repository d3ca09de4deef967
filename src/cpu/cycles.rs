/*!
cycles.rs - Fixed cycle cost of every opcode.

One 256-entry table, indexed by opcode. Costs assume +1 for branches that
can be taken and ignore page-crossing penalties; the run loop debits exactly
the table value and nothing else. Entries of 1 belong to the lock opcodes.
*/

/// Cycle cost per opcode (row = high nibble, column = low nibble).
#[rustfmt::skip]
pub static OPTICK: [u8; 256] = [
//  0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    7, 6, 1, 8, 3, 3, 5, 5, 3, 2, 2, 2, 4, 4, 6, 6, // 0
    3, 5, 1, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 1
    6, 6, 1, 8, 3, 3, 5, 5, 4, 2, 2, 2, 4, 4, 6, 6, // 2
    3, 5, 1, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 3
    6, 6, 1, 8, 3, 3, 5, 5, 3, 2, 2, 2, 3, 4, 6, 6, // 4
    3, 5, 1, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 5
    6, 6, 1, 8, 3, 3, 5, 5, 4, 2, 2, 2, 5, 4, 6, 6, // 6
    3, 5, 1, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // 7
    2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4, // 8
    3, 6, 1, 6, 4, 4, 4, 4, 2, 5, 2, 2, 5, 5, 5, 5, // 9
    2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4, // A
    3, 5, 1, 5, 4, 4, 4, 4, 2, 4, 2, 4, 4, 4, 4, 4, // B
    2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6, // C
    3, 5, 1, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // D
    2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6, // E
    3, 5, 1, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7, // F
];

/// Cycle cost debited when `op` is fetched.
#[inline]
pub fn base_cycles(op: u8) -> i32 {
    OPTICK[op as usize] as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_costs() {
        assert_eq!(base_cycles(0x00), 7); // BRK
        assert_eq!(base_cycles(0xEA), 2); // NOP
        assert_eq!(base_cycles(0xA9), 2); // LDA #imm
        assert_eq!(base_cycles(0xA1), 6); // LDA (zp,X)
        assert_eq!(base_cycles(0xB1), 5); // LDA (zp),Y
        assert_eq!(base_cycles(0x20), 6); // JSR
        assert_eq!(base_cycles(0x4C), 3); // JMP abs
        assert_eq!(base_cycles(0x6C), 5); // JMP (ind)
        assert_eq!(base_cycles(0x9D), 5); // STA abs,X
        assert_eq!(base_cycles(0x10), 3); // BPL, taken cost
    }

    #[test]
    fn lock_opcodes_cost_one() {
        for op in [0x02u8, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2] {
            assert_eq!(base_cycles(op), 1, "{op:02X}");
        }
    }

    #[test]
    fn every_opcode_costs_something() {
        assert!(OPTICK.iter().all(|&c| (1..=8).contains(&c)));
    }
}
