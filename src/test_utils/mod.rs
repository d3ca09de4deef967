//! Shared test utilities: iNES image builders and program loaders.
//!
//! Notes on iNES header fields used here:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units
//! - byte 6 = control byte 1 (mirroring, battery, trainer, mapper low nibble)
//! - byte 7 = control byte 2 (reserved bits, NES 2.0 signature, mapper high nibble)
//! - byte 8 = PRG RAM size in 8 KiB units
//! - byte 9 = video standard, bytes 10..16 = fill (zero)
//!
//! Program loaders write with `Nrom::poke`, so they ignore the memory policy
//! and the stack mirror.

#![allow(dead_code)]

use crate::cpu::cycles::base_cycles;
use crate::cpu::dispatch::{self, Outcome};
use crate::cpu::opcodes::{
    AMODE_ABS, AMODE_ABS_X, AMODE_ABS_Y, AMODE_IMMED, AMODE_ZPAGE, AMODE_ZPAGE_IND_X, AMODE_ZPAGE_IND_Y,
    AMODE_ZPAGE_X,
};
use crate::cpu::state::CpuState;
use crate::cpu::table::descriptor;
use crate::mapper::{Mapper, Nrom};

/// Build a minimal iNES (v1) image.
///
/// - `prg_16k`: number of 16 KiB PRG units, filled with 0xAA
/// - `chr_8k`: number of 8 KiB CHR units, filled with 0xCC
/// - `flags6` / `flags7`: control bytes 1 and 2
/// - `prg_ram_8k`: PRG RAM size in 8 KiB units
/// - `trainer`: optional 512-byte trainer inserted after the header
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    prg_ram_8k: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(16 + trainer.map_or(0, |_| 512) + prg_16k * 0x4000 + chr_8k * 0x2000);

    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.push(prg_ram_8k);
    bytes.extend_from_slice(&[0u8; 7]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    bytes.resize(bytes.len() + prg_16k * 0x4000, 0xAA);
    bytes.resize(bytes.len() + chr_8k * 0x2000, 0xCC);
    bytes
}

/// One-bank NROM image with `prg` at the start of PRG and vectors set.
///
/// `vectors` is (reset, nmi, irq); all default to $8000.
pub fn build_nrom_with_prg(prg: &[u8], chr_8k: usize, prg_ram_8k: u8, vectors: Option<(u16, u16, u16)>) -> Vec<u8> {
    assert!(prg.len() <= 0x4000, "program must fit within a 16 KiB PRG bank");

    let mut rom = build_ines(1, chr_8k, 0, 0, prg_ram_8k, None);
    let prg_start = 16;
    let prg_end = prg_start + 0x4000;
    rom[prg_start..prg_start + prg.len()].copy_from_slice(prg);

    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(&mut rom[prg_start..prg_end], reset, nmi, irq);
    rom
}

/// Write NMI, RESET and IRQ/BRK vectors at the end of a 16 or 32 KiB PRG slice.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = match prg.len() {
        0x4000 => 0x3FFA,
        0x8000 => 0x7FFA,
        other => panic!("unsupported PRG length for vector placement: {other} bytes"),
    };
    write_le_u16(prg, base, nmi);
    write_le_u16(prg, base + 2, reset);
    write_le_u16(prg, base + 4, irq);
}

#[inline]
pub fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = value as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

/// `n` PRG banks, bank `i` filled with the byte `i`.
pub fn numbered_banks(n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| vec![i as u8; 0x4000]).collect()
}

/// Write `op` `count` times starting at `start`, `inc` bytes apart.
pub fn write_op(m: &mut Nrom, op: u8, start: u16, count: usize, inc: u16) {
    assert!(count > 0 && inc > 0);
    let mut addr = start;
    for _ in 0..count {
        m.poke(addr, op);
        addr = addr.wrapping_add(inc);
    }
}

/// Write a byte pattern once at `start`.
pub fn write_pattern(m: &mut Nrom, pattern: &[u8], start: u16) {
    m.load_bytes(start, pattern);
}

/// Sum of the table costs of `ops`.
pub fn count_ticks(ops: &[u8]) -> i32 {
    ops.iter().map(|&op| base_cycles(op)).sum()
}

/// Fetch and execute one instruction at PC.
pub(crate) fn step<M: Mapper + ?Sized>(cpu: &mut CpuState, mapper: &mut M) -> Outcome {
    let op = mapper.read(cpu.pc()).expect("opcode fetch");
    cpu.advance_pc(1);
    dispatch::execute(descriptor(op), cpu, mapper).expect("execute")
}

/// Group-1 addressing mode bits in the order `cc01_fixture` lays them out.
pub const CC01_MODES: [u8; 8] = [
    AMODE_ZPAGE_IND_X,
    AMODE_ZPAGE,
    AMODE_IMMED,
    AMODE_ABS,
    AMODE_ZPAGE_IND_Y,
    AMODE_ZPAGE_X,
    AMODE_ABS_Y,
    AMODE_ABS_X,
];

/// Lay out `op` once in each group-1 mode at $8000..$8013. Every form reads
/// the value 0x0F with X = Y = 1:
///
/// - ($02,X) -> pointer at $03 -> $0000
/// - $01, #$0F, $0001
/// - ($02),Y -> pointer at $02 ($0000) + 1
/// - $00,X / $0000,Y / $0000,X
pub fn cc01_fixture(m: &mut Nrom, cpu: &mut CpuState, op: u8) {
    #[rustfmt::skip]
    let program = [
        AMODE_ZPAGE_IND_X | op, 0x02,
        AMODE_ZPAGE | op, 0x01,
        AMODE_IMMED | op, 0x0F,
        AMODE_ABS | op, 0x01, 0x00,
        AMODE_ZPAGE_IND_Y | op, 0x02,
        AMODE_ZPAGE_X | op, 0x00,
        AMODE_ABS_Y | op, 0x00, 0x00,
        AMODE_ABS_X | op, 0x00, 0x00,
    ];
    m.load_bytes(0x8000, &program);
    m.load_bytes(0x0000, &[0x0F, 0x0F, 0x00, 0x00, 0x00]);
    cpu.set_pc(0x8000);
    cpu.set_x(0x01);
    cpu.set_y(0x01);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryPolicy;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom[8], 1);
        assert_eq!(rom.len(), 16 + 2 * 0x4000 + 0x2000);
    }

    #[test]
    fn writes_vectors_for_16k_prg() {
        let mut prg = vec![0u8; 0x4000];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x3FFA..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
    }

    #[test]
    fn writes_vectors_for_32k_prg() {
        let mut prg = vec![0u8; 0x8000];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x7FFA..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
    }

    #[test]
    fn cc01_fixture_is_nineteen_bytes() {
        let mut m = Nrom::blank(MemoryPolicy::default());
        let mut cpu = CpuState::new();
        cc01_fixture(&mut m, &mut cpu, 0xA1);
        assert_eq!(m.memory()[0x8000], 0xA1);
        assert_eq!(m.memory()[0x8010], 0xBD);
        assert_eq!(m.memory()[0x8012], 0x00);
        assert_eq!(count_ticks(&[0xEA, 0xEA]), 4);
    }
}
