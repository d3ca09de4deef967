/*!
Mapper subsystem: the `Mapper` trait seen by the CPU and the NROM (mapper 0)
address space behind it.

Memory model:
- One owned arena. The first 64 KiB are the directly addressed space; PRG
  banks of large cartridges follow it, 16 KiB each.
- A page table of sixteen arena offsets, one per 4 KiB page. `addr >> 12`
  selects the page, `addr & 0xFFF` the byte within it.
- Cartridges with one or two PRG banks are copied into $8000-$FFFF (a single
  bank is mirrored at $C000). Larger ones keep their banks in the arena;
  bank 0 starts in the low window and bank 1 in the high window, and
  `switch_bank` repoints four page slots at a time.

A mapper is owned by one session at a time; nothing here locks.
*/

use std::io::Read;

use log::debug;

use crate::cartridge::{Cartridge, PRG_BANK_SIZE};
use crate::config::{Config, MemoryPolicy};
use crate::error::{AccessError, RomError};

// ---------------------------------------------------------------------------
// CPU memory map
// ---------------------------------------------------------------------------

pub const ZERO_PAGE: u16 = 0x0000;
pub const STACK_BASE: u16 = 0x0100;
pub const RAM: u16 = 0x0200;
pub const IO_BLOCK1: u16 = 0x2000;
pub const IO_BLOCK1_LEN: usize = 0x2000;
pub const IO_BLOCK2: u16 = 0x4000;
pub const IO_BLOCK2_LEN: usize = 0x20;
pub const SOUND_ENABLE: u16 = 0x4015;
pub const JOYSTICK1: u16 = 0x4016;
pub const JOYSTICK2: u16 = 0x4017;
pub const SRAM: u16 = 0x6000;
pub const PRG_ROM: u16 = 0x8000;
pub const PRG_ROM_HIGH: u16 = 0xC000;
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const BRK_VECTOR: u16 = 0xFFFE;

pub const ADDRESS_SPACE: usize = 0x10000;
pub const PAGE_SIZE: usize = 0x1000;
pub const PAGE_COUNT: usize = 16;

const PAGES_PER_BANK: usize = PRG_BANK_SIZE / PAGE_SIZE;
const MIRROR_STRIDE: u16 = 0x0800;
/// Idle pattern of the joystick latches.
const JOYSTICK_IDLE: u8 = 0x80;
/// All five sound channels enabled.
const ALL_CHANNELS: u8 = 0x1F;

/// 16 KiB PRG window a bank can be switched into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PrgWindow {
    /// $8000-$BFFF
    Low,
    /// $C000-$FFFF
    High,
}

impl PrgWindow {
    fn first_page(self) -> usize {
        match self {
            Self::Low => (PRG_ROM as usize) / PAGE_SIZE,
            Self::High => (PRG_ROM_HIGH as usize) / PAGE_SIZE,
        }
    }
}

/// Byte-granular view of the CPU address space.
///
/// `read` has no side effects; both accessors may refuse an address when the
/// mapper's policy says so. `peek` bypasses policy for tooling and tracing.
pub trait Mapper {
    /// Mapper numeric identifier (0 for NROM).
    fn mapper_id(&self) -> u16;

    fn read(&self, addr: u16) -> Result<u8, AccessError>;

    fn write(&mut self, addr: u16, value: u8) -> Result<(), AccessError>;

    fn peek(&self, addr: u16) -> u8;

    /// Little-endian word at `addr`, `addr + 1` (wrapping at $FFFF).
    fn read_word(&self, addr: u16) -> Result<u16, AccessError> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Map PRG bank `bank` into `window`. Mappers without switchable banks refuse.
    fn switch_bank(&mut self, bank: usize, _window: PrgWindow) -> Result<(), AccessError> {
        Err(AccessError::BankOutOfRange { bank, available: 0 })
    }
}

/// Mapper numbers this crate can build.
pub fn is_supported(mapper_id: u16) -> bool {
    mapper_id == 0
}

/// Read an iNES stream and build its mapper in one step.
pub fn load<R: Read>(reader: R, config: &Config) -> Result<Box<dyn Mapper>, RomError> {
    Cartridge::from_ines_reader(reader, &config.cartridge)?.into_mapper(config.memory)
}

/// NROM (mapper 0) address space.
#[derive(Clone)]
pub struct Nrom {
    arena: Vec<u8>,
    pages: [usize; PAGE_COUNT],
    bank_count: usize,
    policy: MemoryPolicy,
}

impl std::fmt::Debug for Nrom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nrom")
            .field("pages", &self.pages)
            .field("bank_count", &self.bank_count)
            .field("policy", &self.policy)
            .finish()
    }
}

impl Nrom {
    /// Build the address space from PRG banks (16 KiB each).
    pub fn new(prg_banks: Vec<Vec<u8>>, policy: MemoryPolicy) -> Self {
        let mut nrom = Self {
            arena: vec![0; ADDRESS_SPACE],
            pages: std::array::from_fn(|i| i * PAGE_SIZE),
            bank_count: 0,
            policy,
        };
        nrom.power_on_io();

        if prg_banks.len() > 2 {
            for bank in &prg_banks {
                let start = nrom.arena.len();
                nrom.arena.resize(start + PRG_BANK_SIZE, 0);
                let n = bank.len().min(PRG_BANK_SIZE);
                nrom.arena[start..start + n].copy_from_slice(&bank[..n]);
            }
            nrom.bank_count = prg_banks.len();
            nrom.map_bank(0, PrgWindow::Low);
            nrom.map_bank(1, PrgWindow::High);
        } else {
            let low = PRG_ROM as usize;
            let high = PRG_ROM_HIGH as usize;
            if let Some(first) = prg_banks.first() {
                let n = first.len().min(PRG_BANK_SIZE);
                nrom.arena[low..low + n].copy_from_slice(&first[..n]);
                // Second bank, or the first one mirrored.
                let upper = prg_banks.get(1).unwrap_or(first);
                let n = upper.len().min(PRG_BANK_SIZE);
                nrom.arena[high..high + n].copy_from_slice(&upper[..n]);
            }
        }
        nrom
    }

    /// An empty address space with no cartridge data, for tools and tests.
    pub fn blank(policy: MemoryPolicy) -> Self {
        Self::new(Vec::new(), policy)
    }

    fn power_on_io(&mut self) {
        let io1 = IO_BLOCK1 as usize;
        let io2 = IO_BLOCK2 as usize;
        self.arena[io1..io1 + IO_BLOCK1_LEN].fill(0);
        self.arena[io2..io2 + IO_BLOCK2_LEN].fill(0);
        self.arena[JOYSTICK1 as usize] = JOYSTICK_IDLE;
        self.arena[JOYSTICK2 as usize] = JOYSTICK_IDLE;
        self.arena[SOUND_ENABLE as usize] = ALL_CHANNELS;
    }

    fn map_bank(&mut self, bank: usize, window: PrgWindow) {
        let base = ADDRESS_SPACE + bank * PRG_BANK_SIZE;
        let first = window.first_page();
        for i in 0..PAGES_PER_BANK {
            self.pages[first + i] = base + i * PAGE_SIZE;
        }
    }

    #[inline]
    fn offset(&self, addr: u16) -> usize {
        self.pages[(addr >> 12) as usize] + (addr as usize & (PAGE_SIZE - 1))
    }

    /// Store without consulting the policy (program loading, test fixtures).
    pub fn poke(&mut self, addr: u16, value: u8) {
        let at = self.offset(addr);
        self.arena[at] = value;
    }

    /// Copy `bytes` starting at `addr`, bypassing the policy. Wraps at $FFFF.
    pub fn load_bytes(&mut self, addr: u16, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            self.poke(addr.wrapping_add(i as u16), b);
        }
    }

    // -------------- Accessors --------------

    /// The directly addressed 64 KiB store (bank-switched PRG is not in here).
    pub fn memory(&self) -> &[u8] {
        &self.arena[..ADDRESS_SPACE]
    }

    /// PRG bank `index` when the cartridge is bank switched.
    pub fn bank(&self, index: usize) -> Option<&[u8]> {
        if index >= self.bank_count {
            return None;
        }
        let start = ADDRESS_SPACE + index * PRG_BANK_SIZE;
        Some(&self.arena[start..start + PRG_BANK_SIZE])
    }

    /// Number of switchable PRG banks (0 for directly mapped cartridges).
    pub fn bank_count(&self) -> usize {
        self.bank_count
    }

    /// Arena offset backing each 4 KiB page.
    pub fn page_offsets(&self) -> &[usize; PAGE_COUNT] {
        &self.pages
    }

    pub fn policy(&self) -> &MemoryPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: MemoryPolicy) {
        self.policy = policy;
    }
}

impl Mapper for Nrom {
    fn mapper_id(&self) -> u16 {
        0
    }

    fn read(&self, addr: u16) -> Result<u8, AccessError> {
        if self.policy.rejects_read(addr) {
            debug!("refused read of write-only ${addr:04X}");
            return Err(AccessError::BadRead(addr));
        }
        Ok(self.arena[self.offset(addr)])
    }

    fn write(&mut self, addr: u16, value: u8) -> Result<(), AccessError> {
        if self.policy.rejects_write(addr) {
            debug!("refused write of ${value:02X} to ${addr:04X}");
            return Err(AccessError::BadWrite(addr));
        }
        if self.policy.stack_mirror && addr < IO_BLOCK1 {
            let base = addr & (MIRROR_STRIDE - 1);
            for k in 0..4 {
                self.poke(base + k * MIRROR_STRIDE, value);
            }
        } else {
            self.poke(addr, value);
        }
        Ok(())
    }

    fn peek(&self, addr: u16) -> u8 {
        self.arena[self.offset(addr)]
    }

    fn switch_bank(&mut self, bank: usize, window: PrgWindow) -> Result<(), AccessError> {
        if bank >= self.bank_count {
            return Err(AccessError::BankOutOfRange {
                bank,
                available: self.bank_count,
            });
        }
        debug!("PRG bank {bank} -> {window:?} window");
        self.map_bank(bank, window);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReadOnlyLevel;
    use crate::test_utils::{build_ines, numbered_banks};

    fn setup(prg_16k: usize) -> Nrom {
        let data = build_ines(prg_16k, 1, 0, 0, 1, None);
        Cartridge::from_ines_bytes(&data)
            .and_then(|c| c.into_nrom(MemoryPolicy::default()))
            .expect("nrom")
    }

    #[test]
    fn power_on_io_state() {
        let m = setup(1);
        assert_eq!(m.peek(JOYSTICK1), 0x80);
        assert_eq!(m.peek(JOYSTICK2), 0x80);
        assert_eq!(m.peek(SOUND_ENABLE), 0x1F);
        assert_eq!(m.peek(0x2000), 0);
        assert_eq!(m.peek(0x4000), 0);
    }

    #[test]
    fn single_bank_is_mirrored() {
        let mut bank = vec![0u8; PRG_BANK_SIZE];
        bank[0] = 0x20;
        bank[0x20] = 0x01;
        bank[PRG_BANK_SIZE - 1] = 0xFF;
        let m = Nrom::new(vec![bank], MemoryPolicy::default());
        for base in [0x8000usize, 0xC000] {
            assert_eq!(m.memory()[base], 0x20);
            assert_eq!(m.memory()[base + 0x20], 0x01);
            assert_eq!(m.memory()[base + PRG_BANK_SIZE - 1], 0xFF);
        }

        let m = setup(1);
        assert_eq!(m.memory()[0x8000], m.memory()[0xC000]);
        assert_eq!(m.memory()[0xBFFF], m.memory()[0xFFFF]);
        assert_eq!(m.bank_count(), 0);
        assert!(m.bank(0).is_none());
    }

    #[test]
    fn two_banks_map_directly() {
        let m = Nrom::new(numbered_banks(2), MemoryPolicy::default());
        assert_eq!(m.read(0x8000), Ok(0));
        assert_eq!(m.read(0xBFFF), Ok(0));
        assert_eq!(m.read(0xC000), Ok(1));
        assert_eq!(m.read(0xFFFF), Ok(1));
    }

    #[test]
    fn many_banks_start_with_zero_and_one() {
        let m = Nrom::new(numbered_banks(4), MemoryPolicy::default());
        assert_eq!(m.bank_count(), 4);
        assert_eq!(m.read(0x8000), Ok(0));
        assert_eq!(m.read(0xC000), Ok(1));
        assert_eq!(m.bank(3).map(|b| b[0x3FFF]), Some(3));
        for (i, off) in m.page_offsets().iter().enumerate() {
            assert!(off + PAGE_SIZE <= ADDRESS_SPACE + 4 * PRG_BANK_SIZE, "page {i}");
        }
    }

    #[test]
    fn switch_bank_repoints_four_pages() {
        let mut m = Nrom::new(numbered_banks(4), MemoryPolicy::default());
        m.switch_bank(3, PrgWindow::Low).expect("switch");
        assert_eq!(m.read(0x8000), Ok(3));
        assert_eq!(m.read(0xBFFF), Ok(3));
        assert_eq!(m.read(0xC000), Ok(1));

        m.switch_bank(2, PrgWindow::High).expect("switch");
        assert_eq!(m.read(0xFFFE), Ok(2));

        let err = m.switch_bank(4, PrgWindow::Low).unwrap_err();
        assert_eq!(err, AccessError::BankOutOfRange { bank: 4, available: 4 });
    }

    #[test]
    fn direct_mapped_cartridge_cannot_switch() {
        let mut m = setup(2);
        assert!(m.switch_bank(0, PrgWindow::Low).is_err());
    }

    #[test]
    fn write_then_read_zero_page() {
        let mut m = setup(1);
        m.write(ZERO_PAGE, 22).expect("write");
        assert_eq!(m.read(ZERO_PAGE), Ok(22));
        assert_eq!(m.memory()[0], 22);
    }

    #[test]
    fn stack_mirror_writes_all_four_images() {
        let mut m = setup(1);
        m.write(0x0010, 15).expect("write");
        for addr in [0x0010u16, 0x0810, 0x1010, 0x1810] {
            assert_eq!(m.memory()[addr as usize], 15);
        }
        // Writing through a high mirror lands in the same four cells.
        m.write(0x1825, 7).expect("write");
        for addr in [0x0025u16, 0x0825, 0x1025, 0x1825] {
            assert_eq!(m.read(addr), Ok(7));
        }
        // I/O space is not mirrored.
        m.write(0x2000, 9).expect("write");
        assert_eq!(m.memory()[0x2800], 0);
    }

    #[test]
    fn stack_mirror_can_be_disabled() {
        let policy = MemoryPolicy {
            stack_mirror: false,
            ..MemoryPolicy::default()
        };
        let mut m = Nrom::blank(policy);
        m.write(0x0010, 15).expect("write");
        assert_eq!(m.memory()[0x0810], 0);
    }

    #[test]
    fn read_only_policy_refuses_rom_writes() {
        let mut m = setup(1);
        m.set_policy(MemoryPolicy {
            read_only: ReadOnlyLevel::Minimum,
            ..MemoryPolicy::default()
        });
        assert_eq!(m.write(0x8002, 95), Err(AccessError::BadWrite(0x8002)));
        assert_eq!(m.write(0x5000, 1), Err(AccessError::BadWrite(0x5000)));
        assert!(m.write(0x2002, 1).is_ok());
        assert!(m.write(0x6000, 1).is_ok());

        m.set_policy(MemoryPolicy {
            read_only: ReadOnlyLevel::Strict,
            ..MemoryPolicy::default()
        });
        assert_eq!(m.write(0x2002, 5), Err(AccessError::BadWrite(0x2002)));
    }

    #[test]
    fn write_only_policy_refuses_register_reads() {
        let mut m = setup(1);
        m.set_policy(MemoryPolicy {
            write_only_reads: true,
            ..MemoryPolicy::default()
        });
        assert_eq!(m.read(0x2000), Err(AccessError::BadRead(0x2000)));
        assert_eq!(m.read(0x4014), Err(AccessError::BadRead(0x4014)));
        assert_eq!(m.read(0x4016), Ok(0x80));
        // peek ignores the policy.
        assert_eq!(m.peek(0x2000), 0);
    }

    #[test]
    fn read_word_is_little_endian() {
        let mut m = Nrom::blank(MemoryPolicy::default());
        m.load_bytes(0xFFFC, &[0x34, 0x12]);
        assert_eq!(m.read_word(RESET_VECTOR), Ok(0x1234));
    }

    #[test]
    fn load_builds_boxed_mapper() {
        let data = build_ines(1, 1, 0, 0, 1, None);
        let m = load(std::io::Cursor::new(data), &Config::default()).expect("load");
        assert_eq!(m.mapper_id(), 0);
        assert_eq!(m.read(0x8000), Ok(0xAA));
        assert_eq!(m.read(0xC000), Ok(0xAA));
    }

    #[test]
    fn load_rejects_short_stream() {
        let err = load(std::io::Cursor::new(vec![0u8; 64]), &Config::default())
            .err()
            .expect("short stream must be rejected");
        assert!(matches!(err, RomError::TooSmall { len: 64 }));
    }
}
