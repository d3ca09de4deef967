/*!
Cartridge: iNES image parsing and validation, and construction of the mapper.

Features:
- Parse the 16-byte iNES header from bytes, any `Read` stream or a file path
- Validate it (size, tag, reserved bits, trainer, PRG count, video standard,
  fill bytes, mapper number), failing with a typed `RomError`
- Split PRG-ROM into 16 KiB banks; keep CHR-ROM as-is (not used by the CPU core)
- Build the mapper for the declared mapper number (only NROM / mapper 0)

Header layout:
- bytes[0..4] = b"NES\x1A"
- byte 4  = PRG-ROM bank count (16 KiB units; 0 read as 1 by default)
- byte 5  = CHR-ROM bank count (8 KiB units)
- byte 6  = control 1: mirroring, battery, trainer, four-screen, mapper low nibble
- byte 7  = control 2: VS, PlayChoice, reserved bits 1-3 (must be zero), mapper high nibble
- byte 8  = RAM bank count (0 read as 1)
- byte 9  = video standard (0 NTSC, 1 PAL)
- bytes 10..16 = fill, zero unless NES 2.0
*/

use std::fs;
use std::io::Read;
use std::path::Path;

use log::{info, warn};

use crate::config::{CartridgePolicy, MemoryPolicy};
use crate::error::RomError;
use crate::mapper::{self, Mapper, Nrom};

pub const HEADER_LEN: usize = 16;
pub const TRAINER_LEN: usize = 512;
/// PRG-ROM bank size.
pub const PRG_BANK_SIZE: usize = 0x4000;
/// CHR-ROM bank size.
pub const CHR_BANK_SIZE: usize = 0x2000;
/// Smallest image worth parsing: header, one PRG bank, one CHR bank.
pub const MIN_IMAGE_LEN: usize = HEADER_LEN + PRG_BANK_SIZE + CHR_BANK_SIZE;

const TAG: &[u8; 4] = b"NES\x1A";
const RESERVED_BITS: u8 = 0x0E;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VideoStandard {
    Ntsc,
    Pal,
}

/// Raw header fields after the 0 -> 1 adjustments.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InesHeader {
    pub prg_banks: u8,
    pub chr_banks: u8,
    pub control1: u8,
    pub control2: u8,
    pub ram_banks: u8,
    pub video_standard: u8,
    pub fill: [u8; 6],
}

impl InesHeader {
    /// Mapper number from the high nibbles of both control bytes.
    pub fn mapper_id(&self) -> u16 {
        ((self.control1 >> 4) | (self.control2 & 0xF0)) as u16
    }

    pub fn has_trainer(&self) -> bool {
        self.control1 & 0x04 != 0
    }

    pub fn is_nes2(&self) -> bool {
        self.control2 & 0x0C == 0x08
    }
}

pub struct Cartridge {
    header: InesHeader,
    prg_banks: Vec<Vec<u8>>,
    chr: Vec<u8>,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id())
            .field("mirroring", &self.mirroring())
            .field("video_standard", &self.video_standard())
            .field("prg_banks", &self.prg_banks.len())
            .field("chr_len", &self.chr.len())
            .field("ram_banks", &self.header.ram_banks)
            .finish()
    }
}

impl Cartridge {
    // -------------- Construction --------------

    /// Parse an in-memory iNES image with the default policy.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, RomError> {
        Self::parse(data, &CartridgePolicy::default())
    }

    /// Read a whole iNES stream, then parse it.
    pub fn from_ines_reader<R: Read>(
        mut reader: R,
        policy: &CartridgePolicy,
    ) -> Result<Self, RomError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::parse(&data, policy)
    }

    /// Load an iNES file (.nes).
    pub fn from_ines_file<P: AsRef<Path>>(
        path: P,
        policy: &CartridgePolicy,
    ) -> Result<Self, RomError> {
        let data = fs::read(path)?;
        Self::parse(&data, policy)
    }

    /// Validate and split an image. Nothing is built unless every check passes.
    pub fn parse(data: &[u8], policy: &CartridgePolicy) -> Result<Self, RomError> {
        match Self::parse_inner(data, policy) {
            Ok(cart) => {
                info!(
                    "cartridge accepted: mapper {}, {} PRG bank(s), {} CHR bank(s), {:?}",
                    cart.mapper_id(),
                    cart.prg_banks.len(),
                    cart.header.chr_banks,
                    cart.video_standard()
                );
                Ok(cart)
            }
            Err(err) => {
                warn!("cartridge rejected: {err}");
                Err(err)
            }
        }
    }

    fn parse_inner(data: &[u8], policy: &CartridgePolicy) -> Result<Self, RomError> {
        if data.len() < MIN_IMAGE_LEN {
            return Err(RomError::TooSmall { len: data.len() });
        }
        if &data[0..4] != TAG {
            return Err(RomError::BadTag);
        }

        let mut header = InesHeader {
            prg_banks: data[4],
            chr_banks: data[5],
            control1: data[6],
            control2: data[7],
            ram_banks: data[8],
            video_standard: data[9],
            fill: [0; 6],
        };
        header.fill.copy_from_slice(&data[10..HEADER_LEN]);

        if header.control2 & RESERVED_BITS != 0 {
            return Err(RomError::ReservedBits);
        }
        if header.ram_banks == 0 {
            header.ram_banks = 1;
        }

        let mut offset = HEADER_LEN;
        if header.has_trainer() {
            if policy.reject_trainer {
                return Err(RomError::TrainerUsed);
            }
            offset += TRAINER_LEN;
        }

        if header.prg_banks == 0 {
            if !policy.zero_prg_as_one {
                return Err(RomError::NoPrgBanks);
            }
            header.prg_banks = 1;
        }

        if header.video_standard > 1 {
            return Err(RomError::BadVideoStandard(header.video_standard));
        }
        // NES 2.0 headers are already refused by the reserved-bit check.
        if !header.is_nes2() && header.fill.iter().any(|&b| b != 0) {
            return Err(RomError::BadFill);
        }

        let mapper_id = header.mapper_id();
        if !mapper::is_supported(mapper_id) {
            return Err(RomError::UnsupportedMapper(mapper_id));
        }

        let mut prg_banks = Vec::with_capacity(header.prg_banks as usize);
        for _ in 0..header.prg_banks {
            let bank = data
                .get(offset..offset + PRG_BANK_SIZE)
                .ok_or(RomError::TooSmall { len: data.len() })?;
            prg_banks.push(bank.to_vec());
            offset += PRG_BANK_SIZE;
        }

        // CHR is carried along but not required to be complete.
        let chr_end = (offset + header.chr_banks as usize * CHR_BANK_SIZE).min(data.len());
        let chr = data[offset.min(chr_end)..chr_end].to_vec();

        Ok(Self {
            header,
            prg_banks,
            chr,
        })
    }

    /// Build the mapper this cartridge declares.
    pub fn into_mapper(self, policy: MemoryPolicy) -> Result<Box<dyn Mapper>, RomError> {
        match self.mapper_id() {
            0 => Ok(Box::new(Nrom::new(self.prg_banks, policy))),
            other => Err(RomError::UnsupportedMapper(other)),
        }
    }

    /// Build an NROM mapper directly, for callers that need its accessors.
    pub fn into_nrom(self, policy: MemoryPolicy) -> Result<Nrom, RomError> {
        match self.mapper_id() {
            0 => Ok(Nrom::new(self.prg_banks, policy)),
            other => Err(RomError::UnsupportedMapper(other)),
        }
    }

    // -------------- Accessors --------------

    pub fn header(&self) -> &InesHeader {
        &self.header
    }

    pub fn mapper_id(&self) -> u16 {
        self.header.mapper_id()
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.header.control1 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if self.header.control1 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    pub fn battery_backed(&self) -> bool {
        self.header.control1 & 0x02 != 0
    }

    pub fn video_standard(&self) -> VideoStandard {
        if self.header.video_standard == 1 {
            VideoStandard::Pal
        } else {
            VideoStandard::Ntsc
        }
    }

    pub fn prg_bank_count(&self) -> usize {
        self.prg_banks.len()
    }

    pub fn chr_bank_count(&self) -> usize {
        self.header.chr_banks as usize
    }

    pub fn ram_bank_count(&self) -> usize {
        self.header.ram_banks as usize
    }

    pub fn prg_bank(&self, index: usize) -> Option<&[u8]> {
        self.prg_banks.get(index).map(Vec::as_slice)
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr
    }
}
