/*!
Error types shared by the cartridge loader, the mapper and the configuration layer.

Two families are kept apart on purpose:
- `RomError`: the image was rejected before any mapper existed.
- `AccessError`: a single read or write broke the active memory policy. It is
  raised at the point of access and bubbles out of `Emulator::run` unchanged.

Fatal CPU conditions (lock opcode, unknown opcode) are not errors in this
sense; they latch into `emulator::ErrorState` and are queried afterwards.
*/

use std::fmt;

/// Reason a cartridge image could not be turned into a mapper.
#[derive(Debug)]
pub enum RomError {
    /// The byte stream could not be read.
    Io(std::io::Error),
    /// Image shorter than header + one PRG bank + one CHR bank, or shorter
    /// than the PRG data its header declares.
    TooSmall { len: usize },
    /// The first four bytes are not `NES\x1A`.
    BadTag,
    /// Reserved bits of control byte 2 are set.
    ReservedBits,
    /// Video standard byte is neither NTSC (0) nor PAL (1).
    BadVideoStandard(u8),
    /// Fill bytes are nonzero on a non NES 2.0 image.
    BadFill,
    TrainerUsed,
    NoPrgBanks,
    UnsupportedMapper(u16),
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "unable to read ROM image ({err})"),
            Self::TooSmall { len } => write!(f, "ROM is too small ({len} bytes)."),
            Self::BadTag => write!(f, "A proper NES[\\x1A] tag is not present in the ROM header."),
            Self::ReservedBits => write!(f, "Nonzero value(s) in reserved space."),
            Self::BadVideoStandard(v) => write!(
                f,
                "Invalid video standard specified [NTSC(0)/PAL(1)], got {v}."
            ),
            Self::BadFill => write!(f, "Nonzero value(s) in fill space."),
            Self::TrainerUsed => write!(
                f,
                "This ROM uses a trainer. Trainers are not supported at this time."
            ),
            Self::NoPrgBanks => write!(f, "This NES ROM lists 0 PRG-ROM banks."),
            Self::UnsupportedMapper(id) => {
                write!(f, "This NES ROM uses an unsupported mapper ({id}).")
            }
        }
    }
}

impl std::error::Error for RomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// A memory access rejected by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// Write into a protected region.
    BadWrite(u16),
    /// Read of a write-only register.
    BadRead(u16),
    /// `switch_bank` named a PRG bank the cartridge does not have.
    BankOutOfRange { bank: usize, available: usize },
}

impl AccessError {
    /// Offending CPU address, if the error came from a read or write.
    pub fn address(&self) -> Option<u16> {
        match *self {
            Self::BadWrite(addr) | Self::BadRead(addr) => Some(addr),
            Self::BankOutOfRange { .. } => None,
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadWrite(addr) => write!(f, "write to protected address ${addr:04X}"),
            Self::BadRead(addr) => write!(f, "read from write-only address ${addr:04X}"),
            Self::BankOutOfRange { bank, available } => write!(
                f,
                "PRG bank {bank} out of range ({available} banks available)"
            ),
        }
    }
}

impl std::error::Error for AccessError {}

/// Failure loading a `Config`.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "unable to read config file ({err})"),
            Self::Parse(err) => write!(f, "config file parsing error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}
