/*!
Runtime configuration for the loader and the mapper's memory policy.

Every field has a default, so an empty JSON object (or no file at all) gives
the standard behavior: stack mirroring on, no read-only or write-only
enforcement, trainers rejected and a PRG count of 0 read as 1.

```json
{
  "memory": { "stack_mirror": true, "read_only": "minimum", "write_only_reads": false },
  "cartridge": { "reject_trainer": true, "zero_prg_as_one": true }
}
```
*/

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How strictly writes into read-only regions are refused.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadOnlyLevel {
    /// Every address is writable.
    #[default]
    None,
    /// PRG-ROM ($8000-$FFFF) and expansion ROM ($4020-$5FFF) refuse writes.
    Minimum,
    /// `Minimum` plus the PPU status register at $2002.
    Strict,
}

/// Access policy applied by the mapper on every read and write.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryPolicy {
    /// Replicate writes below $2000 into all four 2 KiB mirrors.
    pub stack_mirror: bool,
    pub read_only: ReadOnlyLevel,
    /// Refuse reads of the write-only PPU/APU registers.
    pub write_only_reads: bool,
}

impl Default for MemoryPolicy {
    fn default() -> Self {
        Self {
            stack_mirror: true,
            read_only: ReadOnlyLevel::None,
            write_only_reads: false,
        }
    }
}

impl MemoryPolicy {
    /// True if a write to `addr` must be refused.
    pub fn rejects_write(&self, addr: u16) -> bool {
        match self.read_only {
            ReadOnlyLevel::None => false,
            ReadOnlyLevel::Minimum => is_rom_region(addr),
            ReadOnlyLevel::Strict => addr == 0x2002 || is_rom_region(addr),
        }
    }

    /// True if a read of `addr` must be refused.
    pub fn rejects_read(&self, addr: u16) -> bool {
        self.write_only_reads && is_write_only_register(addr)
    }
}

#[inline]
fn is_rom_region(addr: u16) -> bool {
    addr >= 0x8000 || (0x4020..=0x5FFF).contains(&addr)
}

#[inline]
fn is_write_only_register(addr: u16) -> bool {
    matches!(addr, 0x2000 | 0x2001 | 0x2003 | 0x2005 | 0x2006 | 0x4000..=0x4014)
}

/// Header checks the loader may relax.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartridgePolicy {
    /// Refuse images carrying a 512-byte trainer. When off, the trainer is skipped.
    pub reject_trainer: bool,
    /// Read a PRG bank count of 0 as 1 (old dumps). When off, such images are refused.
    pub zero_prg_as_one: bool,
}

impl Default for CartridgePolicy {
    fn default() -> Self {
        Self {
            reject_trainer: true,
            zero_prg_as_one: true,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub memory: MemoryPolicy,
    pub cartridge: CartridgePolicy,
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
