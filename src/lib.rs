#![doc = r#"
nes2a03 library crate.

A 2A03 (NES 6502) instruction engine and the cartridge memory map it runs
against.

Modules:
- cartridge: iNES loader and header validation
- config: memory and cartridge policies, loadable from JSON
- cpu: register file, opcode table, addressing modes, ALU and dispatch
- emulator: execution session (cycle-budgeted run loop, latched errors, stop handle)
- error: error types for loading, memory access and configuration
- mapper: Mapper trait and the NROM (mapper 0) address space

Logging goes through the `log` facade; the crate never installs a logger.
With the `trace` feature every executed instruction is logged at trace level
under the `instr` target.

In tests, shared iNES builders and program loaders are available under
`crate::test_utils`.
"#]

pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod emulator;
pub mod error;
pub mod mapper;

// Re-export commonly used types at the crate root for convenience.
pub use cartridge::Cartridge;
pub use config::{CartridgePolicy, Config, MemoryPolicy, ReadOnlyLevel};
pub use cpu::CpuState;
pub use emulator::{Emulator, ErrorState, StopHandle};
pub use error::{AccessError, ConfigError, RomError};
pub use mapper::{Mapper, Nrom};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
