/*!
cpu - 2A03 instruction engine.

```text
    state.rs        - Register file, status flag masks, stack helpers.
    cycles.rs       - Fixed per-opcode cycle costs.
    opcodes.rs      - Opcode byte values and the aaabbbcc field masks.
    table.rs        - Compile-time opcode descriptor table.
    addressing.rs   - Addressing modes and operand resolution.
    execute.rs      - ALU and flag engine.
    dispatch/       - Per-family instruction handlers.
```

The run loop that drives all of this lives in `crate::emulator`. Decimal mode
is tracked in the status byte but never affects arithmetic, and there is no
interrupt line: BRK is the only way into a handler.
*/

pub mod addressing;
pub mod cycles;
pub(crate) mod dispatch;
pub mod execute;
pub mod opcodes;
pub mod state;
pub mod table;

pub use crate::cpu::addressing::AddrMode;
pub use crate::cpu::cycles::{OPTICK, base_cycles};
pub use crate::cpu::execute::Operation;
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DEBUG, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, Reg8, Register, ZERO,
};
pub use crate::cpu::table::{Descriptor, Group, Implied, Kind, descriptor};
