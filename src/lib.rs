// Emulator core for the RP2A03, the CPU of the NES.
//
// The 2A03 is a 6502 derivative with the binary-coded-decimal mode wired off.
// This crate implements the CPU execution engine (registers, status flags,
// the 256-entry opcode table, addressing modes, interrupts) together with the
// address bus and the segmented memory map it executes against. The picture
// processor is present only as the register bank the CPU sees at 0x2000.

pub mod bus;
pub mod cpu6502;
mod instructions;
pub mod memory;
pub mod memory_map;
pub mod ppu2c02;
