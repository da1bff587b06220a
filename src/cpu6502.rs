use once_cell::sync::Lazy;
use phf::phf_map;

use crate::bus::Bus;
use crate::memory_map;

pub struct CPU {
    // More info about the 6502 registers can be found here:
    // https://www.nesdev.org/obelisk-6502-guide/registers.html

    // The program counter is a 16 bit register that holds the memory address of the next instruction to be executed.
    // The value of program counter is modified automatically as instructions are executed.
    pub program_counter: u16,

    // The stack pointer is an 8 bit register and holds the low 8 bits of the next free location
    // on the stack. The location of the stack is fixed and cannot be moved.
    // Memory space [0x0100 .. 0x1FF]
    pub stack_pointer: u8,

    // The accumulator is an 8 bit register used for arithmetic and logical operations.
    pub accumulator: u8,

    // The 8 bit index register is most commonly used to hold counters or offsets for accessing memory.
    pub x_register: u8,

    // The Y register is similar to the X register in that it is available for holding counter or offsets memory access
    pub y_register: u8,

    // As instructions are executed a set of processor flags are set or clear to record the results of the operation.
    // Each bit in the status register represents a different flag:
    // Bit 7: Negative Flag (N)
    // Bit 6: Overflow Flag (V)
    // Bit 5: Unused (U) (always reads as 1)
    // Bit 4: Break Command (B)
    // Bit 3: Decimal Mode Flag (D) (wired off on the 2A03, never consulted)
    // Bit 2: Interrupt Disable (I)
    // Bit 1: Zero Flag (Z)
    // Bit 0: Carry Flag (C)
    pub status_register: u8,

    // All memory accesses go through the bus; the CPU itself owns no storage.
    pub bus: Bus,

    // Global cycle counter (counts CPU cycles executed)
    pub cycles: u64,

    // Interrupt lines. NMI latches on the falling edge and is cleared when
    // serviced; IRQ is a level and is re-sampled at the top of every step.
    nmi_pending: bool,
    irq_line: bool,
}

// Each flag corresponds to a bit in the status register
// Values are the bit positions
#[derive(Debug, Clone, Copy)]
pub enum StatusFlag {
    Carry = 0,
    Zero = 1,
    InterruptDisable = 2,
    DecimalMode = 3,
    BreakCommand = 4,
    Unused = 5,
    Overflow = 6,
    Negative = 7,
}

#[derive(Debug, Clone, Copy)]
pub enum AddressingMode {
    Absolute,    // e.g. LDA $1234
    AbsoluteX,   // e.g. LDA $1234,X
    AbsoluteY,   // e.g. LDA $1234,Y
    Accumulator, // e.g. ASL A
    Immediate,   // e.g. LDA #$10
    Implicit,    // e.g. CLC, INX (no operand)
    Indirect,    // e.g. JMP ($1234)
    IndirectX,   // e.g. LDA ($10,X)
    IndirectY,   // e.g. LDA ($10),Y
    Relative,    // e.g. BEQ +5
    ZeroPage,    // e.g. LDA $10
    ZeroPageX,   // e.g. LDA $10,X
    ZeroPageY,   // e.g. LDX $10,Y
    Invalid,     // sentinel for opcodes outside the documented set
}

pub fn new_cpu(bus: Bus) -> CPU {
    CPU {
        program_counter: 0x0000,
        stack_pointer: CPU::STACK_POINTER_POWER_ON,
        accumulator: 0x00,
        x_register: 0x00,
        y_register: 0x00,
        status_register: (1 << (StatusFlag::InterruptDisable as u8))
            | (1 << (StatusFlag::Unused as u8)),
        bus,
        cycles: 0,
        nmi_pending: false,
        irq_line: false,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Operand {
    pub(crate) opcode: u8,
    pub(crate) name: &'static str,
    // Function pointer to the instruction handler. Handlers receive the
    // resolved operand value and effective address and return any extra
    // cycles (branches) on top of the table's base count.
    pub(crate) handler: fn(&mut CPU, Option<u8>, Option<u16>) -> u8,
    pub(crate) addressing_mode: AddressingMode,
    pub(crate) bytes: u8,
    pub(crate) cycles: u8,
    // Indexed reads pay one extra cycle when the effective address crosses a
    // page boundary. Stores and read-modify-write variants carry their fixed
    // higher count instead and leave this unset.
    pub(crate) page_penalty: bool,
}

// Opcodes outside the documented set decode to this entry: a named no-op with
// length 0 and cycle cost 0. The harness may log it but stepping it is not an
// error.
static INVALID_OPERAND: Operand = Operand {
    opcode: 0x00,
    name: "XXX",
    handler: CPU::handle_invalid,
    addressing_mode: AddressingMode::Invalid,
    bytes: 0,
    cycles: 0,
    page_penalty: false,
};

// List of the 151 documented opcodes and their corresponding Operand definitions.
static OPERAND_MAP: phf::Map<u8, Operand> = phf_map! {
    // ADC Instructions
    0x69u8 => Operand { opcode: 0x69, name: "ADC", handler: CPU::handle_adc, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0x65u8 => Operand { opcode: 0x65, name: "ADC", handler: CPU::handle_adc, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0x75u8 => Operand { opcode: 0x75, name: "ADC", handler: CPU::handle_adc, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0x6Du8 => Operand { opcode: 0x6D, name: "ADC", handler: CPU::handle_adc, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0x7Du8 => Operand { opcode: 0x7D, name: "ADC", handler: CPU::handle_adc, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_penalty: true },
    0x79u8 => Operand { opcode: 0x79, name: "ADC", handler: CPU::handle_adc, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_penalty: true },
    0x61u8 => Operand { opcode: 0x61, name: "ADC", handler: CPU::handle_adc, addressing_mode: AddressingMode::IndirectX, bytes: 2, cycles: 6, page_penalty: false },
    0x71u8 => Operand { opcode: 0x71, name: "ADC", handler: CPU::handle_adc, addressing_mode: AddressingMode::IndirectY, bytes: 2, cycles: 5, page_penalty: true },

    // AND Instructions
    0x29u8 => Operand { opcode: 0x29, name: "AND", handler: CPU::handle_and, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0x25u8 => Operand { opcode: 0x25, name: "AND", handler: CPU::handle_and, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0x35u8 => Operand { opcode: 0x35, name: "AND", handler: CPU::handle_and, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0x2Du8 => Operand { opcode: 0x2D, name: "AND", handler: CPU::handle_and, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0x3Du8 => Operand { opcode: 0x3D, name: "AND", handler: CPU::handle_and, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_penalty: true },
    0x39u8 => Operand { opcode: 0x39, name: "AND", handler: CPU::handle_and, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_penalty: true },
    0x21u8 => Operand { opcode: 0x21, name: "AND", handler: CPU::handle_and, addressing_mode: AddressingMode::IndirectX, bytes: 2, cycles: 6, page_penalty: false },
    0x31u8 => Operand { opcode: 0x31, name: "AND", handler: CPU::handle_and, addressing_mode: AddressingMode::IndirectY, bytes: 2, cycles: 5, page_penalty: true },

    // ASL Instructions
    0x0Au8 => Operand { opcode: 0x0A, name: "ASL", handler: CPU::handle_asl, addressing_mode: AddressingMode::Accumulator, bytes: 1, cycles: 2, page_penalty: false },
    0x06u8 => Operand { opcode: 0x06, name: "ASL", handler: CPU::handle_asl, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_penalty: false },
    0x16u8 => Operand { opcode: 0x16, name: "ASL", handler: CPU::handle_asl, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_penalty: false },
    0x0Eu8 => Operand { opcode: 0x0E, name: "ASL", handler: CPU::handle_asl, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_penalty: false },
    0x1Eu8 => Operand { opcode: 0x1E, name: "ASL", handler: CPU::handle_asl, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_penalty: false },

    // Branch Instructions (taken-branch cycles come from the handler)
    0x90u8 => Operand { opcode: 0x90, name: "BCC", handler: CPU::handle_bcc, addressing_mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_penalty: false },
    0xB0u8 => Operand { opcode: 0xB0, name: "BCS", handler: CPU::handle_bcs, addressing_mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_penalty: false },
    0xF0u8 => Operand { opcode: 0xF0, name: "BEQ", handler: CPU::handle_beq, addressing_mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_penalty: false },
    0x30u8 => Operand { opcode: 0x30, name: "BMI", handler: CPU::handle_bmi, addressing_mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_penalty: false },
    0xD0u8 => Operand { opcode: 0xD0, name: "BNE", handler: CPU::handle_bne, addressing_mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_penalty: false },
    0x10u8 => Operand { opcode: 0x10, name: "BPL", handler: CPU::handle_bpl, addressing_mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_penalty: false },
    0x50u8 => Operand { opcode: 0x50, name: "BVC", handler: CPU::handle_bvc, addressing_mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_penalty: false },
    0x70u8 => Operand { opcode: 0x70, name: "BVS", handler: CPU::handle_bvs, addressing_mode: AddressingMode::Relative, bytes: 2, cycles: 2, page_penalty: false },

    // BIT Instructions
    0x24u8 => Operand { opcode: 0x24, name: "BIT", handler: CPU::handle_bit, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0x2Cu8 => Operand { opcode: 0x2C, name: "BIT", handler: CPU::handle_bit, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },

    // BRK Instructions
    0x00u8 => Operand { opcode: 0x00, name: "BRK", handler: CPU::handle_brk, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 7, page_penalty: false },

    // Flag Instructions
    0x18u8 => Operand { opcode: 0x18, name: "CLC", handler: CPU::handle_clc, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0xD8u8 => Operand { opcode: 0xD8, name: "CLD", handler: CPU::handle_cld, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0x58u8 => Operand { opcode: 0x58, name: "CLI", handler: CPU::handle_cli, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0xB8u8 => Operand { opcode: 0xB8, name: "CLV", handler: CPU::handle_clv, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0x38u8 => Operand { opcode: 0x38, name: "SEC", handler: CPU::handle_sec, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0xF8u8 => Operand { opcode: 0xF8, name: "SED", handler: CPU::handle_sed, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0x78u8 => Operand { opcode: 0x78, name: "SEI", handler: CPU::handle_sei, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },

    // CMP Instructions
    0xC9u8 => Operand { opcode: 0xC9, name: "CMP", handler: CPU::handle_cmp, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0xC5u8 => Operand { opcode: 0xC5, name: "CMP", handler: CPU::handle_cmp, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0xD5u8 => Operand { opcode: 0xD5, name: "CMP", handler: CPU::handle_cmp, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0xCDu8 => Operand { opcode: 0xCD, name: "CMP", handler: CPU::handle_cmp, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0xDDu8 => Operand { opcode: 0xDD, name: "CMP", handler: CPU::handle_cmp, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_penalty: true },
    0xD9u8 => Operand { opcode: 0xD9, name: "CMP", handler: CPU::handle_cmp, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_penalty: true },
    0xC1u8 => Operand { opcode: 0xC1, name: "CMP", handler: CPU::handle_cmp, addressing_mode: AddressingMode::IndirectX, bytes: 2, cycles: 6, page_penalty: false },
    0xD1u8 => Operand { opcode: 0xD1, name: "CMP", handler: CPU::handle_cmp, addressing_mode: AddressingMode::IndirectY, bytes: 2, cycles: 5, page_penalty: true },

    // CPX Instructions
    0xE0u8 => Operand { opcode: 0xE0, name: "CPX", handler: CPU::handle_cpx, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0xE4u8 => Operand { opcode: 0xE4, name: "CPX", handler: CPU::handle_cpx, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0xECu8 => Operand { opcode: 0xEC, name: "CPX", handler: CPU::handle_cpx, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },

    // CPY Instructions
    0xC0u8 => Operand { opcode: 0xC0, name: "CPY", handler: CPU::handle_cpy, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0xC4u8 => Operand { opcode: 0xC4, name: "CPY", handler: CPU::handle_cpy, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0xCCu8 => Operand { opcode: 0xCC, name: "CPY", handler: CPU::handle_cpy, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },

    // DEC Instructions
    0xC6u8 => Operand { opcode: 0xC6, name: "DEC", handler: CPU::handle_dec, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_penalty: false },
    0xD6u8 => Operand { opcode: 0xD6, name: "DEC", handler: CPU::handle_dec, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_penalty: false },
    0xCEu8 => Operand { opcode: 0xCE, name: "DEC", handler: CPU::handle_dec, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_penalty: false },
    0xDEu8 => Operand { opcode: 0xDE, name: "DEC", handler: CPU::handle_dec, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_penalty: false },

    // DEX / DEY Instructions
    0xCAu8 => Operand { opcode: 0xCA, name: "DEX", handler: CPU::handle_dex, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0x88u8 => Operand { opcode: 0x88, name: "DEY", handler: CPU::handle_dey, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },

    // EOR Instructions
    0x49u8 => Operand { opcode: 0x49, name: "EOR", handler: CPU::handle_eor, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0x45u8 => Operand { opcode: 0x45, name: "EOR", handler: CPU::handle_eor, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0x55u8 => Operand { opcode: 0x55, name: "EOR", handler: CPU::handle_eor, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0x4Du8 => Operand { opcode: 0x4D, name: "EOR", handler: CPU::handle_eor, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0x5Du8 => Operand { opcode: 0x5D, name: "EOR", handler: CPU::handle_eor, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_penalty: true },
    0x59u8 => Operand { opcode: 0x59, name: "EOR", handler: CPU::handle_eor, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_penalty: true },
    0x41u8 => Operand { opcode: 0x41, name: "EOR", handler: CPU::handle_eor, addressing_mode: AddressingMode::IndirectX, bytes: 2, cycles: 6, page_penalty: false },
    0x51u8 => Operand { opcode: 0x51, name: "EOR", handler: CPU::handle_eor, addressing_mode: AddressingMode::IndirectY, bytes: 2, cycles: 5, page_penalty: true },

    // INC Instructions
    0xE6u8 => Operand { opcode: 0xE6, name: "INC", handler: CPU::handle_inc, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_penalty: false },
    0xF6u8 => Operand { opcode: 0xF6, name: "INC", handler: CPU::handle_inc, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_penalty: false },
    0xEEu8 => Operand { opcode: 0xEE, name: "INC", handler: CPU::handle_inc, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_penalty: false },
    0xFEu8 => Operand { opcode: 0xFE, name: "INC", handler: CPU::handle_inc, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_penalty: false },

    // INX / INY Instructions
    0xE8u8 => Operand { opcode: 0xE8, name: "INX", handler: CPU::handle_inx, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0xC8u8 => Operand { opcode: 0xC8, name: "INY", handler: CPU::handle_iny, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },

    // JMP Instructions
    0x4Cu8 => Operand { opcode: 0x4C, name: "JMP", handler: CPU::handle_jmp, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 3, page_penalty: false },
    0x6Cu8 => Operand { opcode: 0x6C, name: "JMP", handler: CPU::handle_jmp, addressing_mode: AddressingMode::Indirect, bytes: 3, cycles: 5, page_penalty: false },

    // JSR Instructions
    0x20u8 => Operand { opcode: 0x20, name: "JSR", handler: CPU::handle_jsr, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_penalty: false },

    // LDA Instructions
    0xA9u8 => Operand { opcode: 0xA9, name: "LDA", handler: CPU::handle_lda, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0xA5u8 => Operand { opcode: 0xA5, name: "LDA", handler: CPU::handle_lda, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0xB5u8 => Operand { opcode: 0xB5, name: "LDA", handler: CPU::handle_lda, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0xADu8 => Operand { opcode: 0xAD, name: "LDA", handler: CPU::handle_lda, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0xBDu8 => Operand { opcode: 0xBD, name: "LDA", handler: CPU::handle_lda, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_penalty: true },
    0xB9u8 => Operand { opcode: 0xB9, name: "LDA", handler: CPU::handle_lda, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_penalty: true },
    0xA1u8 => Operand { opcode: 0xA1, name: "LDA", handler: CPU::handle_lda, addressing_mode: AddressingMode::IndirectX, bytes: 2, cycles: 6, page_penalty: false },
    0xB1u8 => Operand { opcode: 0xB1, name: "LDA", handler: CPU::handle_lda, addressing_mode: AddressingMode::IndirectY, bytes: 2, cycles: 5, page_penalty: true },

    // LDX Instructions
    0xA2u8 => Operand { opcode: 0xA2, name: "LDX", handler: CPU::handle_ldx, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0xA6u8 => Operand { opcode: 0xA6, name: "LDX", handler: CPU::handle_ldx, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0xB6u8 => Operand { opcode: 0xB6, name: "LDX", handler: CPU::handle_ldx, addressing_mode: AddressingMode::ZeroPageY, bytes: 2, cycles: 4, page_penalty: false },
    0xAEu8 => Operand { opcode: 0xAE, name: "LDX", handler: CPU::handle_ldx, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0xBEu8 => Operand { opcode: 0xBE, name: "LDX", handler: CPU::handle_ldx, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_penalty: true },

    // LDY Instructions
    0xA0u8 => Operand { opcode: 0xA0, name: "LDY", handler: CPU::handle_ldy, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0xA4u8 => Operand { opcode: 0xA4, name: "LDY", handler: CPU::handle_ldy, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0xB4u8 => Operand { opcode: 0xB4, name: "LDY", handler: CPU::handle_ldy, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0xACu8 => Operand { opcode: 0xAC, name: "LDY", handler: CPU::handle_ldy, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0xBCu8 => Operand { opcode: 0xBC, name: "LDY", handler: CPU::handle_ldy, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_penalty: true },

    // LSR Instructions
    0x4Au8 => Operand { opcode: 0x4A, name: "LSR", handler: CPU::handle_lsr, addressing_mode: AddressingMode::Accumulator, bytes: 1, cycles: 2, page_penalty: false },
    0x46u8 => Operand { opcode: 0x46, name: "LSR", handler: CPU::handle_lsr, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_penalty: false },
    0x56u8 => Operand { opcode: 0x56, name: "LSR", handler: CPU::handle_lsr, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_penalty: false },
    0x4Eu8 => Operand { opcode: 0x4E, name: "LSR", handler: CPU::handle_lsr, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_penalty: false },
    0x5Eu8 => Operand { opcode: 0x5E, name: "LSR", handler: CPU::handle_lsr, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_penalty: false },

    // NOP Instructions
    0xEAu8 => Operand { opcode: 0xEA, name: "NOP", handler: CPU::handle_nop, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },

    // ORA Instructions
    0x09u8 => Operand { opcode: 0x09, name: "ORA", handler: CPU::handle_ora, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0x05u8 => Operand { opcode: 0x05, name: "ORA", handler: CPU::handle_ora, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0x15u8 => Operand { opcode: 0x15, name: "ORA", handler: CPU::handle_ora, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0x0Du8 => Operand { opcode: 0x0D, name: "ORA", handler: CPU::handle_ora, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0x1Du8 => Operand { opcode: 0x1D, name: "ORA", handler: CPU::handle_ora, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_penalty: true },
    0x19u8 => Operand { opcode: 0x19, name: "ORA", handler: CPU::handle_ora, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_penalty: true },
    0x01u8 => Operand { opcode: 0x01, name: "ORA", handler: CPU::handle_ora, addressing_mode: AddressingMode::IndirectX, bytes: 2, cycles: 6, page_penalty: false },
    0x11u8 => Operand { opcode: 0x11, name: "ORA", handler: CPU::handle_ora, addressing_mode: AddressingMode::IndirectY, bytes: 2, cycles: 5, page_penalty: true },

    // Stack Instructions
    0x48u8 => Operand { opcode: 0x48, name: "PHA", handler: CPU::handle_pha, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 3, page_penalty: false },
    0x08u8 => Operand { opcode: 0x08, name: "PHP", handler: CPU::handle_php, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 3, page_penalty: false },
    0x68u8 => Operand { opcode: 0x68, name: "PLA", handler: CPU::handle_pla, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 4, page_penalty: false },
    0x28u8 => Operand { opcode: 0x28, name: "PLP", handler: CPU::handle_plp, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 4, page_penalty: false },

    // ROL Instructions
    0x2Au8 => Operand { opcode: 0x2A, name: "ROL", handler: CPU::handle_rol, addressing_mode: AddressingMode::Accumulator, bytes: 1, cycles: 2, page_penalty: false },
    0x26u8 => Operand { opcode: 0x26, name: "ROL", handler: CPU::handle_rol, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_penalty: false },
    0x36u8 => Operand { opcode: 0x36, name: "ROL", handler: CPU::handle_rol, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_penalty: false },
    0x2Eu8 => Operand { opcode: 0x2E, name: "ROL", handler: CPU::handle_rol, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_penalty: false },
    0x3Eu8 => Operand { opcode: 0x3E, name: "ROL", handler: CPU::handle_rol, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_penalty: false },

    // ROR Instructions
    0x6Au8 => Operand { opcode: 0x6A, name: "ROR", handler: CPU::handle_ror, addressing_mode: AddressingMode::Accumulator, bytes: 1, cycles: 2, page_penalty: false },
    0x66u8 => Operand { opcode: 0x66, name: "ROR", handler: CPU::handle_ror, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 5, page_penalty: false },
    0x76u8 => Operand { opcode: 0x76, name: "ROR", handler: CPU::handle_ror, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 6, page_penalty: false },
    0x6Eu8 => Operand { opcode: 0x6E, name: "ROR", handler: CPU::handle_ror, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 6, page_penalty: false },
    0x7Eu8 => Operand { opcode: 0x7E, name: "ROR", handler: CPU::handle_ror, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 7, page_penalty: false },

    // RTI / RTS Instructions
    0x40u8 => Operand { opcode: 0x40, name: "RTI", handler: CPU::handle_rti, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 6, page_penalty: false },
    0x60u8 => Operand { opcode: 0x60, name: "RTS", handler: CPU::handle_rts, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 6, page_penalty: false },

    // SBC Instructions
    0xE9u8 => Operand { opcode: 0xE9, name: "SBC", handler: CPU::handle_sbc, addressing_mode: AddressingMode::Immediate, bytes: 2, cycles: 2, page_penalty: false },
    0xE5u8 => Operand { opcode: 0xE5, name: "SBC", handler: CPU::handle_sbc, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0xF5u8 => Operand { opcode: 0xF5, name: "SBC", handler: CPU::handle_sbc, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0xEDu8 => Operand { opcode: 0xED, name: "SBC", handler: CPU::handle_sbc, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0xFDu8 => Operand { opcode: 0xFD, name: "SBC", handler: CPU::handle_sbc, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 4, page_penalty: true },
    0xF9u8 => Operand { opcode: 0xF9, name: "SBC", handler: CPU::handle_sbc, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 4, page_penalty: true },
    0xE1u8 => Operand { opcode: 0xE1, name: "SBC", handler: CPU::handle_sbc, addressing_mode: AddressingMode::IndirectX, bytes: 2, cycles: 6, page_penalty: false },
    0xF1u8 => Operand { opcode: 0xF1, name: "SBC", handler: CPU::handle_sbc, addressing_mode: AddressingMode::IndirectY, bytes: 2, cycles: 5, page_penalty: true },

    // STA Instructions (stores always pay the fixed count, never the penalty)
    0x85u8 => Operand { opcode: 0x85, name: "STA", handler: CPU::handle_sta, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0x95u8 => Operand { opcode: 0x95, name: "STA", handler: CPU::handle_sta, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0x8Du8 => Operand { opcode: 0x8D, name: "STA", handler: CPU::handle_sta, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },
    0x9Du8 => Operand { opcode: 0x9D, name: "STA", handler: CPU::handle_sta, addressing_mode: AddressingMode::AbsoluteX, bytes: 3, cycles: 5, page_penalty: false },
    0x99u8 => Operand { opcode: 0x99, name: "STA", handler: CPU::handle_sta, addressing_mode: AddressingMode::AbsoluteY, bytes: 3, cycles: 5, page_penalty: false },
    0x81u8 => Operand { opcode: 0x81, name: "STA", handler: CPU::handle_sta, addressing_mode: AddressingMode::IndirectX, bytes: 2, cycles: 6, page_penalty: false },
    0x91u8 => Operand { opcode: 0x91, name: "STA", handler: CPU::handle_sta, addressing_mode: AddressingMode::IndirectY, bytes: 2, cycles: 6, page_penalty: false },

    // STX Instructions
    0x86u8 => Operand { opcode: 0x86, name: "STX", handler: CPU::handle_stx, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0x96u8 => Operand { opcode: 0x96, name: "STX", handler: CPU::handle_stx, addressing_mode: AddressingMode::ZeroPageY, bytes: 2, cycles: 4, page_penalty: false },
    0x8Eu8 => Operand { opcode: 0x8E, name: "STX", handler: CPU::handle_stx, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },

    // STY Instructions
    0x84u8 => Operand { opcode: 0x84, name: "STY", handler: CPU::handle_sty, addressing_mode: AddressingMode::ZeroPage, bytes: 2, cycles: 3, page_penalty: false },
    0x94u8 => Operand { opcode: 0x94, name: "STY", handler: CPU::handle_sty, addressing_mode: AddressingMode::ZeroPageX, bytes: 2, cycles: 4, page_penalty: false },
    0x8Cu8 => Operand { opcode: 0x8C, name: "STY", handler: CPU::handle_sty, addressing_mode: AddressingMode::Absolute, bytes: 3, cycles: 4, page_penalty: false },

    // Transfer Instructions
    0xAAu8 => Operand { opcode: 0xAA, name: "TAX", handler: CPU::handle_tax, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0xA8u8 => Operand { opcode: 0xA8, name: "TAY", handler: CPU::handle_tay, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0xBAu8 => Operand { opcode: 0xBA, name: "TSX", handler: CPU::handle_tsx, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0x8Au8 => Operand { opcode: 0x8A, name: "TXA", handler: CPU::handle_txa, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0x9Au8 => Operand { opcode: 0x9A, name: "TXS", handler: CPU::handle_txs, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
    0x98u8 => Operand { opcode: 0x98, name: "TYA", handler: CPU::handle_tya, addressing_mode: AddressingMode::Implicit, bytes: 1, cycles: 2, page_penalty: false },
};

// Dense decode table: every opcode byte resolves to an entry, with the
// undocumented ones pointing at the invalid sentinel.
static INSTRUCTION_SET: Lazy<[&'static Operand; 256]> = Lazy::new(|| {
    let mut table: [&'static Operand; 256] = [&INVALID_OPERAND; 256];
    for operand in OPERAND_MAP.values() {
        table[operand.opcode as usize] = operand;
    }
    table
});

impl CPU {
    const STACK_POINTER_POWER_ON: u8 = 0x00;
    const INTERRUPT_CYCLES: u8 = 7;

    pub(crate) fn operand_for(opcode: u8) -> &'static Operand {
        (*INSTRUCTION_SET)[opcode as usize]
    }

    pub(crate) fn read_u8(&self, addr: u16) -> u8 {
        self.bus.read_u8(addr)
    }

    pub(crate) fn write_u8(&mut self, addr: u16, value: u8) {
        self.bus.write_u8(addr, value);
    }

    pub(crate) fn read_u16(&self, addr: u16) -> u16 {
        self.bus.read_u16(addr)
    }

    pub fn set_status_flag(&mut self, flag: StatusFlag, value: bool) {
        if value {
            self.status_register |= 1 << (flag as u8);
        } else {
            self.status_register &= !(1 << (flag as u8));
        }
    }

    pub fn get_status_flag(&self, flag: StatusFlag) -> bool {
        (self.status_register & (1 << (flag as u8))) != 0
    }

    // Restores a status byte pulled from the stack. Bit 5 always reads as 1
    // and the pushed copy of B is not a real flag, so it is discarded.
    pub(crate) fn restore_status_register(&mut self, pulled: u8) {
        self.status_register = (pulled | (1 << (StatusFlag::Unused as u8)))
            & !(1 << (StatusFlag::BreakCommand as u8));
    }

    /// Pushes a byte onto the stack.
    pub(crate) fn push_u8(&mut self, value: u8) {
        // The stack always resolves through page 0x01, even when SP wraps.
        let stack_addr = memory_map::STACK_BASE_ADDRESS + self.stack_pointer as u16;
        self.write_u8(stack_addr, value);
        self.stack_pointer = self.stack_pointer.wrapping_sub(1);
    }

    /// Pushes a 16-bit word onto the stack.
    /// The high byte is pushed first, then the low byte, so they are stored in little-endian format on the stack.
    pub(crate) fn push_u16(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push_u8(high);
        self.push_u8(low);
    }

    /// Pops a byte from the stack.
    pub(crate) fn pop_u8(&mut self) -> u8 {
        self.stack_pointer = self.stack_pointer.wrapping_add(1);
        let stack_addr = memory_map::STACK_BASE_ADDRESS + self.stack_pointer as u16;
        self.read_u8(stack_addr)
    }

    /// Pops a 16-bit word from the stack.
    /// The low byte is popped first, then the high byte, as they are stored in little-endian format on the stack.
    pub(crate) fn pop_u16(&mut self) -> u16 {
        let low = self.pop_u8();
        let high = self.pop_u8();
        u16::from_le_bytes([low, high])
    }

    /// Triggers a hardware reset.
    ///
    /// The reset sequence runs like an interrupt with the stack writes
    /// suppressed: the stack pointer still decrements as if the pushes
    /// happened, which is why a powered-on CPU comes up with SP = 0xFD.
    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.x_register = 0;
        self.y_register = 0;
        self.stack_pointer = self.stack_pointer.wrapping_sub(3);
        self.status_register = (1 << (StatusFlag::InterruptDisable as u8))
            | (1 << (StatusFlag::Unused as u8));
        self.nmi_pending = false;
        self.irq_line = false;

        // 0xFFFC corresponds to the reset vector address.
        self.program_counter = self.read_u16(memory_map::RESET_VECTOR_ADDRESS);
        self.cycles += Self::INTERRUPT_CYCLES as u64;
    }

    /// Latches a non-maskable interrupt. The falling edge is remembered until
    /// the next `step`, which services it before fetching an instruction.
    pub fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drives the maskable interrupt line. The line is level-triggered: it is
    /// sampled at the top of every `step` and serviced whenever the interrupt
    /// disable flag is clear.
    pub fn irq(&mut self, level: bool) {
        self.irq_line = level;
    }

    // Interrupt service sequence: return address, then status with B clear
    // (hardware interrupts are distinguishable from BRK by that bit), then
    // the jump through the vector.
    fn interrupt(&mut self, vector: u16) -> u8 {
        self.push_u16(self.program_counter);
        let mut status = self.status_register;
        status &= !(1 << (StatusFlag::BreakCommand as u8));
        status |= 1 << (StatusFlag::Unused as u8);
        self.push_u8(status);
        self.set_status_flag(StatusFlag::InterruptDisable, true);
        self.program_counter = self.read_u16(vector);
        self.cycles += Self::INTERRUPT_CYCLES as u64;
        Self::INTERRUPT_CYCLES
    }

    /// Executes one instruction (or services one pending interrupt) and
    /// returns the number of cycles it consumed.
    pub fn step(&mut self) -> u8 {
        // Interrupt lines are sampled before the fetch. NMI wins over IRQ,
        // and IRQ is gated on the interrupt disable flag.
        if self.nmi_pending {
            self.nmi_pending = false;
            return self.interrupt(memory_map::NMI_VECTOR_ADDRESS);
        }
        if self.irq_line && !self.get_status_flag(StatusFlag::InterruptDisable) {
            return self.interrupt(memory_map::IRQ_VECTOR_ADDRESS);
        }

        let pc_before_instruction = self.program_counter;
        let opcode = self.read_u8(pc_before_instruction);
        let operand_info = Self::operand_for(opcode);

        // Fetch operand based on addressing mode. The operand bytes start at
        // PC + 1, as PC currently points to the opcode.
        let (operand_value, operand_address, page_crossed) = match operand_info.addressing_mode {
            AddressingMode::Implicit | AddressingMode::Invalid => (None, None, false),
            AddressingMode::Accumulator => (Some(self.accumulator), None, false),
            AddressingMode::Relative => {
                // Branches get the raw offset as the value and the resolved
                // target as the address.
                let (addr, crossed) = self.get_operand_address(
                    operand_info.addressing_mode,
                    pc_before_instruction.wrapping_add(1),
                );
                let offset = self.read_u8(pc_before_instruction.wrapping_add(1));
                (Some(offset), Some(addr), crossed)
            }
            _ => {
                let (addr, crossed) = self.get_operand_address(
                    operand_info.addressing_mode,
                    pc_before_instruction.wrapping_add(1),
                );
                (Some(self.read_u8(addr)), Some(addr), crossed)
            }
        };

        // The program counter moves past the instruction before the handler
        // runs, so jumps, branches and subroutine calls see the address of
        // the next instruction.
        self.program_counter = pc_before_instruction.wrapping_add(operand_info.bytes as u16);

        let handler_extra = (operand_info.handler)(self, operand_value, operand_address);

        let mut consumed = operand_info.cycles + handler_extra;
        if page_crossed && operand_info.page_penalty {
            consumed += 1;
        }
        self.cycles += consumed as u64;
        consumed
    }

    /// Steps the CPU in a loop. The callback runs before every instruction
    /// and returns false to stop, which is how a harness bounds execution.
    pub fn run_with_callback<F>(&mut self, mut callback: F)
    where
        F: FnMut(&mut CPU) -> bool,
    {
        while callback(self) {
            self.step();
        }
    }

    /// Branch helper: centralizes branch behavior for relative branches.
    /// `condition` indicates whether the branch should be taken and `target`
    /// is the already-resolved destination.
    /// Returns additional cycles: 0 if not taken, +1 if taken, +2 if the
    /// target is on a different page than the instruction after the branch.
    pub(crate) fn branch(&mut self, condition: bool, target: u16) -> u8 {
        if !condition {
            return 0;
        }
        let mut additional_cycles = 1;
        if (self.program_counter & 0xFF00) != (target & 0xFF00) {
            additional_cycles += 1;
        }
        self.program_counter = target;
        additional_cycles
    }

    // Helper to get the effective address based on addressing mode. `addr` is
    // the position of the operand bytes (one past the opcode). Also reports
    // whether an indexed computation crossed a page boundary, which costs
    // read instructions an extra cycle.
    pub(crate) fn get_operand_address(&self, mode: AddressingMode, addr: u16) -> (u16, bool) {
        match mode {
            AddressingMode::Absolute => (self.read_u16(addr), false),

            AddressingMode::AbsoluteX => {
                let base = self.read_u16(addr);
                let effective = base.wrapping_add(self.x_register as u16);
                (effective, (base & 0xFF00) != (effective & 0xFF00))
            }

            AddressingMode::AbsoluteY => {
                let base = self.read_u16(addr);
                let effective = base.wrapping_add(self.y_register as u16);
                (effective, (base & 0xFF00) != (effective & 0xFF00))
            }

            AddressingMode::Immediate => (addr, false),

            AddressingMode::Indirect => {
                let ptr = self.read_u16(addr);
                // 6502 hardware bug: the pointer's high byte is fetched from
                // the start of the same page when the low byte is 0xFF.
                let low = self.read_u8(ptr);
                let high = if ptr & 0x00FF == 0x00FF {
                    self.read_u8(ptr & 0xFF00)
                } else {
                    self.read_u8(ptr + 1)
                };
                (u16::from_le_bytes([low, high]), false)
            }

            AddressingMode::IndirectX => {
                let base = self.read_u8(addr);
                // Both pointer bytes come from the zero page, wrapping mod 256.
                let ptr = base.wrapping_add(self.x_register);
                let low = self.read_u8(ptr as u16);
                let high = self.read_u8(ptr.wrapping_add(1) as u16);
                (u16::from_le_bytes([low, high]), false)
            }

            AddressingMode::IndirectY => {
                let base = self.read_u8(addr);
                let low = self.read_u8(base as u16);
                let high = self.read_u8(base.wrapping_add(1) as u16);
                let word = u16::from_le_bytes([low, high]);
                let effective = word.wrapping_add(self.y_register as u16);
                (effective, (word & 0xFF00) != (effective & 0xFF00))
            }

            AddressingMode::Relative => {
                let offset = self.read_u8(addr) as i8;
                // The offset is relative to the address of the *next* instruction.
                (addr.wrapping_add(1).wrapping_add(offset as u16), false)
            }

            AddressingMode::ZeroPage => (self.read_u8(addr) as u16, false),

            AddressingMode::ZeroPageX => {
                let base = self.read_u8(addr);
                (base.wrapping_add(self.x_register) as u16, false)
            }

            AddressingMode::ZeroPageY => {
                let base = self.read_u8(addr);
                (base.wrapping_add(self.y_register) as u16, false)
            }

            // Accumulator, Implicit and the invalid sentinel carry no
            // effective address; step() never resolves them.
            AddressingMode::Accumulator | AddressingMode::Implicit | AddressingMode::Invalid => {
                panic!("No effective address for {:?}", mode)
            }
        }
    }
}

/// One-line state dump for debugging and execution logs: the PC, the opcode
/// and mnemonic about to run, and the registers.
pub fn trace(cpu: &CPU) -> String {
    let opcode = cpu.read_u8(cpu.program_counter);
    let operand_info = CPU::operand_for(opcode);
    format!(
        "{:04X}  {:02X} {:<3}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        cpu.program_counter,
        opcode,
        operand_info.name,
        cpu.accumulator,
        cpu.x_register,
        cpu.y_register,
        cpu.status_register,
        cpu.stack_pointer,
        cpu.cycles
    )
}
