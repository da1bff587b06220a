use crate::memory_map;

// Backing storage for everything the CPU can address except the PPU register
// bank, which the bus routes to the picture processor. The 2KB of RAM are kept
// in their architectural segments (zero page, stack page, general RAM) so the
// stack and zero page can be reasoned about independently.
pub struct NesMemory {
    zero_page: [u8; 256],                                    // 0x0000 - 0x00FF
    stack: [u8; 256],                                        // 0x0100 - 0x01FF
    ram: [u8; 1536],                                         // 0x0200 - 0x07FF
    io_registers: [u8; memory_map::IO_REGISTERS_2_SIZE],     // 0x4000 - 0x401F (APU + I/O)
    expansion_rom: [u8; 8160],                               // 0x4020 - 0x5FFF
    save_ram: [u8; 8192],                                    // 0x6000 - 0x7FFF
    prg_rom_lower: [u8; memory_map::PRG_ROM_BANK_SIZE],      // 0x8000 - 0xBFFF
    prg_rom_upper: [u8; memory_map::PRG_ROM_BANK_SIZE],      // 0xC000 - 0xFFFF
}

impl NesMemory {
    pub fn new() -> Self {
        Self {
            zero_page: [0; 256],
            stack: [0; 256],
            ram: [0; 1536],
            io_registers: [0; memory_map::IO_REGISTERS_2_SIZE],
            expansion_rom: [0; 8160],
            save_ram: [0; 8192],
            prg_rom_lower: [0; memory_map::PRG_ROM_BANK_SIZE],
            prg_rom_upper: [0; memory_map::PRG_ROM_BANK_SIZE],
        }
    }

    pub fn read_u8(&self, addr: u16) -> u8 {
        match addr {
            // RAM (0x0000 - 0x1FFF)
            // The 2KB RAM is mirrored 4 times. Reading 0x0000 is the same as 0x0800.
            0x0000..=0x1FFF => {
                let mirrored_addr = addr & memory_map::RAM_MIRROR_MASK;
                match mirrored_addr {
                    0x0000..=0x00FF => self.zero_page[mirrored_addr as usize],
                    0x0100..=0x01FF => {
                        self.stack[(mirrored_addr - memory_map::STACK_BASE_ADDRESS) as usize]
                    }
                    _ => self.ram[(mirrored_addr - memory_map::GENERAL_RAM_BASE_ADDRESS) as usize],
                }
            }

            // APU and I/O registers (0x4000 - 0x401F)
            0x4000..=0x401F => {
                self.io_registers[(addr - memory_map::IO_REGISTERS_2_BASE_ADDRESS) as usize]
            }

            // Expansion ROM (0x4020 - 0x5FFF)
            0x4020..=0x5FFF => {
                self.expansion_rom[(addr - memory_map::EXPANSION_ROM_BASE_ADDRESS) as usize]
            }

            // Save RAM (0x6000 - 0x7FFF)
            0x6000..=0x7FFF => self.save_ram[(addr - memory_map::SAVE_RAM_BASE_ADDRESS) as usize],

            // PRG ROM (0x8000 - 0xFFFF), two 16KB banks
            0x8000..=0xBFFF => {
                self.prg_rom_lower[(addr - memory_map::PRG_ROM_LOWER_BASE_ADDRESS) as usize]
            }
            0xC000..=0xFFFF => {
                self.prg_rom_upper[(addr - memory_map::PRG_ROM_UPPER_BASE_ADDRESS) as usize]
            }

            // 0x2000 - 0x3FFF belongs to the PPU register bank and is routed by the bus.
            _ => 0,
        }
    }

    pub fn write_u8(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1FFF => {
                let mirrored_addr = addr & memory_map::RAM_MIRROR_MASK;
                match mirrored_addr {
                    0x0000..=0x00FF => self.zero_page[mirrored_addr as usize] = data,
                    0x0100..=0x01FF => {
                        self.stack[(mirrored_addr - memory_map::STACK_BASE_ADDRESS) as usize] = data
                    }
                    _ => {
                        self.ram[(mirrored_addr - memory_map::GENERAL_RAM_BASE_ADDRESS) as usize] =
                            data
                    }
                }
            }

            0x4000..=0x401F => {
                self.io_registers[(addr - memory_map::IO_REGISTERS_2_BASE_ADDRESS) as usize] = data
            }

            // Expansion ROM and PRG ROM are not writable. The address decodes but
            // nothing stores the value, so the write is dropped.
            0x4020..=0x5FFF => {}
            0x8000..=0xFFFF => {
                println!("Attempted write to PRG ROM at address {:04X}", addr);
            }

            0x6000..=0x7FFF => {
                self.save_ram[(addr - memory_map::SAVE_RAM_BASE_ADDRESS) as usize] = data
            }

            _ => {}
        }
    }

    /// Loads a program image into PRG ROM at setup time.
    ///
    /// A 16KB image is mirrored into both banks (NROM-16 carts wire the
    /// single bank at both 0x8000 and 0xC000, which keeps the interrupt
    /// vectors reachable at the top of memory). A 32KB image fills both
    /// banks directly.
    pub fn load_prg_rom(&mut self, program: &[u8]) -> Result<(), String> {
        if program.len() > 2 * memory_map::PRG_ROM_BANK_SIZE {
            return Err(format!(
                "PRG ROM image of {} bytes exceeds the 32KB address window",
                program.len()
            ));
        }

        if program.len() <= memory_map::PRG_ROM_BANK_SIZE {
            self.prg_rom_lower[..program.len()].copy_from_slice(program);
            self.prg_rom_upper[..program.len()].copy_from_slice(program);
        } else {
            let (lower, upper) = program.split_at(memory_map::PRG_ROM_BANK_SIZE);
            self.prg_rom_lower.copy_from_slice(lower);
            self.prg_rom_upper[..upper.len()].copy_from_slice(upper);
        }
        Ok(())
    }

    /// Loads cartridge data into the expansion ROM window.
    pub fn load_expansion_rom(&mut self, data: &[u8]) -> Result<(), String> {
        if data.len() > self.expansion_rom.len() {
            return Err(format!(
                "expansion ROM image of {} bytes exceeds the {} byte window",
                data.len(),
                self.expansion_rom.len()
            ));
        }
        self.expansion_rom[..data.len()].copy_from_slice(data);
        Ok(())
    }
}

impl Default for NesMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_mirroring() {
        let mut memory = NesMemory::new();
        memory.write_u8(0x0000, 0xAB);
        // The same physical cell is visible at every 2KB mirror.
        assert_eq!(memory.read_u8(0x0000), 0xAB);
        assert_eq!(memory.read_u8(0x0800), 0xAB);
        assert_eq!(memory.read_u8(0x1000), 0xAB);
        assert_eq!(memory.read_u8(0x1800), 0xAB);

        // Writing through a mirror updates the same cell.
        memory.write_u8(0x1FFF, 0x55);
        assert_eq!(memory.read_u8(0x07FF), 0x55);
    }

    #[test]
    fn test_ram_segments_are_distinct() {
        let mut memory = NesMemory::new();
        memory.write_u8(0x0042, 0x11); // zero page
        memory.write_u8(0x0142, 0x22); // stack page
        memory.write_u8(0x0242, 0x33); // general RAM
        assert_eq!(memory.read_u8(0x0042), 0x11);
        assert_eq!(memory.read_u8(0x0142), 0x22);
        assert_eq!(memory.read_u8(0x0242), 0x33);
    }

    #[test]
    fn test_uninitialized_reads_return_zero() {
        let memory = NesMemory::new();
        assert_eq!(memory.read_u8(0x0000), 0x00);
        assert_eq!(memory.read_u8(0x4017), 0x00);
        assert_eq!(memory.read_u8(0x6123), 0x00);
        assert_eq!(memory.read_u8(0xFFFF), 0x00);
    }

    #[test]
    fn test_save_ram_is_writable() {
        let mut memory = NesMemory::new();
        memory.write_u8(0x6000, 0x99);
        memory.write_u8(0x7FFF, 0x77);
        assert_eq!(memory.read_u8(0x6000), 0x99);
        assert_eq!(memory.read_u8(0x7FFF), 0x77);
    }

    #[test]
    fn test_rom_writes_are_ignored() {
        let mut memory = NesMemory::new();
        memory.write_u8(0x4020, 0xAA);
        memory.write_u8(0x8000, 0xBB);
        memory.write_u8(0xFFFC, 0xCC);
        assert_eq!(memory.read_u8(0x4020), 0x00);
        assert_eq!(memory.read_u8(0x8000), 0x00);
        assert_eq!(memory.read_u8(0xFFFC), 0x00);
    }

    #[test]
    fn test_load_prg_rom_mirrors_single_bank() {
        let mut memory = NesMemory::new();
        let mut program = vec![0u8; memory_map::PRG_ROM_BANK_SIZE];
        program[0] = 0xA9;
        program[memory_map::PRG_ROM_BANK_SIZE - 4] = 0x00;
        program[memory_map::PRG_ROM_BANK_SIZE - 3] = 0x80;
        memory.load_prg_rom(&program).unwrap();

        // The single bank shows up in both halves of the window.
        assert_eq!(memory.read_u8(0x8000), 0xA9);
        assert_eq!(memory.read_u8(0xC000), 0xA9);
        // The reset vector lands at the top of the upper bank.
        assert_eq!(memory.read_u8(0xFFFC), 0x00);
        assert_eq!(memory.read_u8(0xFFFD), 0x80);
    }

    #[test]
    fn test_load_prg_rom_full_image() {
        let mut memory = NesMemory::new();
        let mut program = vec![0u8; 2 * memory_map::PRG_ROM_BANK_SIZE];
        program[0] = 0x11;
        program[memory_map::PRG_ROM_BANK_SIZE] = 0x22;
        memory.load_prg_rom(&program).unwrap();
        assert_eq!(memory.read_u8(0x8000), 0x11);
        assert_eq!(memory.read_u8(0xC000), 0x22);
    }

    #[test]
    fn test_load_prg_rom_too_big_fails() {
        let mut memory = NesMemory::new();
        let program = vec![0u8; 2 * memory_map::PRG_ROM_BANK_SIZE + 1];
        assert!(memory.load_prg_rom(&program).is_err());
    }

    #[test]
    fn test_load_expansion_rom() {
        let mut memory = NesMemory::new();
        memory.load_expansion_rom(&[0xDE, 0xAD]).unwrap();
        assert_eq!(memory.read_u8(0x4020), 0xDE);
        assert_eq!(memory.read_u8(0x4021), 0xAD);
        assert!(memory.load_expansion_rom(&vec![0u8; 8161]).is_err());
    }
}
