use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_asl(&mut self, opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of ASL should be present");
        let result = value << 1;

        // Bit 7 falls out into the carry.
        self.set_status_flag(StatusFlag::Carry, (value & 0x80) != 0);
        self.set_status_flag(StatusFlag::Zero, result == 0);
        self.set_status_flag(StatusFlag::Negative, (result & 0x80) != 0);

        // Accumulator mode has no effective address and writes back to A.
        match opt_address {
            Some(addr) => self.write_u8(addr, result),
            None => self.accumulator = result,
        }
        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_asl_accumulator_mode() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.accumulator = 0b0100_0001;
        cpu.handle_asl(Some(cpu.accumulator), None);
        assert_eq!(cpu.accumulator, 0b1000_0010);
        assert!(!cpu.get_status_flag(StatusFlag::Carry));
        assert!(cpu.get_status_flag(StatusFlag::Negative));
    }

    #[test]
    fn test_asl_shifts_bit_7_into_carry() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.handle_asl(Some(0b1000_0000), None);
        assert_eq!(cpu.accumulator, 0x00);
        assert!(cpu.get_status_flag(StatusFlag::Carry));
        assert!(cpu.get_status_flag(StatusFlag::Zero));
    }

    #[test]
    fn test_asl_memory_mode_writes_back() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.write_u8(0x0010, 0x21);
        cpu.handle_asl(Some(0x21), Some(0x0010));
        assert_eq!(cpu.read_u8(0x0010), 0x42);
        // The accumulator is not involved in the memory form.
        assert_eq!(cpu.accumulator, 0x00);
    }
}
