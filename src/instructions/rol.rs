use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_rol(&mut self, opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of ROL should be present");
        let carry_in = if self.get_status_flag(StatusFlag::Carry) { 0x01 } else { 0x00 };
        let result = (value << 1) | carry_in;

        // Rotate through carry: bit 7 out, previous carry into bit 0.
        self.set_status_flag(StatusFlag::Carry, (value & 0x80) != 0);
        self.set_status_flag(StatusFlag::Zero, result == 0);
        self.set_status_flag(StatusFlag::Negative, (result & 0x80) != 0);

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
    fn test_rol_rotates_carry_into_bit_0() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.set_status_flag(StatusFlag::Carry, true);
        cpu.handle_rol(Some(0b0100_0000), None);
        assert_eq!(cpu.accumulator, 0b1000_0001);
        assert!(!cpu.get_status_flag(StatusFlag::Carry));
        assert!(cpu.get_status_flag(StatusFlag::Negative));
    }

    #[test]
    fn test_rol_bit_7_into_carry() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.handle_rol(Some(0b1000_0000), None);
        assert_eq!(cpu.accumulator, 0x00);
        assert!(cpu.get_status_flag(StatusFlag::Carry));
        assert!(cpu.get_status_flag(StatusFlag::Zero));
    }

    #[test]
    fn test_rol_memory_mode_writes_back() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.write_u8(0x0010, 0x40);
        cpu.handle_rol(Some(0x40), Some(0x0010));
        assert_eq!(cpu.read_u8(0x0010), 0x80);
    }
}
