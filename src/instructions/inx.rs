use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_inx(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.x_register = self.x_register.wrapping_add(1);

        self.set_status_flag(StatusFlag::Zero, self.x_register == 0);
        self.set_status_flag(StatusFlag::Negative, (self.x_register & 0x80) != 0);

        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_inx_increments() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.x_register = 0x41;
        cpu.handle_inx(None, None);
        assert_eq!(cpu.x_register, 0x42);
    }

    #[test]
    fn test_inx_wraps_to_zero() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.x_register = 0xFF;
        cpu.handle_inx(None, None);
        assert_eq!(cpu.x_register, 0x00);
        assert!(cpu.get_status_flag(StatusFlag::Zero));
    }
}
