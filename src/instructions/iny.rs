use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_iny(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.y_register = self.y_register.wrapping_add(1);

        self.set_status_flag(StatusFlag::Zero, self.y_register == 0);
        self.set_status_flag(StatusFlag::Negative, (self.y_register & 0x80) != 0);

        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_iny_increments() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.y_register = 0x7F;
        cpu.handle_iny(None, None);
        assert_eq!(cpu.y_register, 0x80);
        assert!(cpu.get_status_flag(StatusFlag::Negative));
    }
}
