use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_cpy(&mut self, opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of CPY should be present");
        let result = self.y_register.wrapping_sub(value);

        self.set_status_flag(StatusFlag::Carry, self.y_register >= value);
        self.set_status_flag(StatusFlag::Zero, self.y_register == value);
        self.set_status_flag(StatusFlag::Negative, (result & 0x80) != 0);

        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_cpy_compares_y_register() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.y_register = 0x80;
        cpu.handle_cpy(Some(0x01), None);
        assert!(cpu.get_status_flag(StatusFlag::Carry));
        assert!(!cpu.get_status_flag(StatusFlag::Zero));
        // 0x80 - 0x01 = 0x7F, bit 7 clear
        assert!(!cpu.get_status_flag(StatusFlag::Negative));
    }
}
