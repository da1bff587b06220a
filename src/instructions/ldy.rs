use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_ldy(&mut self, opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of LDY should be present");
        self.y_register = value;

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
    fn test_ldy_load_value() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.handle_ldy(Some(0x42), None);
        assert_eq!(cpu.y_register, 0x42);
        assert!(!cpu.get_status_flag(StatusFlag::Zero));
        assert!(!cpu.get_status_flag(StatusFlag::Negative));
    }

    #[test]
    fn test_ldy_flags() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.handle_ldy(Some(0x00), None);
        assert!(cpu.get_status_flag(StatusFlag::Zero));
        cpu.handle_ldy(Some(0x90), None);
        assert!(cpu.get_status_flag(StatusFlag::Negative));
    }
}
