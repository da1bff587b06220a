use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_txa(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.accumulator = self.x_register;

        self.set_status_flag(StatusFlag::Zero, self.accumulator == 0);
        self.set_status_flag(StatusFlag::Negative, (self.accumulator & 0x80) != 0);

        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_txa_transfers_x_register() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.x_register = 0x42;
        cpu.handle_txa(None, None);
        assert_eq!(cpu.accumulator, 0x42);
        assert!(!cpu.get_status_flag(StatusFlag::Zero));
        assert!(!cpu.get_status_flag(StatusFlag::Negative));
    }
}
