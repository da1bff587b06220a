use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_inc(&mut self, opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of INC should be present");
        let addr = opt_address.expect("BUG: effective address of INC should be present");
        let result = value.wrapping_add(1);

        self.write_u8(addr, result);
        self.set_status_flag(StatusFlag::Zero, result == 0);
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
    fn test_inc_increments_memory() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.write_u8(0x0010, 0x41);
        cpu.handle_inc(Some(0x41), Some(0x0010));
        assert_eq!(cpu.read_u8(0x0010), 0x42);
        assert!(!cpu.get_status_flag(StatusFlag::Zero));
    }

    #[test]
    fn test_inc_wraps_to_zero() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.write_u8(0x0010, 0xFF);
        cpu.handle_inc(Some(0xFF), Some(0x0010));
        assert_eq!(cpu.read_u8(0x0010), 0x00);
        assert!(cpu.get_status_flag(StatusFlag::Zero));
        assert!(!cpu.get_status_flag(StatusFlag::Negative));
    }
}
