use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_dec(&mut self, opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of DEC should be present");
        let addr = opt_address.expect("BUG: effective address of DEC should be present");
        let result = value.wrapping_sub(1);

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
    fn test_dec_decrements_memory() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.write_u8(0x0010, 0x01);
        cpu.handle_dec(Some(0x01), Some(0x0010));
        assert_eq!(cpu.read_u8(0x0010), 0x00);
        assert!(cpu.get_status_flag(StatusFlag::Zero));
    }

    #[test]
    fn test_dec_wraps_below_zero() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.write_u8(0x0010, 0x00);
        cpu.handle_dec(Some(0x00), Some(0x0010));
        assert_eq!(cpu.read_u8(0x0010), 0xFF);
        assert!(cpu.get_status_flag(StatusFlag::Negative));
    }
}
