use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_bne(&mut self, _opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let target = opt_address.expect("BUG: branch target of BNE should be present");
        self.branch(!self.get_status_flag(StatusFlag::Zero), target)
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_bne_branches_on_nonzero() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.program_counter = 0x2000;
        cpu.set_status_flag(StatusFlag::Zero, false);
        let cycles = cpu.handle_bne(None, Some(0x2010));
        assert_eq!(cpu.program_counter, 0x2010);
        assert_eq!(cycles, 1);

        cpu.set_status_flag(StatusFlag::Zero, true);
        let cycles = cpu.handle_bne(None, Some(0x2030));
        assert_eq!(cpu.program_counter, 0x2010);
        assert_eq!(cycles, 0);
    }
}
