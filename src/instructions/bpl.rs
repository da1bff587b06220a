use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_bpl(&mut self, _opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let target = opt_address.expect("BUG: branch target of BPL should be present");
        self.branch(!self.get_status_flag(StatusFlag::Negative), target)
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_bpl_branches_on_positive() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.program_counter = 0x2000;
        cpu.set_status_flag(StatusFlag::Negative, false);
        let cycles = cpu.handle_bpl(None, Some(0x2008));
        assert_eq!(cpu.program_counter, 0x2008);
        assert_eq!(cycles, 1);
    }
}
