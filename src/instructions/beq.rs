use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_beq(&mut self, _opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let target = opt_address.expect("BUG: branch target of BEQ should be present");
        self.branch(self.get_status_flag(StatusFlag::Zero), target)
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_beq_branches_on_zero() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.program_counter = 0x2000;
        cpu.set_status_flag(StatusFlag::Zero, true);
        let cycles = cpu.handle_beq(None, Some(0x2020));
        assert_eq!(cpu.program_counter, 0x2020);
        assert_eq!(cycles, 1);

        cpu.set_status_flag(StatusFlag::Zero, false);
        let cycles = cpu.handle_beq(None, Some(0x2040));
        assert_eq!(cpu.program_counter, 0x2020);
        assert_eq!(cycles, 0);
    }
}
