use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_clc(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.set_status_flag(StatusFlag::Carry, false);
        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_clc_clears_carry() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.set_status_flag(StatusFlag::Carry, true);
        cpu.handle_clc(None, None);
        assert!(!cpu.get_status_flag(StatusFlag::Carry));
    }
}
