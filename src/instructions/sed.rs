use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_sed(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.set_status_flag(StatusFlag::DecimalMode, true);
        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_sed_sets_decimal_mode() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.handle_sed(None, None);
        assert!(cpu.get_status_flag(StatusFlag::DecimalMode));
    }
}
