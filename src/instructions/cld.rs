use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    // The decimal flag can be set and cleared but arithmetic never consults
    // it on this CPU.
    pub(crate) fn handle_cld(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.set_status_flag(StatusFlag::DecimalMode, false);
        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_cld_clears_decimal_mode() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.set_status_flag(StatusFlag::DecimalMode, true);
        cpu.handle_cld(None, None);
        assert!(!cpu.get_status_flag(StatusFlag::DecimalMode));
    }
}
