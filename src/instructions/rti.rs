use crate::cpu6502::CPU;

impl CPU {
    pub(crate) fn handle_rti(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        // Status first, then the return address. Unlike RTS there is no +1:
        // the interrupt sequence pushed the exact resume address.
        let pulled = self.pop_u8();
        self.restore_status_register(pulled);
        self.program_counter = self.pop_u16();
        return 0;
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu6502::{StatusFlag, new_cpu};
    use crate::memory::NesMemory;

    #[test]
    fn test_rti_restores_status_and_pc() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.stack_pointer = 0xFD;
        // Push in interrupt order: return address, then status.
        cpu.push_u16(0x8002);
        cpu.push_u8(0xC1); // N, V, C
        cpu.handle_rti(None, None);
        assert_eq!(cpu.program_counter, 0x8002, "no +1 adjustment on RTI");
        assert!(cpu.get_status_flag(StatusFlag::Negative));
        assert!(cpu.get_status_flag(StatusFlag::Overflow));
        assert!(cpu.get_status_flag(StatusFlag::Carry));
        assert_eq!(cpu.stack_pointer, 0xFD);
    }

    #[test]
    fn test_rti_discards_b_and_forces_bit_5() {
        let mut cpu = new_cpu(Bus::new(NesMemory::new()));
        cpu.push_u16(0x9000);
        cpu.push_u8(0x30); // pushed B and bit 5 markers
        cpu.handle_rti(None, None);
        assert!(!cpu.get_status_flag(StatusFlag::BreakCommand));
        assert!(cpu.get_status_flag(StatusFlag::Unused));
    }
}
