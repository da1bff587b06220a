use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_ror(&mut self, opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of ROR should be present");
        let carry_in = if self.get_status_flag(StatusFlag::Carry) { 0x80 } else { 0x00 };
        let result = (value >> 1) | carry_in;

        // Rotate through carry: bit 0 out, previous carry into bit 7.
        self.set_status_flag(StatusFlag::Carry, (value & 0x01) != 0);
        self.set_status_flag(StatusFlag::Zero, result == 0);
        self.set_status_flag(StatusFlag::Negative, (result & 0x80) != 0);

        match opt_address {
            Some(addr) => self.write_u8(addr, result),
            None => self.accumulator = result,
        }
        return 0;
    }
}
