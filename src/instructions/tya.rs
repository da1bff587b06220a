use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_tya(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.accumulator = self.y_register;

        self.set_status_flag(StatusFlag::Zero, self.accumulator == 0);
        self.set_status_flag(StatusFlag::Negative, (self.accumulator & 0x80) != 0);

        return 0;
    }
}
