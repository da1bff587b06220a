use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_tay(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        self.y_register = self.accumulator;

        self.set_status_flag(StatusFlag::Zero, self.y_register == 0);
        self.set_status_flag(StatusFlag::Negative, (self.y_register & 0x80) != 0);

        return 0;
    }
}
