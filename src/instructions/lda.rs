use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_lda(&mut self, opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of LDA should be present");
        self.accumulator = value;

        self.set_status_flag(StatusFlag::Zero, self.accumulator == 0);
        self.set_status_flag(StatusFlag::Negative, (self.accumulator & 0x80) != 0);

        return 0;
    }
}
