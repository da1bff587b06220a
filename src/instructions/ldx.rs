use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_ldx(&mut self, opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of LDX should be present");
        self.x_register = value;

        self.set_status_flag(StatusFlag::Zero, self.x_register == 0);
        self.set_status_flag(StatusFlag::Negative, (self.x_register & 0x80) != 0);

        return 0;
    }
}
