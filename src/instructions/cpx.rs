use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_cpx(&mut self, opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        let value = opt_value.expect("BUG: memory value of CPX should be present");
        let result = self.x_register.wrapping_sub(value);

        self.set_status_flag(StatusFlag::Carry, self.x_register >= value);
        self.set_status_flag(StatusFlag::Zero, self.x_register == value);
        self.set_status_flag(StatusFlag::Negative, (result & 0x80) != 0);

        return 0;
    }
}
