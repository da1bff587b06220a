use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_php(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        // The pushed copy always has the break and bit 5 markers set; the
        // live status register is not modified.
        let status = self.status_register
            | (1 << (StatusFlag::BreakCommand as u8))
            | (1 << (StatusFlag::Unused as u8));
        self.push_u8(status);
        return 0;
    }
}
