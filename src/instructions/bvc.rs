use crate::cpu6502::{CPU, StatusFlag};

impl CPU {
    pub(crate) fn handle_bvc(&mut self, _opt_value: Option<u8>, opt_address: Option<u16>) -> u8 {
        let target = opt_address.expect("BUG: branch target of BVC should be present");
        self.branch(!self.get_status_flag(StatusFlag::Overflow), target)
    }
}
