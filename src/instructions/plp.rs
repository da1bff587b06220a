use crate::cpu6502::CPU;

impl CPU {
    pub(crate) fn handle_plp(&mut self, _opt_value: Option<u8>, _opt_address: Option<u16>) -> u8 {
        let pulled = self.pop_u8();
        self.restore_status_register(pulled);
        return 0;
    }
}
