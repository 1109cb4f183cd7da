use mockall::mock;
use tomasim_core::SimError;
use tomasim_core::core::pipeline::engine::{Host, SyscallOutcome};
use tomasim_core::core::pipeline::signals::MemWidth;
use tomasim_core::soc::memory::OutOfBounds;

mock! {
    pub EngineHost {}
    impl Host for EngineHost {
        fn load(&mut self, addr: u64, width: MemWidth) -> Result<u64, OutOfBounds>;
        fn store(&mut self, addr: u64, width: MemWidth, value: u64) -> Result<(), OutOfBounds>;
        fn fetch(&mut self, pc: u64) -> Result<u32, OutOfBounds>;
        fn syscall(&mut self, code: u64, arg: u64, pc: u64) -> Result<SyscallOutcome, SimError>;
    }
}

/// `addi zero, zero, 0`.
pub const NOP: u32 = 0x0000_0013;

/// Host that serves `program` from address 0 and NOPs past its end.
///
/// Only fetch is programmed; tests add expectations for anything else.
pub fn program_host(program: Vec<u32>) -> MockEngineHost {
    let mut host = MockEngineHost::new();
    let _ = host.expect_fetch()
        .returning(move |pc| Ok(program.get((pc / 4) as usize).copied().unwrap_or(NOP)));
    host
}
