pub const USER_STACK_SIZE: usize = 4096 * 2;
pub const KERNEL_STACK_SIZE: usize = 4096 * 2;
pub const KERNEL_HEAP_SIZE: usize = 0x4_0000;
pub const MAX_APP_NUM: usize = 16;
pub const APP_BASE_ADDRESS: usize = 0x8040_0000;
pub const APP_SIZE_LIMIT: usize = 0x2_0000;
pub const MAX_SYSCALL_NUM: usize = 500;
pub const CLOCK_FREQ: usize = 12500000;

/// Number of harts this build drives. Hart-local state (the processor slots)
/// is indexed by hart id even though only the boot hart is ever started.
pub const MAX_HARTS: usize = 1;
