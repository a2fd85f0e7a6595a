#[derive(Clone, Copy)]
#[repr(C)]
pub struct TaskContext {
    ra: usize,
    sp: usize,
    s: [usize; 12], // s0-s11
}

impl TaskContext {
    pub fn zero_init() -> Self {
        Self {
            ra: 0,
            sp: 0,
            s: [0; 12],
        }
    }

    /// A context whose resumption falls into `__restore` with sp already at
    /// the task's parked TrapContext; first dispatch thereby reuses the
    /// ordinary trap exit path.
    pub fn goto_restore(kernel_sp: usize) -> Self {
        extern "C" {
            fn __restore();
        }
        Self {
            ra: __restore as usize,
            sp: kernel_sp,
            s: [0; 12],
        }
    }
}
