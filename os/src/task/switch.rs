use core::arch::global_asm;

use super::context::TaskContext;

global_asm!(include_str!("switch.S"));

extern "C" {
    /// Save the callee-saved context of the current control flow into
    /// `current_task_cx_ptr` and resume the one in `next_task_cx_ptr`.
    pub fn __switch(current_task_cx_ptr: *mut TaskContext, next_task_cx_ptr: *const TaskContext);
}
