//! System call dispatch.
//!
//! Ids follow the RISC-V Linux convention the user library uses. An unknown
//! id terminates the calling task; a misbehaving application must not take
//! the kernel down with it.

mod fs;
mod process;

use log::error;

use crate::task;

pub use process::{TaskInfo, TimeVal};

const SYSCALL_WRITE: usize = 64;
const SYSCALL_EXIT: usize = 93;
const SYSCALL_YIELD: usize = 124;
const SYSCALL_GET_TIME: usize = 169;
const SYSCALL_TASK_INFO: usize = 410;

pub fn syscall(syscall_id: usize, args: [usize; 3]) -> isize {
    task::count_syscall(syscall_id);
    match syscall_id {
        SYSCALL_WRITE => fs::sys_write(args[0], args[1] as *const u8, args[2]),
        SYSCALL_EXIT => process::sys_exit(args[0] as i32),
        SYSCALL_YIELD => process::sys_yield(),
        SYSCALL_GET_TIME => process::sys_get_time(args[0] as *mut TimeVal, args[1]),
        SYSCALL_TASK_INFO => process::sys_task_info(args[0] as *mut TaskInfo),
        _ => {
            error!(
                "[kernel] Unsupported syscall_id {}, kernel killed it.",
                syscall_id
            );
            task::exit_current_and_run_next(-4);
        }
    }
}
