//! Process management syscalls

use log::trace;

use crate::config::MAX_SYSCALL_NUM;
use crate::task::{
    current_task, current_task_info, exit_current_and_run_next, suspend_current_and_run_next,
    TaskStatus,
};
use crate::timer::get_time_us;

#[repr(C)]
#[derive(Debug)]
pub struct TimeVal {
    pub sec: usize,
    pub usec: usize,
}

/// Task information reported by `sys_task_info`.
#[repr(C)]
pub struct TaskInfo {
    /// Task status in its life cycle
    pub status: TaskStatus,
    /// Number of times each syscall was invoked by the task
    pub syscall_times: [u32; MAX_SYSCALL_NUM],
    /// ms since the task was first dispatched
    pub time: usize,
}

/// Task exits and submits an exit code; it is never scheduled again.
pub fn sys_exit(exit_code: i32) -> ! {
    trace!("kernel: sys_exit, app {:?}", current_task().map(|t| t.name));
    exit_current_and_run_next(exit_code);
}

/// Current task gives up the hart for other tasks.
pub fn sys_yield() -> isize {
    trace!("kernel: sys_yield");
    suspend_current_and_run_next();
    0
}

/// Write the current time into user memory, split into seconds and
/// microseconds. Without paging, user pointers are honored directly.
pub fn sys_get_time(ts: *mut TimeVal, _tz: usize) -> isize {
    trace!("kernel: sys_get_time");
    if ts.is_null() {
        return -1;
    }
    let us = get_time_us();
    unsafe {
        *ts = TimeVal {
            sec: us / 1_000_000,
            usec: us % 1_000_000,
        };
    }
    0
}

/// Report status, syscall counts and running time of the calling task.
pub fn sys_task_info(ti: *mut TaskInfo) -> isize {
    trace!("kernel: sys_task_info");
    if ti.is_null() {
        return -1;
    }
    let (status, syscall_times, time) = current_task_info();
    unsafe {
        *ti = TaskInfo {
            status,
            syscall_times,
            time,
        };
    }
    0
}
