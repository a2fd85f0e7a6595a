#![no_std]
#![no_main]

#[macro_use]
extern crate user_lib;

use user_lib::{get_time, task_info, yield_, TaskInfo};

const SYSCALL_WRITE: usize = 64;
const SYSCALL_YIELD: usize = 124;
const SYSCALL_GET_TIME: usize = 169;
const SYSCALL_TASK_INFO: usize = 410;
const STATUS_RUNNING: usize = 1;

#[no_mangle]
fn main() -> i32 {
    let t = get_time();
    assert!(t >= 0);
    println!("current time: {}ms", t);
    yield_();
    let info = &mut TaskInfo::new();
    assert_eq!(task_info(info), 0);
    assert_eq!(info.status, STATUS_RUNNING);
    assert!(info.syscall_times[SYSCALL_WRITE] >= 1);
    assert!(info.syscall_times[SYSCALL_YIELD] >= 1);
    assert!(info.syscall_times[SYSCALL_GET_TIME] >= 1);
    assert!(info.syscall_times[SYSCALL_TASK_INFO] >= 1);
    println!("Test task_info OK!");
    0
}
