#![no_std]
#![no_main]
#![feature(linkage)]

#[macro_use]
pub mod console;
mod lang_items;
mod syscall;

pub use syscall::{TaskInfo, TimeVal, MAX_SYSCALL_NUM};

#[no_mangle]
#[link_section = ".text.entry"]
pub extern "C" fn _start() -> ! {
    clear_bss();
    exit(main());
}

#[linkage = "weak"]
#[no_mangle]
fn main() -> i32 {
    panic!("Cannot find main!");
}

fn clear_bss() {
    extern "C" {
        fn start_bss();
        fn end_bss();
    }
    (start_bss as usize..end_bss as usize).for_each(|addr| unsafe {
        (addr as *mut u8).write_volatile(0);
    });
}

pub fn write(fd: usize, buf: &[u8]) -> isize {
    syscall::sys_write(fd, buf)
}

pub fn exit(exit_code: i32) -> ! {
    syscall::sys_exit(exit_code)
}

pub fn yield_() -> isize {
    syscall::sys_yield()
}

/// Current time in milliseconds.
pub fn get_time() -> isize {
    let mut time = TimeVal::new();
    match syscall::sys_get_time(&mut time, 0) {
        0 => ((time.sec & 0xffff) * 1000 + time.usec / 1000) as isize,
        _ => -1,
    }
}

pub fn task_info(info: &mut TaskInfo) -> isize {
    syscall::sys_task_info(info)
}
