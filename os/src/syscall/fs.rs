use log::{error, trace};

use crate::print;

const FD_STDOUT: usize = 1;

pub fn sys_write(fd: usize, buf: *const u8, len: usize) -> isize {
    match fd {
        FD_STDOUT => {
            trace!("sys_write: fd={}, buf={:p}, len={}", fd, buf, len);
            let buffer = unsafe { core::slice::from_raw_parts(buf, len) };
            match core::str::from_utf8(buffer) {
                Ok(s) => {
                    print!("{}", s);
                    len as isize
                }
                Err(_) => -1,
            }
        }
        _ => {
            error!("sys_write: unsupported fd {}", fd);
            -1
        }
    }
}
