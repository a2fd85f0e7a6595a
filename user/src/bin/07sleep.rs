#![no_std]
#![no_main]

#[macro_use]
extern crate user_lib;

use user_lib::{get_time, yield_};

#[no_mangle]
fn main() -> i32 {
    let start = get_time();
    assert!(start >= 0);
    let wait_for = start + 1000;
    while get_time() < wait_for {
        yield_();
    }
    let now = get_time();
    assert!(now >= wait_for);
    println!("Test sleep OK!");
    0
}
