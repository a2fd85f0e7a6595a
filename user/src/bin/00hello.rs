#![no_std]
#![no_main]

#[macro_use]
extern crate user_lib;

use user_lib::write;

#[no_mangle]
fn main() -> i32 {
    let msg = b"Hello, world from user mode program!\n";
    assert_eq!(write(1, msg), msg.len() as isize);
    println!("Test hello OK!");
    0
}
