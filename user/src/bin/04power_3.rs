#![no_std]
#![no_main]

#[macro_use]
extern crate user_lib;

use user_lib::yield_;

const LEN: usize = 100;

#[no_mangle]
fn main() -> i32 {
    let p = 3u64;
    let m = 998244353u64;
    let iter: usize = 200000;
    let mut s = [0u64; LEN];
    let mut cur = 0usize;
    s[cur] = 1;
    for i in 1..=iter {
        let next = if cur + 1 == LEN { 0 } else { cur + 1 };
        s[next] = s[cur] * p % m;
        cur = next;
        if i % 10000 == 0 {
            println!("power_3 [{}/{}]", i / 10000, iter / 10000);
            yield_();
        }
    }
    println!("{}^{} = {}(MOD {})", p, iter, s[cur], m);
    // the computation spans many traps; a corrupted save/restore changes it
    assert_eq!(s[cur], 871008973);
    println!("Test power_3 OK!");
    0
}
