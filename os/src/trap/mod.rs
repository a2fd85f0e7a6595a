//! Trap entry/exit and the dispatcher behind the single vector `__alltraps`.
//!
//! Every trap from user mode funnels through `__alltraps` (trap.S), which
//! swaps stacks, saves the interrupted context on the task's kernel stack
//! and calls [`trap_handler`]. The handler returns the context to resume;
//! control falls through to `__restore`, which drops back to user mode via
//! `sret`. Supervisor interrupts stay masked the whole time the kernel
//! runs, so the save and restore windows cannot be re-entered.

pub mod context;

use core::arch::global_asm;

use log::{error, trace};
use riscv::register::{
    scause::{self, Exception, Interrupt, Trap},
    sie, stval, stvec,
    utvec::TrapMode,
};

use crate::syscall::syscall;
use crate::task::{exit_current_and_run_next, suspend_current_and_run_next};
use crate::timer::set_next_trigger;

pub use context::TrapContext;

global_asm!(include_str!("trap.S"));

/// Point stvec at the shared trap vector. A trap taken while the kernel
/// itself runs lands on the same vector with the wrong stack parked in
/// sscratch; that is unrecoverable and means a kernel bug, not a condition
/// this layer handles.
pub fn init() {
    extern "C" {
        fn __alltraps();
    }
    unsafe {
        stvec::write(__alltraps as usize, TrapMode::Direct);
    }
}

pub fn enable_timer_interrupt() {
    unsafe {
        sie::set_stimer();
    }
}

#[no_mangle]
pub fn trap_handler(cx: &mut TrapContext) -> &mut TrapContext {
    let scause = scause::read();
    let stval = stval::read();
    match scause.cause() {
        Trap::Exception(Exception::UserEnvCall) => {
            trace!("[kernel] ecall from U, syscall id = {}", cx.syscall_id());
            // resume past the ecall instruction
            cx.sepc += 4;
            let ret = syscall(cx.syscall_id(), cx.syscall_args()) as usize;
            cx.set_return_value(ret);
        }
        Trap::Exception(Exception::StoreFault)
        | Trap::Exception(Exception::StorePageFault)
        | Trap::Exception(Exception::LoadFault)
        | Trap::Exception(Exception::LoadPageFault)
        | Trap::Exception(Exception::InstructionFault)
        | Trap::Exception(Exception::InstructionPageFault) => {
            error!(
                "[kernel] {:?} in application, bad addr = {:#x}, bad instruction = {:#x}, kernel killed it.",
                scause.cause(),
                stval,
                cx.sepc
            );
            exit_current_and_run_next(-2);
        }
        Trap::Exception(Exception::IllegalInstruction) => {
            error!(
                "[kernel] IllegalInstruction in application, bad instruction = {:#x}, kernel killed it.",
                cx.sepc
            );
            exit_current_and_run_next(-3);
        }
        Trap::Interrupt(Interrupt::SupervisorTimer) => {
            set_next_trigger();
            suspend_current_and_run_next();
        }
        _ => {
            panic!(
                "Unsupported trap {:?}, stval = {:#x}!",
                scause.cause(),
                stval
            );
        }
    }
    cx
}
