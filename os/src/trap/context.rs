use riscv::register::sstatus::{self, Sstatus, SPP};

/// Complete resumable state of one execution context at the moment of a
/// privilege transition. Filled by `__alltraps`, consumed by `__restore`;
/// the field layout must match the frame offsets hard-coded in `trap.S`.
#[repr(C)]
pub struct TrapContext {
    /// General registers, indexed by architectural register number.
    /// Slot 0 mirrors the hardwired zero register and is never stored to or
    /// loaded from. Slot 2 holds the pre-trap stack pointer, which travels
    /// through `sscratch` rather than being saved directly.
    pub x: [usize; 32],
    /// Privilege and interrupt-enable state that `sret` will return to.
    pub sstatus: Sstatus,
    /// Address execution resumes at.
    pub sepc: usize,
}

impl TrapContext {
    pub fn set_sp(&mut self, sp: usize) {
        self.x[2] = sp;
    }

    /// Syscall id arrives in a7.
    pub fn syscall_id(&self) -> usize {
        self.x[17]
    }

    /// Syscall arguments a0..a2.
    pub fn syscall_args(&self) -> [usize; 3] {
        [self.x[10], self.x[11], self.x[12]]
    }

    /// Deposit a syscall return value in a0.
    pub fn set_return_value(&mut self, ret: usize) {
        self.x[10] = ret;
    }

    /// The context a task is first dispatched from: user privilege, `sepc`
    /// at the entry point, sp at the user stack top, every other register
    /// zeroed. First dispatch and trap return then share `__restore`.
    pub fn app_init_context(entry: usize, sp: usize) -> Self {
        let mut sstatus = sstatus::read();
        sstatus.set_spp(SPP::User);
        let mut cx = Self {
            x: [0; 32],
            sstatus,
            sepc: entry,
        };
        cx.set_sp(sp);
        cx
    }
}
