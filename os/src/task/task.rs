use core::cell::RefMut;

use crate::config::MAX_SYSCALL_NUM;
use crate::loader;
use crate::sync::UPSafeCell;

use super::context::TaskContext;

/// `repr(usize)` so the discriminant crossing the user ABI in `TaskInfo`
/// has a defined layout.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(usize)]
pub enum TaskStatus {
    Ready = 0,
    Running = 1,
    Exited = 2,
}

pub struct TaskControlBlock {
    pub app_id: usize,
    pub name: &'static str,
    inner: UPSafeCell<TaskControlBlockInner>,
}

pub struct TaskControlBlockInner {
    pub task_status: TaskStatus,
    pub task_cx: TaskContext,
    pub syscall_times: [u32; MAX_SYSCALL_NUM],
    /// ms timestamp of the first dispatch; None until scheduled once
    pub first_dispatched: Option<usize>,
    pub exit_code: Option<i32>,
}

impl TaskControlBlock {
    /// Control block for a loaded app: its initial TrapContext is parked on
    /// the app's kernel stack and the task context aimed at `__restore`.
    pub fn new(app: &loader::LoadedApp) -> Self {
        let kernel_sp = loader::init_app_cx(app.id, app.entry);
        Self {
            app_id: app.id,
            name: app.name,
            inner: unsafe {
                UPSafeCell::new(TaskControlBlockInner {
                    task_status: TaskStatus::Ready,
                    task_cx: TaskContext::goto_restore(kernel_sp),
                    syscall_times: [0; MAX_SYSCALL_NUM],
                    first_dispatched: None,
                    exit_code: None,
                })
            },
        }
    }

    pub fn inner_exclusive_access(&self) -> RefMut<'_, TaskControlBlockInner> {
        self.inner.exclusive_access()
    }
}
