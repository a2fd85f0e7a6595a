//! Hart-local scheduling state and the idle control flow.
//!
//! Each hart owns a [`Processor`] slot holding the task it is currently
//! running and the idle context `run_tasks` loops in. State is indexed by
//! hart id so nothing on the trap path relies on a process-wide singleton,
//! even though this build only ever starts the boot hart.

use alloc::sync::Arc;
use core::array;

use lazy_static::lazy_static;
use log::info;

use crate::config::MAX_HARTS;
use crate::sbi::shutdown;
use crate::sync::UPSafeCell;
use crate::timer::get_time_ms;

use super::context::TaskContext;
use super::manager::fetch_task;
use super::switch::__switch;
use super::task::{TaskControlBlock, TaskStatus};

pub struct Processor {
    current: Option<Arc<TaskControlBlock>>,
    idle_task_cx: TaskContext,
}

impl Processor {
    pub fn new() -> Self {
        Self {
            current: None,
            idle_task_cx: TaskContext::zero_init(),
        }
    }

    fn idle_task_cx_ptr(&mut self) -> *mut TaskContext {
        &mut self.idle_task_cx as *mut _
    }

    pub fn take_current(&mut self) -> Option<Arc<TaskControlBlock>> {
        self.current.take()
    }

    pub fn current(&self) -> Option<Arc<TaskControlBlock>> {
        self.current.as_ref().map(Arc::clone)
    }
}

/// Logical id of the executing hart. Only the boot hart is started in this
/// build, so the id is constant.
pub fn hart_id() -> usize {
    0
}

lazy_static! {
    static ref PROCESSORS: [UPSafeCell<Processor>; MAX_HARTS] =
        array::from_fn(|_| unsafe { UPSafeCell::new(Processor::new()) });
}

fn local_processor() -> &'static UPSafeCell<Processor> {
    &PROCESSORS[hart_id()]
}

/// The idle loop: fetch ready tasks and switch into them until the ready
/// queue drains, then report completion and shut down.
pub fn run_tasks() -> ! {
    loop {
        let mut processor = local_processor().exclusive_access();
        if let Some(task) = fetch_task() {
            let idle_task_cx_ptr = processor.idle_task_cx_ptr();
            let mut task_inner = task.inner_exclusive_access();
            let next_task_cx_ptr = &task_inner.task_cx as *const TaskContext;
            task_inner.task_status = TaskStatus::Running;
            if task_inner.first_dispatched.is_none() {
                task_inner.first_dispatched = Some(get_time_ms());
            }
            drop(task_inner);
            processor.current = Some(task);
            // release the processor before control leaves the idle flow
            drop(processor);
            unsafe {
                __switch(idle_task_cx_ptr, next_task_cx_ptr);
            }
        } else {
            drop(processor);
            info!("[kernel] all applications completed, shutting down");
            shutdown(false);
        }
    }
}

pub fn take_current_task() -> Option<Arc<TaskControlBlock>> {
    local_processor().exclusive_access().take_current()
}

pub fn current_task() -> Option<Arc<TaskControlBlock>> {
    local_processor().exclusive_access().current()
}

/// Switch from a task's control flow back into this hart's idle loop.
pub fn schedule(switched_task_cx_ptr: *mut TaskContext) {
    let mut processor = local_processor().exclusive_access();
    let idle_task_cx_ptr = processor.idle_task_cx_ptr();
    drop(processor);
    unsafe {
        __switch(switched_task_cx_ptr, idle_task_cx_ptr);
    }
}
