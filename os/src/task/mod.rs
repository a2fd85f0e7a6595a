//! Task management: the ready queue, hart-local processor slots, and the
//! two dispatcher policies (preempt, terminate).

mod context;
mod manager;
mod processor;
mod switch;
mod task;

use alloc::sync::Arc;

use log::info;

use crate::config::MAX_SYSCALL_NUM;
use crate::loader;
use crate::timer::get_time_ms;

use context::TaskContext;
use manager::add_task;
use processor::{schedule, take_current_task};
use task::TaskControlBlock;

pub use processor::{current_task, run_tasks};
pub use task::TaskStatus;

/// Build a control block for every loaded app and queue them in load order.
pub fn init() {
    let apps = loader::load_apps();
    let num_tasks = apps.len();
    for app in &apps {
        add_task(Arc::new(TaskControlBlock::new(app)));
    }
    info!("[kernel] {} tasks ready", num_tasks);
}

/// The running task yields or is preempted: back to Ready, requeued,
/// rescheduled later through the identical restore path.
pub fn suspend_current_and_run_next() {
    let task = take_current_task().unwrap();

    let mut task_inner = task.inner_exclusive_access();
    let task_cx_ptr = &mut task_inner.task_cx as *mut TaskContext;
    task_inner.task_status = TaskStatus::Ready;
    drop(task_inner);

    add_task(task);
    schedule(task_cx_ptr);
}

/// The running task is done (or was killed): mark it Exited and drop it.
/// Its TrapContext is never restored again.
pub fn exit_current_and_run_next(exit_code: i32) -> ! {
    let task = take_current_task().unwrap();

    let mut inner = task.inner_exclusive_access();
    inner.task_status = TaskStatus::Exited;
    inner.exit_code = Some(exit_code);
    drop(inner);
    info!(
        "[kernel] app {} (#{}) exited with code {}",
        task.name, task.app_id, exit_code
    );
    drop(task);

    let mut _unused = TaskContext::zero_init();
    schedule(&mut _unused as *mut TaskContext);
    unreachable!("an exited task was rescheduled");
}

/// Bump the running task's counter for `syscall_id`.
pub fn count_syscall(syscall_id: usize) {
    if syscall_id >= MAX_SYSCALL_NUM {
        return;
    }
    let task = current_task().unwrap();
    task.inner_exclusive_access().syscall_times[syscall_id] += 1;
}

/// Snapshot for `sys_task_info`: status, per-syscall counts and ms elapsed
/// since the first dispatch.
pub fn current_task_info() -> (TaskStatus, [u32; MAX_SYSCALL_NUM], usize) {
    let task = current_task().unwrap();
    let inner = task.inner_exclusive_access();
    let time = inner.first_dispatched.map_or(0, |t| get_time_ms() - t);
    (inner.task_status, inner.syscall_times, time)
}
