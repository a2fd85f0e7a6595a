//! Loading of the embedded user applications and their stacks.
//!
//! The generated `link_app.S` links every built user ELF into the kernel
//! image together with a bounds table and a name table. Each app's LOAD
//! segments are copied to their linked addresses inside the application
//! region; kernel and user stacks are statically allocated per app slot.

use core::arch::{asm, global_asm};

use alloc::vec::Vec;
use lazy_static::lazy_static;
use log::{error, warn};
use xmas_elf::{program, ElfFile};

use crate::config::{
    APP_BASE_ADDRESS, APP_SIZE_LIMIT, KERNEL_STACK_SIZE, MAX_APP_NUM, USER_STACK_SIZE,
};
use crate::println;
use crate::trap::TrapContext;

global_asm!(include_str!(concat!(env!("OUT_DIR"), "/link_app.S")));

#[repr(align(4096))]
#[derive(Clone, Copy)]
struct KernelStack {
    data: [u8; KERNEL_STACK_SIZE],
}

#[repr(align(4096))]
#[derive(Clone, Copy)]
struct UserStack {
    data: [u8; USER_STACK_SIZE],
}

// allocated in the data segment, one slot per app
static KERNEL_STACK: [KernelStack; MAX_APP_NUM] = [KernelStack {
    data: [0; KERNEL_STACK_SIZE],
}; MAX_APP_NUM];
static USER_STACK: [UserStack; MAX_APP_NUM] = [UserStack {
    data: [0; USER_STACK_SIZE],
}; MAX_APP_NUM];

impl KernelStack {
    fn get_sp(&self) -> usize {
        self.data.as_ptr() as usize + KERNEL_STACK_SIZE
    }

    /// Park a TrapContext at the stack top; returns its address, which is
    /// also the kernel sp a first dispatch enters `__restore` with.
    fn push_context(&self, cx: TrapContext) -> usize {
        let cx_ptr = (self.get_sp() - core::mem::size_of::<TrapContext>()) as *mut TrapContext;
        unsafe {
            *cx_ptr = cx;
        }
        cx_ptr as usize
    }
}

impl UserStack {
    fn get_sp(&self) -> usize {
        self.data.as_ptr() as usize + USER_STACK_SIZE
    }
}

/// Number of embedded apps, read from the head of the link_app table.
pub fn get_num_app() -> usize {
    extern "C" {
        fn _num_app();
    }
    unsafe { (_num_app as usize as *const usize).read_volatile() }
}

fn get_app_data(app_id: usize) -> &'static [u8] {
    extern "C" {
        fn _num_app();
    }
    let num_app_ptr = _num_app as usize as *const usize;
    let num_app = get_num_app();
    // [app_0_start, app_1_start, ..., app_{n-1}_start, app_{n-1}_end]
    let app_start = unsafe { core::slice::from_raw_parts(num_app_ptr.add(1), num_app + 1) };
    assert!(app_id < num_app);
    unsafe {
        core::slice::from_raw_parts(
            app_start[app_id] as *const u8,
            app_start[app_id + 1] - app_start[app_id],
        )
    }
}

lazy_static! {
    static ref APP_NAMES: Vec<&'static str> = {
        let num_app = get_num_app();
        extern "C" {
            fn _app_names();
        }
        let mut start = _app_names as usize as *const u8;
        let mut v = Vec::new();
        unsafe {
            for _ in 0..num_app {
                let mut end = start;
                while end.read_volatile() != b'\0' {
                    end = end.add(1);
                }
                let slice = core::slice::from_raw_parts(start, end as usize - start as usize);
                v.push(core::str::from_utf8(slice).unwrap());
                start = end.add(1);
            }
        }
        v
    };
}

fn app_name(app_id: usize) -> &'static str {
    APP_NAMES.get(app_id).copied().unwrap_or("?")
}

pub fn list_apps() {
    println!("/**** APPS ****");
    for app in APP_NAMES.iter() {
        println!("{}", app);
    }
    println!("**************/");
}

/// One successfully loaded application.
pub struct LoadedApp {
    pub id: usize,
    pub name: &'static str,
    pub entry: usize,
}

/// Copy every app's LOAD segments to their linked addresses and collect the
/// entry points. A malformed image, or one linked outside the application
/// region, is skipped with an error instead of corrupting kernel memory.
pub fn load_apps() -> Vec<LoadedApp> {
    extern "C" {
        fn ekernel();
    }
    assert!(
        ekernel as usize <= APP_BASE_ADDRESS,
        "kernel image overlaps the application region"
    );

    let num_app = get_num_app();
    if num_app == 0 {
        warn!("[kernel] no user applications embedded");
    }
    if num_app > MAX_APP_NUM {
        warn!(
            "[kernel] {} apps embedded, only the first {} will run",
            num_app, MAX_APP_NUM
        );
    }

    let mut apps = Vec::new();
    for app_id in 0..num_app.min(MAX_APP_NUM) {
        match load_app(app_id) {
            Ok(app) => apps.push(app),
            Err(msg) => error!("[kernel] skipping app {}: {}", app_name(app_id), msg),
        }
    }
    // the instruction fetch path must observe the freshly written code
    unsafe {
        asm!("fence.i");
    }
    apps
}

fn load_app(app_id: usize) -> Result<LoadedApp, &'static str> {
    let region_end = APP_BASE_ADDRESS + MAX_APP_NUM * APP_SIZE_LIMIT;
    let elf = ElfFile::new(get_app_data(app_id))?;
    for ph in elf.program_iter() {
        if ph.get_type()? != program::Type::Load {
            continue;
        }
        let start = ph.virtual_addr() as usize;
        let mem_size = ph.mem_size() as usize;
        let end = start.checked_add(mem_size).ok_or("LOAD segment overflows")?;
        if start < APP_BASE_ADDRESS || end > region_end {
            return Err("LOAD segment outside the application region");
        }
        let src = match ph.get_data(&elf)? {
            program::SegmentData::Undefined(data) => data,
            _ => return Err("unsupported segment data"),
        };
        if src.len() > mem_size {
            return Err("LOAD segment file size exceeds its memory size");
        }
        unsafe {
            // file image first, then the zero-initialized tail (bss)
            core::slice::from_raw_parts_mut(start as *mut u8, src.len()).copy_from_slice(src);
            core::slice::from_raw_parts_mut((start + src.len()) as *mut u8, mem_size - src.len())
                .fill(0);
        }
    }
    let entry = elf.header.pt2.entry_point() as usize;
    if entry < APP_BASE_ADDRESS || entry >= region_end {
        return Err("entry point outside the application region");
    }
    Ok(LoadedApp {
        id: app_id,
        name: app_name(app_id),
        entry,
    })
}

/// Push a task-creation TrapContext onto the app's kernel stack: user
/// privilege, `sepc` at the entry point, sp at the app's user stack top.
/// Returns the kernel sp the first dispatch will enter `__restore` with.
pub fn init_app_cx(app_id: usize, entry: usize) -> usize {
    KERNEL_STACK[app_id].push_context(TrapContext::app_init_context(
        entry,
        USER_STACK[app_id].get_sp(),
    ))
}
