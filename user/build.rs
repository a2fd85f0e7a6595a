use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

// Must agree with APP_BASE_ADDRESS / APP_SIZE_LIMIT in the kernel's config.
const BASE_ADDRESS: usize = 0x8040_0000;
const APP_SIZE_LIMIT: usize = 0x2_0000;

/// Each binary is linked at its own slot in the application region; slots
/// are assigned by sorted binary name so the layout is stable.
fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let bin_dir = manifest_dir.join("src/bin");
    println!("cargo:rerun-if-changed={}", bin_dir.display());

    let mut bins: Vec<String> = fs::read_dir(&bin_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let path = e.path();
            if path.extension()?.to_str()? == "rs" {
                Some(path.file_stem()?.to_str()?.to_string())
            } else {
                None
            }
        })
        .collect();
    bins.sort();

    for (i, name) in bins.iter().enumerate() {
        let base = BASE_ADDRESS + i * APP_SIZE_LIMIT;
        let script = out_dir.join(format!("linker_{}.ld", name));
        let mut f = File::create(&script).unwrap();
        writeln!(
            f,
            "OUTPUT_ARCH(riscv)
ENTRY(_start)

SECTIONS
{{
    . = {:#x};
    .text : {{
        *(.text.entry)
        *(.text .text.*)
    }}
    .rodata : {{
        *(.rodata .rodata.*)
        *(.srodata .srodata.*)
    }}
    .data : {{
        *(.data .data.*)
        *(.sdata .sdata.*)
    }}
    .bss : {{
        start_bss = .;
        *(.bss .bss.*)
        *(.sbss .sbss.*)
        end_bss = .;
    }}
    /DISCARD/ : {{
        *(.eh_frame)
        *(.debug*)
    }}
}}",
            base
        )
        .unwrap();
        println!(
            "cargo:rustc-link-arg-bin={}=-T{}",
            name,
            script.display()
        );
    }
}
