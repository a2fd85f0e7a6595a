use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

const TARGET: &str = "riscv64gc-unknown-none-elf";

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());

    println!(
        "cargo:rustc-link-arg=-T{}",
        manifest_dir.join("src/linker.ld").display()
    );
    println!(
        "cargo:rerun-if-changed={}",
        manifest_dir.join("src/linker.ld").display()
    );

    generate_link_app(&manifest_dir);
}

/// Emit `link_app.S` into OUT_DIR: the `_num_app` bounds table, the
/// `_app_names` string table and one `.incbin` per built user ELF.
/// Apps that have not been built yet are skipped with a warning so the
/// kernel always links.
fn generate_link_app(manifest_dir: &PathBuf) {
    let ws_root = manifest_dir.parent().unwrap().to_path_buf();
    let bin_src = ws_root.join("user/src/bin");
    let elf_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| ws_root.join("target"))
        .join(TARGET)
        .join("release");

    println!("cargo:rerun-if-changed={}", bin_src.display());
    println!("cargo:rerun-if-changed={}", elf_dir.display());

    let mut names: Vec<String> = match fs::read_dir(&bin_src) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let path = e.path();
                if path.extension()?.to_str()? == "rs" {
                    Some(path.file_stem()?.to_str()?.to_string())
                } else {
                    None
                }
            })
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();

    let mut apps: Vec<(String, PathBuf)> = Vec::new();
    for name in names {
        let elf = elf_dir.join(&name);
        if elf.is_file() {
            apps.push((name, elf));
        } else {
            println!("cargo:warning=user app `{}` not built yet, skipping", name);
        }
    }

    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap()).join("link_app.S");
    let mut f = File::create(&out_path).unwrap();

    writeln!(
        f,
        "    .align 3
    .section .data
    .global _num_app
_num_app:
    .quad {}",
        apps.len()
    )
    .unwrap();
    for i in 0..apps.len() {
        writeln!(f, "    .quad app_{}_start", i).unwrap();
    }
    if apps.is_empty() {
        writeln!(f, "    .quad _num_app").unwrap();
    } else {
        writeln!(f, "    .quad app_{}_end", apps.len() - 1).unwrap();
    }

    writeln!(
        f,
        "
    .global _app_names
_app_names:"
    )
    .unwrap();
    for (name, _) in &apps {
        writeln!(f, "    .string \"{}\"", name).unwrap();
    }

    for (i, (_, elf)) in apps.iter().enumerate() {
        writeln!(
            f,
            "
    .section .data
    .global app_{i}_start
    .global app_{i}_end
    .align 3
app_{i}_start:
    .incbin \"{}\"
app_{i}_end:",
            elf.display(),
            i = i
        )
        .unwrap();
    }
}
