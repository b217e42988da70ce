// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for export table dumping.

use purpl_deps::exports::{ExportFormat, codegen, library_ident, parse_tool_output};

const DUMPBIN_SDL2: &str = "\
Dump of file SDL2.dll

File Type: DLL

  Section contains the following exports for SDL2.dll

    ordinal hint RVA      name

          1    0 0001A2B0 SDL_Init
          2    1 0001A300 SDL_Quit
          3    2 0002F110 SDL_CreateWindow

  Summary

       2A000 .text
";

#[test]
fn exports_pe_pipeline_from_dumpbin_output() {
    let names = parse_tool_output(ExportFormat::Pe, DUMPBIN_SDL2).unwrap();
    let source = codegen::render(
        ExportFormat::Pe,
        &library_ident("deps/win-x64/bin/SDL2.dll".as_ref()),
        &names,
    );

    assert!(source.contains("EXTERN_C void (*__imp_SDL_CreateWindow)(void) = (void (*)(void))0;"));
    assert!(source.contains("EXTERN_C void init_SDL2_dll_ptrs(HMODULE dll)\n{\n"));
    assert!(source.contains("\t*(void **)(&__imp_SDL_Quit) = GetProcAddress(dll, \"SDL_Quit\");\n"));
    assert_eq!(source.matches("GetProcAddress").count(), 3);
}

#[test]
fn exports_pe_rejects_foreign_output() {
    let err = parse_tool_output(ExportFormat::Pe, "nm: SDL2.dll: file format not recognized")
        .unwrap_err();
    assert!(err.to_string().contains("missing the 'ordinal hint RVA"));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn exports_dump_of_a_real_binary() {
    use purpl_deps::core::process::builder::ProcessBuilder;
    use purpl_deps::exports::dump_exports;

    if !ProcessBuilder::exists("nm") {
        return;
    }

    // every Rust executable exports `main`
    let binary = std::env::current_exe().unwrap();
    let temp = tempfile::tempdir().unwrap();
    let output = temp.path().join("ptrs.c");

    let count = dump_exports(&binary, &output, ExportFormat::Posix)
        .await
        .unwrap();
    assert!(count > 0);

    let source = std::fs::read_to_string(&output).unwrap();
    assert!(source.starts_with("#ifdef __cplusplus\n"));
    assert!(source.contains("EXTERN_C uint64_t (*__imp_main)(...) = (uint64_t (*)(...))0;"));
    assert!(source.contains(&format!(
        "EXTERN_C void init_{}_ptrs(void *so)",
        library_ident(&binary)
    )));
    assert!(source.contains("\t*(void **)(&__imp_main) = dlsym(so, \"main\");\n"));
}
