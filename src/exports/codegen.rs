// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! C source generation for runtime-bound exports.

use std::fmt::Write as _;

use super::ExportFormat;

const PREAMBLE: &str = "\
#ifdef __cplusplus
#define EXTERN_C extern \"C\"
#else // __cplusplus
#define EXTERN_C
#endif // __cplusplus
";

/// Renders function pointer definitions and the `init_<lib>_ptrs` loader.
///
/// Only `__imp_<name>` pointers are defined. Nothing is emitted under the
/// exported name itself, so the fragment links next to the library's own
/// import library or shared object.
#[must_use]
pub fn render(format: ExportFormat, lib: &str, names: &[String]) -> String {
    let mut out = String::from(PREAMBLE);
    out.push('\n');

    // writing into a String cannot fail
    for name in names {
        let _ = match format {
            ExportFormat::Pe => writeln!(
                out,
                "EXTERN_C void (*__imp_{name})(void) = (void (*)(void))0;"
            ),
            ExportFormat::Posix => writeln!(
                out,
                "EXTERN_C uint64_t (*__imp_{name})(...) = (uint64_t (*)(...))0;"
            ),
        };
    }

    let (param, loader) = match format {
        ExportFormat::Pe => ("HMODULE dll", "GetProcAddress(dll"),
        ExportFormat::Posix => ("void *so", "dlsym(so"),
    };
    let _ = writeln!(out, "\nEXTERN_C void init_{lib}_ptrs({param})\n{{");
    for name in names {
        let _ = writeln!(out, "\t*(void **)(&__imp_{name}) = {loader}, \"{name}\");");
    }
    out.push_str("}\n");
    out
}
