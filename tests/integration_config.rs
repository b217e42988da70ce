// purpl-deps: Purpl Engine dependency builder
//
// SPDX-FileCopyrightText: 2026 Purpl Engine Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the layered loader against the compiled-in manifest.

use purpl_deps::config::Config;
use purpl_deps::config::loader::ConfigLoader;
use purpl_deps::core::platform::Platform;
use purpl_deps::utility::encoding::Encoding;

fn builtin() -> Config {
    Config::builder().with_builtin_manifest().build().unwrap()
}

fn names_for(config: &Config, tag: &str) -> Vec<String> {
    let platform: Platform = tag.parse().unwrap();
    config
        .dependencies_for(&platform)
        .map(|dep| dep.name.clone())
        .collect()
}

// =============================================================================
// Built-in manifest
// =============================================================================

#[test]
fn config_builtin_dependencies_per_platform() {
    let config = builtin();

    assert_eq!(
        names_for(&config, "win-x64"),
        ["bgfx", "cglm", "glew", "phnt", "sdl2", "stb", "vulkan"]
    );
    assert_eq!(
        names_for(&config, "linux-x64"),
        ["bgfx", "cglm", "glew", "sdl2", "stb"]
    );
    assert_eq!(
        names_for(&config, "mac-arm64"),
        ["cglm", "glew", "sdl2", "stb"]
    );
}

#[test]
fn config_builtin_aliases_and_vars() {
    let config = builtin();
    assert_eq!(config.aliases["headers"], ["phnt", "stb"]);
    assert_eq!(config.vars["glew_version"], "2.2.0");
    assert_eq!(config.paths.root.to_str(), Some("deps"));
}

#[test]
fn config_builtin_every_dependency_fetches() {
    let config = builtin();
    for dep in &config.deps {
        assert!(dep.fetch.is_some(), "{} has no fetch step", dep.name);
    }
}

#[test]
fn config_builtin_setup_steps_guard_kept_sources() {
    let config = builtin();

    let bgfx = config.dependency("bgfx").unwrap();
    let creates: Vec<_> = bgfx.setup.iter().filter_map(|s| s.creates.as_deref()).collect();
    assert_eq!(creates, ["<deps>/bx", "<deps>/bimg"]);
    let msbuild = bgfx.setup.iter().find(|s| s.run.first().is_some_and(|p| p == "msbuild"));
    assert_eq!(msbuild.unwrap().encoding, Some(Encoding::Oem));

    let glew = config.dependency("glew").unwrap();
    assert_eq!(glew.setup[0].creates.as_deref(), Some("<deps>/glew"));
    assert_eq!(glew.setup[1].creates.as_deref(), Some("<deps>/glew"));
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_layer_replaces_dependency_list() {
    let config = ConfigLoader::new()
        .with_builtin_manifest()
        .add_toml_str(
            r#"
[[deps]]
name = "zlib"
fetch = { run = ["git", "clone", "https://github.com/madler/zlib", "<deps>/zlib"] }
"#,
        )
        .build()
        .unwrap();

    assert_eq!(names_for(&config, "linux-x64"), ["zlib"]);
    // sections the layer does not mention are kept
    assert_eq!(config.aliases["graphics"].len(), 4);
}

#[test]
fn config_layer_overrides_vars_and_globals() {
    let config = ConfigLoader::new()
        .with_builtin_manifest()
        .add_toml_str("[vars]\nglew_version = \"2.1.0\"\n\n[global]\njobs = 3\n")
        .apply_override("global/keep_src=true")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.vars["glew_version"], "2.1.0");
    assert_eq!(config.global.jobs(), 3);
    assert!(config.global.keep_src);
}

#[test]
fn config_rejects_invalid_layers() {
    let unknown = ConfigLoader::new()
        .with_builtin_manifest()
        .add_toml_str("[global]\nredownload = true\n")
        .build();
    assert!(unknown.is_err());

    let zero_jobs = ConfigLoader::new()
        .with_builtin_manifest()
        .apply_override("global/jobs=0")
        .unwrap()
        .build();
    let err = zero_jobs.unwrap_err();
    assert!(err.to_string().contains("must be at least 1"), "{err:#}");
}

#[test]
fn config_options_listing() {
    let options = builtin().format_options();
    assert!(options.iter().any(|line| line.starts_with("paths.root")));
    assert!(
        options
            .iter()
            .any(|line| line.starts_with("aliases.headers") && line.ends_with("= phnt, stb"))
    );
}
