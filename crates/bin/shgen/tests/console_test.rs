use std::path::PathBuf;

use raven_ibl::ShKernel;
use raven_log::LevelFilter;
use shgen::console;

#[test]
fn defaults() {
    let (vars, ignored) = console::parse(["shgen", "-i", "sky.dds"]).unwrap();

    assert_eq!(vars.input.as_deref(), Some("sky.dds"));
    assert_eq!(vars.output, PathBuf::from("diffuse.json"));
    assert_eq!(vars.preview, PathBuf::from("diffuse.dds"));
    assert!(!vars.verbose);
    assert_eq!(vars.kernel, ShKernel::PreScaledIrradiance);
    assert_eq!(vars.level, LevelFilter::Info);
    assert!(vars.log_file.is_none());
    assert!(ignored.is_empty());
}

#[test]
fn every_option() {
    let (vars, ignored) = console::parse([
        "shgen", "--input", "envs/*.dds", "-o", "out/sh.json", "-v", "--preview", "out/preview.dds",
        "-k", "irradiance", "--level=debug", "--log-file", "shgen.log",
    ]).unwrap();

    assert_eq!(vars.input.as_deref(), Some("envs/*.dds"));
    assert_eq!(vars.output, PathBuf::from("out/sh.json"));
    assert_eq!(vars.preview, PathBuf::from("out/preview.dds"));
    assert!(vars.verbose);
    assert_eq!(vars.kernel, ShKernel::Irradiance);
    assert_eq!(vars.level, LevelFilter::Debug);
    assert_eq!(vars.log_file, Some(PathBuf::from("shgen.log")));
    assert!(ignored.is_empty());
}

#[test]
fn unknown_flags_and_their_values_are_ignored() {
    let (vars, ignored) = console::parse([
        "shgen", "--quality", "high", "extra", "-i", "sky.dds", "stray", "-x",
    ]).unwrap();

    assert_eq!(vars.input.as_deref(), Some("sky.dds"));
    assert_eq!(ignored, vec!["--quality", "high", "extra", "stray", "-x"]);
}

#[test]
fn flag_without_value_is_ignored() {
    let (vars, ignored) = console::parse(["shgen", "-v", "-i"]).unwrap();

    assert!(vars.input.is_none());
    assert!(vars.verbose);
    assert_eq!(ignored, vec!["-i"]);

    let (vars, ignored) = console::parse(["shgen", "-o", "-v"]).unwrap();
    assert_eq!(vars.output, PathBuf::from("diffuse.json"));
    assert_eq!(ignored, vec!["-o"]);
}

#[test]
fn bad_values_are_errors() {
    assert!(console::parse(["shgen", "-i", "sky.dds", "-k", "cosine"]).is_err());
    assert!(console::parse(["shgen", "-i", "sky.dds", "-l", "loud"]).is_err());
}

#[test]
fn single_dash_long_names_are_unknown() {
    let (vars, ignored) = console::parse(["shgen", "-input", "sky.dds", "-level=debug"]).unwrap();

    assert!(vars.input.is_none());
    assert_eq!(vars.level, LevelFilter::Info);
    assert_eq!(ignored, vec!["-input", "sky.dds", "-level=debug"]);

    // an attached short value is still fine
    let (vars, ignored) = console::parse(["shgen", "-isky.dds", "-ltrace"]).unwrap();
    assert_eq!(vars.input.as_deref(), Some("sky.dds"));
    assert_eq!(vars.level, LevelFilter::Trace);
    assert!(ignored.is_empty());
}
