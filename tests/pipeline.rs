use glibc_abi_collector::{
    classified_manifests, collect_target_abi, output, AbiError, TargetTable,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn run_all(source: &Path, dest: &Path) {
    let table = TargetTable::builtin().unwrap();
    let manifests = classified_manifests(source).unwrap();
    output::prepare_dest(dest).unwrap();

    for spec in table.iter() {
        let abi = collect_target_abi(&table, spec.name, &manifests).unwrap();
        output::write_target_abi(dest, spec.name, &abi).unwrap();
    }
}

#[test]
fn round_trip_x86_64() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("glibc");
    let dest = dir.path().join("abi");

    write_file(
        &source.join("sysdeps/unix/sysv/linux/x86_64/libc.abilist"),
        "GLIBC_2.2.5 malloc F\nGLIBC_2.2.5 __libc_errno D 0x10\n",
    );

    run_all(&source, &dest);

    let written = fs::read_to_string(dest.join("x86_64-linux-gnu.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();

    assert_eq!(
        parsed,
        serde_json::json!({
            "libc": {
                "data": {
                    "__libc_errno": {"address": "0x10", "version": "GLIBC_2.2.5"}
                },
                "functions": {
                    "malloc": {"version": "GLIBC_2.2.5"}
                }
            }
        })
    );

    // The same manifest also feeds the other x86_64 flavors, but not arm.
    let static_pie =
        fs::read_to_string(dest.join("x86_64-linux-gnu-static-pie.json")).unwrap();
    assert_eq!(static_pie, written);

    let arm = fs::read_to_string(dest.join("arm-linux-gnueabi.json")).unwrap();
    assert_eq!(arm, "{}");
}

#[test]
fn subarch_qualifier_selects_one_target_family() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("glibc");
    let dest = dir.path().join("abi");

    write_file(
        &source.join("sysdeps/unix/sysv/linux/arm/le/libm.abilist"),
        "GLIBC_2.4 sin F\n",
    );

    run_all(&source, &dest);

    let le = fs::read_to_string(dest.join("arm-linux-gnueabi.json")).unwrap();
    assert!(le.contains("sin"));

    // Big-endian arm targets must not pick it up.
    let be = fs::read_to_string(dest.join("armeb-linux-gnueabi.json")).unwrap();
    assert_eq!(be, "{}");
}

#[test]
fn one_file_per_configured_target() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("glibc");
    let dest = dir.path().join("abi");

    fs::create_dir_all(source.join("sysdeps")).unwrap();
    run_all(&source, &dest);

    let table = TargetTable::builtin().unwrap();
    let mut written: Vec<String> = fs::read_dir(&dest)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();

    assert_eq!(written.len(), table.len());
    assert!(written.contains(&"mips64-linux-gnu-n64.json".to_string()));
}

#[test]
fn idempotent_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("glibc");

    write_file(
        &source.join("sysdeps/unix/sysv/linux/x86_64/libc.abilist"),
        "GLIBC_2.2.5 malloc F\nGLIBC_2.2.5 free F\nGLIBC_2.2.5 errno D 0x4\n",
    );
    write_file(
        &source.join("sysdeps/unix/sysv/linux/x86_64/64/libmvec.abilist"),
        "GLIBC_2.22 _ZGVbN2v_cos F\n",
    );
    write_file(&source.join("sysdeps/mach/hurd/i386/libc.abilist"), "GLIBC_2.2.6 mach_msg F\n");

    let dest_a = dir.path().join("a");
    let dest_b = dir.path().join("b");
    run_all(&source, &dest_a);
    run_all(&source, &dest_b);

    let table = TargetTable::builtin().unwrap();
    for spec in table.iter() {
        let name = format!("{}.json", spec.name);
        let a = fs::read(dest_a.join(&name)).unwrap();
        let b = fs::read(dest_b.join(&name)).unwrap();
        assert_eq!(a, b, "{name} differs between runs");
    }
}

#[test]
fn zero_byte_manifest_never_becomes_a_library() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("glibc");
    let dest = dir.path().join("abi");

    write_file(&source.join("sysdeps/unix/sysv/linux/x86_64/libnsl.abilist"), "");

    run_all(&source, &dest);

    let out = fs::read_to_string(dest.join("x86_64-linux-gnu.json")).unwrap();
    assert_eq!(out, "{}");
}

#[test]
fn duplicate_library_across_triples_aborts() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("glibc");

    // x86_64-linux-gnu accepts both the bare arch and the 64 subarch; the
    // same library in both is an ambiguous mapping.
    write_file(
        &source.join("sysdeps/unix/sysv/linux/x86_64/libc.abilist"),
        "GLIBC_2.2.5 malloc F\n",
    );
    write_file(
        &source.join("sysdeps/unix/sysv/linux/x86_64/64/libc.abilist"),
        "GLIBC_2.2.5 malloc F\n",
    );

    let table = TargetTable::builtin().unwrap();
    let manifests = classified_manifests(&source).unwrap();

    let err = collect_target_abi(&table, "x86_64-linux-gnu", &manifests).unwrap_err();
    assert!(matches!(err, AbiError::DuplicateLibrary { .. }));
}

#[test]
fn unexpected_path_shape_aborts() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("glibc");

    write_file(&source.join("sysdeps/mach/i386/libc.abilist"), "GLIBC_2.2.6 f F\n");

    assert!(matches!(
        classified_manifests(&source),
        Err(AbiError::PathShape { .. })
    ));
}

#[test]
fn unhandled_symbol_type_aborts() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("glibc");

    write_file(
        &source.join("sysdeps/unix/sysv/linux/x86_64/libc.abilist"),
        "GLIBC_2.2.5 weird_sym Q\n",
    );

    let table = TargetTable::builtin().unwrap();
    let manifests = classified_manifests(&source).unwrap();

    let err = collect_target_abi(&table, "x86_64-linux-gnu", &manifests).unwrap_err();
    match err {
        AbiError::UnhandledSymbolType { path, fields } => {
            assert!(path.ends_with("sysdeps/unix/sysv/linux/x86_64/libc.abilist"));
            assert_eq!(fields, vec!["GLIBC_2.2.5", "weird_sym", "Q"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}
