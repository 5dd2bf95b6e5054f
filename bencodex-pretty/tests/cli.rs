use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};

fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME"))
        .expect("Must be able to find bencodex-pretty binary")
}

/// Runs `command`, expects it to fail and returns what it printed to stderr.
fn failure_message(command: &mut Command) -> String {
    let output = command.output().expect("Must be able to run bencodex-pretty");
    assert!(!output.status.success(), "Command unexpectedly succeeded");
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn basic_stdin_test() {
    cmd()
        .write_stdin(b"li1ei2ee")
        .assert()
        .success()
        .stdout("[\n\t1\n\t2\n]\n");
}

#[test]
fn scalars() {
    cmd().write_stdin(b"n").assert().success().stdout("null\n");
    cmd().write_stdin(b"t").assert().success().stdout("true\n");
    cmd()
        .write_stdin(b"i-123456789012345678901234567890e")
        .assert()
        .success()
        .stdout("-123456789012345678901234567890\n");
    cmd()
        .write_stdin(b"4:a\"\x00\xff")
        .assert()
        .success()
        .stdout("b\"a\\\"\\x00\\xff\"\n");
    cmd()
        .write_stdin("u6:h\u{e9}llo".as_bytes())
        .assert()
        .success()
        .stdout("\"h\u{e9}llo\"\n");
}

#[test]
fn dicts_are_printed_in_canonical_order() {
    cmd()
        .write_stdin(b"d1:ku1:v2:k3du1:k1:veu2:k2ltfee")
        .assert()
        .success()
        .stdout(
            "{\n\tb\"k\": \"v\"\n\tb\"k3\": {\n\t\t\"k\": b\"v\"\n\t}\n\t\"k2\": [\n\t\ttrue\n\t\tfalse\n\t]\n}\n",
        );
}

#[test]
fn hex_input() {
    cmd()
        .arg("-x")
        .write_stdin("6c 69-31:65\n6e_65")
        .assert()
        .success()
        .stdout("[\n\t1\n\tnull\n]\n");

    let message = failure_message(cmd().arg("--hex-input").write_stdin("6c6"));
    assert!(message.contains("odd number of hexadecimal digits"), "{}", message);
}

#[test]
fn invalid_input_fails() {
    let message = failure_message(cmd().write_stdin(b"i01e"));
    assert!(message.contains("Could not parse \"stdin\" as bencodex"), "{}", message);

    let message = failure_message(cmd().write_stdin(b"i1ei2e"));
    assert!(message.contains("after the end of the value"), "{}", message);
}

#[test]
fn basic_file_test() {
    let tmpdir = TempDir::new().expect("Must be able to create temp dir");
    let f1 = tmpdir.child("f1.bencodex");
    f1.write_binary(b"li1ei2ee")
        .expect("Must be able to create temp file");
    let f1p = f1.to_str().expect("Temp file path was not valid unicode");

    cmd()
        .arg(f1p)
        .assert()
        .success()
        .stdout("[\n\t1\n\t2\n]\n");

    let f2 = tmpdir.child("f2.bencodex");
    f2.write_binary(b"du3:aaali123eee")
        .expect("Must be able to create temp file");
    let f2p = f2.to_str().expect("Temp file path was not valid unicode");

    cmd()
        .arg(f2p)
        .assert()
        .success()
        .stdout("{\n\t\"aaa\": [\n\t\t123\n\t]\n}\n");

    cmd()
        .arg(f1p)
        .arg(f2p)
        .assert()
        .success()
        .stdout("[\n\t1\n\t2\n]\n{\n\t\"aaa\": [\n\t\t123\n\t]\n}\n");

    let missing = tmpdir.child("missing.bencodex");
    let message = failure_message(cmd().arg(missing.path()));
    assert!(message.contains("Could not read file from path"), "{}", message);
}
